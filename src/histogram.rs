use crate::swatch::Swatch;
use std::collections::HashMap;

/// How many sampled pixels matched each named color.
///
/// Names are remembered in the order they were first counted. That order breaks ties when ranking: of two names with
/// the same count, the one counted first is ranked first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Swatch>", into = "Vec<Swatch>"))]
pub struct Histogram {
    counts: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more pixel for `name`.
    pub fn increment(&mut self, name: &str) {
        self.add(name, 1);
    }

    fn add(&mut self, name: &str, count: u32) {
        match self.index.get(name) {
            Some(&i) => self.counts[i].1 += count,
            None => {
                self.index.insert(name.to_string(), self.counts.len());
                self.counts.push((name.to_string(), count));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.index.get(name).map(|&i| self.counts[i].1)
    }

    /// The sum of every count, i.e. the number of matched pixels.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| *count as u64).sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate the names and their counts in the order the names were first counted.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Every color ranked by its count, highest first.
    pub fn ranked(&self) -> Vec<Swatch> {
        let mut swatches: Vec<_> = self.iter().map(|(name, count)| Swatch::new(name, count)).collect();

        // sort_by is stable, ties stay in first-counted order
        swatches.sort_by(|lhs, rhs| rhs.population().cmp(&lhs.population()));
        swatches
    }

    /// The `count` highest ranked colors, or all of them if `count` is zero.
    pub fn top(&self, count: usize) -> Vec<Swatch> {
        let mut ranked = self.ranked();

        if count > 0 {
            ranked.truncate(count);
        }

        ranked
    }
}

impl<S> FromIterator<(S, u32)> for Histogram
where
    S: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        let mut histogram = Histogram::new();

        for (name, count) in iter {
            histogram.add(name.as_ref(), count);
        }

        histogram
    }
}

impl From<Vec<Swatch>> for Histogram {
    fn from(swatches: Vec<Swatch>) -> Self {
        swatches
            .iter()
            .map(|swatch| (swatch.name(), swatch.population()))
            .collect()
    }
}

impl From<Histogram> for Vec<Swatch> {
    fn from(histogram: Histogram) -> Self {
        histogram
            .counts
            .into_iter()
            .map(|(name, count)| Swatch::new(name, count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(swatches: &[Swatch]) -> Vec<&str> {
        swatches.iter().map(Swatch::name).collect()
    }

    #[test]
    fn increment_counts_in_first_seen_order() {
        let mut histogram = Histogram::new();

        for name in ["pink", "blue", "pink", "green", "blue", "pink"] {
            histogram.increment(name);
        }

        assert_eq!(histogram.iter().collect::<Vec<_>>(), vec![("pink", 3), ("blue", 2), ("green", 1)]);
        assert_eq!(histogram.get("blue"), Some(2));
        assert_eq!(histogram.get("red"), None);
        assert_eq!(histogram.total(), 6);
    }

    #[test]
    fn ranked_sorts_by_count_descending() {
        let mut histogram = Histogram::new();

        for _ in 0..10 {
            histogram.increment("pink");
        }

        for _ in 0..90 {
            histogram.increment("blue");
        }

        assert_eq!(histogram.ranked(), vec![Swatch::new("blue", 90), Swatch::new("pink", 10)]);
    }

    #[test]
    fn ties_keep_first_counted_order() {
        let histogram: Histogram = [("black", 1), ("white", 3), ("blue", 1), ("red", 3), ("green", 1)]
            .into_iter()
            .collect();

        assert_eq!(names(&histogram.ranked()), vec!["white", "red", "black", "blue", "green"]);
    }

    #[test]
    fn top_returns_a_prefix_of_the_ranking() {
        let histogram: Histogram = [("black", 1), ("white", 1), ("blue", 1), ("red", 1), ("green", 1)]
            .into_iter()
            .collect();
        let ranked = histogram.ranked();

        assert_eq!(histogram.top(0), ranked);
        assert_eq!(histogram.top(1).len(), 1);
        assert_eq!(histogram.top(3), ranked[..3].to_vec());
        assert_eq!(histogram.top(5), ranked);
        assert_eq!(histogram.top(50), ranked);
    }

    #[test]
    fn empty_histogram() {
        let histogram = Histogram::new();

        assert!(histogram.is_empty());
        assert_eq!(histogram.total(), 0);
        assert!(histogram.top(3).is_empty());
    }

    #[test]
    fn swatches_convert_back_and_forth() {
        let histogram: Histogram = [("pink", 4), ("blue", 7)].into_iter().collect();
        let swatches: Vec<Swatch> = histogram.clone().into();

        assert_eq!(swatches, vec![Swatch::new("pink", 4), Swatch::new("blue", 7)]);
        assert_eq!(Histogram::from(swatches), histogram);
    }
}
