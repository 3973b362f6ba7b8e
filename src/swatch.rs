/// One named color of an image together with how many sampled pixels matched it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swatch {
    name: String,
    population: u32,
}

impl Swatch {
    pub fn new(name: impl Into<String>, population: u32) -> Swatch {
        Self {
            name: name.into(),
            population,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn population(&self) -> u32 {
        self.population
    }
}
