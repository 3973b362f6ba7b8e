use crate::error::Result;
use image::{io::Reader as ImageReader, DynamicImage, ImageFormat};
use std::{collections::HashMap, fmt, path::Path, sync::Arc};

/// A trait used to turn an image file into a [`DynamicImage`].
///
/// Decoders are picked by file extension, see [`DecoderMap`]. Any closure with the same signature as
/// [`Decoder::decode`] is a decoder too.
pub trait Decoder {
    fn decode(&self, path: &Path) -> Result<DynamicImage>;
}

impl<F> Decoder for F
where
    F: Fn(&Path) -> Result<DynamicImage>,
{
    fn decode(&self, path: &Path) -> Result<DynamicImage> {
        self(path)
    }
}

/// Decodes a file as one fixed [`ImageFormat`], regardless of what its contents look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDecoder(pub ImageFormat);

impl Decoder for FormatDecoder {
    fn decode(&self, path: &Path) -> Result<DynamicImage> {
        let mut reader = ImageReader::open(path)?;
        reader.set_format(self.0);

        Ok(reader.decode()?)
    }
}

/// Maps file extensions to the decoder used for them. Lookups are case-sensitive.
#[derive(Clone)]
pub struct DecoderMap {
    decoders: HashMap<String, Arc<dyn Decoder + Send + Sync>>,
}

impl DecoderMap {
    /// A map without any decoders.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Register `decoder` for `extension`, replacing whatever was registered for it before.
    pub fn insert<D>(&mut self, extension: impl Into<String>, decoder: D)
    where
        D: Decoder + Send + Sync + 'static,
    {
        self.decoders.insert(extension.into(), Arc::new(decoder));
    }

    pub fn with<D>(mut self, extension: impl Into<String>, decoder: D) -> Self
    where
        D: Decoder + Send + Sync + 'static,
    {
        self.insert(extension, decoder);
        self
    }

    pub fn remove(&mut self, extension: &str) -> bool {
        self.decoders.remove(extension).is_some()
    }

    pub fn get(&self, extension: &str) -> Option<&(dyn Decoder + Send + Sync)> {
        self.decoders.get(extension).map(|decoder| decoder.as_ref())
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.decoders.contains_key(extension)
    }

    /// The registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<_> = self.decoders.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl Default for DecoderMap {
    fn default() -> Self {
        Self::empty()
            .with("png", FormatDecoder(ImageFormat::Png))
            .with("bmp", FormatDecoder(ImageFormat::Bmp))
            .with("gif", FormatDecoder(ImageFormat::Gif))
            .with("jpg", FormatDecoder(ImageFormat::Jpeg))
            .with("jpeg", FormatDecoder(ImageFormat::Jpeg))
    }
}

impl fmt::Debug for DecoderMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderMap")
            .field("extensions", &self.extensions())
            .finish()
    }
}
