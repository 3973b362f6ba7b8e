use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("image not supported: {0:?}")]
    UnsupportedExtension(String),

    #[error("precision must be between 0 and 100, got {0}")]
    InvalidPrecision(u8),

    #[error("threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f32),

    #[error("unknown flag {0:?}, expected one of dark, black, light or white")]
    UnknownFlag(String),

    #[error("no pixel matched a reference color")]
    EmptyHistogram,

    #[error("color {0:?} is not in the reference palette")]
    UnknownColor(String),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
