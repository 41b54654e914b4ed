use crate::{Flavor, FourCC};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("atom too large: {0}")]
    TooLarge(FourCC),

    #[error("unsupported data reference: {0}")]
    UnsupportedDataRef(FourCC),

    #[error("invalid blob tag")]
    InvalidBlob,

    #[error("invalid colorspace: {0}")]
    InvalidColorspace(String),

    #[error("unsupported flavor: {0:?}")]
    UnsupportedFlavor(Flavor),

    #[error("invalid frame rate")]
    InvalidFrameRate,

    #[error("invalid language: {0}")]
    InvalidLanguage(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
