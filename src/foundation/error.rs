/// Result alias used across the crate.
pub type BrandframeResult<T> = Result<T, BrandframeError>;

/// Error type for preset validation, asset preparation and rendering.
#[derive(thiserror::Error, Debug)]
pub enum BrandframeError {
    /// A preset, parameter or path failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image, SVG or font could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A required asset is missing or could not be read.
    #[error("asset error: {0}")]
    Asset(String),

    /// The compositing pipeline failed.
    #[error("render error: {0}")]
    Render(String),

    /// A preset could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BrandframeError {
    /// Build a [`BrandframeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BrandframeError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`BrandframeError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`BrandframeError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BrandframeError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
