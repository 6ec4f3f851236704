/// Convenience result type used across Vitrine.
pub type VitrineResult<T> = Result<T, VitrineError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum VitrineError {
    /// Invalid user-provided document, photo set or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A photo batch could not be prepared for layout (decode failure).
    #[error("layout preparation failed: {0}")]
    LayoutPreparation(String),

    /// The drawing surface could not be created or used.
    #[error("surface error: {0}")]
    Surface(String),

    /// Final raster encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VitrineError {
    /// Build a [`VitrineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VitrineError::LayoutPreparation`] value.
    pub fn layout_preparation(msg: impl Into<String>) -> Self {
        Self::LayoutPreparation(msg.into())
    }

    /// Build a [`VitrineError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`VitrineError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`VitrineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for VitrineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
