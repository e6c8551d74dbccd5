/// Convenience result type used across babycam.
pub type BabycamResult<T> = Result<T, BabycamError>;

/// Top-level error taxonomy used by compositor APIs.
///
/// Out-of-bounds draws are not errors; they are counted as skips in [`crate::TickStats`].
#[derive(thiserror::Error, Debug)]
pub enum BabycamError {
    /// Image or sound asset failed to load or is unusable. Fatal at session start.
    #[error("asset error: {0}")]
    Asset(String),

    /// Invalid user-provided configuration or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// The frame source is unavailable or broke its contract.
    #[error("frame source error: {0}")]
    FrameSource(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BabycamError {
    /// Build a [`BabycamError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`BabycamError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BabycamError::FrameSource`] value.
    pub fn frame_source(msg: impl Into<String>) -> Self {
        Self::FrameSource(msg.into())
    }

    /// Build a [`BabycamError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for errors that must abort a running session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Asset(_) | Self::FrameSource(_))
    }
}

impl From<serde_json::Error> for BabycamError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
