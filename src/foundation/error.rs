pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors surfaced by the composition engine.
///
/// Most failure modes inside the pipeline are recovered locally (clamped geometry, default
/// sample colours, fallback layouts, per-unit encode failures). Only missing inputs and a
/// pipeline that produced nothing reach the caller as errors.
#[derive(thiserror::Error, Debug)]
pub enum ComposeError {
    /// Caller input is missing or out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// The base image payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A layout source failed or returned unusable data.
    #[error("layout error: {0}")]
    Layout(String),

    /// A vector layer could not be turned into pixels.
    #[error("render error: {0}")]
    Render(String),

    /// One output format could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Every unit of work failed; there is nothing to hand back.
    #[error("no artifacts were produced")]
    NothingProduced,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ComposeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
