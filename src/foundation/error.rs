/// Convenience result type used across quotereel.
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Top-level error taxonomy used by the generation core.
#[derive(thiserror::Error, Debug)]
pub enum QuoteError {
    /// Missing, unreadable or malformed configuration document.
    #[error("config error: {0}")]
    Config(String),

    /// Configuration or frame values outside their allowed range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Output or asset directories could not be prepared.
    #[error("setup error: {0}")]
    Setup(String),

    /// Quote input file could not be read or parsed.
    #[error("input error: {0}")]
    Input(String),

    /// Errors while composing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while opening, writing or finalizing an output video stream.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuoteError {
    /// Build a [`QuoteError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`QuoteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QuoteError::Setup`] value.
    pub fn setup(msg: impl Into<String>) -> Self {
        Self::Setup(msg.into())
    }

    /// Build a [`QuoteError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`QuoteError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`QuoteError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
