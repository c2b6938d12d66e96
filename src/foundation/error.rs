/// Convenience result type used across the crate.
pub type PhantomResult<T> = Result<T, PhantomError>;

/// Top-level error taxonomy used by codec APIs.
#[derive(thiserror::Error, Debug)]
pub enum PhantomError {
    /// Structurally broken input: unparseable markup or a missing anchor
    /// the animation dialect requires.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Input the codec recognizes but refuses to process, such as a vector
    /// frame handed to the bitmap writer.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// Operations that need at least one frame or entry but got none.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhantomError {
    /// Build a [`PhantomError::MalformedDocument`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }

    /// Build a [`PhantomError::UnsupportedInput`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedInput(msg.into())
    }

    /// Build a [`PhantomError::EmptyInput`] value.
    pub fn empty(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`PhantomError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
