//! Error handling for contraflow
//!
//! Pipelines themselves have no error channel: ill-typed pipelines fail to
//! compile and callback panics unwind out of `push`/`signal`. The errors here
//! cover the configuration surface only.

use thiserror::Error;

/// Main error type for contraflow operations
#[derive(Error, Debug)]
pub enum FlowError {
    /// Configuration values that fail validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration that could not be decoded or encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FlowError>,
    },
}

impl FlowError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FlowError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for contraflow operations
pub type Result<T> = std::result::Result<T, FlowError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<FlowError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
