//! Configuration for buffering stages
//!
//! Only [`BufferForSignal`](crate::pipeline::BufferForSignal) carries
//! tunables. Everything else in a pipeline is fixed by its types.
//!
//! # Files
//!
//! A [`BufferConfig`] is stored as pretty-printed JSON. Missing fields fall
//! back to their defaults, so an empty object `{}` is a valid file.
//!
//! # Example
//!
//! ```ignore
//! use contraflow::{config::BufferConfig, Identity, Stage};
//!
//! let config = BufferConfig::load("buffer.json")?;
//! let (mut push, mut flush) = Identity::<u32>::new()
//!     .buffer_for_signal_with(config)
//!     .sink(|v| println!("{v}"));
//! ```

use crate::error::{FlowError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of slots pre-allocated in a buffer queue
pub const DEFAULT_CAPACITY_HINT: usize = 16;

/// Tunables for a signal-gated buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Queue slots reserved when the pipeline is finalized
    #[serde(default = "default_capacity_hint")]
    pub capacity_hint: usize,

    /// Queue length at which a warning is logged. Values are never dropped.
    #[serde(default)]
    pub high_water_mark: Option<usize>,
}

fn default_capacity_hint() -> usize {
    DEFAULT_CAPACITY_HINT
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity_hint: DEFAULT_CAPACITY_HINT,
            high_water_mark: None,
        }
    }
}

impl BufferConfig {
    /// Set the number of pre-allocated queue slots
    pub fn with_capacity_hint(mut self, capacity_hint: usize) -> Self {
        self.capacity_hint = capacity_hint;
        self
    }

    /// Set the queue length that triggers a backlog warning
    pub fn with_high_water_mark(mut self, mark: usize) -> Self {
        self.high_water_mark = Some(mark);
        self
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.high_water_mark == Some(0) {
            return Err(FlowError::Config(
                "high_water_mark must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Encode the configuration as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a configuration file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read buffer config {:?}", path))?;

        Self::from_json_str(&content)
            .with_context(|| format!("Invalid buffer config {:?}", path))
    }

    /// Load a configuration file, returning defaults if any error occurs
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Falling back to default buffer config: {}", e);
                Self::default()
            }
        }
    }

    /// Save the configuration to disk as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        self.validate()?;
        let content = self.to_json_string()?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write buffer config {:?}", path))
    }
}
