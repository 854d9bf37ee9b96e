//! Engine configuration.
//!
//! Every field has a default matching the published landing page, so an
//! empty JSON object (or no config file at all) gives the standard setup.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, ContentResult};
use crate::storage::{EVENTS_KEY, GALLERY_KEY};

/// Default catch-up polling interval in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default number of characters shown of an event description in the list
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 100;

/// Default number of gallery placeholder slots when no images exist
pub const DEFAULT_PLACEHOLDER_SLOTS: usize = 6;

/// Configuration for the content sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Store key holding the gallery images
    pub gallery_key: String,
    /// Store key holding the events
    pub events_key: String,
    /// Interval of the periodic reconciliation tick
    pub poll_interval_ms: u64,
    /// Event descriptions longer than this are truncated in the list view
    pub description_limit: usize,
    /// Placeholder slots rendered for an empty gallery
    pub placeholder_slots: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            gallery_key: GALLERY_KEY.to_string(),
            events_key: EVENTS_KEY.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            placeholder_slots: DEFAULT_PLACEHOLDER_SLOTS,
        }
    }
}

impl ContentConfig {
    /// Load configuration from a JSON file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> ContentResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Parse configuration from JSON text and validate it.
    pub fn from_json(text: &str) -> ContentResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive the engine.
    pub fn validate(&self) -> ContentResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(ContentError::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.gallery_key.is_empty() || self.events_key.is_empty() {
            return Err(ContentError::Config("store keys must not be empty".to_string()));
        }
        if self.gallery_key == self.events_key {
            return Err(ContentError::Config(format!(
                "gallery and events share the key {:?}",
                self.gallery_key
            )));
        }
        Ok(())
    }

    /// The periodic tick interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Keys whose changes should trigger a reconciliation.
    pub fn watched_keys(&self) -> [&str; 2] {
        [self.gallery_key.as_str(), self.events_key.as_str()]
    }
}
