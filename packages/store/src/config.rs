//! # Client configuration — `opsdeck.toml`
//!
//! Defines the TOML configuration file that controls client-side cadences
//! (filename: [`OpsDeckConfig::filename`] = `"opsdeck.toml"`). It is loaded once
//! at startup and handed to the views that run background tasks.
//!
//! ## Structure
//!
//! ```toml
//! [chat]
//! poll_interval_secs = 3         # 0 to disable message polling
//!
//! [drafts]
//! autosave_interval_secs = 30    # 0 to disable manuscript autosave
//! ```
//!
//! All structs derive `Default` (with production defaults) so that a missing or
//! empty config file is equivalent to the default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `opsdeck.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OpsDeckConfig {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub drafts: DraftsConfig,
}

/// Chat polling configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Message poll interval in seconds. 0 disables polling.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u32,
}

/// Manuscript draft autosave configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DraftsConfig {
    /// Autosave interval in seconds. 0 disables autosave.
    #[serde(default = "default_autosave_interval")]
    pub autosave_interval_secs: u32,
}

fn default_poll_interval() -> u32 {
    3
}

fn default_autosave_interval() -> u32 {
    30
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl Default for DraftsConfig {
    fn default() -> Self {
        Self {
            autosave_interval_secs: default_autosave_interval(),
        }
    }
}

impl OpsDeckConfig {
    /// Builder method to set the chat poll interval.
    pub fn with_poll_interval(mut self, secs: u32) -> Self {
        self.chat.poll_interval_secs = secs;
        self
    }

    /// Builder method to set the draft autosave interval.
    pub fn with_autosave_interval(mut self, secs: u32) -> Self {
        self.drafts.autosave_interval_secs = secs;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "opsdeck.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OpsDeckConfig::default();
        assert_eq!(config.chat.poll_interval_secs, 3);
        assert_eq!(config.drafts.autosave_interval_secs, 30);
    }

    #[test]
    fn test_empty_toml_equals_defaults() {
        let config = OpsDeckConfig::from_toml("").unwrap();
        assert_eq!(config, OpsDeckConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = OpsDeckConfig::from_toml("[chat]\npoll_interval_secs = 10\n").unwrap();
        assert_eq!(config.chat.poll_interval_secs, 10);
        assert_eq!(config.drafts.autosave_interval_secs, 30);
    }

    #[test]
    fn test_roundtrip() {
        let config = OpsDeckConfig::default()
            .with_poll_interval(5)
            .with_autosave_interval(0);
        let toml = config.to_toml().unwrap();
        let parsed = OpsDeckConfig::from_toml(&toml).unwrap();
        assert_eq!(parsed, config);
    }
}
