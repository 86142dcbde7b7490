//! Application configuration.
//!
//! The configuration is loaded from a JSON file, by default
//! `$XDG_CONFIG_HOME/hintbar/config.json`, or the path passed on the command
//! line (`--config <path>`).  Each section falls back to its compiled-in
//! defaults, so a minimal `{}` file is valid.
//!
//! # Example
//!
//! ```json
//! {
//!   "hints": {
//!     "alphabet": "asdfghjkl",
//!     "scope": "all-visible-workspaces",
//!     "binding_mode": "hints"
//!   },
//!   "render": {
//!     "max_length": 30,
//!     "show_numbers": true,
//!     "underline": "title",
//!     "underline_color": "#5294e2",
//!     "icons": [
//!       { "match": "class=Firefox", "icon": "" },
//!       { "match": "*", "icon": "类" }
//!     ],
//!     "formatters": { "Firefox": [" - Mozilla Firefox"] }
//!   }
//! }
//! ```

use crate::render::{Renderer, RenderConfig};
use crate::session::HintConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Hint-mode settings.
    #[serde(default)]
    pub hints: HintConfig,

    /// Title bar appearance.
    #[serde(default)]
    pub render: RenderConfig,

    /// Override for the command socket path.
    #[serde(default)]
    pub socket_path: Option<PathBuf>,
}

impl Config {
    /// Load, validate, and expand the configuration in `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config = Self::parse(&contents)
            .map_err(|e| ConfigError(format!("{}: {}", path.display(), e.0)))?;
        Ok(config)
    }

    /// Parse and validate a configuration document, expanding `$USER` and
    /// `$HOST` from the environment.
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError(format!("failed to parse: {}", e)))?;
        config.validate()?;
        config
            .render
            .expand_placeholders(&current_user(), &current_host());
        Ok(config)
    }

    /// Reject configurations the hint engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let alphabet = self.hints.alphabet_chars();
        if alphabet.len() < 2 {
            return Err(ConfigError(
                "hints.alphabet needs at least two characters".into(),
            ));
        }
        let mut seen = HashSet::new();
        for c in &alphabet {
            if c.is_whitespace() || c.is_control() {
                return Err(ConfigError(format!(
                    "hints.alphabet contains unusable character {:?}",
                    c
                )));
            }
            if !seen.insert(*c) {
                return Err(ConfigError(format!(
                    "hints.alphabet contains {:?} more than once",
                    c
                )));
            }
        }
        if self.render.max_length == 0 {
            return Err(ConfigError("render.max_length must be at least 1".into()));
        }
        Renderer::new(self.render.clone()).map_err(|e| ConfigError(e.to_string()))?;
        Ok(())
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

fn current_user() -> String {
    std::env::var("USER").unwrap_or_default()
}

fn current_host() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| {
            std::fs::read_to_string("/etc/hostname")
                .ok()
                .map(|h| h.trim().to_string())
        })
        .unwrap_or_default()
}
