//! Engine configuration, optionally parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Environment variable that puts the canvas into read-only presentation mode.
pub const READ_ONLY_ENV: &str = "MAPCANVAS_READ_ONLY";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A flag was set to something other than a recognised boolean.
    #[error("invalid boolean for {var}: {value:?}")]
    InvalidBool { var: String, value: String },
}

/// Per-instance engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Whether visuals accept drags. Applied uniformly to every visual.
    pub draggable: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { draggable: true }
    }
}

impl EngineConfig {
    /// Read-only presentation mode: nothing can be dragged.
    #[must_use]
    pub fn read_only() -> Self {
        Self { draggable: false }
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `MAPCANVAS_READ_ONLY`: `1/true/yes/on` disables dragging, `0/false/no/off` enables it
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBool`] when a flag cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBool`] when a flag cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read_only = match lookup(READ_ONLY_ENV) {
            Some(raw) => parse_bool(READ_ONLY_ENV, &raw)?,
            None => false,
        };
        Ok(Self { draggable: !read_only })
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var: var.to_string(), value: raw.to_string() }),
    }
}
