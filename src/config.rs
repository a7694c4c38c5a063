//! Configuration threaded through a [`Checker`](crate::Checker).
//!
//! There is no process-wide state: every checker carries its own [`Config`],
//! so tests can exercise debug and release behavior side by side.

use serde::{Deserialize, Serialize};

/// Validation settings.
///
/// # Example
///
/// ```rust
/// use argcheck::Config;
///
/// let config = Config::from_json(r#"{"debug": true}"#).unwrap();
/// assert!(config.debug);
///
/// // Missing fields fall back to their defaults
/// let config = Config::from_json("{}").unwrap();
/// assert!(!config.debug);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Validate the meta-inputs of every call (names, bounds, descriptions)
    /// before validating the value itself.
    pub debug: bool,
}

impl Config {
    /// Returns a configuration with debug checks enabled.
    pub fn debug_mode() -> Self {
        Self { debug: true }
    }

    /// Parses a configuration from JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_release_mode() {
        assert!(!Config::default().debug);
        assert!(Config::debug_mode().debug);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Config::from_json(r#"{"debug": true}"#).unwrap(), Config::debug_mode());
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
        assert!(Config::from_json(r#"{"debug": "yes"}"#).is_err());
    }

    #[test]
    fn test_round_trip_through_json() {
        let text = serde_json::to_string(&Config::debug_mode()).unwrap();
        assert_eq!(text, r#"{"debug":true}"#);
    }
}
