//! Balancer options.
//!
//! Every field is optional when loading from TOML, missing ones keep their defaults:
//!
//! ```toml
//! error_correction = true
//! auto_side_arranging = true
//! language_id = "en"
//! ```

use crate::error::ConfigError;
use serde::Deserialize;


/// Prefix of the free parameters introduced when an equation has more than one answer
pub const DEFAULT_UNKNOWN_HEADER: &str = "X";

/// Features and locale used while balancing
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct BalancerOptions {
    /// Remove molecules with zero coefficient and move those with negative coefficient to the other side
    pub error_correction: bool,
    /// Accept equations without a left/right separator and infer the sides
    pub auto_side_arranging: bool,
    /// Language of the descriptions attached to errors
    pub language_id: String,
}
impl Default for BalancerOptions {
    fn default() -> Self {
        Self {
            error_correction: true,
            auto_side_arranging: true,
            language_id: String::from("en"),
        }
    }
}
impl BalancerOptions {
    /// Parses options from TOML text
    /// # Example
    /// ```
    /// use eqbalance::BalancerOptions;
    ///
    /// let options = BalancerOptions::from_toml_str("error_correction = false").unwrap();
    ///
    /// assert!(!options.error_correction);
    /// assert!(options.auto_side_arranging);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Enables or disables error correction
    pub fn with_error_correction(mut self, enabled: bool) -> Self {
        self.error_correction = enabled;
        self
    }

    /// Enables or disables auto side arranging
    pub fn with_auto_side_arranging(mut self, enabled: bool) -> Self {
        self.auto_side_arranging = enabled;
        self
    }
}
