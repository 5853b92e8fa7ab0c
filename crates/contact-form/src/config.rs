// File: src/config.rs
// Purpose: Configuration parsing from an embedded TOML block

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub display_name: DisplayNameConfig,

    #[serde(default)]
    pub submission: SubmissionConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Delays of the scheduled tasks, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Simulated round trip before a submission completes
    #[serde(default = "default_submit_delay")]
    pub submit_delay_ms: u64,

    #[serde(default = "default_success_banner")]
    pub success_banner_ms: u64,

    #[serde(default = "default_name_notice")]
    pub name_notice_ms: u64,

    #[serde(default = "default_clock_interval")]
    pub clock_interval_ms: u64,
}

/// Persisted greeting name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayNameConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_name")]
    pub default_name: String,

    #[serde(default = "default_update_message")]
    pub update_message: String,
}

/// Submit control labels and display formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Appended to the submitted birthplace in the profile display
    #[serde(default = "default_birth_year_suffix")]
    pub birth_year_suffix: String,

    /// Characters of the message kept in the profile display
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    #[serde(default = "default_busy_label")]
    pub busy_label: String,

    #[serde(default = "default_idle_label")]
    pub idle_label: String,

    #[serde(default = "default_success_message")]
    pub success_message: String,
}

/// Scroll highlighting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Section ids, in page order
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,

    #[serde(default = "default_lookahead")]
    pub lookahead_px: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

// Default values
fn default_submit_delay() -> u64 {
    1000
}

fn default_success_banner() -> u64 {
    3000
}

fn default_name_notice() -> u64 {
    2000
}

fn default_clock_interval() -> u64 {
    1000
}

fn default_storage_key() -> String {
    "userName".to_string()
}

fn default_name() -> String {
    "Bayu".to_string()
}

fn default_update_message() -> String {
    "Nama berhasil diupdate!".to_string()
}

fn default_birth_year_suffix() -> String {
    "/1996".to_string()
}

fn default_preview_chars() -> usize {
    50
}

fn default_busy_label() -> String {
    "Mengirim...".to_string()
}

fn default_idle_label() -> String {
    "Submit".to_string()
}

fn default_success_message() -> String {
    "Pesan berhasil dikirim!".to_string()
}

fn default_sections() -> Vec<String> {
    vec![
        "home".to_string(),
        "profile".to_string(),
        "contact".to_string(),
        "portfolio".to_string(),
    ]
}

fn default_lookahead() -> f64 {
    100.0
}

fn default_level() -> String {
    "info".to_string()
}

// Default implementations
impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay(),
            success_banner_ms: default_success_banner(),
            name_notice_ms: default_name_notice(),
            clock_interval_ms: default_clock_interval(),
        }
    }
}

impl Default for DisplayNameConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            default_name: default_name(),
            update_message: default_update_message(),
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            birth_year_suffix: default_birth_year_suffix(),
            preview_chars: default_preview_chars(),
            busy_label: default_busy_label(),
            idle_label: default_idle_label(),
            success_message: default_success_message(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            lookahead_px: default_lookahead(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl TimingConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn success_banner(&self) -> Duration {
        Duration::from_millis(self.success_banner_ms)
    }

    pub fn name_notice(&self) -> Duration {
        Duration::from_millis(self.name_notice_ms)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }
}

impl Config {
    /// Parse configuration from TOML text.
    ///
    /// Blank input yields the default configuration.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timing.submit_delay_ms, 1000);
        assert_eq!(config.timing.success_banner_ms, 3000);
        assert_eq!(config.timing.name_notice_ms, 2000);
        assert_eq!(config.display_name.storage_key, "userName");
        assert_eq!(config.display_name.default_name, "Bayu");
        assert_eq!(config.submission.birth_year_suffix, "/1996");
        assert_eq!(config.submission.preview_chars, 50);
        assert_eq!(config.navigation.sections.len(), 4);
        assert_eq!(config.navigation.lookahead_px, 100.0);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_toml_str("  \n").unwrap();
        assert_eq!(config.submission.idle_label, "Submit");
        assert_eq!(config.submission.busy_label, "Mengirim...");
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
            [timing]
            submit_delay_ms = 250

            [display_name]
            default_name = "Tamu"
        "#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.timing.submit_delay(), Duration::from_millis(250));
        assert_eq!(config.timing.success_banner_ms, 3000);
        assert_eq!(config.display_name.default_name, "Tamu");
        assert_eq!(config.display_name.storage_key, "userName");
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::from_toml_str("[timing]\nsubmit_delay_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, FormError::Config(_)));
    }
}
