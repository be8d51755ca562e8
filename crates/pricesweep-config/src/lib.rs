//! Configuration management for pricesweep
//!
//! Centralized configuration handling with support for:
//! - Default values
//! - Configuration files (TOML)
//! - Environment variables
//! - Command-line arguments
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables (`PRICESWEEP_<SECTION>__<FIELD>`, e.g.
//!    `PRICESWEEP_SWEEP__MAX_RECORDS_PER_CALL=500`)
//! 3. Configuration file (`pricesweep.toml`)
//! 4. Default values

mod app;
mod export;
mod source;
mod sweep;

// Re-export main types
pub use app::{AppConfig, LogLevel};
pub use export::ExportConfig;
pub use source::SourceConfig;
pub use sweep::SweepConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure containing all configuration categories
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application-wide settings
    pub app: AppConfig,

    /// Remote catalog connection
    pub source: SourceConfig,

    /// Price domain and enumeration limits
    pub sweep: SweepConfig,

    /// Export and output configuration
    pub export: ExportConfig,
}

impl Settings {
    /// Load configuration from multiple sources with proper precedence
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&Settings::default())?)
            // Add configuration file if it exists
            .add_source(
                config::File::with_name("pricesweep")
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(Self::environment());

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load configuration from a specific file path, still honoring the environment
    pub fn load_from_file(path: &Path) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .add_source(Self::environment());

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Environment variables with PRICESWEEP_ prefix
    fn environment() -> config::Environment {
        config::Environment::with_prefix("PRICESWEEP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Merge command-line arguments into the loaded configuration
    pub fn merge_cli_args(mut self, cli_args: &dyn CliConfigMerge) -> Self {
        cli_args.merge_into_config(&mut self);
        self
    }

    /// Reject settings no run could use
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.sweep.validate().map_err(config::ConfigError::Message)?;

        if self.source.base_url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "source.base_url must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Trait for merging CLI arguments into configuration
pub trait CliConfigMerge {
    fn merge_into_config(&self, config: &mut Settings);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(
            settings.source.base_url,
            "https://api.ecommerce.com/products"
        );
        assert_eq!(settings.sweep.initial_min_price, 0);
        assert_eq!(settings.sweep.initial_max_price, 100_000);
        assert_eq!(settings.sweep.max_records_per_call, 1_000);
        assert!(settings.export.output_path.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings::default();

        let toml_str = toml::to_string(&settings).expect("Failed to serialize to TOML");
        let _: Settings = toml::from_str(&toml_str).expect("Failed to deserialize from TOML");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[source]
base_url = "http://localhost:8080/products"

[sweep]
initial_max_price = 5000
max_records_per_call = 250
"#
        )
        .unwrap();

        let settings = Settings::load_from_file(file.path()).unwrap();

        assert_eq!(settings.source.base_url, "http://localhost:8080/products");
        assert_eq!(settings.sweep.initial_max_price, 5_000);
        assert_eq!(settings.sweep.max_records_per_call, 250);
        // Untouched keys keep their defaults
        assert_eq!(settings.sweep.initial_min_price, 0);
        assert_eq!(settings.sweep.max_concurrent_requests, 16);
    }

    #[test]
    fn test_validate_rejects_inverted_domain() {
        let mut settings = Settings::default();
        settings.sweep.initial_min_price = 200;
        settings.sweep.initial_max_price = 100;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut settings = Settings::default();
        settings.source.base_url = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    struct CapOverride(u64);

    impl CliConfigMerge for CapOverride {
        fn merge_into_config(&self, config: &mut Settings) {
            config.sweep.max_records_per_call = self.0;
        }
    }

    #[test]
    fn test_merge_cli_args() {
        let settings = Settings::default().merge_cli_args(&CapOverride(42));
        assert_eq!(settings.sweep.max_records_per_call, 42);
    }
}
