//! # Configuration
//!
//! TOML configuration for the dashboard shell.
//!
//! ```toml
//! [keywords]
//! energy = ["solar", "wind", "hydropower"]
//! positive = ["growth", "clean"]
//! negative = ["crisis", "risk"]
//!
//! [sizing]
//! energy_scale = 150.0
//!
//! [layout]
//! k = 1.2
//! seed = 42
//!
//! [records]
//! path = "comments.json"
//! sample_fraction = 0.2
//! sample_seed = 42
//! ```
//!
//! Every section and field is optional. A missing file means built-in defaults.

use crate::error::AppError;
use sentinet_core::{KeywordConfig, LayoutConfig, NetworkEngine, SizingPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum configuration file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// SECTIONS
// =============================================================================

/// `[keywords]`: the three keyword lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordsSection {
    pub energy: Vec<String>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for KeywordsSection {
    fn default() -> Self {
        let defaults = KeywordConfig::renewable_defaults();
        Self {
            energy: defaults.energy().as_slice().to_vec(),
            positive: defaults.positive().as_slice().to_vec(),
            negative: defaults.negative().as_slice().to_vec(),
        }
    }
}

/// `[records]`: where records come from and how they are sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordsSection {
    /// JSON record file. Relative paths resolve against the config file.
    pub path: Option<PathBuf>,
    /// Fraction of records kept, in `(0, 1]`.
    pub sample_fraction: f64,
    /// Seed of the down-sampling.
    pub sample_seed: u64,
}

impl Default for RecordsSection {
    fn default() -> Self {
        Self {
            path: None,
            sample_fraction: 0.2,
            sample_seed: 42,
        }
    }
}

// =============================================================================
// APP CONFIG
// =============================================================================

/// The whole configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub keywords: KeywordsSection,
    pub sizing: SizingPolicy,
    pub layout: LayoutConfig,
    pub records: RecordsSection,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config: Self =
            toml::from_str(source).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| AppError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(AppError::Config(format!(
                "File size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let source = std::fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
        let mut config = Self::from_toml(&source)?;

        if let (Some(records), Some(base)) = (config.records.path.as_mut(), path.parent())
            && records.is_relative()
        {
            *records = base.join(&*records);
        }

        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Check settings the core does not own.
    pub fn validate(&self) -> Result<(), AppError> {
        let fraction = self.records.sample_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(AppError::Config(format!(
                "records.sample_fraction must be in (0, 1], got {}",
                fraction
            )));
        }
        Ok(())
    }

    /// Validated keyword configuration.
    pub fn keyword_config(&self) -> Result<KeywordConfig, AppError> {
        let keywords = &self.keywords;
        Ok(KeywordConfig::new(
            keywords.energy.as_slice(),
            keywords.positive.as_slice(),
            keywords.negative.as_slice(),
        )?)
    }

    /// Build the network engine, failing fast on any invalid setting.
    pub fn engine(&self) -> Result<NetworkEngine, AppError> {
        Ok(NetworkEngine::new(
            self.keyword_config()?,
            self.sizing,
            self.layout,
        )?)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sentinet_core::SentinetError;
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        let config = AppConfig::from_toml("").expect("parse");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.keywords.energy, vec!["solar", "wind", "hydropower"]);
        assert_eq!(config.records.sample_fraction, 0.2);
        assert_eq!(config.layout.seed, 42);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [keywords]
            energy = ["geothermal"]

            [layout]
            iterations = 200
            "#,
        )
        .expect("parse");

        assert_eq!(config.keywords.energy, vec!["geothermal"]);
        assert_eq!(config.keywords.positive.len(), 6);
        assert_eq!(config.layout.iterations, 200);
        assert_eq!(config.layout.k, 1.2);
    }

    #[test]
    fn unknown_field_rejected() {
        let result = AppConfig::from_toml("[records]\nfile = \"comments.json\"\n");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn bad_sample_fraction_rejected() {
        let result = AppConfig::from_toml("[records]\nsample_fraction = 0.0\n");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn duplicate_keyword_fails_engine_build() {
        let config = AppConfig::from_toml(
            r#"
            [keywords]
            positive = ["clean"]
            negative = ["clean"]
            "#,
        )
        .expect("parse");

        let result = config.engine();
        assert!(matches!(
            result,
            Err(AppError::Core(SentinetError::InvalidInput(_)))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn relative_record_path_resolves_against_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sentinet.toml");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(file, "[records]\npath = \"comments.json\"").expect("write");

        let config = AppConfig::load(&path).expect("load");
        assert_eq!(config.records.path, Some(dir.path().join("comments.json")));
    }
}
