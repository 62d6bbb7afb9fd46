//! Adapter tunables as data.
//!
//! Every field defaults to the contract the dashboard was built against,
//! so `AdapterConfig::default()` is what the library uses when no file
//! is supplied.
//!
//! ```toml
//! # shipment-risk-view.toml
//! max_drivers = 3
//! impact_sum_min = 95.0
//! impact_sum_max = 105.0
//! default_engine_version = "v2"
//! default_language = "en"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Upstream promises at most this many drivers.
    pub max_drivers: usize,

    /// Lower bound of the accepted driver-impact sum, in percent.
    pub impact_sum_min: f64,

    /// Upper bound of the accepted driver-impact sum, in percent.
    pub impact_sum_max: f64,

    /// Echoed in `meta.engineVersion` when the payload has none.
    pub default_engine_version: String,

    /// Echoed in `meta.language` when the payload has none.
    pub default_language: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            max_drivers: 3,
            impact_sum_min: 95.0,
            impact_sum_max: 105.0,
            default_engine_version: "v2".to_string(),
            default_language: "en".to_string(),
        }
    }
}

impl AdapterConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load by extension: `.json` is JSON, anything else TOML. The result
    /// is validated before it is returned.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ViewError::MissingPath {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_toml_str(&content)?,
        };
        config.validated()
    }

    /// Returns a list of validation errors; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_drivers == 0 {
            errors.push("max_drivers must be at least 1".to_string());
        }
        if !self.impact_sum_min.is_finite() || !self.impact_sum_max.is_finite() {
            errors.push("impact sum bounds must be finite".to_string());
        } else if self.impact_sum_min > self.impact_sum_max {
            errors.push(format!(
                "impact_sum_min ({}) must not exceed impact_sum_max ({})",
                self.impact_sum_min, self.impact_sum_max
            ));
        }
        if self.default_engine_version.trim().is_empty() {
            errors.push("default_engine_version must not be blank".to_string());
        }
        if self.default_language.trim().is_empty() {
            errors.push("default_language must not be blank".to_string());
        }

        errors
    }

    pub fn validated(self) -> Result<Self> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ViewError::InvalidConfig { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::AdapterConfig;
    use crate::error::ViewError;

    #[test]
    fn defaults_match_dashboard_contract() {
        let config = AdapterConfig::default();
        assert_eq!(config.max_drivers, 3);
        assert_eq!(config.impact_sum_min, 95.0);
        assert_eq!(config.impact_sum_max, 105.0);
        assert_eq!(config.default_engine_version, "v2");
        assert_eq!(config.default_language, "en");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = AdapterConfig::from_toml_str("max_drivers = 5\n").expect("toml");
        assert_eq!(config.max_drivers, 5);
        assert_eq!(config.default_language, "en");
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config =
            AdapterConfig::from_json_str(r#"{"default_language": "de"}"#).expect("json");
        assert_eq!(config.default_language, "de");
        assert_eq!(config.max_drivers, 3);
    }

    #[test]
    fn validate_reports_every_problem() {
        let config = AdapterConfig {
            max_drivers: 0,
            impact_sum_min: 110.0,
            impact_sum_max: 90.0,
            default_engine_version: " ".to_string(),
            default_language: String::new(),
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 4);
        assert!(errors[1].contains("must not exceed"));
    }

    #[test]
    fn from_file_rejects_missing_and_invalid_files() {
        let temp = tempdir().expect("tempdir");
        let missing = temp.path().join("missing.toml");
        let error = AdapterConfig::from_file(&missing).expect_err("missing file");
        assert!(matches!(error, ViewError::MissingPath { path } if path == missing));

        let invalid = temp.path().join("bad.toml");
        std::fs::write(&invalid, "max_drivers = 0\n").expect("write");
        let error = AdapterConfig::from_file(&invalid).expect_err("invalid config");
        assert!(matches!(error, ViewError::InvalidConfig { .. }));

        let json = temp.path().join("ok.json");
        std::fs::write(&json, r#"{"max_drivers": 4}"#).expect("write");
        assert_eq!(AdapterConfig::from_file(&json).expect("json file").max_drivers, 4);
    }
}
