// Demo Config - sample data for the demo runner
// Loaded from TOML or JSON by file extension. Missing sections and fields
// fall back to the default sample data.

use crate::error::CatalogError;
use crate::flyweight::CharacterCode;
use crate::observer::Reading;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub observer: ObserverConfig,
    pub flyweight: FlyweightConfig,
    pub singleton: SingletonConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub readings: Vec<Reading>,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            readings: vec![
                Reading::new(15.0, 60.0, 750.0),
                Reading::new(18.0, 70.0, 755.0),
                Reading::new(21.0, 65.0, 760.0),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyweightConfig {
    pub rounds: usize,
    /// May include codes with no template; those lookups come back empty.
    pub codes: Vec<CharacterCode>,
}

impl Default for FlyweightConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            codes: (1..=5).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingletonConfig {
    pub workers: usize,
}

impl Default for SingletonConfig {
    fn default() -> Self {
        Self { workers: 5 }
    }
}

impl DemoConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|err| CatalogError::config_read(path, err))?;

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let config = match format.as_deref() {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            other => {
                return Err(CatalogError::UnsupportedConfigFormat(
                    other.unwrap_or("").to_string(),
                ))
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.observer.readings.is_empty() {
            return Err(CatalogError::invalid_config("observer.readings must not be empty"));
        }
        if self.flyweight.rounds == 0 {
            return Err(CatalogError::invalid_config("flyweight.rounds must be at least 1"));
        }
        if self.flyweight.codes.is_empty() {
            return Err(CatalogError::invalid_config("flyweight.codes must not be empty"));
        }
        if self.singleton.workers == 0 {
            return Err(CatalogError::invalid_config("singleton.workers must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_match_samples() {
        let config = DemoConfig::default();
        assert_eq!(config.observer.readings.len(), 3);
        assert_eq!(config.observer.readings[0], Reading::new(15.0, 60.0, 750.0));
        assert_eq!(config.flyweight.rounds, 10);
        assert_eq!(config.flyweight.codes, vec![1, 2, 3, 4, 5]);
        assert_eq!(config.singleton.workers, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DemoConfig::from_toml_str(
            r#"
            [flyweight]
            rounds = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.flyweight.rounds, 2);
        assert_eq!(config.flyweight.codes, vec![1, 2, 3, 4, 5]);
        assert_eq!(config.observer, ObserverConfig::default());
    }

    #[test]
    fn test_toml_readings() {
        let config = DemoConfig::from_toml_str(
            r#"
            [observer]
            readings = [
                { temperature = 20.0, humidity = 50.0, pressure = 1000.0 },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(config.observer.readings, vec![Reading::new(20.0, 50.0, 1000.0)]);
    }

    #[test]
    fn test_json_config() {
        let config = DemoConfig::from_json_str(
            r#"{"singleton": {"workers": 3}, "flyweight": {"codes": [1, 1, 2]}}"#,
        )
        .unwrap();

        assert_eq!(config.singleton.workers, 3);
        assert_eq!(config.flyweight.codes, vec![1, 1, 2]);
    }

    #[test]
    fn test_bad_toml_is_error() {
        let result = DemoConfig::from_toml_str("[flyweight\nrounds = ");
        assert!(matches!(result, Err(CatalogError::ConfigToml(_))));
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = DemoConfig::default();
        config.singleton.workers = 0;
        assert!(matches!(config.validate(), Err(CatalogError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_file_by_extension() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[singleton]\nworkers = 2").unwrap();

        let config = DemoConfig::from_file(file.path()).unwrap();
        assert_eq!(config.singleton.workers, 2);
    }

    #[test]
    fn test_from_file_validates() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"observer": {{"readings": []}}}}"#).unwrap();

        let result = DemoConfig::from_file(file.path());
        assert!(matches!(result, Err(CatalogError::InvalidConfig(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = Builder::new().suffix(".yaml").tempfile().unwrap();
        let result = DemoConfig::from_file(file.path());
        assert!(matches!(result, Err(CatalogError::UnsupportedConfigFormat(ext)) if ext == "yaml"));
    }

    #[test]
    fn test_missing_file() {
        let result = DemoConfig::from_file("does/not/exist.toml");
        assert!(matches!(result, Err(CatalogError::ConfigRead { .. })));
    }
}
