//! Settings read from the environment (and `.env`, loaded in `main`).

use std::env;
use thiserror::Error;

const DEFAULT_ROSTER_FILE: &str = "public/funcionarios.xlsx";
const DEFAULT_SHEET_NAME: &str = "Funcionarios";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub roster_file: String,
    pub sheet_name: String,
    pub bind_address: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = AppConfig {
            roster_file: lookup("ROSTER_FILE").unwrap_or_else(|| DEFAULT_ROSTER_FILE.to_string()),
            sheet_name: lookup("ROSTER_SHEET").unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster_file.trim().is_empty() {
            return Err(ConfigError::Validation("ROSTER_FILE cannot be empty".to_string()));
        }
        // Sheet names are limited to 31 characters and a few forbidden symbols.
        let sheet = self.sheet_name.trim();
        if sheet.is_empty() || sheet.chars().count() > 31 {
            return Err(ConfigError::Validation(
                "ROSTER_SHEET must be between 1 and 31 characters".to_string(),
            ));
        }
        if sheet.contains(&['[', ']', ':', '*', '?', '/', '\\'][..]) {
            return Err(ConfigError::Validation(
                "ROSTER_SHEET contains a character not allowed in sheet names".to_string(),
            ));
        }
        if !self.bind_address.contains(':') {
            return Err(ConfigError::Validation(
                "BIND_ADDRESS must be in host:port form".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.roster_file, "public/funcionarios.xlsx");
        assert_eq!(config.sheet_name, "Funcionarios");
        assert_eq!(config.bind_address, "127.0.0.1:8080");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ROSTER_FILE", "/data/roster.xlsx"),
            ("BIND_ADDRESS", "0.0.0.0:9000"),
        ]))
        .unwrap();
        assert_eq!(config.roster_file, "/data/roster.xlsx");
        assert_eq!(config.bind_address, "0.0.0.0:9000");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(AppConfig::from_lookup(lookup(&[("ROSTER_FILE", " ")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("ROSTER_SHEET", "a/b")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("BIND_ADDRESS", "localhost")])).is_err());
    }
}
