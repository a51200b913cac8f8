use crate::ai::gemini::DEFAULT_MODEL;
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Process configuration, loaded once at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_uri: String,
    pub mongo_database: String,
    pub telegram_token: String,
    pub python_path: String,
    pub scraper_path: String,
    pub server_port: u16,
    pub gemini_key: String,
    pub gemini_model: String,
    pub store_timeout: Duration,
    pub scraper_timeout: Duration,
    pub ai_timeout: Duration,
}

impl Config {
    /// Read `.env` when present, then the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; missing or blank required values fail
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| -> Result<String> {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("{name} is not set"))
        };
        let optional = |name: &str, default: &str| -> String {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let seconds = |name: &str, default: u64| -> Result<Duration> {
            match lookup(name) {
                Some(value) => value
                    .trim()
                    .parse()
                    .map(Duration::from_secs)
                    .with_context(|| format!("{name} must be a number of seconds, got '{value}'")),
                None => Ok(Duration::from_secs(default)),
            }
        };

        let server_port = required("SERVER_PORT")?;
        let server_port = server_port
            .trim()
            .parse()
            .with_context(|| format!("SERVER_PORT must be a port number, got '{server_port}'"))?;

        Ok(Self {
            mongo_uri: required("MONGO_ATLAS_URI")?,
            mongo_database: optional("MONGO_DATABASE", "oliveiras"),
            telegram_token: required("ZENHA_TELEGRAM_TOKEN")?,
            python_path: required("PYTHON_PATH")?,
            scraper_path: required("SCRAPER_PATH")?,
            server_port,
            gemini_key: required("GEMINI_KEY")?,
            gemini_model: optional("GEMINI_MODEL", DEFAULT_MODEL),
            store_timeout: seconds("STORE_TIMEOUT_SECS", 30)?,
            scraper_timeout: seconds("SCRAPER_TIMEOUT_SECS", 300)?,
            ai_timeout: seconds("AI_TIMEOUT_SECS", 60)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("MONGO_ATLAS_URI", "mongodb://localhost:27017"),
            ("ZENHA_TELEGRAM_TOKEN", "123:abc"),
            ("PYTHON_PATH", "/usr/bin/python3"),
            ("SCRAPER_PATH", "/opt/scraper/main.py"),
            ("SERVER_PORT", "8080"),
            ("GEMINI_KEY", "k3y"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<Config> {
        Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = load(&base()).unwrap();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.mongo_database, "oliveiras");
        assert_eq!(config.gemini_model, "gemini-2.0-flash-exp");
        assert_eq!(config.scraper_timeout, Duration::from_secs(300));
        assert_eq!(config.store_timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_variable_is_named() {
        let mut vars = base();
        vars.remove("GEMINI_KEY");
        let err = load(&vars).unwrap_err();
        assert_eq!(err.to_string(), "GEMINI_KEY is not set");
    }

    #[test]
    fn blank_variable_counts_as_missing() {
        let mut vars = base();
        vars.insert("SCRAPER_PATH", "  ");
        assert!(load(&vars).is_err());
    }

    #[test]
    fn bad_port_is_rejected() {
        let mut vars = base();
        vars.insert("SERVER_PORT", "eighty");
        assert!(load(&vars).unwrap_err().to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn timeouts_can_be_overridden() {
        let mut vars = base();
        vars.insert("AI_TIMEOUT_SECS", "15");
        assert_eq!(load(&vars).unwrap().ai_timeout, Duration::from_secs(15));
    }
}
