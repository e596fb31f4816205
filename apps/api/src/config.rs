use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{ensure, Context, Result};

use crate::copy::generator::CopySettings;
use crate::copy::normalizer::CopyRules;
use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub port: u16,
    pub rust_log: String,
    pub title_max_words: usize,
    pub description_max_words: usize,
    pub description_ellipsis: bool,
    pub exemplar_count: usize,
    pub vocabulary_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Config {
            openai_api_key: var("OPENAI_API_KEY")
                .context("Required environment variable 'OPENAI_API_KEY' is not set")?,
            openai_base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port: parse_or(var("PORT"), "PORT", 3000)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            title_max_words: parse_or(var("TITLE_MAX_WORDS"), "TITLE_MAX_WORDS", 4)?,
            description_max_words: parse_or(
                var("DESCRIPTION_MAX_WORDS"),
                "DESCRIPTION_MAX_WORDS",
                40,
            )?,
            description_ellipsis: parse_or(
                var("DESCRIPTION_ELLIPSIS"),
                "DESCRIPTION_ELLIPSIS",
                false,
            )?,
            exemplar_count: parse_or(var("EXEMPLAR_COUNT"), "EXEMPLAR_COUNT", 3)?,
            vocabulary_path: var("VOCABULARY_PATH").map(PathBuf::from),
        };

        ensure!(config.title_max_words >= 1, "TITLE_MAX_WORDS must be at least 1");
        ensure!(
            config.description_max_words >= 1,
            "DESCRIPTION_MAX_WORDS must be at least 1"
        );
        ensure!(
            (1..=4).contains(&config.exemplar_count),
            "EXEMPLAR_COUNT must be between 1 and 4"
        );

        Ok(config)
    }

    pub fn copy_settings(&self) -> CopySettings {
        CopySettings {
            rules: CopyRules {
                title_max_words: self.title_max_words,
                description_max_words: self.description_max_words,
                description_ellipsis: self.description_ellipsis,
            },
            exemplar_count: self.exemplar_count,
        }
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{value}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = config_from(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.openai_api_key, "sk-test");
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.port, 3000);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.title_max_words, 4);
        assert_eq!(config.description_max_words, 40);
        assert!(!config.description_ellipsis);
        assert_eq!(config.exemplar_count, 3);
        assert!(config.vocabulary_path.is_none());
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let err = config_from(&[("PORT", "8080")]).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        assert!(config_from(&[("OPENAI_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("PORT", "8080"),
            ("TITLE_MAX_WORDS", "5"),
            ("DESCRIPTION_MAX_WORDS", " 25 "),
            ("DESCRIPTION_ELLIPSIS", "true"),
            ("EXEMPLAR_COUNT", "4"),
            ("VOCABULARY_PATH", "/etc/copydesk/vocabulary.json"),
        ])
        .unwrap();

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.port, 8080);
        let settings = config.copy_settings();
        assert_eq!(settings.rules.title_max_words, 5);
        assert_eq!(settings.rules.description_max_words, 25);
        assert!(settings.rules.description_ellipsis);
        assert_eq!(settings.exemplar_count, 4);
        assert_eq!(
            config.vocabulary_path,
            Some(PathBuf::from("/etc/copydesk/vocabulary.json"))
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_port = config_from(&[("OPENAI_API_KEY", "k"), ("PORT", "eighty")]).unwrap_err();
        assert!(bad_port.to_string().contains("PORT"));

        assert!(config_from(&[("OPENAI_API_KEY", "k"), ("DESCRIPTION_ELLIPSIS", "yes")]).is_err());
        assert!(config_from(&[("OPENAI_API_KEY", "k"), ("EXEMPLAR_COUNT", "0")]).is_err());
        assert!(config_from(&[("OPENAI_API_KEY", "k"), ("EXEMPLAR_COUNT", "9")]).is_err());
        assert!(config_from(&[("OPENAI_API_KEY", "k"), ("TITLE_MAX_WORDS", "0")]).is_err());
    }
}
