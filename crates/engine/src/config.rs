//! Runtime configuration.
//!
//! Read once at startup from environment variables (an optional `.env` file
//! is loaded first) and passed by reference to [`crate::Engine::from_config`].
//! Nothing reads the environment after that.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB read access token (`TMDB_ACCESS_TOKEN`)
    pub tmdb_access_token: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Ollama server URL
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Model tag used for every generative call
    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    /// Timeout for a single catalog request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Timeout for a single model exchange
    #[serde(default = "default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,

    /// Maximum number of recommendations returned
    #[serde(default = "default_result_cap")]
    pub result_cap: usize,

    /// History titles sent to the model for taste and festival analysis
    #[serde(default = "default_taste_sample_size")]
    pub taste_sample_size: usize,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_llm_model() -> String {
    "deepseek-r1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_llm_timeout_secs() -> u64 {
    120
}

fn default_result_cap() -> usize {
    pipeline::DEFAULT_RESULT_CAP
}

fn default_taste_sample_size() -> usize {
    analysis::DEFAULT_SAMPLE_SIZE
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>().context("Failed to load config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from explicit key/value pairs (upper-case names).
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(pairs).context("Failed to load config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.tmdb_access_token.trim().is_empty() {
            bail!("TMDB_ACCESS_TOKEN is empty");
        }
        if self.result_cap == 0 {
            bail!("RESULT_CAP must be at least 1");
        }
        if self.taste_sample_size == 0 {
            bail!("TASTE_SAMPLE_SIZE must be at least 1");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_pairs(pairs(&[("TMDB_ACCESS_TOKEN", "secret")])).unwrap();

        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.ollama_url, "http://localhost:11434");
        assert_eq!(config.llm_model, "deepseek-r1");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.llm_timeout(), Duration::from_secs(120));
        assert_eq!(config.result_cap, 6);
        assert_eq!(config.taste_sample_size, 50);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_pairs(pairs(&[
            ("TMDB_ACCESS_TOKEN", "secret"),
            ("LLM_MODEL", "llama3"),
            ("RESULT_CAP", "10"),
        ]))
        .unwrap();

        assert_eq!(config.llm_model, "llama3");
        assert_eq!(config.result_cap, 10);
    }

    #[test]
    fn test_missing_token_is_error() {
        assert!(Config::from_pairs(pairs(&[("LLM_MODEL", "llama3")])).is_err());
        assert!(Config::from_pairs(pairs(&[("TMDB_ACCESS_TOKEN", "  ")])).is_err());
    }

    #[test]
    fn test_zero_cap_is_error() {
        let result = Config::from_pairs(pairs(&[
            ("TMDB_ACCESS_TOKEN", "secret"),
            ("RESULT_CAP", "0"),
        ]));
        assert!(result.is_err());
    }
}
