//! Service configuration read from environment variables.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use practice_core::{ExhaustionPolicy, MatchingMode};

const DEFAULT_BANK_SIZE: usize = 20;
const MAX_BANK_SIZE: usize = 200;

/// OpenAI-compatible chat endpoint settings. Present only when an API key is set.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub bank_size: usize,
    pub question_bank_dir: Option<PathBuf>,
    pub exhaustion_policy: ExhaustionPolicy,
    pub matching_mode: MatchingMode,
    pub fuzzy_threshold: f64,
    pub llm: Option<LlmConfig>,
}

impl Config {
    /// Load from the process environment (after `.env`, if any).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match get("PORT") {
            Some(p) => p.parse().with_context(|| format!("invalid PORT: {p}"))?,
            None => 3000,
        };

        let bank_size = match get("BANK_SIZE") {
            Some(s) => s
                .parse::<usize>()
                .with_context(|| format!("invalid BANK_SIZE: {s}"))?,
            None => DEFAULT_BANK_SIZE,
        };
        if !(1..=MAX_BANK_SIZE).contains(&bank_size) {
            bail!("BANK_SIZE must be between 1 and {MAX_BANK_SIZE}, got {bank_size}");
        }

        let exhaustion_policy = match get("EXHAUSTION_POLICY") {
            Some(p) => ExhaustionPolicy::from_str(&p.to_lowercase())
                .with_context(|| format!("invalid EXHAUSTION_POLICY: {p}"))?,
            None => ExhaustionPolicy::default(),
        };

        let matching_mode = match get("MATCHING_MODE") {
            Some(m) => MatchingMode::from_str(&m.to_lowercase())
                .with_context(|| format!("invalid MATCHING_MODE: {m}"))?,
            None => MatchingMode::default(),
        };

        let fuzzy_threshold = match get("FUZZY_THRESHOLD") {
            Some(t) => t
                .parse::<f64>()
                .with_context(|| format!("invalid FUZZY_THRESHOLD: {t}"))?,
            None => 0.8,
        };
        if !(0.0..=1.0).contains(&fuzzy_threshold) {
            bail!("FUZZY_THRESHOLD must be between 0 and 1, got {fuzzy_threshold}");
        }

        let llm = match get("LLM_API_KEY") {
            Some(api_key) => Some(LlmConfig {
                base_url: get("LLM_BASE_URL")
                    .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                    .trim_end_matches('/')
                    .to_string(),
                api_key,
                model: get("LLM_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
                timeout_secs: match get("LLM_TIMEOUT_SECS") {
                    Some(t) => t
                        .parse()
                        .with_context(|| format!("invalid LLM_TIMEOUT_SECS: {t}"))?,
                    None => 30,
                },
            }),
            None => None,
        };

        Ok(Self {
            database_url,
            host,
            port,
            bank_size,
            question_bank_dir: get("QUESTION_BANK_DIR").map(PathBuf::from),
            exhaustion_policy,
            matching_mode,
            fuzzy_threshold,
            llm,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/practice")]).unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
        assert_eq!(cfg.bank_size, 20);
        assert_eq!(cfg.exhaustion_policy, ExhaustionPolicy::Fallback);
        assert_eq!(cfg.matching_mode, MatchingMode::Fuzzy);
        assert_eq!(cfg.fuzzy_threshold, 0.8);
        assert!(cfg.question_bank_dir.is_none());
        assert!(cfg.llm.is_none());
    }

    #[test]
    fn database_url_is_required() {
        let err = config(&[("DATABASE_URL", "  ")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn llm_enabled_by_api_key() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://x"),
            ("LLM_API_KEY", "sk-test"),
            ("LLM_BASE_URL", "http://localhost:8000/v1/"),
        ])
        .unwrap();
        let llm = cfg.llm.unwrap();
        assert_eq!(llm.base_url, "http://localhost:8000/v1");
        assert_eq!(llm.model, "gpt-4o-mini");
        assert_eq!(llm.timeout_secs, 30);
    }

    #[test]
    fn parses_overrides() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://x"),
            ("PORT", "8080"),
            ("BANK_SIZE", "50"),
            ("EXHAUSTION_POLICY", "Cycle"),
            ("MATCHING_MODE", "normalized"),
            ("FUZZY_THRESHOLD", "0.9"),
            ("QUESTION_BANK_DIR", "/srv/banks"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.bank_size, 50);
        assert_eq!(cfg.exhaustion_policy, ExhaustionPolicy::Cycle);
        assert_eq!(cfg.matching_mode, MatchingMode::Normalized);
        assert_eq!(cfg.question_bank_dir, Some(PathBuf::from("/srv/banks")));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(config(&[("DATABASE_URL", "postgres://x"), ("BANK_SIZE", "0")]).is_err());
        assert!(config(&[("DATABASE_URL", "postgres://x"), ("BANK_SIZE", "500")]).is_err());
        assert!(config(&[("DATABASE_URL", "postgres://x"), ("FUZZY_THRESHOLD", "1.5")]).is_err());
        assert!(config(&[("DATABASE_URL", "postgres://x"), ("EXHAUSTION_POLICY", "never")]).is_err());
        assert!(config(&[("DATABASE_URL", "postgres://x"), ("PORT", "http")]).is_err());
    }
}
