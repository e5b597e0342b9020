//! Server configuration, loaded from environment variables at startup.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Development fallback for `COACH_SECRET_KEY`.
pub const DEFAULT_SECRET_KEY: &str = "change-me";

/// Configuration problems that stop the server from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GROQ_API_KEY is not set")]
    MissingApiKey,

    #[error("failed to read prompt file {path}: {source}")]
    PromptFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Runtime configuration for coach-server.
///
/// Only the LLM API key is mandatory; everything else has a default so the
/// server starts with nothing but `GROQ_API_KEY` set.
#[derive(Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8000"`).
    pub bind_address: String,

    /// sqlx SQLite URL (default: `"sqlite://career.db"`).
    pub database_url: String,

    /// Provider key for the completion API.
    pub api_key: String,

    /// Reserved security key. No endpoint reads it yet.
    pub secret_key: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated CORS origins; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Mount Swagger UI at `/swagger-ui`.
    pub enable_swagger: bool,

    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    /// Per-request timeout for the completion call; `None` keeps reqwest's default.
    pub llm_timeout: Option<Duration>,

    /// Optional replacement for the built-in English system prompt.
    pub prompt_en_file: Option<PathBuf>,
    /// Optional replacement for the built-in Hindi system prompt.
    pub prompt_hi_file: Option<PathBuf>,

    /// Directory holding the PDF font family.
    pub font_dir: PathBuf,
    /// Font family file prefix, e.g. `DejaVuSans`.
    pub font_family: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("database_url", &self.database_url)
            .field("api_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("enable_swagger", &self.enable_swagger)
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_model", &self.llm_model)
            .field("llm_temperature", &self.llm_temperature)
            .field("llm_max_tokens", &self.llm_max_tokens)
            .field("llm_timeout", &self.llm_timeout)
            .field("prompt_en_file", &self.prompt_en_file)
            .field("prompt_hi_file", &self.prompt_hi_file)
            .field("font_dir", &self.font_dir)
            .field("font_family", &self.font_family)
            .finish()
    }
}

impl Config {
    /// Build [`Config`] from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from any key lookup, falling back to defaults.
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = get("GROQ_API_KEY")
            .map(|k| k.trim().to_owned())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            bind_address: or_default(&get, "COACH_BIND", "0.0.0.0:8000"),
            database_url: or_default(&get, "COACH_DATABASE_URL", "sqlite://career.db"),
            api_key,
            secret_key: or_default(&get, "COACH_SECRET_KEY", DEFAULT_SECRET_KEY),
            log_level: or_default(&get, "COACH_LOG", "info"),
            log_json: parse_bool(get("COACH_LOG_JSON"), false),
            cors_allowed_origins: get("COACH_CORS_ORIGINS").filter(|v| !v.trim().is_empty()),
            enable_swagger: parse_bool(get("COACH_ENABLE_SWAGGER"), true),
            llm_base_url: or_default(&get, "COACH_LLM_BASE_URL", coach_llm::DEFAULT_BASE_URL),
            llm_model: or_default(&get, "COACH_LLM_MODEL", coach_llm::DEFAULT_MODEL),
            llm_temperature: parse_or(&get, "COACH_LLM_TEMPERATURE", 0.6),
            llm_max_tokens: parse_or(&get, "COACH_LLM_MAX_TOKENS", 800),
            llm_timeout: get("COACH_LLM_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|s| *s > 0)
                .map(Duration::from_secs),
            prompt_en_file: get("COACH_PROMPT_EN_FILE").map(PathBuf::from),
            prompt_hi_file: get("COACH_PROMPT_HI_FILE").map(PathBuf::from),
            font_dir: PathBuf::from(or_default(&get, "COACH_FONT_DIR", "./fonts")),
            font_family: or_default(&get, "COACH_FONT_FAMILY", "DejaVuSans"),
        })
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn or_default<F: Fn(&str) -> Option<String>>(get: &F, key: &str, default: &str) -> String {
    get(key).unwrap_or_else(|| default.to_owned())
}

fn parse_or<F, T>(get: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value {
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true"),
        None => default,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|k| map.get(k).cloned())
    }

    #[test]
    fn missing_api_key_is_fatal() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingApiKey)));
        assert!(matches!(
            load(&[("GROQ_API_KEY", "   ")]),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn defaults_apply() {
        let cfg = load(&[("GROQ_API_KEY", "gsk_test")]).unwrap();
        assert_eq!(cfg.database_url, "sqlite://career.db");
        assert_eq!(cfg.bind_address, "0.0.0.0:8000");
        assert_eq!(cfg.llm_model, "llama-3.1-8b-instant");
        assert_eq!(cfg.llm_max_tokens, 800);
        assert!(cfg.enable_swagger);
        assert!(!cfg.log_json);
        assert!(cfg.llm_timeout.is_none());
        assert!(cfg.cors_allowed_origins.is_none());
        assert_eq!(cfg.font_dir, PathBuf::from("./fonts"));
        assert_eq!(cfg.font_family, "DejaVuSans");
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = load(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("COACH_DATABASE_URL", "sqlite::memory:"),
            ("COACH_LOG_JSON", "TRUE"),
            ("COACH_ENABLE_SWAGGER", "false"),
            ("COACH_LLM_MAX_TOKENS", "1200"),
            ("COACH_LLM_TEMPERATURE", "not-a-number"),
            ("COACH_LLM_TIMEOUT_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert!(cfg.log_json);
        assert!(!cfg.enable_swagger);
        assert_eq!(cfg.llm_max_tokens, 1200);
        assert_eq!(cfg.llm_temperature, 0.6);
        assert_eq!(cfg.llm_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let cfg = load(&[("GROQ_API_KEY", "gsk_live_secret"), ("COACH_SECRET_KEY", "hunter2")]).unwrap();
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("gsk_live_secret"));
        assert!(!dbg.contains("hunter2"));
    }
}
