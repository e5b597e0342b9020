//! System prompts and request language detection.

use std::path::Path;

use tracing::{debug, info};

use crate::config::{Config, ConfigError};

const SYSTEM_PROMPT_EN: &str = "\
You are Coach Deb, an expert Career Debate Coach.

MANDATORY RULES:
1. ALWAYS give a clear structured roadmap (month-wise or step-wise)
2. ALWAYS explain current market demand & trends
3. ALWAYS give practical next actions
4. NEVER repeat the user's question
5. Be concise, structured, and realistic
";

const SYSTEM_PROMPT_HI: &str = "\
आप Coach Deb हैं – एक अनुभवी करियर कोच।

अनिवार्य नियम:
1. हमेशा स्पष्ट रोडमैप दें (महीनों में)
2. वर्तमान मार्केट डिमांड बताएं
3. अगले practical steps बताएं
4. यूज़र का सवाल दोहराएं नहीं
";

/// Language used to pick the system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Hindi,
    Other,
}

impl Language {
    /// Best-effort detection. Anything the detector cannot classify is
    /// [`Language::Other`].
    pub fn detect(text: &str) -> Self {
        match whatlang::detect(text) {
            Some(info) if info.lang() == whatlang::Lang::Hin => Language::Hindi,
            Some(_) => Language::Other,
            None => {
                debug!("language detection inconclusive; assuming non-Hindi");
                Language::Other
            }
        }
    }
}

/// The bilingual system prompt pair.
#[derive(Debug, Clone)]
pub struct PromptSet {
    english: String,
    hindi: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            english: SYSTEM_PROMPT_EN.to_owned(),
            hindi: SYSTEM_PROMPT_HI.to_owned(),
        }
    }
}

impl PromptSet {
    /// Built-in prompts, each replaced by the configured file when set.
    pub fn load(cfg: &Config) -> Result<Self, ConfigError> {
        let mut set = Self::default();
        if let Some(path) = &cfg.prompt_en_file {
            set.english = read_prompt(path)?;
        }
        if let Some(path) = &cfg.prompt_hi_file {
            set.hindi = read_prompt(path)?;
        }
        Ok(set)
    }

    pub fn for_language(&self, language: Language) -> &str {
        match language {
            Language::Hindi => &self.hindi,
            Language::Other => &self.english,
        }
    }
}

fn read_prompt(path: &Path) -> Result<String, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::PromptFile {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "loaded system prompt override");
    Ok(text)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
