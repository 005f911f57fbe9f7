use std::path::PathBuf;

use anyhow::{Context, Result};

/// Skill list used when an upload omits the `skills` field.
pub const DEFAULT_SKILLS: &str = "Machine Learning, Tableau, Python, Power BI, Deep Learning";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Lexicon file; the built-in lexicon is used when unset.
    pub lexicon_path: Option<PathBuf>,
    /// Download source for `lexicon_path` when that file does not exist yet.
    pub lexicon_url: Option<String>,
    pub default_skills: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: non_empty("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            lexicon_path: non_empty("LEXICON_PATH").map(PathBuf::from),
            lexicon_url: non_empty("LEXICON_URL"),
            default_skills: non_empty("DEFAULT_SKILLS")
                .unwrap_or_else(|| DEFAULT_SKILLS.to_string()),
            max_upload_bytes: match non_empty("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}
