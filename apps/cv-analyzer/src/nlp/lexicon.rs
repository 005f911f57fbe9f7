//! Lexicon: word classes and the entity gazetteer used by the rule-based annotator.
//!
//! Loaded exactly once at startup. Resolution order:
//! 1. no path configured → built-in lexicon compiled into the binary
//! 2. path exists → read from disk (a path that cannot be probed is an I/O error)
//! 3. path missing and a download URL configured → fetch, persist to path, then parse
//!
//! Every failure surfaces as `LexiconError`, which the server treats as fatal.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::nlp::tokenizer::tokenize;
use crate::nlp::{EntityLabel, PartOfSpeech};

const BUILTIN_LEXICON: &str = include_str!("../../assets/lexicon.json");
const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Lexicon not found at {0} and no download URL configured")]
    NotFound(PathBuf),

    #[error("Failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid lexicon JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Lexicon download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("Lexicon download from {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// On-disk lexicon layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconFile {
    #[serde(default)]
    pub closed_class: BTreeMap<PartOfSpeech, Vec<String>>,
    #[serde(default)]
    pub open_class: BTreeMap<PartOfSpeech, Vec<String>>,
    #[serde(default)]
    pub gazetteer: BTreeMap<EntityLabel, Vec<String>>,
}

/// A gazetteer phrase, pre-split with the annotator's own tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct GazetteerEntry {
    pub tokens: Vec<String>,
    pub label: EntityLabel,
}

/// Compiled, read-only lexicon.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    closed_class: HashMap<String, PartOfSpeech>,
    open_class: HashMap<String, PartOfSpeech>,
    /// Entries keyed by their first token, longest phrase first.
    gazetteer: HashMap<String, Vec<GazetteerEntry>>,
}

impl Lexicon {
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::from_json(BUILTIN_LEXICON)
    }

    pub fn from_json(json: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = serde_json::from_str(json)?;
        Ok(Self::compile(file))
    }

    /// Builds lookup tables. Words are keyed lowercase; on duplicates the first
    /// class in tag order wins. Gazetteer phrases keep their case.
    pub fn compile(file: LexiconFile) -> Self {
        let mut gazetteer: HashMap<String, Vec<GazetteerEntry>> = HashMap::new();
        let mut seen = std::collections::HashSet::new();

        for (label, phrases) in file.gazetteer {
            for phrase in phrases {
                let tokens: Vec<String> = tokenize(&phrase)
                    .into_iter()
                    .map(|span| span.text.to_string())
                    .collect();
                let Some(first) = tokens.first().cloned() else {
                    continue;
                };
                if !seen.insert(tokens.clone()) {
                    continue;
                }
                gazetteer
                    .entry(first)
                    .or_default()
                    .push(GazetteerEntry { tokens, label });
            }
        }
        for entries in gazetteer.values_mut() {
            entries.sort_by(|a, b| b.tokens.len().cmp(&a.tokens.len()));
        }

        Self {
            closed_class: word_table(file.closed_class),
            open_class: word_table(file.open_class),
            gazetteer,
        }
    }

    pub fn closed_class(&self, lower: &str) -> Option<PartOfSpeech> {
        self.closed_class.get(lower).copied()
    }

    pub fn open_class(&self, lower: &str) -> Option<PartOfSpeech> {
        self.open_class.get(lower).copied()
    }

    /// Gazetteer entries whose first token is exactly `text`, longest first.
    pub fn gazetteer_candidates(&self, text: &str) -> &[GazetteerEntry] {
        self.gazetteer.get(text).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn gazetteer_len(&self) -> usize {
        self.gazetteer.values().map(Vec::len).sum()
    }
}

fn word_table(classes: BTreeMap<PartOfSpeech, Vec<String>>) -> HashMap<String, PartOfSpeech> {
    let mut table = HashMap::new();
    for (pos, words) in classes {
        for word in words {
            table.entry(word.to_lowercase()).or_insert(pos);
        }
    }
    table
}

/// Resolves and loads the lexicon according to the configured path and URL.
pub async fn load_lexicon(path: Option<&Path>, url: Option<&str>) -> Result<Lexicon, LexiconError> {
    let Some(path) = path else {
        info!("Using built-in lexicon");
        return Lexicon::builtin();
    };

    let exists = tokio::fs::try_exists(path)
        .await
        .map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    if exists {
        info!("Loading lexicon from {}", path.display());
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LexiconError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        return Lexicon::from_json(&json);
    }

    let Some(url) = url else {
        return Err(LexiconError::NotFound(path.to_path_buf()));
    };

    info!("Lexicon not found at {}, downloading from {url}", path.display());
    let json = download_lexicon(url).await?;
    // Only a lexicon that parses is written to the cache path.
    let lexicon = Lexicon::from_json(&json)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| LexiconError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(path, &json)
        .await
        .map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Lexicon cached at {}", path.display());

    Ok(lexicon)
}

async fn download_lexicon(url: &str) -> Result<String, LexiconError> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .build()?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LexiconError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_LEXICON: &str = r#"{
        "closed_class": {"DET": ["the"], "ADP": ["in"]},
        "open_class": {"VERB": ["Build"]},
        "gazetteer": {
            "PRODUCT": ["Power BI", "Power"],
            "SKILL": ["Power BI"]
        }
    }"#;

    #[test]
    fn test_builtin_lexicon_parses() {
        let lexicon = Lexicon::builtin().unwrap();
        assert_eq!(lexicon.closed_class("the"), Some(PartOfSpeech::Det));
        assert_eq!(lexicon.open_class("proficient"), Some(PartOfSpeech::Adj));
        assert!(lexicon.gazetteer_len() > 50);
    }

    #[test]
    fn test_open_class_words_are_keyed_lowercase() {
        let lexicon = Lexicon::from_json(SMALL_LEXICON).unwrap();
        assert_eq!(lexicon.open_class("build"), Some(PartOfSpeech::Verb));
        assert_eq!(lexicon.open_class("Build"), None);
    }

    #[test]
    fn test_gazetteer_candidates_longest_first() {
        let lexicon = Lexicon::from_json(SMALL_LEXICON).unwrap();
        let candidates = lexicon.gazetteer_candidates("Power");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].tokens, vec!["Power", "BI"]);
        assert_eq!(candidates[1].tokens, vec!["Power"]);
    }

    #[test]
    fn test_duplicate_gazetteer_phrase_keeps_first_label() {
        let lexicon = Lexicon::from_json(SMALL_LEXICON).unwrap();
        let power_bi: Vec<_> = lexicon
            .gazetteer_candidates("Power")
            .iter()
            .filter(|e| e.tokens.len() == 2)
            .collect();
        assert_eq!(power_bi.len(), 1);
        assert_eq!(power_bi[0].label, EntityLabel::Product);
    }

    #[test]
    fn test_gazetteer_lookup_is_case_sensitive() {
        let lexicon = Lexicon::from_json(SMALL_LEXICON).unwrap();
        assert!(lexicon.gazetteer_candidates("power").is_empty());
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = Lexicon::from_json("{not json").unwrap_err();
        assert!(matches!(err, LexiconError::Parse(_)));
    }

    #[tokio::test]
    async fn test_load_without_path_uses_builtin() {
        let lexicon = load_lexicon(None, None).await.unwrap();
        assert!(lexicon.gazetteer_len() > 0);
    }

    #[tokio::test]
    async fn test_load_from_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, SMALL_LEXICON).unwrap();

        let lexicon = load_lexicon(Some(&path), None).await.unwrap();
        assert_eq!(lexicon.closed_class("in"), Some(PartOfSpeech::Adp));
    }

    #[tokio::test]
    async fn test_missing_file_without_url_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = load_lexicon(Some(&path), None).await.unwrap_err();
        assert!(matches!(err, LexiconError::NotFound(p) if p == path));
    }

    /// Serves `SMALL_LEXICON` at `/lexicon.json`; every other path is a 404.
    async fn serve_lexicon() -> String {
        use axum::{routing::get, Router};

        let app = Router::new().route("/lexicon.json", get(|| async { SMALL_LEXICON }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_missing_file_is_downloaded_and_cached() {
        let base = serve_lexicon().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("en").join("lexicon.json");

        let url = format!("{base}/lexicon.json");
        let lexicon = load_lexicon(Some(&path), Some(&url)).await.unwrap();
        assert_eq!(lexicon.closed_class("in"), Some(PartOfSpeech::Adp));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SMALL_LEXICON);

        // A second load reads the cached copy without the URL.
        let cached = load_lexicon(Some(&path), None).await.unwrap();
        assert_eq!(cached.gazetteer_len(), lexicon.gazetteer_len());
    }

    #[tokio::test]
    async fn test_failed_download_is_status_error_and_not_cached() {
        let base = serve_lexicon().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("lexicon.json");

        let url = format!("{base}/missing");
        let err = load_lexicon(Some(&path), Some(&url)).await.unwrap_err();
        assert!(matches!(err, LexiconError::Status { status: 404, .. }), "got {err}");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unreadable_path_is_io_error_not_download() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("lexicon.json");

        let err = load_lexicon(Some(&path), Some("http://127.0.0.1:9/lexicon.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, LexiconError::Io { .. }), "got {err}");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"{"closed_class": 5}"#).unwrap();

        let err = load_lexicon(Some(&path), None).await.unwrap_err();
        assert!(matches!(err, LexiconError::Parse(_)));
    }
}
