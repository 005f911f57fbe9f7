//! Required skill phrases and their comma-separated input syntax.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkillSetError {
    #[error("At least one required skill must be provided")]
    Empty,
}

/// A skill exactly as the user typed it, minus surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillPhrase(String);

impl SkillPhrase {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

impl Borrow<str> for SkillPhrase {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-empty, de-duplicated set of required skills, iterated in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequiredSkillSet(BTreeSet<SkillPhrase>);

impl RequiredSkillSet {
    /// Parses `"Python, SQL, Power BI"`. Entries are trimmed; empty entries
    /// (`"Python,,SQL"`, trailing commas) are dropped.
    pub fn parse(input: &str) -> Result<Self, SkillSetError> {
        Self::from_phrases(input.split(','))
    }

    pub fn from_phrases<I, S>(phrases: I) -> Result<Self, SkillSetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skills = BTreeSet::new();
        let mut dropped = 0usize;
        for phrase in phrases {
            let trimmed = phrase.as_ref().trim();
            if trimmed.is_empty() {
                dropped += 1;
                continue;
            }
            skills.insert(SkillPhrase(trimmed.to_string()));
        }
        if dropped > 0 {
            debug!("Dropped {dropped} empty skill entries");
        }

        if skills.is_empty() {
            return Err(SkillSetError::Empty);
        }
        Ok(Self(skills))
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the stored phrase equal to `text`, if any.
    pub fn get(&self, text: &str) -> Option<&SkillPhrase> {
        self.0.get(text)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillPhrase> {
        self.0.iter()
    }

    pub fn as_set(&self) -> &BTreeSet<SkillPhrase> {
        &self.0
    }
}
