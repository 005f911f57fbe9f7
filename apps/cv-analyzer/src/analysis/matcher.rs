//! Skill matcher: decides which required skills a CV mentions.
//!
//! Three independent strategies, unioned:
//! 1. phrase:         consecutive lowercase token sequence (case-insensitive, order-sensitive)
//! 2. part-of-speech: a single NOUN/PROPN token equal to the whole phrase (case-sensitive)
//! 3. named entity:   an allow-listed entity whose text equals the phrase (case-sensitive)
//!
//! Only positive hits are unioned; no strategy can veto another.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::skills::{RequiredSkillSet, SkillPhrase};
use crate::nlp::{Document, EntityLabel};

/// Entity labels whose spans may count as a skill mention.
pub const SKILL_ENTITY_LABELS: &[EntityLabel] = &[
    EntityLabel::Org,
    EntityLabel::Product,
    EntityLabel::WorkOfArt,
    EntityLabel::Skill,
];

/// Skills found by each strategy on its own, for transparency only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyHits {
    pub phrase: BTreeSet<SkillPhrase>,
    pub part_of_speech: BTreeSet<SkillPhrase>,
    pub named_entity: BTreeSet<SkillPhrase>,
}

/// Outcome of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub identified_skills: BTreeSet<SkillPhrase>,
    pub missing_skills: BTreeSet<SkillPhrase>,
    pub is_suitable: bool,
    /// 0 – 100
    pub coverage_percentage: f64,
    pub strategy_hits: StrategyHits,
}

/// Lowercase word pattern for a phrase. `"Machine Learning"` → `["machine", "learning"]`.
pub fn phrase_pattern(phrase: &SkillPhrase) -> Vec<String> {
    phrase.words().map(str::to_lowercase).collect()
}

/// Strategy 1: phrases whose lowercase words occur as consecutive tokens.
pub fn phrase_matches(document: &Document, skills: &RequiredSkillSet) -> BTreeSet<SkillPhrase> {
    let lowers: Vec<&str> = document.tokens.iter().map(|t| t.lower.as_str()).collect();

    skills
        .iter()
        .filter(|skill| {
            let pattern = phrase_pattern(skill);
            !pattern.is_empty()
                && lowers
                    .windows(pattern.len())
                    .any(|window| window.iter().zip(&pattern).all(|(a, b)| *a == b.as_str()))
        })
        .cloned()
        .collect()
}

/// Strategy 2: NOUN/PROPN tokens whose exact text is a required phrase.
/// Compares one token at a time, so multi-word phrases never match here.
pub fn part_of_speech_matches(
    document: &Document,
    skills: &RequiredSkillSet,
) -> BTreeSet<SkillPhrase> {
    document
        .tokens
        .iter()
        .filter(|token| token.pos.is_nominal())
        .filter_map(|token| skills.get(&token.text))
        .cloned()
        .collect()
}

/// Strategy 3: allow-listed entities whose exact text is a required phrase.
pub fn entity_matches(document: &Document, skills: &RequiredSkillSet) -> BTreeSet<SkillPhrase> {
    document
        .entities
        .iter()
        .filter(|entity| SKILL_ENTITY_LABELS.contains(&entity.label))
        .filter_map(|entity| skills.get(&entity.text))
        .cloned()
        .collect()
}

/// Runs all three strategies and aggregates the verdict.
pub fn analyze(document: &Document, skills: &RequiredSkillSet) -> AnalysisResult {
    let strategy_hits = StrategyHits {
        phrase: phrase_matches(document, skills),
        part_of_speech: part_of_speech_matches(document, skills),
        named_entity: entity_matches(document, skills),
    };

    let identified_skills: BTreeSet<SkillPhrase> = strategy_hits
        .phrase
        .iter()
        .chain(&strategy_hits.part_of_speech)
        .chain(&strategy_hits.named_entity)
        .cloned()
        .collect();

    let missing_skills: BTreeSet<SkillPhrase> = skills
        .as_set()
        .difference(&identified_skills)
        .cloned()
        .collect();

    // RequiredSkillSet is never empty.
    let coverage_percentage = 100.0 * identified_skills.len() as f64 / skills.len() as f64;
    let is_suitable = missing_skills.is_empty();

    info!(
        required = skills.len(),
        identified = identified_skills.len(),
        coverage = coverage_percentage,
        is_suitable,
        "Skill analysis complete"
    );

    AnalysisResult {
        identified_skills,
        missing_skills,
        is_suitable,
        coverage_percentage,
        strategy_hits,
    }
}
