//! Gazetteer-driven entity recognition.

use crate::nlp::lexicon::Lexicon;
use crate::nlp::{Entity, EntityLabel, PartOfSpeech, Token};

/// Scans tokens left to right, taking the longest case-sensitive gazetteer
/// match at each position. Entities never overlap. Numbers outside any
/// gazetteer match become DATE (years) or CARDINAL.
pub fn recognize(tokens: &[Token], source: &str, lexicon: &Lexicon) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if let Some((len, label)) = longest_gazetteer_match(&tokens[i..], lexicon) {
            entities.push(span_entity(tokens, source, i, i + len, label));
            i += len;
            continue;
        }

        if tokens[i].pos == PartOfSpeech::Num {
            let label = if is_year(&tokens[i].text) {
                EntityLabel::Date
            } else {
                EntityLabel::Cardinal
            };
            entities.push(span_entity(tokens, source, i, i + 1, label));
        }
        i += 1;
    }

    entities
}

fn longest_gazetteer_match(tokens: &[Token], lexicon: &Lexicon) -> Option<(usize, EntityLabel)> {
    let first = tokens.first()?;
    lexicon
        .gazetteer_candidates(&first.text)
        .iter()
        .find(|entry| {
            entry.tokens.len() <= tokens.len()
                && entry
                    .tokens
                    .iter()
                    .zip(tokens)
                    .all(|(expected, token)| *expected == token.text)
        })
        .map(|entry| (entry.tokens.len(), entry.label))
}

/// Surface text spans the source between the first and last token, keeping the
/// original whitespace.
fn span_entity(
    tokens: &[Token],
    source: &str,
    start: usize,
    end: usize,
    label: EntityLabel,
) -> Entity {
    let from = tokens[start].offset;
    let last = &tokens[end - 1];
    let to = last.offset + last.text.len();
    let text = source
        .get(from..to)
        .map(str::to_string)
        .unwrap_or_else(|| {
            tokens[start..end]
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        });

    Entity {
        label,
        text,
        start,
        end,
    }
}

fn is_year(text: &str) -> bool {
    text.len() == 4
        && text
            .parse::<u32>()
            .map(|y| (1900..=2099).contains(&y))
            .unwrap_or(false)
}
