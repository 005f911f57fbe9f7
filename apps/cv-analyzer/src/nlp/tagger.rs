//! Rule-based part-of-speech tagger.
//!
//! Rules fire in order, first hit wins:
//! punctuation/symbols → numbers → acronyms → closed-class lexicon → open-class
//! lexicon → tech-name shape → suffixes → capitalisation → NOUN.

use crate::nlp::lexicon::Lexicon;
use crate::nlp::PartOfSpeech;

const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "ical", "less"];

pub fn tag(text: &str, lexicon: &Lexicon) -> PartOfSpeech {
    if text.chars().all(|c| !c.is_alphanumeric()) {
        return if text.chars().all(|c| c.is_ascii_punctuation() || is_unicode_punct(c))
            && !text.chars().any(is_symbol)
        {
            PartOfSpeech::Punct
        } else {
            PartOfSpeech::Sym
        };
    }

    if is_number(text) {
        return PartOfSpeech::Num;
    }

    if is_acronym(text) {
        return PartOfSpeech::Propn;
    }

    let lower = text.to_lowercase();

    if let Some(pos) = lexicon.closed_class(&lower) {
        return pos;
    }
    if let Some(pos) = lexicon.open_class(&lower) {
        return pos;
    }

    if has_tech_shape(text) {
        return PartOfSpeech::Propn;
    }

    if let Some(pos) = suffix_class(&lower) {
        return pos;
    }

    if text.chars().next().is_some_and(char::is_uppercase) {
        PartOfSpeech::Propn
    } else {
        PartOfSpeech::Noun
    }
}

fn is_symbol(c: char) -> bool {
    matches!(c, '$' | '£' | '€' | '%' | '+' | '=' | '<' | '>' | '^' | '|' | '~' | '@' | '#' | '*')
}

fn is_unicode_punct(c: char) -> bool {
    matches!(c, '“' | '”' | '‘' | '’' | '«' | '»' | '…' | '–' | '—' | '•')
}

/// Digits with optional grouping or decimal separators (`2019`, `1,200`, `3.5`).
fn is_number(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.')
}

/// Two or more letters, all upper case (`SQL`, `AWS`, `ETL`).
fn is_acronym(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2
        && letters.iter().all(|c| c.is_uppercase())
        && text.chars().all(|c| c.is_alphanumeric())
}

/// Inner capitals (`PyTorch`, `iOS`), letter–digit mixes (`S3`, `EC2`) or tech
/// symbols (`C++`, `C#`, `Node.js`, `CI/CD`).
fn has_tech_shape(text: &str) -> bool {
    let inner_capital = text.chars().skip(1).any(char::is_uppercase);
    let has_alpha = text.chars().any(char::is_alphabetic);
    let has_digit = text.chars().any(|c| c.is_ascii_digit());
    let tech_symbol = text.chars().any(|c| matches!(c, '+' | '#' | '.' | '/'));
    inner_capital || (has_alpha && has_digit) || (has_alpha && tech_symbol)
}

fn suffix_class(lower: &str) -> Option<PartOfSpeech> {
    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ly") {
        return Some(PartOfSpeech::Adv);
    }
    if len > 4 && lower.ends_with("ing") {
        return Some(PartOfSpeech::Verb);
    }
    if len > 3 && lower.ends_with("ed") {
        return Some(PartOfSpeech::Verb);
    }
    if len > 5 && ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return Some(PartOfSpeech::Adj);
    }
    None
}
