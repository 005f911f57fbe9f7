//! Whitespace tokenizer with prefix/suffix punctuation splitting.
//!
//! Inner punctuation is kept, so tech names such as `C++`, `Node.js`, `CI/CD`
//! and `scikit-learn` survive as single tokens. The one exception is a list
//! separator between two letters: `Python,SQL` is three tokens.

const PREFIX_CHARS: &[char] = &['(', '[', '{', '"', '\'', '<', '“', '‘', '«', '$', '£', '€'];

const SUFFIX_CHARS: &[char] = &[
    ',', '.', ';', ':', '!', '?', ')', ']', '}', '"', '\'', '>', '”', '’', '»', '%', '…',
];

/// Split inside a chunk only when flanked by letters.
const INFIX_CHARS: &[char] = &[',', ';'];

const POSSESSIVES: &[&str] = &["'s", "’s"];

/// A token slice of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    /// Byte offset into the source text.
    pub offset: usize,
}

pub fn tokenize(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut chunk_start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(start) = chunk_start.take() {
                split_infixes(&text[start..idx], start, &mut spans);
            }
        } else if chunk_start.is_none() {
            chunk_start = Some(idx);
        }
    }
    if let Some(start) = chunk_start {
        split_infixes(&text[start..], start, &mut spans);
    }

    spans
}

fn split_infixes<'a>(chunk: &'a str, base: usize, spans: &mut Vec<Span<'a>>) {
    let chars: Vec<(usize, char)> = chunk.char_indices().collect();
    let mut piece_start = 0;

    for (i, &(idx, ch)) in chars.iter().enumerate() {
        let flanked = i > 0
            && i + 1 < chars.len()
            && chars[i - 1].1.is_alphabetic()
            && chars[i + 1].1.is_alphabetic();
        if !INFIX_CHARS.contains(&ch) || !flanked {
            continue;
        }
        split_chunk(&chunk[piece_start..idx], base + piece_start, spans);
        spans.push(Span {
            text: &chunk[idx..idx + ch.len_utf8()],
            offset: base + idx,
        });
        piece_start = idx + ch.len_utf8();
    }

    split_chunk(&chunk[piece_start..], base + piece_start, spans);
}

fn split_chunk<'a>(chunk: &'a str, base: usize, spans: &mut Vec<Span<'a>>) {
    let mut head = 0;
    let mut tail = chunk.len();

    while let Some(ch) = chunk[head..tail].chars().next() {
        let width = ch.len_utf8();
        if !PREFIX_CHARS.contains(&ch) || head + width >= tail {
            break;
        }
        spans.push(Span {
            text: &chunk[head..head + width],
            offset: base + head,
        });
        head += width;
    }

    let mut suffixes = Vec::new();
    loop {
        let core = &chunk[head..tail];
        if let Some(possessive) = POSSESSIVES
            .iter()
            .find(|p| core.len() > p.len() && core.ends_with(*p))
        {
            tail -= possessive.len();
            suffixes.push((tail, tail + possessive.len()));
            continue;
        }
        match core.chars().next_back() {
            Some(ch) if SUFFIX_CHARS.contains(&ch) && core.len() > ch.len_utf8() => {
                tail -= ch.len_utf8();
                suffixes.push((tail, tail + ch.len_utf8()));
            }
            _ => break,
        }
    }

    if head < tail {
        spans.push(Span {
            text: &chunk[head..tail],
            offset: base + head,
        });
    }
    for (start, end) in suffixes.into_iter().rev() {
        spans.push(Span {
            text: &chunk[start..end],
            offset: base + start,
        });
    }
}
