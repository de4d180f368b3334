//! Sentence extraction from free text
//!
//! Lines win when there are several; otherwise sentence punctuation from
//! any supported script, then runs of blank space, then fixed-width word
//! chunks for long unpunctuated text.

use std::sync::LazyLock;

use regex::Regex;
use sentcloud_layout::Fragment;

/// Pieces this short (in characters) are not sentences
const MIN_SENTENCE_CHARS: usize = 3;

/// Longest chunk produced when the text has no usable boundaries
const CHUNK_CHARS: usize = 80;

// Constant patterns
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?。！？।॥؟‽؍⸮⁇⁈⁉…]+\s*").expect("sentence pattern compiles")
});

static WIDE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("space pattern compiles"));

/// Split free text into sentences, in order of appearance
pub fn split_sentences(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let lines = keep_sentences(text.split('\n'));
    if lines.len() > 1 {
        return lines;
    }

    let punctuated = keep_sentences(SENTENCE_END.split(text));
    if punctuated.len() > 1 {
        return punctuated;
    }

    let spaced = keep_sentences(WIDE_SPACE.split(text));
    if spaced.len() > 1 {
        return spaced;
    }

    if text.chars().count() > CHUNK_CHARS {
        chunk_words(text, CHUNK_CHARS)
    } else {
        vec![text.to_string()]
    }
}

/// Sentences of `text` as fragments weighted by how often each occurs
pub fn fragments_from_text(text: &str) -> Vec<Fragment> {
    let sentences = split_sentences(text);
    tracing::debug!("Extracted {} sentences", sentences.len());
    Fragment::count_all(sentences)
}

fn keep_sentences<'a>(pieces: impl Iterator<Item = &'a str>) -> Vec<String> {
    pieces
        .map(str::trim)
        .filter(|piece| piece.chars().count() >= MIN_SENTENCE_CHARS)
        .map(str::to_string)
        .collect()
}

/// Greedy word packing into chunks of at most `limit` characters.
/// A single word longer than `limit` becomes its own chunk.
fn chunk_words(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if current_chars > 0 && current_chars + 1 + word_chars > limit {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if current_chars > 0 {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
