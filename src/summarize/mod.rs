// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Extractive summarization
//!
//! Reduces a body of text to a bounded set of representative sentences
//! using positional selection — always the first and last sentence, plus
//! evenly spaced samples from the middle half. Deterministic and
//! language-agnostic by design; no model inference involved.

pub mod language;
pub mod sentences;

pub use language::{detect_language, UNKNOWN_LANGUAGE};
pub use sentences::split_sentences;

/// Fixed response for input too short to summarize
pub const INSUFFICIENT_TEXT_MESSAGE: &str = "Not enough text to analyze.";

/// Inputs shorter than this (after trimming) are rejected outright
const MIN_INPUT_CHARS: usize = 10;

/// Raw-prefix length used when segmentation finds nothing usable
const FALLBACK_CHARS: usize = 500;

/// A produced summary with its detected language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Selected sentences joined with spaces
    pub text: String,
    /// ISO-639-3 code of the detected language, or "unknown"
    pub language: String,
}

/// Summarize text down to at most `max_sentences` sentences
///
/// The selection is purely positional: texts at or under the limit pass
/// through joined unchanged; longer texts keep the first and last sentence
/// and sample the middle half `[len/4, 3*len/4)` at an even step. The same
/// input always produces byte-identical output.
pub fn summarize(text: &str, max_sentences: usize) -> Summary {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_INPUT_CHARS {
        return Summary {
            text: INSUFFICIENT_TEXT_MESSAGE.to_string(),
            language: UNKNOWN_LANGUAGE.to_string(),
        };
    }

    let language = detect_language(trimmed);
    let sentences = split_sentences(trimmed, &language);

    if sentences.is_empty() {
        // Segmentation found nothing usable; degrade to a raw prefix.
        let mut prefix: String = trimmed.chars().take(FALLBACK_CHARS).collect();
        prefix.push_str("...");
        return Summary {
            text: prefix,
            language: UNKNOWN_LANGUAGE.to_string(),
        };
    }

    let max_sentences = max_sentences.max(1);
    let text = if sentences.len() <= max_sentences {
        sentences.join(" ")
    } else {
        select_positional(&sentences, max_sentences).join(" ")
    };

    Summary { text, language }
}

/// Positional selection: first sentence, middle-half samples, last sentence
fn select_positional(sentences: &[String], max_sentences: usize) -> Vec<&str> {
    let len = sentences.len();
    let mut selected: Vec<&str> = Vec::with_capacity(max_sentences);

    selected.push(sentences[0].as_str());

    if max_sentences > 2 {
        let middle_start = len / 4;
        let middle_end = 3 * len / 4;
        // The step must stay positive even for narrow middles.
        let step = ((middle_end - middle_start) / (max_sentences - 2)).max(1);

        let mut index = middle_start;
        while index < middle_end && selected.len() < max_sentences - 1 {
            selected.push(sentences[index].as_str());
            index += step;
        }
    }

    if max_sentences >= 2 {
        selected.push(sentences[len - 1].as_str());
    }

    selected
}
