// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sentence segmentation with language-aware abbreviation handling

use regex::Regex;
use std::sync::OnceLock;

/// Common English abbreviations that do not terminate a sentence
const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "fig", "inc",
    "ltd", "no", "vol", "dept", "approx",
];

/// Common Polish abbreviations that do not terminate a sentence
const POLISH_ABBREVIATIONS: &[&str] = &[
    "np", "tzn", "tj", "itd", "itp", "prof", "dr", "mgr", "inż", "ok", "ul", "św", "im", "zob",
    "ww",
];

/// Terminator run, optional closing quotes/brackets, then whitespace
fn boundary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"[.!?…]+["'»”’)\]]*\s+"#).expect("sentence boundary pattern is valid")
    })
}

/// Split text into sentences
///
/// Boundaries are terminal punctuation followed by whitespace; a period
/// after a known abbreviation (per `lang`, ISO-639-3) or before a lowercase
/// continuation is not a boundary. The final fragment is kept even without
/// terminal punctuation.
pub fn split_sentences(text: &str, lang: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let abbreviations = abbreviations_for(lang);
    let mut sentences = Vec::new();
    let mut start = 0usize;

    for boundary in boundary_regex().find_iter(text) {
        let punctuation = boundary.as_str().trim_end();
        if is_single_period(punctuation)
            && ends_with_abbreviation(&text[start..boundary.start()], abbreviations)
        {
            continue;
        }

        // A lowercase continuation means the punctuation was internal.
        if let Some(next) = text[boundary.end()..].chars().next() {
            if next.is_lowercase() {
                continue;
            }
        }

        let sentence = text[start..boundary.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        start = boundary.end();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

fn abbreviations_for(lang: &str) -> &'static [&'static str] {
    match lang {
        "pol" => POLISH_ABBREVIATIONS,
        _ => ENGLISH_ABBREVIATIONS,
    }
}

fn is_single_period(punctuation: &str) -> bool {
    punctuation.starts_with('.') && !punctuation.starts_with("..")
}

/// Check whether the fragment ends in an abbreviation (or an initial)
fn ends_with_abbreviation(fragment: &str, abbreviations: &[&str]) -> bool {
    let last_word = match fragment.rsplit(char::is_whitespace).next() {
        Some(word) => word.trim_start_matches(|c: char| !c.is_alphanumeric()),
        None => return false,
    };

    if last_word.is_empty() {
        return false;
    }

    // Single letters are initials: "J. R. R. Tolkien".
    if last_word.chars().count() == 1 && last_word.chars().all(char::is_alphabetic) {
        return true;
    }

    let lowered = last_word.to_lowercase();
    abbreviations.contains(&lowered.as_str())
}
