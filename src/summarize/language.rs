// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Statistical language identification

/// Language code returned when detection is impossible or fails
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Inputs shorter than this (after trimming) are not worth classifying
const MIN_DETECTION_CHARS: usize = 10;

/// Detect the language of a text
///
/// Returns an ISO-639-3 code ("eng", "pol", ...) or [`UNKNOWN_LANGUAGE`]
/// for empty/too-short input or a failed classification. Detection is
/// trigram-based and fully deterministic: the same input always yields the
/// same code.
pub fn detect_language(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_DETECTION_CHARS {
        return UNKNOWN_LANGUAGE.to_string();
    }

    match whatlang::detect(trimmed) {
        Some(info) => info.lang().code().to_string(),
        None => UNKNOWN_LANGUAGE.to_string(),
    }
}
