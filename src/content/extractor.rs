// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML main-content extraction
//!
//! Isolates the readable body of a page using CSS selectors, skipping
//! navigation chrome and boilerplate. Parsing is error-tolerant: any
//! anomaly degrades to an empty string, never an error.

use scraper::{ElementRef, Html, Selector};

/// Elements whose text never counts as content
const NOISE_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "iframe", "noscript",
];

/// Candidate content containers, in priority order
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    ".content",
    ".main-content",
    ".post-content",
    ".article-content",
    ".entry-content",
];

/// Fragments shorter than this are treated as boilerplate and skipped
const MIN_FRAGMENT_CHARS: usize = 100;

/// Extract the main textual content from HTML
///
/// Tries the priority containers first (`main`, `article`, `[role='main']`,
/// common content classes); when none qualify, falls back to a generic
/// paragraph/section scan. Qualifying fragments are concatenated and
/// truncated to `max_chars`.
///
/// # Arguments
/// * `html` - Raw HTML string
/// * `max_chars` - Maximum characters to return
pub fn extract_main_content(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);

    let mut fragments: Vec<String> = Vec::new();
    for selector_str in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let text = clean_text(&element_text(element));
                if text.chars().count() >= MIN_FRAGMENT_CHARS {
                    fragments.push(text);
                }
            }
        }
        if !fragments.is_empty() {
            // First qualifying container level wins.
            break;
        }
    }

    if fragments.is_empty() {
        fragments = scan_elements(&document, "p");
    }
    if fragments.is_empty() {
        fragments = scan_elements(&document, "section");
    }

    truncate_chars(&fragments.join(" "), max_chars)
}

/// Generic scan over `tag`, keeping fragments long enough to be content
fn scan_elements(document: &Html, tag: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    if let Ok(selector) = Selector::parse(tag) {
        for element in document.select(&selector) {
            let text = clean_text(&element_text(element));
            if text.chars().count() >= MIN_FRAGMENT_CHARS {
                fragments.push(text);
            }
        }
    }
    fragments
}

/// Collect descendant text, skipping noise elements entirely
fn element_text(element: ElementRef) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: ElementRef, out: &mut String) {
    if NOISE_TAGS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, out);
        }
    }
}

/// Normalize whitespace
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to `max_chars` on a char boundary
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}
