//! Inner payload extraction.
//!
//! # Responsibilities
//! - Decode the inbound body as UTF-8 (lossy for binary input)
//! - Locate the first wrapper element pair, non-greedy, across newlines
//! - Unescape `&lt;`, `&gt;`, `&amp;` and trim the inner text
//!
//! # Design Decisions
//! - The pattern is compiled once per process from the configured tag name
//! - Any miss (no tag, bad pattern) resolves to the original body unchanged

use regex::Regex;

use crate::envelope::xml::unescape_entities;

/// Pulls the meaningful payload out of an envelope-wrapped body.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    pattern: Option<Regex>,
}

impl ContentExtractor {
    /// Build an extractor for `<wrapper_tag ...>...</wrapper_tag>`.
    pub fn new(wrapper_tag: &str) -> Self {
        let tag = regex::escape(wrapper_tag);
        // Attributes may follow the name, but a self-closing tag never opens a pair
        let source = format!(r"(?s)<{tag}(?:\s(?:[^>]*[^/>])?)?>(.*?)</{tag}\s*>");

        let pattern = match Regex::new(&source) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!(
                    wrapper_tag = %wrapper_tag,
                    error = %e,
                    "Wrapper pattern rejected, extraction disabled"
                );
                None
            }
        };

        Self { pattern }
    }

    /// Extract from a raw body. Never fails.
    pub fn extract(&self, raw_body: &[u8]) -> String {
        let text = String::from_utf8_lossy(raw_body);
        self.extract_text(&text)
    }

    /// Extract from an already-decoded body. Never fails.
    pub fn extract_text(&self, body: &str) -> String {
        match self.inner_payload(body) {
            Some(payload) => payload,
            None => body.to_string(),
        }
    }

    fn inner_payload(&self, body: &str) -> Option<String> {
        let captures = self.pattern.as_ref()?.captures(body)?;
        let inner = captures.get(1)?.as_str();
        Some(unescape_entities(inner).trim().to_string())
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new("Request")
    }
}
