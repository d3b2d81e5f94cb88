//! Plain text extraction engine.

use crate::Result;
use crate::core::mime::PLAIN_TEXT_MIME_TYPE;
use crate::plugins::{ExtractionEngine, ExtractionOptions, Plugin};
use crate::types::{RawExtraction, RawMetadata};
use std::io::Read;

/// Plain text engine.
///
/// Decodes the stream as UTF-8 (invalid sequences are replaced) and reports
/// simple counts as metadata. It does not understand any container format,
/// so binary documents come out as replacement characters; plug in a real
/// engine for those.
///
/// Metadata names: `Content-Type`, `Content-Length` (bytes read),
/// `line-count`, `word-count`, `character-count`, and `truncated` when the
/// content limit cut the text short.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextEngine;

impl PlainTextEngine {
    /// Create a new plain text engine.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for PlainTextEngine {
    fn name(&self) -> &str {
        "plain-text-engine"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn description(&self) -> &str {
        "Extracts content from plain text streams"
    }
}

impl ExtractionEngine for PlainTextEngine {
    fn extract(&self, stream: &mut dyn Read, options: &ExtractionOptions) -> Result<RawExtraction> {
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes)?;

        let decoded = String::from_utf8_lossy(&bytes);
        let cut = options
            .max_content_length
            .and_then(|limit| decoded.char_indices().nth(limit))
            .map(|(index, _)| index);
        let (text, truncated) = match cut {
            Some(index) => (decoded[..index].to_string(), true),
            None => (decoded.into_owned(), false),
        };

        let mut metadata = RawMetadata::new();
        metadata.set("Content-Type", PLAIN_TEXT_MIME_TYPE);
        metadata.set("Content-Length", bytes.len().to_string());
        metadata.set("line-count", text.lines().count().to_string());
        metadata.set("word-count", text.split_whitespace().count().to_string());
        metadata.set("character-count", text.chars().count().to_string());
        if truncated {
            metadata.set("truncated", "true");
        }

        Ok(RawExtraction::new(text, metadata))
    }
}
