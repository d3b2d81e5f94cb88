//! Data types shared by the document handle and its capabilities.
//!
//! Engines produce a [`RawExtraction`] whose [`RawMetadata`] may carry several
//! values per name. The handle flattens it into [`Metadata`], keeping the
//! first value of each name in engine order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Engine output
// ============================================================================

/// Everything an [`ExtractionEngine`](crate::plugins::ExtractionEngine) produces in one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawExtraction {
    /// Extracted text, untrimmed.
    pub text: String,
    /// Engine-native metadata collected during the same run.
    pub metadata: RawMetadata,
}

impl RawExtraction {
    pub fn new(text: impl Into<String>, metadata: RawMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// Engine-native document metadata.
///
/// Names are opaque, engine-defined strings kept in insertion order. A name
/// may carry several values (e.g. multiple authors).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMetadata {
    values: IndexMap<String, Vec<String>>,
}

impl RawMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`, keeping any values already present.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Replace every value under `name` with `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), vec![value.into()]);
    }

    /// First value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// Derived views
// ============================================================================

/// Flat, ordered view of a document's metadata: one string per name.
///
/// Built from [`RawMetadata`] by keeping the first value recorded under each
/// name; additional values are dropped. Use
/// [`Document::raw_metadata`](crate::Document::raw_metadata) when every value
/// is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    entries: IndexMap<String, String>,
}

impl Metadata {
    /// Flatten `raw`, visiting each name exactly once.
    pub fn from_raw(raw: &RawMetadata) -> Self {
        let entries = raw
            .names()
            .filter_map(|name| raw.get(name).map(|value| (name.to_string(), value.to_string())))
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Outcome of one language identification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageGuess {
    /// Language code (ISO 639-3 for the built-in identifier).
    pub code: String,
    /// Whether the identifier trusts its own guess.
    ///
    /// Short texts almost never produce a certain guess, so `false` does not
    /// mean the code is wrong.
    pub reasonably_certain: bool,
}

impl LanguageGuess {
    pub fn new(code: impl Into<String>, reasonably_certain: bool) -> Self {
        Self {
            code: code.into(),
            reasonably_certain,
        }
    }
}
