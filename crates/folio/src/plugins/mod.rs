//! Capability plugins.
//!
//! A [`Document`](crate::Document) never decodes formats, sniffs bytes or
//! guesses languages itself. It delegates to three capabilities, each a trait
//! object that can be swapped for a custom or mock implementation:
//!
//! - [`ExtractionEngine`] - stream to text plus metadata
//! - [`MediaTypeDetector`] - file or stream to MIME type
//! - [`LanguageIdentifier`] - text to language code plus certainty
//!
//! Built-in defaults are [`PlainTextEngine`](crate::extractors::PlainTextEngine),
//! [`DefaultDetector`](crate::core::mime::DefaultDetector) and
//! [`WhatlangIdentifier`](crate::language_detection::WhatlangIdentifier).

pub mod detector;
pub mod extractor;
pub mod language;
pub mod traits;

pub use detector::{DetectionInput, MediaTypeDetector};
pub use extractor::{ExtractionEngine, ExtractionOptions};
pub use language::LanguageIdentifier;
pub use traits::Plugin;
