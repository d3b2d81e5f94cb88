//! Extraction engine trait.
//!
//! The engine turns a raw byte stream into text plus engine-native metadata.
//! Format-specific decoding lives entirely behind this trait.

use crate::Result;
use crate::plugins::{MediaTypeDetector, Plugin};
use crate::types::RawExtraction;
use std::fmt;
use std::io::Read;
use std::sync::Arc;

/// Options handed to the engine on every run.
#[derive(Clone, Default)]
pub struct ExtractionOptions {
    /// Maximum number of characters to extract (`None` = unbounded).
    pub max_content_length: Option<usize>,

    /// The media-type detector configured on the document handle.
    ///
    /// Engines that dispatch on format can consult it instead of sniffing
    /// the stream themselves. Always set when called from a document handle.
    pub detector: Option<Arc<dyn MediaTypeDetector>>,
}

impl fmt::Debug for ExtractionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionOptions")
            .field("max_content_length", &self.max_content_length)
            .field("detector", &self.detector.as_ref().map(|detector| detector.name()))
            .finish()
    }
}

/// Trait for extraction engines.
///
/// A document handle calls [`extract`](ExtractionEngine::extract) at most
/// once over its lifetime, with a stream positioned at the start of the
/// document. The engine may read as much or as little of it as it needs.
///
/// # Errors
///
/// Engines report failures as `FolioError::Extraction` (or `FolioError::Io`
/// for read errors). The handle passes them to the caller unchanged and
/// caches nothing, so the call may be retried.
///
/// # Example
///
/// ```rust
/// use folio::plugins::{ExtractionEngine, ExtractionOptions, Plugin};
/// use folio::types::{RawExtraction, RawMetadata};
/// use folio::Result;
/// use std::io::Read;
///
/// struct ShoutingEngine;
///
/// impl Plugin for ShoutingEngine {
///     fn name(&self) -> &str { "shouting-engine" }
///     fn version(&self) -> String { "1.0.0".to_string() }
/// }
///
/// impl ExtractionEngine for ShoutingEngine {
///     fn extract(&self, stream: &mut dyn Read, _options: &ExtractionOptions) -> Result<RawExtraction> {
///         let mut text = String::new();
///         stream.read_to_string(&mut text)?;
///         let mut metadata = RawMetadata::new();
///         metadata.set("engine", self.name());
///         Ok(RawExtraction::new(text.to_uppercase(), metadata))
///     }
/// }
/// ```
pub trait ExtractionEngine: Plugin {
    /// Extract text and metadata from `stream`.
    fn extract(&self, stream: &mut dyn Read, options: &ExtractionOptions) -> Result<RawExtraction>;
}
