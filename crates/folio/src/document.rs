//! The document handle.
//!
//! [`Document`] is the facade callers work with. It classifies its data
//! source once, at construction, and computes everything else lazily:
//!
//! - content and raw metadata come from a single extraction engine run,
//!   performed on first demand and never repeated;
//! - the flat metadata map is derived from the raw metadata once;
//! - the media type is detected from an independent read of the input and
//!   never forces extraction;
//! - the language is identified from the extracted content once.
//!
//! Each value lives in its own `OnceCell`. A failed computation leaves its
//! cell empty, so the call can simply be repeated.
//!
//! # Example
//!
//! ```rust,no_run
//! use folio::Document;
//!
//! # fn main() -> folio::Result<()> {
//! let document = Document::open("report.txt")?;
//! println!("{} ({})", document.media_type()?, document.language()?);
//! println!("{}", document.content()?);
//! for (name, value) in document.metadata()?.iter() {
//!     println!("{name}: {value}");
//! }
//! # Ok(())
//! # }
//! ```

use crate::Result;
use crate::core::config::DocumentConfig;
use crate::core::input::{InputType, ResolvedInput, resolve_input};
use crate::core::mime::DefaultDetector;
use crate::core::stream::{StreamProvider, build_http_client};
use crate::extractors::PlainTextEngine;
use crate::language_detection::WhatlangIdentifier;
use crate::plugins::{DetectionInput, ExtractionEngine, ExtractionOptions, LanguageIdentifier, MediaTypeDetector};
use crate::types::{LanguageGuess, Metadata, RawMetadata};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

/// Result of the one extraction run: trimmed text plus the raw metadata
/// produced alongside it.
#[derive(Debug)]
struct Extracted {
    content: String,
    raw_metadata: RawMetadata,
}

/// Lazy, cached view of a single document.
///
/// Concurrent first calls on a shared handle are serialised per cache, so
/// the engine still runs at most once.
pub struct Document {
    data_source: String,
    streams: StreamProvider,
    config: DocumentConfig,
    engine: Arc<dyn ExtractionEngine>,
    detector: Arc<dyn MediaTypeDetector>,
    language_identifier: Arc<dyn LanguageIdentifier>,
    extraction: OnceCell<Extracted>,
    metadata: OnceCell<Metadata>,
    media_type: OnceCell<String>,
    language: OnceCell<LanguageGuess>,
}

impl Document {
    /// Open `data_source` with the default configuration and capabilities.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::UnavailableInput` if `data_source` is neither an
    /// existing local file nor a reachable HTTP resource.
    pub fn open(data_source: impl Into<String>) -> Result<Self> {
        Self::builder(data_source).build()
    }

    /// Start configuring a handle for `data_source`.
    pub fn builder(data_source: impl Into<String>) -> DocumentBuilder {
        DocumentBuilder::new(data_source)
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    pub fn input_type(&self) -> InputType {
        self.streams.input().input_type()
    }

    pub fn input(&self) -> &ResolvedInput {
        self.streams.input()
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Whether the extraction engine has run successfully.
    pub fn is_parsed(&self) -> bool {
        self.extraction.get().is_some()
    }

    /// Run the extraction engine if it has not run yet.
    ///
    /// Opens a fresh stream and invokes the engine exactly once over the
    /// lifetime of the handle; later calls return immediately. On failure
    /// nothing is cached and the engine's error is returned as is.
    pub fn parse(&self) -> Result<()> {
        self.extracted().map(|_| ())
    }

    /// Extracted text with surrounding whitespace trimmed.
    pub fn content(&self) -> Result<&str> {
        Ok(&self.extracted()?.content)
    }

    /// Flat metadata map, one value per name, in engine order.
    pub fn metadata(&self) -> Result<&Metadata> {
        let extracted = self.extracted()?;
        Ok(self.metadata.get_or_init(|| {
            tracing::trace!(names = extracted.raw_metadata.len(), "flattening metadata");
            Metadata::from_raw(&extracted.raw_metadata)
        }))
    }

    /// Metadata exactly as the engine produced it, including every value of
    /// multi-valued names.
    pub fn raw_metadata(&self) -> Result<&RawMetadata> {
        Ok(&self.extracted()?.raw_metadata)
    }

    /// MIME type of the document.
    ///
    /// Local files are handed to the detector by path, remote documents as a
    /// freshly opened stream. Does not trigger extraction.
    pub fn media_type(&self) -> Result<&str> {
        self.media_type
            .get_or_try_init(|| {
                let mime = match self.streams.input() {
                    ResolvedInput::File(path) => self.detector.detect(DetectionInput::File(path))?,
                    ResolvedInput::Http(_) => {
                        let mut stream = self.streams.open()?;
                        self.detector.detect(DetectionInput::Stream(&mut *stream))?
                    }
                };
                tracing::debug!(
                    data_source = %self.data_source,
                    detector = self.detector.name(),
                    media_type = %mime,
                    "detected media type"
                );
                Ok(mime)
            })
            .map(String::as_str)
    }

    /// Language code of the extracted content, extracting first if needed.
    pub fn language(&self) -> Result<&str> {
        Ok(&self.language_guess()?.code)
    }

    /// Whether the language identifier trusts the guess behind
    /// [`language`](Self::language).
    ///
    /// Short texts are frequently reported as uncertain even when the code is
    /// right; treat `false` as "unknown", not as "wrong".
    pub fn language_is_reasonably_certain(&self) -> Result<bool> {
        Ok(self.language_guess()?.reasonably_certain)
    }

    /// Names present in [`metadata`](Self::metadata).
    #[deprecated(since = "0.2.0", note = "use `metadata()?.keys()` instead")]
    pub fn available_metadata_keys(&self) -> Result<Vec<&str>> {
        Ok(self.metadata()?.keys().collect())
    }

    /// Whether [`metadata`](Self::metadata) has a value for `name`.
    #[deprecated(since = "0.2.0", note = "use `metadata()?.contains_key(name)` instead")]
    pub fn metadata_exists(&self, name: &str) -> Result<bool> {
        Ok(self.metadata()?.contains_key(name))
    }

    fn extracted(&self) -> Result<&Extracted> {
        self.extraction.get_or_try_init(|| {
            let options = ExtractionOptions {
                max_content_length: self.config.content_limit(),
                detector: Some(Arc::clone(&self.detector)),
            };
            tracing::debug!(
                data_source = %self.data_source,
                engine = self.engine.name(),
                max_content_length = ?options.max_content_length,
                "running extraction engine"
            );

            let mut stream = self.streams.open()?;
            let raw = self.engine.extract(&mut *stream, &options)?;
            let content = raw.text.trim().to_string();

            tracing::debug!(
                data_source = %self.data_source,
                content_len = content.len(),
                metadata_names = raw.metadata.len(),
                "extraction finished"
            );
            Ok(Extracted {
                content,
                raw_metadata: raw.metadata,
            })
        })
    }

    fn language_guess(&self) -> Result<&LanguageGuess> {
        self.language.get_or_try_init(|| {
            let content = self.content()?;
            let guess = self.language_identifier.identify(content)?;
            tracing::debug!(
                data_source = %self.data_source,
                identifier = self.language_identifier.name(),
                language = %guess.code,
                reasonably_certain = guess.reasonably_certain,
                "identified language"
            );
            Ok(guess)
        })
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("data_source", &self.data_source)
            .field("input", self.streams.input())
            .field("engine", &self.engine.name())
            .field("detector", &self.detector.name())
            .field("language_identifier", &self.language_identifier.name())
            .field("parsed", &self.is_parsed())
            .finish()
    }
}

/// Builder for [`Document`].
///
/// # Example
///
/// ```rust,no_run
/// use folio::Document;
/// use folio::core::mime::DefaultDetector;
/// use std::sync::Arc;
///
/// # fn main() -> folio::Result<()> {
/// let document = Document::builder("https://example.com/notes.txt")
///     .max_content_length(10_000)
///     .detector(Arc::new(DefaultDetector::new()))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct DocumentBuilder {
    data_source: String,
    config: DocumentConfig,
    engine: Option<Arc<dyn ExtractionEngine>>,
    detector: Option<Arc<dyn MediaTypeDetector>>,
    language_identifier: Option<Arc<dyn LanguageIdentifier>>,
}

impl DocumentBuilder {
    pub fn new(data_source: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            config: DocumentConfig::default(),
            engine: None,
            detector: None,
            language_identifier: None,
        }
    }

    /// Replace the whole configuration.
    ///
    /// Call before [`max_content_length`](Self::max_content_length) if both
    /// are used, since this overwrites the limit.
    pub fn config(mut self, config: DocumentConfig) -> Self {
        self.config = config;
        self
    }

    /// Cap the extracted content at `max` characters; negative means unbounded.
    pub fn max_content_length(mut self, max: i64) -> Self {
        self.config.max_content_length = max;
        self
    }

    pub fn engine(mut self, engine: Arc<dyn ExtractionEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn detector(mut self, detector: Arc<dyn MediaTypeDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn language_identifier(mut self, identifier: Arc<dyn LanguageIdentifier>) -> Self {
        self.language_identifier = Some(identifier);
        self
    }

    /// Validate the configuration, classify the data source and build the handle.
    ///
    /// Classification happens here, not on first use: an HTTP data source is
    /// requested once right away to prove it is reachable.
    ///
    /// # Errors
    ///
    /// - `FolioError::Validation` for an invalid configuration
    /// - `FolioError::Network` if the HTTP client can't be built
    /// - `FolioError::UnavailableInput` if the data source can't be classified
    pub fn build(self) -> Result<Document> {
        self.config.validate()?;

        let client = build_http_client(&self.config.http)?;
        let input = resolve_input(&self.data_source, &client)?;

        let engine = self.engine.unwrap_or_else(|| Arc::new(PlainTextEngine::new()));
        let detector = self.detector.unwrap_or_else(|| Arc::new(DefaultDetector::new()));
        let language_identifier = self
            .language_identifier
            .unwrap_or_else(|| Arc::new(WhatlangIdentifier::from_config(&self.config.language)));

        tracing::debug!(
            data_source = %self.data_source,
            input_type = %input.input_type(),
            engine = engine.name(),
            detector = detector.name(),
            "opened document"
        );

        Ok(Document {
            data_source: self.data_source,
            streams: StreamProvider::new(input, client),
            config: self.config,
            engine,
            detector,
            language_identifier,
            extraction: OnceCell::new(),
            metadata: OnceCell::new(),
            media_type: OnceCell::new(),
            language: OnceCell::new(),
        })
    }
}
