//! Folio - lazy, cached access to a single document.
//!
//! Folio gives uniform access to the extracted text, metadata, media type and
//! language of one document, whether it sits on the local filesystem or
//! behind an HTTP URL. The expensive work is delegated to pluggable
//! capabilities and performed at most once per document handle.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use folio::Document;
//!
//! # fn main() -> folio::Result<()> {
//! let document = Document::open("notes/meeting.txt")?;
//! println!("type: {}", document.media_type()?);
//! println!("language: {}", document.language()?);
//! println!("{}", document.content()?);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Document** (`document`): the facade; owns every cache
//! - **Core** (`core`): input classification, stream opening, config, MIME detection
//! - **Plugins** (`plugins`): capability traits for engines, detectors, identifiers
//! - **Extractors** (`extractors`): the built-in plain text engine
//! - **Language detection** (`language_detection`): the built-in whatlang identifier

#![deny(unsafe_code)]

pub mod core;
pub mod document;
pub mod error;
pub mod extractors;
pub mod language_detection;
pub mod plugins;
pub mod types;

pub use document::{Document, DocumentBuilder};
pub use error::{FolioError, Result};
pub use types::*;

pub use core::config::{DocumentConfig, HttpConfig, LanguageConfig, UNBOUNDED_CONTENT_LENGTH};
pub use core::input::{InputType, ResolvedInput};
pub use core::mime::DefaultDetector;

pub use extractors::PlainTextEngine;
pub use language_detection::WhatlangIdentifier;
pub use plugins::{DetectionInput, ExtractionEngine, ExtractionOptions, LanguageIdentifier, MediaTypeDetector, Plugin};
