//! Core plumbing behind a document handle.
//!
//! - `config` - configuration loading and defaults
//! - `input` - data source classification (file or HTTP)
//! - `stream` - fresh byte streams over a classified input
//! - `mime` - the built-in media-type detector

pub mod config;
pub mod input;
pub mod mime;
pub mod stream;

pub use config::{DocumentConfig, HttpConfig, LanguageConfig, UNBOUNDED_CONTENT_LENGTH};
pub use input::{InputType, ResolvedInput, resolve_input};
pub use mime::DefaultDetector;
pub use stream::{DocumentStream, StreamProvider};
