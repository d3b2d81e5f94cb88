//! Error types for Folio.
//!
//! Every fallible operation in the crate returns [`FolioError`]. The variants
//! map onto the failure points of a document handle:
//!
//! - `UnavailableInput` - the data source is neither a local file nor a
//!   reachable HTTP resource (raised at construction)
//! - `Extraction` - the extraction engine failed
//! - `Detection` - the media-type detector or language identifier failed
//! - `Io` - file system errors, always bubbled up unchanged
//! - `Network` - an HTTP stream could not be opened
//! - `Validation` - invalid configuration
//!
//! Errors raised by a capability are handed back to the caller exactly as the
//! capability produced them. Nothing in the crate retries.
//!
//! # Example
//!
//! ```rust
//! use folio::{Document, FolioError};
//!
//! let err = Document::open("definitely/not/here.txt").unwrap_err();
//! assert!(matches!(err, FolioError::UnavailableInput { .. }));
//! ```
use thiserror::Error;

/// Result type alias using `FolioError`.
pub type Result<T> = std::result::Result<T, FolioError>;

/// Main error type for all Folio operations.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Input ({data_source}) is not an available file or HTTP resource")]
    UnavailableInput {
        data_source: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Extraction error: {message}")]
    Extraction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Detection error: {message}")]
    Detection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<reqwest::Error> for FolioError {
    fn from(err: reqwest::Error) -> Self {
        let message = match err.url() {
            Some(url) => format!("request to {} failed: {}", url, err),
            None => err.to_string(),
        };
        FolioError::Network {
            message,
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl FolioError {
    error_constructor!(extraction, Extraction);
    error_constructor!(detection, Detection);
    error_constructor!(network, Network);
    error_constructor!(validation, Validation);

    /// Create an UnavailableInput error for `data_source`.
    pub fn unavailable_input<S: Into<String>>(data_source: S) -> Self {
        Self::UnavailableInput {
            data_source: data_source.into(),
            source: None,
        }
    }

    /// Create an UnavailableInput error for `data_source` with the failure that ruled out HTTP.
    pub fn unavailable_input_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        data_source: S,
        source: E,
    ) -> Self {
        Self::UnavailableInput {
            data_source: data_source.into(),
            source: Some(Box::new(source)),
        }
    }
}
