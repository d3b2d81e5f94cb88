//! Data source classification.
//!
//! A data source is either a path to a local file or an `http`/`https` URL.
//! Classification happens once, when a document handle is built, and the
//! result never changes afterwards.

use crate::{FolioError, Result};
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Kind of input behind a document handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    /// Existing, readable local file.
    File,
    /// Reachable HTTP or HTTPS resource.
    Http,
}

impl Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Http => "http",
        })
    }
}

/// A classified data source, carrying what is needed to open it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedInput {
    File(PathBuf),
    Http(Url),
}

impl ResolvedInput {
    pub fn input_type(&self) -> InputType {
        match self {
            Self::File(_) => InputType::File,
            Self::Http(_) => InputType::Http,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Http(_) => None,
        }
    }

    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::File(_) => None,
            Self::Http(url) => Some(url),
        }
    }
}

impl Display for ResolvedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => f.write_str(url.as_str()),
        }
    }
}

/// Classify `data_source`.
///
/// Local files win: a data source naming an existing, readable regular file is
/// `File`. Otherwise it must parse as an `http`/`https` URL that answers a GET
/// request with a success status. The response is dropped unread; a fresh
/// request is made whenever the document is actually read.
///
/// # Errors
///
/// Returns `FolioError::UnavailableInput` when neither applies. The source
/// error, if any, explains why the HTTP branch failed.
pub fn resolve_input(data_source: &str, client: &Client) -> Result<ResolvedInput> {
    let path = Path::new(data_source);
    if is_readable_file(path) {
        tracing::debug!(data_source, "resolved input as local file");
        return Ok(ResolvedInput::File(path.to_path_buf()));
    }

    let url = match Url::parse(data_source) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        Ok(_) => return Err(FolioError::unavailable_input(data_source)),
        Err(e) => return Err(FolioError::unavailable_input_with_source(data_source, e)),
    };

    match client.get(url.clone()).send().and_then(Response::error_for_status) {
        Ok(_) => {
            tracing::debug!(data_source, "resolved input as HTTP resource");
            Ok(ResolvedInput::Http(url))
        }
        Err(e) => {
            tracing::debug!(data_source, error = %e, "HTTP resource is not reachable");
            Err(FolioError::unavailable_input_with_source(data_source, e))
        }
    }
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && std::fs::File::open(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn client() -> Client {
        Client::new()
    }

    #[test]
    fn test_existing_file_resolves_as_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();
        let source = file.path().to_str().unwrap();

        let resolved = resolve_input(source, &client()).unwrap();
        assert_eq!(resolved.input_type(), InputType::File);
        assert_eq!(resolved.path(), Some(file.path()));
        assert!(resolved.url().is_none());
    }

    #[test]
    fn test_missing_path_is_unavailable() {
        let err = resolve_input("/nonexistent/report.pdf", &client()).unwrap_err();
        match err {
            FolioError::UnavailableInput { data_source, .. } => {
                assert_eq!(data_source, "/nonexistent/report.pdf");
            }
            other => panic!("expected UnavailableInput, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let source = dir.path().to_str().unwrap();

        let err = resolve_input(source, &client()).unwrap_err();
        assert!(matches!(err, FolioError::UnavailableInput { .. }));
    }

    #[test]
    fn test_non_http_url_is_unavailable() {
        let err = resolve_input("ftp://example.com/report.pdf", &client()).unwrap_err();
        assert!(matches!(err, FolioError::UnavailableInput { source: None, .. }));
    }

    #[test]
    fn test_plain_word_is_unavailable() {
        let err = resolve_input("not a document", &client()).unwrap_err();
        assert!(matches!(err, FolioError::UnavailableInput { source: Some(_), .. }));
    }

    #[test]
    fn test_input_type_display() {
        assert_eq!(InputType::File.to_string(), "file");
        assert_eq!(InputType::Http.to_string(), "http");
    }
}
