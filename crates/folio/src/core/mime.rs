//! MIME type detection.
//!
//! [`DefaultDetector`] is the media-type detector used by a document handle
//! unless another one is configured. It looks at content first (magic bytes
//! via `infer`), then at the file extension for local files, and finally
//! falls back to a UTF-8 text heuristic.

use crate::plugins::{DetectionInput, MediaTypeDetector, Plugin};
use crate::{FolioError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const HTML_MIME_TYPE: &str = "text/html";
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";
pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";
pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const EXCEL_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const POWER_POINT_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const JSON_MIME_TYPE: &str = "application/json";
pub const YAML_MIME_TYPE: &str = "application/x-yaml";
pub const TOML_MIME_TYPE: &str = "application/toml";
pub const XML_MIME_TYPE: &str = "application/xml";
pub const EML_MIME_TYPE: &str = "message/rfc822";

/// Number of leading bytes inspected when sniffing content.
pub const SNIFF_LEN: usize = 8192;

/// Extension to MIME type mapping for formats that carry no magic bytes or
/// whose magic bytes are too generic (plain zip, plain text).
static EXT_TO_MIME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("txt", PLAIN_TEXT_MIME_TYPE);
    m.insert("md", MARKDOWN_MIME_TYPE);
    m.insert("markdown", MARKDOWN_MIME_TYPE);

    m.insert("pdf", PDF_MIME_TYPE);

    m.insert("html", HTML_MIME_TYPE);
    m.insert("htm", HTML_MIME_TYPE);

    m.insert("docx", DOCX_MIME_TYPE);
    m.insert("xlsx", EXCEL_MIME_TYPE);
    m.insert("pptx", POWER_POINT_MIME_TYPE);
    m.insert("odt", "application/vnd.oasis.opendocument.text");
    m.insert("ods", "application/vnd.oasis.opendocument.spreadsheet");
    m.insert("epub", "application/epub+zip");

    m.insert("csv", "text/csv");
    m.insert("tsv", "text/tab-separated-values");
    m.insert("json", JSON_MIME_TYPE);
    m.insert("yaml", YAML_MIME_TYPE);
    m.insert("yml", YAML_MIME_TYPE);
    m.insert("toml", TOML_MIME_TYPE);
    m.insert("xml", XML_MIME_TYPE);
    m.insert("svg", "image/svg+xml");

    m.insert("eml", EML_MIME_TYPE);
    m.insert("rtf", "application/rtf");
    m.insert("rst", "text/x-rst");
    m.insert("org", "text/x-org");
    m.insert("tex", "application/x-latex");

    m
});

/// Detect MIME type from a file path's extension.
///
/// Uses the built-in table first and falls back to `mime_guess`.
///
/// # Errors
///
/// Returns `FolioError::Detection` if the extension is missing or unknown.
pub fn detect_mime_type(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let extension = path.extension().and_then(|ext| ext.to_str()).map(|s| s.to_lowercase());

    if let Some(ext) = &extension
        && let Some(mime_type) = EXT_TO_MIME.get(ext.as_str())
    {
        return Ok(mime_type.to_string());
    }

    if let Some(mime) = mime_guess::from_path(path).first() {
        return Ok(mime.to_string());
    }

    match extension {
        Some(ext) => Err(FolioError::detection(format!("Unknown extension: .{}", ext))),
        None => Err(FolioError::detection(format!(
            "Could not determine MIME type from file path: {}",
            path.display()
        ))),
    }
}

/// Detect MIME type from leading content bytes.
///
/// Returns `None` when the bytes carry no recognisable signature.
pub fn detect_mime_type_from_bytes(content: &[u8]) -> Option<String> {
    infer::get(content).map(|kind| kind.mime_type().to_string())
}

/// Whether `content` looks like text: valid UTF-8 (a character cut off at the
/// end of the sample is tolerated) without NUL bytes.
pub fn looks_like_text(content: &[u8]) -> bool {
    if content.contains(&0) {
        return false;
    }
    match std::str::from_utf8(content) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

fn read_prefix(reader: &mut dyn Read) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(SNIFF_LEN);
    reader.take(SNIFF_LEN as u64).read_to_end(&mut buffer)?;
    Ok(buffer)
}

fn classify_content(prefix: &[u8]) -> String {
    if let Some(mime) = detect_mime_type_from_bytes(prefix) {
        return mime;
    }
    if looks_like_text(prefix) {
        PLAIN_TEXT_MIME_TYPE.to_string()
    } else {
        OCTET_STREAM_MIME_TYPE.to_string()
    }
}

/// Built-in media-type detector.
///
/// - Files: magic bytes, then extension, then text heuristic. A `.docx` is
///   reported as Word even though its magic bytes only say "zip".
/// - Streams: magic bytes over the first [`SNIFF_LEN`] bytes, then text
///   heuristic.
///
/// Empty input is `text/plain`; unrecognised binary input is
/// `application/octet-stream`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDetector;

impl DefaultDetector {
    pub fn new() -> Self {
        Self
    }

    fn detect_file(&self, path: &Path) -> Result<String> {
        let mut file = File::open(path)?;
        let prefix = read_prefix(&mut file)?;

        let sniffed = detect_mime_type_from_bytes(&prefix);
        let by_extension = detect_mime_type(path).ok();

        let mime = match (sniffed, by_extension) {
            (Some(sniffed), Some(ext)) if sniffed == "application/zip" => ext,
            (Some(sniffed), _) => sniffed,
            (None, Some(ext)) => ext,
            (None, None) => classify_content(&prefix),
        };
        Ok(mime)
    }
}

impl Plugin for DefaultDetector {
    fn name(&self) -> &str {
        "default-detector"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn description(&self) -> &str {
        "Detects media types from magic bytes, file extensions and text heuristics"
    }
}

impl MediaTypeDetector for DefaultDetector {
    fn detect(&self, input: DetectionInput<'_>) -> Result<String> {
        match input {
            DetectionInput::File(path) => self.detect_file(path),
            DetectionInput::Stream(reader) => {
                let prefix = read_prefix(reader)?;
                Ok(classify_content(&prefix))
            }
        }
    }
}
