//! Media-type detector trait.

use crate::Result;
use crate::plugins::Plugin;
use std::fmt;
use std::io::Read;
use std::path::Path;

/// What a detector gets to look at.
///
/// Local documents are handed over as a path so the detector can combine the
/// file name with the file's bytes. Remote documents arrive as a freshly
/// opened stream that the detector owns for the duration of the call.
pub enum DetectionInput<'a> {
    File(&'a Path),
    Stream(&'a mut dyn Read),
}

impl fmt::Debug for DetectionInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Trait for media-type detectors.
///
/// Implementations return a MIME type string such as `"application/pdf"`.
/// When nothing more specific can be said, `"application/octet-stream"` is
/// the conventional answer rather than an error.
pub trait MediaTypeDetector: Plugin {
    fn detect(&self, input: DetectionInput<'_>) -> Result<String>;
}
