//! Shared stubs and fixtures for integration tests.
#![allow(dead_code)]

use folio::{FolioError, Result};
use folio::plugins::{DetectionInput, ExtractionEngine, ExtractionOptions, LanguageIdentifier, MediaTypeDetector, Plugin};
use folio::types::{LanguageGuess, RawExtraction, RawMetadata};
use std::io::{Read, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::NamedTempFile;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Engine that returns canned output and counts how often it ran.
pub struct CountingEngine {
    text: String,
    metadata: RawMetadata,
    calls: AtomicUsize,
    last_options: Mutex<Option<ExtractionOptions>>,
}

impl CountingEngine {
    pub fn new(text: &str, metadata: RawMetadata) -> Self {
        Self {
            text: text.to_string(),
            metadata,
            calls: AtomicUsize::new(0),
            last_options: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<ExtractionOptions> {
        self.last_options.lock().unwrap().clone()
    }
}

impl Plugin for CountingEngine {
    fn name(&self) -> &str {
        "counting-engine"
    }

    fn version(&self) -> String {
        "0.0.0".to_string()
    }
}

impl ExtractionEngine for CountingEngine {
    fn extract(&self, stream: &mut dyn Read, options: &ExtractionOptions) -> Result<RawExtraction> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = Some(options.clone());
        let mut sink = Vec::new();
        stream.read_to_end(&mut sink)?;
        Ok(RawExtraction::new(self.text.clone(), self.metadata.clone()))
    }
}

/// What a [`RecordingDetector`] was handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeenInput {
    File(String),
    Stream(Vec<u8>),
}

/// Detector that records every input it receives.
pub struct RecordingDetector {
    answer: String,
    seen: Mutex<Vec<SeenInput>>,
}

impl RecordingDetector {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<SeenInput> {
        self.seen.lock().unwrap().clone()
    }
}

impl Plugin for RecordingDetector {
    fn name(&self) -> &str {
        "recording-detector"
    }

    fn version(&self) -> String {
        "0.0.0".to_string()
    }
}

impl MediaTypeDetector for RecordingDetector {
    fn detect(&self, input: DetectionInput<'_>) -> Result<String> {
        let seen = match input {
            DetectionInput::File(path) => SeenInput::File(path.display().to_string()),
            DetectionInput::Stream(reader) => {
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes)?;
                SeenInput::Stream(bytes)
            }
        };
        self.seen.lock().unwrap().push(seen);
        Ok(self.answer.clone())
    }
}

/// Identifier that returns a canned guess and counts how often it ran.
pub struct CountingIdentifier {
    guess: LanguageGuess,
    calls: AtomicUsize,
    last_text: Mutex<Option<String>>,
}

impl CountingIdentifier {
    pub fn new(code: &str, reasonably_certain: bool) -> Self {
        Self {
            guess: LanguageGuess::new(code, reasonably_certain),
            calls: AtomicUsize::new(0),
            last_text: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

impl Plugin for CountingIdentifier {
    fn name(&self) -> &str {
        "counting-identifier"
    }

    fn version(&self) -> String {
        "0.0.0".to_string()
    }
}

impl LanguageIdentifier for CountingIdentifier {
    fn identify(&self, text: &str) -> Result<LanguageGuess> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_text.lock().unwrap() = Some(text.to_string());
        Ok(self.guess.clone())
    }
}

/// Detector that fails with a `Detection` error on its first `failures` calls.
pub struct FlakyDetector {
    failures: usize,
    answer: String,
    calls: AtomicUsize,
}

impl FlakyDetector {
    pub fn new(failures: usize, answer: &str) -> Self {
        Self {
            failures,
            answer: answer.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Plugin for FlakyDetector {
    fn name(&self) -> &str {
        "flaky-detector"
    }

    fn version(&self) -> String {
        "0.0.0".to_string()
    }
}

impl MediaTypeDetector for FlakyDetector {
    fn detect(&self, _input: DetectionInput<'_>) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(FolioError::detection("detector unavailable"));
        }
        Ok(self.answer.clone())
    }
}

/// Identifier that fails with a `Detection` error on its first `failures` calls.
pub struct FlakyIdentifier {
    failures: usize,
    guess: LanguageGuess,
    calls: AtomicUsize,
}

impl FlakyIdentifier {
    pub fn new(failures: usize, code: &str) -> Self {
        Self {
            failures,
            guess: LanguageGuess::new(code, true),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Plugin for FlakyIdentifier {
    fn name(&self) -> &str {
        "flaky-identifier"
    }

    fn version(&self) -> String {
        "0.0.0".to_string()
    }
}

impl LanguageIdentifier for FlakyIdentifier {
    fn identify(&self, _text: &str) -> Result<LanguageGuess> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(FolioError::detection("identifier unavailable"));
        }
        Ok(self.guess.clone())
    }
}

/// Write `content` to a temp file that lives as long as the returned handle.
pub fn temp_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Should create temp file");
    file.write_all(content).expect("Should write temp file");
    file
}

pub fn path_of(file: &NamedTempFile) -> String {
    file.path().to_str().expect("temp path is UTF-8").to_string()
}

/// A wiremock server driven from synchronous tests.
///
/// The server runs on its own thread; the runtime is only used to drive
/// setup and inspection futures, so blocking HTTP calls can be made from the
/// test thread.
pub struct MockSite {
    server: MockServer,
    runtime: Runtime,
}

impl MockSite {
    pub fn start() -> Self {
        let runtime = Runtime::new().expect("Should build tokio runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn serve(&self, route: &str, status: u16, body: &[u8]) {
        let mock = Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_bytes(body.to_vec()));
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// Answer `route` with `body` once; later requests get a 500.
    pub fn serve_once(&self, route: &str, body: &[u8]) {
        let first = Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .up_to_n_times(1)
            .with_priority(1);
        let after = Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(500));
        self.runtime.block_on(async {
            first.mount(&self.server).await;
            after.mount(&self.server).await;
        });
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}{}", self.server.uri(), route)
    }

    pub fn request_count(&self) -> usize {
        self.runtime
            .block_on(self.server.received_requests())
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
