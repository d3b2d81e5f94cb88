//! Fresh byte streams over a resolved input.
//!
//! Every call to [`StreamProvider::open`] returns an independent stream: a
//! newly opened file, or the body of a newly issued GET request. Streams are
//! never rewound or shared, so extraction and media-type detection can each
//! read the whole document.

use crate::Result;
use crate::core::config::HttpConfig;
use crate::core::input::ResolvedInput;
use reqwest::blocking::Client;
use std::fs::File;
use std::io::Read;

/// A readable byte stream over a document.
pub type DocumentStream = Box<dyn Read + Send>;

/// Build the blocking HTTP client used for resolution and streaming.
pub fn build_http_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .build()?;
    Ok(client)
}

/// Opens streams for one resolved input.
#[derive(Debug, Clone)]
pub struct StreamProvider {
    input: ResolvedInput,
    client: Client,
}

impl StreamProvider {
    pub fn new(input: ResolvedInput, client: Client) -> Self {
        Self { input, client }
    }

    pub fn input(&self) -> &ResolvedInput {
        &self.input
    }

    /// Open a new stream over the document.
    ///
    /// # Errors
    ///
    /// - `FolioError::Io` if the file can't be opened
    /// - `FolioError::Network` if the request fails or returns a non-success status
    pub fn open(&self) -> Result<DocumentStream> {
        match &self.input {
            ResolvedInput::File(path) => {
                tracing::trace!(path = %path.display(), "opening file stream");
                Ok(Box::new(File::open(path)?))
            }
            ResolvedInput::Http(url) => {
                tracing::trace!(url = %url, "opening HTTP stream");
                let response = self.client.get(url.clone()).send()?.error_for_status()?;
                Ok(Box::new(response))
            }
        }
    }
}
