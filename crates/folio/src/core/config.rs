//! Configuration loading and management.
//!
//! A [`DocumentConfig`] can be built in code, loaded from TOML, YAML or JSON,
//! or discovered as `folio.toml` in the current directory or one of its
//! parents.

use crate::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Sentinel for [`DocumentConfig::max_content_length`] meaning "no limit".
pub const UNBOUNDED_CONTENT_LENGTH: i64 = -1;

/// Name of the file searched for by [`DocumentConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "folio.toml";

/// Configuration applied to a document handle.
///
/// # Example
///
/// ```rust
/// use folio::core::config::DocumentConfig;
///
/// let config = DocumentConfig::default();
/// assert_eq!(config.content_limit(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Maximum number of characters the engine should extract.
    ///
    /// Negative values (conventionally `-1`) mean unbounded.
    #[serde(default = "default_max_content_length")]
    pub max_content_length: i64,

    /// Settings for HTTP data sources.
    #[serde(default)]
    pub http: HttpConfig,

    /// Settings for the built-in language identifier.
    #[serde(default)]
    pub language: LanguageConfig,
}

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds (None = no timeout)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Language identification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Minimum confidence (0.0-1.0) for a guess to count as reasonably certain
    #[serde(default = "default_confidence")]
    pub min_confidence: f64,

    /// Code reported when no guess can be made at all
    #[serde(default = "default_fallback_code")]
    pub fallback_code: String,
}

fn default_max_content_length() -> i64 {
    UNBOUNDED_CONTENT_LENGTH
}
fn default_user_agent() -> String {
    format!("folio/{}", env!("CARGO_PKG_VERSION"))
}
fn default_confidence() -> f64 {
    0.5
}
fn default_fallback_code() -> String {
    "und".to_string()
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            max_content_length: default_max_content_length(),
            http: HttpConfig::default(),
            language: LanguageConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_confidence(),
            fallback_code: default_fallback_code(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl DocumentConfig {
    /// Character limit handed to the extraction engine (`None` = unbounded).
    pub fn content_limit(&self) -> Option<usize> {
        usize::try_from(self.max_content_length).ok()
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::Validation` for an out-of-range confidence or an
    /// empty fallback language code.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.language.min_confidence) {
            return Err(FolioError::validation(format!(
                "language.min_confidence must be within 0.0..=1.0, got {}",
                self.language.min_confidence
            )));
        }
        if self.language.fallback_code.trim().is_empty() {
            return Err(FolioError::validation("language.fallback_code must not be empty"));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::Validation` if the file can't be read or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| FolioError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| FolioError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_json::from_str(&content)
            .map_err(|e| FolioError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, picking the format from the file extension.
    ///
    /// `.yaml`/`.yml` and `.json` are recognised; anything else is read as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_lowercase);
        let config = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_file(path)?,
            Some("json") => Self::from_json_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Discover `folio.toml` in the current directory or its parents.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(FolioError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "discovered config file");
                let config = Self::from_toml_file(&candidate)?;
                config.validate()?;
                return Ok(Some(config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| FolioError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
