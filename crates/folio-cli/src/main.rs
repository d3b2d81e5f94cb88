//! Folio command-line interface.
//!
//! Prints the content, metadata, media type or language of one local file or
//! HTTP URL.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use folio::{Document, DocumentConfig};
use serde_json::json;
use std::path::PathBuf;

/// Output format for commands that print structured data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// A single JSON document
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Inspect the text, metadata, media type and language of a document", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML, YAML or JSON); defaults to a discovered folio.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Maximum number of characters to extract (negative = unbounded)
    #[arg(short = 'm', long, global = true, allow_negative_numbers = true)]
    max_content_length: Option<i64>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the extracted text
    Content {
        /// Local file path or http(s) URL
        source: String,
    },

    /// Print the document metadata
    Metadata {
        /// Local file path or http(s) URL
        source: String,
    },

    /// Print the detected MIME type
    MediaType {
        /// Local file path or http(s) URL
        source: String,
    },

    /// Print the language code and whether it is reasonably certain
    Language {
        /// Local file path or http(s) URL
        source: String,
    },

    /// Print everything known about the document
    Inspect {
        /// Local file path or http(s) URL
        source: String,
    },
}

impl Commands {
    fn source(&self) -> &str {
        match self {
            Self::Content { source }
            | Self::Metadata { source }
            | Self::MediaType { source }
            | Self::Language { source }
            | Self::Inspect { source } => source,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.max_content_length)?;
    let source = cli.command.source();
    let document = Document::builder(source)
        .config(config)
        .build()
        .with_context(|| format!("Failed to open '{}'", source))?;

    tracing::debug!(source, input_type = %document.input_type(), "opened document");

    let output = render(&cli.command, &document, cli.format)?;
    println!("{}", output);
    Ok(())
}

/// Send tracing output to stderr so stdout stays clean for results.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if verbose {
        EnvFilter::new("folio=debug,folio_cli=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// An explicit `--config` wins; otherwise a discovered `folio.toml`, else defaults.
fn load_config(path: Option<&std::path::Path>, max_content_length: Option<i64>) -> Result<DocumentConfig> {
    let mut config = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config file");
            DocumentConfig::from_file(path)
                .with_context(|| format!("Failed to load config from '{}'", path.display()))?
        }
        None => match DocumentConfig::discover().context("Failed to discover folio.toml")? {
            Some(config) => config,
            None => {
                tracing::debug!("no folio.toml found, using defaults");
                DocumentConfig::default()
            }
        },
    };

    if let Some(max) = max_content_length {
        tracing::debug!(max_content_length = max, "overriding max_content_length");
        config.max_content_length = max;
    }
    Ok(config)
}

fn render(command: &Commands, document: &Document, format: OutputFormat) -> Result<String> {
    let output = match (command, format) {
        (Commands::Content { .. }, OutputFormat::Text) => document.content()?.to_string(),
        (Commands::Content { .. }, OutputFormat::Json) => json!({ "content": document.content()? }).to_string(),

        (Commands::Metadata { .. }, OutputFormat::Text) => document
            .metadata()?
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("\n"),
        (Commands::Metadata { .. }, OutputFormat::Json) => serde_json::to_string_pretty(document.metadata()?)?,

        (Commands::MediaType { .. }, OutputFormat::Text) => document.media_type()?.to_string(),
        (Commands::MediaType { .. }, OutputFormat::Json) => {
            json!({ "media_type": document.media_type()? }).to_string()
        }

        (Commands::Language { .. }, OutputFormat::Text) => format!(
            "{} ({})",
            document.language()?,
            certainty_label(document.language_is_reasonably_certain()?)
        ),
        (Commands::Language { .. }, OutputFormat::Json) => json!({
            "language": document.language()?,
            "reasonably_certain": document.language_is_reasonably_certain()?,
        })
        .to_string(),

        (Commands::Inspect { .. }, OutputFormat::Text) => {
            let mut lines = vec![
                format!("source: {}", document.data_source()),
                format!("input type: {}", document.input_type()),
                format!("media type: {}", document.media_type()?),
                format!(
                    "language: {} ({})",
                    document.language()?,
                    certainty_label(document.language_is_reasonably_certain()?)
                ),
                "metadata:".to_string(),
            ];
            lines.extend(
                document
                    .metadata()?
                    .iter()
                    .map(|(name, value)| format!("  {}: {}", name, value)),
            );
            lines.push("content:".to_string());
            lines.push(document.content()?.to_string());
            lines.join("\n")
        }
        (Commands::Inspect { .. }, OutputFormat::Json) => serde_json::to_string_pretty(&json!({
            "source": document.data_source(),
            "input_type": document.input_type(),
            "media_type": document.media_type()?,
            "language": document.language()?,
            "reasonably_certain": document.language_is_reasonably_certain()?,
            "metadata": document.metadata()?,
            "content": document.content()?,
        }))?,
    };
    Ok(output)
}

fn certainty_label(certain: bool) -> &'static str {
    if certain { "reasonably certain" } else { "uncertain" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn document_with(content: &str) -> (NamedTempFile, Document) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let document = Document::open(file.path().to_str().unwrap()).unwrap();
        (file, document)
    }

    #[test]
    fn test_parse_subcommand_with_global_flags() {
        let cli = Cli::try_parse_from(["folio", "metadata", "report.txt", "--format", "json", "-m", "100"]).unwrap();

        assert!(matches!(cli.command, Commands::Metadata { ref source } if source == "report.txt"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.max_content_length, Some(100));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_negative_max_content_length() {
        let cli = Cli::try_parse_from(["folio", "content", "a.txt", "--max-content-length", "-1"]).unwrap();
        assert_eq!(cli.max_content_length, Some(-1));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_requires_source() {
        assert!(Cli::try_parse_from(["folio", "language"]).is_err());
        assert!(Cli::try_parse_from(["folio"]).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["folio", "inspect", "a.txt", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_load_config_applies_override() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(b"max_content_length = 10\n").unwrap();

        let config = load_config(Some(file.path()), None).unwrap();
        assert_eq!(config.max_content_length, 10);

        let config = load_config(Some(file.path()), Some(3)).unwrap();
        assert_eq!(config.max_content_length, 3);
    }

    #[test]
    fn test_load_config_missing_file_fails() {
        let err = load_config(Some(std::path::Path::new("/nonexistent/folio.toml")), None).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_render_content_and_media_type() {
        let (_file, document) = document_with("  plain words  ");
        let content = Commands::Content {
            source: String::new(),
        };
        let media_type = Commands::MediaType {
            source: String::new(),
        };

        assert_eq!(render(&content, &document, OutputFormat::Text).unwrap(), "plain words");
        assert_eq!(
            render(&content, &document, OutputFormat::Json).unwrap(),
            r#"{"content":"plain words"}"#
        );
        assert_eq!(render(&media_type, &document, OutputFormat::Text).unwrap(), "text/plain");
    }

    #[test]
    fn test_render_metadata_text() {
        let (_file, document) = document_with("one two\nthree");
        let metadata = Commands::Metadata {
            source: String::new(),
        };

        let output = render(&metadata, &document, OutputFormat::Text).unwrap();
        assert!(output.starts_with("Content-Type: text/plain"));
        assert!(output.contains("word-count: 3"));
    }

    #[test]
    fn test_render_inspect_json() {
        let (_file, document) = document_with("hello");
        let inspect = Commands::Inspect {
            source: String::new(),
        };

        let output = render(&inspect, &document, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["input_type"], "file");
        assert_eq!(value["content"], "hello");
        assert_eq!(value["media_type"], "text/plain");
        assert!(value["language"].is_string());
        assert_eq!(value["metadata"]["character-count"], "5");
    }
}
