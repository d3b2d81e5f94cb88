//! Language identification using the whatlang library.
//!
//! [`WhatlangIdentifier`] is the identifier a document handle uses unless
//! another one is configured. Codes are ISO 639-3 (`"eng"`, `"deu"`, ...).

use crate::Result;
use crate::core::config::LanguageConfig;
use crate::plugins::{LanguageIdentifier, Plugin};
use crate::types::LanguageGuess;

/// Built-in language identifier.
///
/// A guess counts as reasonably certain when whatlang itself marks it
/// reliable and its confidence reaches the configured minimum. whatlang
/// rarely trusts guesses on a handful of words, so short documents usually
/// come back uncertain even when the code is right.
///
/// When whatlang cannot guess at all (empty text, digits only, ...) the
/// configured fallback code is returned, never an error.
///
/// # Example
///
/// ```rust
/// use folio::language_detection::WhatlangIdentifier;
/// use folio::plugins::LanguageIdentifier;
///
/// let identifier = WhatlangIdentifier::new();
/// let guess = identifier
///     .identify("The quick brown fox jumps over the lazy dog while the farmer watches from the porch.")
///     .unwrap();
/// assert_eq!(guess.code, "eng");
/// ```
#[derive(Debug, Clone)]
pub struct WhatlangIdentifier {
    min_confidence: f64,
    fallback_code: String,
}

impl WhatlangIdentifier {
    pub fn new() -> Self {
        Self::from_config(&LanguageConfig::default())
    }

    pub fn from_config(config: &LanguageConfig) -> Self {
        Self {
            min_confidence: config.min_confidence,
            fallback_code: config.fallback_code.clone(),
        }
    }
}

impl Default for WhatlangIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for WhatlangIdentifier {
    fn name(&self) -> &str {
        "whatlang-identifier"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn description(&self) -> &str {
        "Identifies natural languages with whatlang"
    }
}

impl LanguageIdentifier for WhatlangIdentifier {
    fn identify(&self, text: &str) -> Result<LanguageGuess> {
        let guess = match whatlang::detect(text) {
            Some(info) => {
                let certain = info.is_reliable() && info.confidence() >= self.min_confidence;
                tracing::trace!(
                    lang = info.lang().code(),
                    confidence = info.confidence(),
                    reliable = info.is_reliable(),
                    "whatlang guess"
                );
                LanguageGuess::new(info.lang().code(), certain)
            }
            None => {
                tracing::trace!(fallback = %self.fallback_code, "whatlang could not guess a language");
                LanguageGuess::new(self.fallback_code.clone(), false)
            }
        };
        Ok(guess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH: &str = "Hello world! This is a test of the language detection system. \
        The quick brown fox jumps over the lazy dog, and everybody in the village \
        agrees that it was a remarkable thing to see on a quiet Sunday morning.";

    #[test]
    fn test_identify_english_is_certain() {
        let guess = WhatlangIdentifier::new().identify(ENGLISH).unwrap();
        assert_eq!(guess.code, "eng");
        assert!(guess.reasonably_certain);
    }

    #[test]
    fn test_identify_spanish() {
        let text = "Hola mundo! Esta es una prueba del sistema de detección de idiomas.";
        let guess = WhatlangIdentifier::new().identify(text).unwrap();
        assert_eq!(guess.code, "spa");
    }

    #[test]
    fn test_short_text_still_yields_a_code() {
        let guess = WhatlangIdentifier::new().identify("a").unwrap();
        assert!(!guess.code.is_empty());
    }

    #[test]
    fn test_empty_text_uses_fallback() {
        let guess = WhatlangIdentifier::new().identify("").unwrap();
        assert_eq!(guess.code, "und");
        assert!(!guess.reasonably_certain);
    }

    #[test]
    fn test_custom_fallback_and_threshold() {
        let config = LanguageConfig {
            min_confidence: 1.0,
            fallback_code: "xxx".to_string(),
        };
        let identifier = WhatlangIdentifier::from_config(&config);

        assert_eq!(identifier.identify("12345 67890").unwrap().code, "xxx");
        assert!(identifier.identify("Bonjour à tous").unwrap().code.len() == 3);
    }
}
