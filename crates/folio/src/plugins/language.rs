//! Language identifier trait.

use crate::Result;
use crate::plugins::Plugin;
use crate::types::LanguageGuess;

/// Trait for language identifiers.
///
/// `identify` must always produce a code for non-failing input, even when the
/// guess is weak; weakness is expressed through
/// [`LanguageGuess::reasonably_certain`].
pub trait LanguageIdentifier: Plugin {
    fn identify(&self, text: &str) -> Result<LanguageGuess>;
}
