//! Built-in extraction engines.

pub mod text;

pub use text::PlainTextEngine;
