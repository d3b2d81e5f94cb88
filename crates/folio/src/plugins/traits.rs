//! Base plugin trait definition.
//!
//! Every capability a document handle delegates to (extraction engine,
//! media-type detector, language identifier) implements [`Plugin`], which
//! provides identification used in logs and error messages.

/// Base trait that all capabilities implement.
///
/// # Thread Safety
///
/// Plugins must be `Send + Sync` so one instance can be shared between
/// document handles via `Arc`.
///
/// # Example
///
/// ```rust
/// use folio::plugins::Plugin;
///
/// struct MyPlugin;
///
/// impl Plugin for MyPlugin {
///     fn name(&self) -> &str {
///         "my-plugin"
///     }
///
///     fn version(&self) -> String {
///         "1.0.0".to_string()
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Returns the unique name/identifier for this plugin.
    ///
    /// Lowercase with hyphens by convention (e.g. `"plain-text-engine"`).
    fn name(&self) -> &str;

    /// Returns the semantic version of this plugin.
    fn version(&self) -> String;

    /// Optional plugin description for debugging and logging.
    ///
    /// Defaults to empty string if not overridden.
    fn description(&self) -> &str {
        ""
    }
}
