//! Configuration options for the graph engine.
//!
//! This module provides:
//!
//! - [`EngineOptions`]: prefix, cleanup and type revival policy, text layout
//! - [`ReservedKeys`]: the bookkeeping keys derived from the prefix
//!
//! ## Examples
//!
//! ```rust
//! use serde_resurrect::{Engine, EngineOptions};
//!
//! let options = EngineOptions::new()
//!     .with_prefix("$")
//!     .with_revive_types(false);
//! let engine = Engine::with_options(options).unwrap();
//! assert_eq!(engine.keys().reference(), "$id");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration options fixed at [`Engine`](crate::Engine) construction.
///
/// Options can be built in code or loaded from any serde format; missing
/// fields take their defaults.
///
/// # Examples
///
/// ```rust
/// use serde_resurrect::EngineOptions;
///
/// let options: EngineOptions = serde_json::from_str(r#"{"prefix": "@"}"#).unwrap();
/// assert_eq!(options.prefix, "@");
/// assert!(options.revive_types);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Namespace for every bookkeeping key.
    pub prefix: String,
    /// Release walk bookkeeping as soon as the walk ends instead of at the
    /// end of the call.
    pub cleanup: bool,
    /// Write type names on encode and restore classes on decode.
    pub revive_types: bool,
    pub indent: usize,
    pub pretty: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            prefix: "#".to_string(),
            cleanup: false,
            revive_types: true,
            indent: 2,
            pretty: false,
        }
    }
}

impl EngineOptions {
    /// Creates default options (`#` prefix, type revival on, compact text).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_resurrect::EngineOptions;
    ///
    /// let options = EngineOptions::new();
    /// assert_eq!(options.prefix, "#");
    /// assert!(!options.pretty);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented, multi-line JSON output.
    #[must_use]
    pub fn pretty() -> Self {
        EngineOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the bookkeeping key prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Turns class revival on or off.
    ///
    /// With revival off, sharing and cycles still survive a round trip but
    /// every object comes back as a plain container.
    #[must_use]
    pub fn with_revive_types(mut self, revive_types: bool) -> Self {
        self.revive_types = revive_types;
        self
    }

    /// Sets the indentation size. Only affects pretty output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(Error::InvalidOptions("prefix must not be empty".into()));
        }
        Ok(())
    }
}

/// The bookkeeping keys derived from a prefix.
///
/// With the default `#` prefix: `#` holds an entry's type name, `#id` a
/// table slot, `#.` a builder routine name and `#v` its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservedKeys {
    prefix: String,
    reference: String,
    builder: String,
    args: String,
}

impl ReservedKeys {
    pub fn new(prefix: &str) -> Self {
        ReservedKeys {
            prefix: prefix.to_string(),
            reference: format!("{prefix}id"),
            builder: format!("{prefix}."),
            args: format!("{prefix}v"),
        }
    }

    /// The key carrying a table entry's type name (the bare prefix).
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.prefix
    }

    #[inline]
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    #[inline]
    #[must_use]
    pub fn builder(&self) -> &str {
        &self.builder
    }

    #[inline]
    #[must_use]
    pub fn args(&self) -> &str {
        &self.args
    }

    /// Returns `true` if `key` falls inside the bookkeeping namespace.
    #[inline]
    #[must_use]
    pub fn is_reserved(&self, key: &str) -> bool {
        key.starts_with(&self.prefix)
    }
}

impl Default for ReservedKeys {
    fn default() -> Self {
        ReservedKeys::new(&EngineOptions::default().prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let keys = ReservedKeys::default();
        assert_eq!(keys.type_name(), "#");
        assert_eq!(keys.reference(), "#id");
        assert_eq!(keys.builder(), "#.");
        assert_eq!(keys.args(), "#v");
        assert!(keys.is_reserved("#anything"));
        assert!(!keys.is_reserved("name"));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let options = EngineOptions::new().with_prefix("");
        assert!(matches!(options.validate(), Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let options: EngineOptions = serde_json::from_str(r#"{"cleanup": true}"#).unwrap();
        assert!(options.cleanup);
        assert_eq!(options.prefix, "#");
        assert_eq!(options.indent, 2);
    }
}
