//! Scanner configuration, loadable from TOML.

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Knobs for a [`Scanner`](crate::Scanner). Every field is optional in TOML.
///
/// ```toml
/// trace = true
/// capture_inner_html = false
/// max_depth = 512
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerConfig {
    /// Narrate scanner decisions at trace level on the `html.scan` target.
    pub trace: bool,
    /// Hand raw inner markup of capture-worthy tags to the sink on close.
    pub capture_inner_html: bool,
    /// Decode entities inside `<textarea>`.
    pub decode_textarea: bool,
    /// Cap on open tags below the `html`/`head`/`body` wrappers. At the cap the innermost
    /// tag is closed before the next one opens.
    pub max_depth: Option<usize>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            trace: false,
            capture_inner_html: true,
            decode_textarea: true,
            max_depth: None,
        }
    }
}

impl ScannerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            ScannerConfig::from_toml_str("").expect("parse"),
            ScannerConfig::default()
        );
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = ScannerConfig::from_toml_str("trace = true\nmax_depth = 64\n").expect("parse");
        assert!(config.trace);
        assert!(config.capture_inner_html);
        assert!(config.decode_textarea);
        assert_eq!(config.max_depth, Some(64));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ScannerConfig::from_toml_str("tracing = true").expect_err("unknown key");
        assert!(matches!(err, Error::Config(_)), "expected config error, got: {err:?}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ScannerConfig::load("/nonexistent/scan.toml").expect_err("missing file");
        assert!(matches!(err, Error::Io(_)), "expected io error, got: {err:?}");
    }
}
