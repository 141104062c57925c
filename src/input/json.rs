//! Loader for `runtimeconfig.json` style documents.
//!
//! The document is an object whose `configProperties` member holds the string properties to
//! encode. Every other member is ignored. Documents written by hand commonly carry comments
//! and trailing commas, so both are accepted: the text is normalized into strict JSON before
//! it is handed to `serde_json`.
//!
//! # Example
//!
//! ```rust
//! use configmeta::ConfigMapping;
//!
//! let mapping = ConfigMapping::from_json_str(r#"
//! {
//!     // produced by the build
//!     "runtimeOptions": { "tfm": "net8.0" },
//!     "configProperties": {
//!         "System.GC.Server": "true",
//!         "System.Globalization.Invariant": "false",
//!     },
//! }
//! "#)?;
//!
//! assert_eq!(mapping.len(), 2);
//! # Ok::<(), configmeta::Error>(())
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::{input::ConfigMapping, Error, Result};

/// Name of the member holding the properties
pub const CONFIG_PROPERTIES: &str = "configProperties";

#[derive(Deserialize)]
struct RuntimeConfigDocument {
    #[serde(rename = "configProperties")]
    config_properties: Option<ConfigMapping>,
}

impl ConfigMapping {
    /// Parses a `runtimeconfig.json` document and extracts its `configProperties`.
    ///
    /// # Errors
    /// - [`crate::Error::Json`] if the text is not valid JSON, a property value is not a string,
    ///   or a property name occurs twice
    /// - [`crate::Error::InvalidInput`] if `configProperties` is missing, `null`, or a comment is
    ///   left unterminated
    pub fn from_json_str(text: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let normalized = normalize_json(text)?;

        let document: RuntimeConfigDocument = serde_json::from_str(&normalized)?;
        let mapping = document.config_properties.ok_or_else(|| {
            Error::InvalidInput(format!("document has no `{CONFIG_PROPERTIES}` object"))
        })?;

        log::debug!("loaded {} configuration properties", mapping.len());
        Ok(mapping)
    }

    /// Parses a UTF-8 encoded `runtimeconfig.json` document.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidInput`] if the bytes are not UTF-8, and the errors of
    /// [`ConfigMapping::from_json_str`] otherwise.
    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::InvalidInput(format!("document is not UTF-8: {e}")))?;
        Self::from_json_str(text)
    }

    /// Reads and parses a `runtimeconfig.json` document from disk.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be read, and the errors of
    /// [`ConfigMapping::from_json_slice`] otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("reading {}", path.display());
        let data = std::fs::read(path)?;
        Self::from_json_slice(&data)
    }
}

/// Removes `//` and `/* */` comments and trailing commas outside of string literals.
///
/// Comments are replaced by spaces (newlines are kept) so that line and column numbers in
/// `serde_json` errors still point at the original text.
fn normalize_json(text: &str) -> Result<String> {
    let without_comments = strip_comments(text)?;
    Ok(strip_trailing_commas(&without_comments))
}

fn strip_comments(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                out.push_str("  ");
                chars.next();
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                    out.push(' ');
                }
            }
            ('/', Some('*')) => {
                out.push_str("  ");
                chars.next();
                let mut closed = false;
                while let Some(skipped) = chars.next() {
                    if skipped == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        out.push_str("  ");
                        closed = true;
                        break;
                    }
                    out.push(if skipped == '\n' { '\n' } else { ' ' });
                }
                if !closed {
                    return Err(Error::InvalidInput("unterminated block comment".to_string()));
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut last_significant = None;
    let mut position = 0;

    while position < chars.len() {
        let c = chars[position];
        position += 1;

        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(position) {
                    out.push(escaped);
                    position += 1;
                }
            } else if c == '"' {
                in_string = false;
                last_significant = Some('"');
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = chars[position..].iter().find(|c| !c.is_whitespace());
                // Only a comma that follows a complete value is trailing; `{,}` stays invalid
                if matches!(next, Some('}' | ']'))
                    && last_significant.is_some_and(closes_value)
                {
                    out.push(' ');
                } else {
                    out.push(',');
                    last_significant = Some(',');
                }
            }
            _ => {
                out.push(c);
                if !c.is_whitespace() {
                    last_significant = Some(c);
                }
            }
        }
    }

    out
}

/// Returns `true` for the last character of a string, object, array, number or literal
fn closes_value(c: char) -> bool {
    matches!(c, '"' | '}' | ']') || c.is_ascii_alphanumeric()
}
