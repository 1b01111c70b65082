//! Common types used throughout bodymap
//!
//! This module contains the content format variant and the helpers that pick
//! a format from a `Content-Type` header, a file path, or the body itself.

use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Content Format
// ============================================================================

/// Serialized format of a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    /// JSON document (default)
    #[default]
    Json,
    /// XML element tree
    Xml,
}

impl ContentFormat {
    /// Media type sent in `Accept` headers for this format
    pub fn mime_type(self) -> &'static str {
        match self {
            ContentFormat::Json => "application/json",
            ContentFormat::Xml => "application/xml",
        }
    }

    /// Detect the format from a `Content-Type` header value.
    ///
    /// Parameters (`; charset=...`) are ignored and matching is case-insensitive.
    /// Structured suffixes (`application/atom+xml`, `application/problem+json`)
    /// count as their base format.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        let (kind, subtype) = essence.split_once('/')?;
        if !matches!(kind, "application" | "text") {
            return None;
        }

        match subtype {
            "json" => Some(ContentFormat::Json),
            "xml" => Some(ContentFormat::Xml),
            s if s.ends_with("+json") => Some(ContentFormat::Json),
            s if s.ends_with("+xml") => Some(ContentFormat::Xml),
            _ => None,
        }
    }

    /// Detect the format from a file extension (`.xml`, `.json`)
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ContentFormat::Json),
            "xml" => Some(ContentFormat::Xml),
            _ => None,
        }
    }

    /// Guess the format from the first non-whitespace byte of a body.
    ///
    /// `<` means XML, `{` or `[` means JSON. A UTF-8 BOM is skipped.
    pub fn sniff(body: &[u8]) -> Option<Self> {
        let body = body.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(body);
        match body.iter().find(|b| !b.is_ascii_whitespace())? {
            b'<' => Some(ContentFormat::Xml),
            b'{' | b'[' => Some(ContentFormat::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentFormat::Json => write!(f, "JSON"),
            ContentFormat::Xml => write!(f, "XML"),
        }
    }
}

impl std::str::FromStr for ContentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ContentFormat::Json),
            "xml" => Ok(ContentFormat::Xml),
            other => Err(format!("unknown content format '{other}' (expected xml or json)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("application/json" => Some(ContentFormat::Json); "plain json")]
    #[test_case("application/json; charset=utf-8" => Some(ContentFormat::Json); "json with charset")]
    #[test_case("Application/JSON" => Some(ContentFormat::Json); "json mixed case")]
    #[test_case("application/problem+json" => Some(ContentFormat::Json); "json suffix")]
    #[test_case("text/json" => Some(ContentFormat::Json); "text json")]
    #[test_case("application/xml" => Some(ContentFormat::Xml); "plain xml")]
    #[test_case("text/xml; charset=ISO-8859-1" => Some(ContentFormat::Xml); "text xml with charset")]
    #[test_case("application/atom+xml" => Some(ContentFormat::Xml); "xml suffix")]
    #[test_case("text/plain" => None; "plain text")]
    #[test_case("image/svg+xml" => None; "non application type")]
    #[test_case("" => None; "empty")]
    fn test_from_content_type(content_type: &str) -> Option<ContentFormat> {
        ContentFormat::from_content_type(content_type)
    }

    #[test]
    fn test_from_path() {
        assert_eq!(ContentFormat::from_path("cat.xml"), Some(ContentFormat::Xml));
        assert_eq!(
            ContentFormat::from_path("/tmp/fixtures/cat.JSON"),
            Some(ContentFormat::Json)
        );
        assert_eq!(ContentFormat::from_path("cat.yaml"), None);
        assert_eq!(ContentFormat::from_path("cat"), None);
    }

    #[test]
    fn test_sniff() {
        assert_eq!(
            ContentFormat::sniff(b"  \n<?xml version=\"1.0\"?><CAT/>"),
            Some(ContentFormat::Xml)
        );
        assert_eq!(ContentFormat::sniff(b"{\"a\":1}"), Some(ContentFormat::Json));
        assert_eq!(ContentFormat::sniff(b"\xEF\xBB\xBF[1]"), Some(ContentFormat::Json));
        assert_eq!(ContentFormat::sniff(b"Not Found"), None);
        assert_eq!(ContentFormat::sniff(b"   "), None);
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(ContentFormat::Xml.to_string(), "XML");
        assert_eq!(ContentFormat::Json.to_string(), "JSON");
        assert_eq!("xml".parse::<ContentFormat>(), Ok(ContentFormat::Xml));
        assert_eq!("JSON".parse::<ContentFormat>(), Ok(ContentFormat::Json));
        assert!("yaml".parse::<ContentFormat>().is_err());
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(ContentFormat::Json.mime_type(), "application/json");
        assert_eq!(ContentFormat::Xml.mime_type(), "application/xml");
    }
}
