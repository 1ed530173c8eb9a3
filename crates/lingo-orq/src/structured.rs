//! Recovery of structured objects from generated text.
//!
//! Generated text is free-form: it may wrap the JSON object it was asked for
//! in a Markdown code fence, surround it with prose, or not be JSON at all.
//! The functions here never fail. Text that cannot be recovered is returned
//! as [`Structured::Unparsed`] and callers decide which fallback shape to use.
//!
//! Two recovery modes exist:
//!
//! - [`extract_fenced`]: strips one opening and one closing code fence, then
//!   parses the remainder strictly.
//! - [`extract_embedded`]: parses exactly the span between the first `{` and
//!   the last `}`.

use serde_json::{Map, Value};

/// Opening fence tagged as JSON.
const JSON_FENCE: &str = "```json";

/// Bare code fence.
const FENCE: &str = "```";

/// Field holding the raw text of an extraction that could not be parsed.
pub const RAW_EXTRACTION_FIELD: &str = "raw_extraction";

/// Outcome of recovering a structured object from generated text.
#[derive(Debug, Clone, PartialEq)]
pub enum Structured {
    /// A JSON object was recovered.
    Parsed(Map<String, Value>),
    /// Nothing usable was recovered; holds the original text unchanged.
    Unparsed(String),
}

impl Structured {
    /// Returns `true` if a JSON object was recovered.
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// Returns the extraction payload.
    ///
    /// Unrecovered text becomes `{"raw_extraction": <original text>}`.
    pub fn into_extraction_fields(self) -> Map<String, Value> {
        match self {
            Self::Parsed(fields) => fields,
            Self::Unparsed(raw) => {
                let mut fields = Map::new();
                fields.insert(RAW_EXTRACTION_FIELD.to_owned(), Value::String(raw));
                fields
            }
        }
    }

    /// Returns the classification mapping.
    ///
    /// Unrecovered text degrades to an empty mapping.
    pub fn into_classification(self) -> Map<String, Value> {
        match self {
            Self::Parsed(fields) => fields,
            Self::Unparsed(_) => Map::new(),
        }
    }
}

/// Recovers an object from text optionally wrapped in a code fence.
///
/// Leading and trailing whitespace is trimmed, then one opening fence
/// (```` ```json ```` or a bare ```` ``` ````) and one closing fence are
/// removed when present. The remainder must be a single JSON object.
pub fn extract_fenced(raw: &str) -> Structured {
    let trimmed = raw.trim();
    let unfenced = trimmed
        .strip_prefix(JSON_FENCE)
        .or_else(|| trimmed.strip_prefix(FENCE))
        .unwrap_or(trimmed);
    let unfenced = unfenced.strip_suffix(FENCE).unwrap_or(unfenced);

    parse_object(unfenced.trim(), raw)
}

/// Recovers an object embedded anywhere inside surrounding text.
///
/// Parses exactly the span from the first `{` to the last `}`. Text without
/// both braces, or whose last `}` precedes its first `{`, is unparsed.
pub fn extract_embedded(raw: &str) -> Structured {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => parse_object(&raw[start..=end], raw),
        _ => Structured::Unparsed(raw.to_owned()),
    }
}

fn parse_object(candidate: &str, raw: &str) -> Structured {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(fields)) => Structured::Parsed(fields),
        _ => Structured::Unparsed(raw.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parsed(value: Value) -> Structured {
        match value {
            Value::Object(fields) => Structured::Parsed(fields),
            _ => unreachable!("test fixtures are objects"),
        }
    }

    #[test]
    fn fenced_variants_agree() {
        let expected = parsed(json!({"summary": "x", "steps": ["a"]}));

        let json_fenced = "```json\n{\"summary\": \"x\", \"steps\": [\"a\"]}\n```";
        let bare_fenced = "```\n{\"summary\": \"x\", \"steps\": [\"a\"]}\n```";
        let unfenced = "  {\"summary\": \"x\", \"steps\": [\"a\"]}  ";

        assert_eq!(extract_fenced(json_fenced), expected);
        assert_eq!(extract_fenced(bare_fenced), expected);
        assert_eq!(extract_fenced(unfenced), expected);
    }

    #[test]
    fn fenced_only_opening_or_closing() {
        let expected = parsed(json!({"a": 1}));
        assert_eq!(extract_fenced("```json {\"a\": 1}"), expected);
        assert_eq!(extract_fenced("{\"a\": 1}\n```"), expected);
    }

    #[test]
    fn fenced_invalid_keeps_original_text() {
        let raw = "  Sorry, I cannot help with that.  ";
        let result = extract_fenced(raw);

        assert_eq!(result, Structured::Unparsed(raw.to_owned()));
        assert_eq!(
            Value::Object(result.into_extraction_fields()),
            json!({"raw_extraction": raw})
        );
    }

    #[test]
    fn fenced_rejects_prose_around_object() {
        let raw = "Here you go: {\"a\": 1}";
        assert!(!extract_fenced(raw).is_parsed());
    }

    #[test]
    fn fenced_non_object_is_unparsed() {
        assert_eq!(
            extract_fenced("[1, 2, 3]"),
            Structured::Unparsed("[1, 2, 3]".to_owned())
        );
        assert!(!extract_fenced("\"just a string\"").is_parsed());
    }

    #[test]
    fn embedded_recovers_span_inside_prose() {
        let raw = "Sure! Here it is:\n{\"title\": \"Hi\", \"body\": {\"x\": 1}}\nLet me know.";
        assert_eq!(
            extract_embedded(raw),
            parsed(json!({"title": "Hi", "body": {"x": 1}}))
        );
    }

    #[test]
    fn embedded_without_braces_is_unparsed() {
        assert_eq!(
            extract_embedded("no braces at all"),
            Structured::Unparsed("no braces at all".to_owned())
        );
        assert!(!extract_embedded("only open {").is_parsed());
        assert!(!extract_embedded("only close }").is_parsed());
    }

    #[test]
    fn embedded_close_before_open_is_unparsed() {
        let raw = "} reversed {";
        assert_eq!(extract_embedded(raw), Structured::Unparsed(raw.to_owned()));
    }

    #[test]
    fn embedded_invalid_span_is_unparsed() {
        let raw = "first {not json} then {\"a\": 1}";
        assert_eq!(extract_embedded(raw), Structured::Unparsed(raw.to_owned()));
    }

    #[test]
    fn classification_degrades_to_empty() {
        assert!(extract_fenced("garbage").into_classification().is_empty());

        let classification = extract_fenced("```json\n{\"Tasks\": true}\n```").into_classification();
        assert_eq!(classification.get("Tasks"), Some(&Value::Bool(true)));
    }
}
