use serde::Deserialize;
use serde_json::{Map, Value};

/// Rewrite Python `str(dict)` output into JSON text: single quotes become
/// double quotes, `True`/`False`/`None` become `true`/`false`/`null`.
///
/// This is a blind substitution, not a tokenizer. It does not protect quotes
/// or keywords inside string content; it is tuned to the one dialect the
/// advisor backend emits and nothing more.
pub fn python_literals_to_json(input: &str) -> String {
    input
        .replace('\'', "\"")
        .replace("True", "true")
        .replace("False", "false")
        .replace("None", "null")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParsedContent {
    pub summary_result: Option<String>,
    pub final_response: Option<String>,
}

/// Best-effort decode of an embedded Python dict string. Malformed syntax or
/// wrongly typed fields yield `None`; the caller always has a fallback.
pub fn parse_python_dict(input: &str) -> Option<ParsedContent> {
    serde_json::from_str(&python_literals_to_json(input)).ok()
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.filter(|s| !s.is_empty())
}

/// Compose the known content fields into one display string. Returns an empty
/// string when neither field carries text, which signals the caller to keep
/// walking the fallback chain.
pub fn format_content(content: &ParsedContent) -> String {
    let summary = non_empty(content.summary_result.as_deref());
    let recommendation = non_empty(content.final_response.as_deref());

    match (summary, recommendation) {
        (Some(summary), Some(recommendation)) => {
            format!("**Summary:**\n{summary}\n\n**Recommendation:**\n{recommendation}")
        }
        (None, Some(recommendation)) => recommendation.to_string(),
        (Some(summary), None) => summary.to_string(),
        (None, None) => String::new(),
    }
}

fn content_from_object(object: &Map<String, Value>) -> ParsedContent {
    ParsedContent {
        summary_result: object
            .get("summary_result")
            .and_then(Value::as_str)
            .map(str::to_string),
        final_response: object
            .get("final_response")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

fn string_field<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    non_empty(payload.get(key).and_then(Value::as_str))
}

// New-format envelope whose `response` is a string that may embed a Python
// dict. Raw text beats nothing: if the decode or the formatting comes up
// empty, the string is returned as-is.
fn flagged_string_envelope(payload: &Value) -> Option<String> {
    payload.get("ok")?;
    let raw = string_field(payload, "response")?;

    if let Some(content) = parse_python_dict(raw) {
        let formatted = format_content(&content);
        if !formatted.is_empty() {
            return Some(formatted);
        }
    }
    Some(raw.to_string())
}

// New-format envelope whose `response` arrived as a JSON object already.
fn flagged_object_envelope(payload: &Value) -> Option<String> {
    payload.get("ok")?;
    let object = payload.get("response")?.as_object()?;

    let formatted = format_content(&content_from_object(object));
    if !formatted.is_empty() {
        return Some(formatted);
    }
    let fallback = object
        .get("final_response")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            object
                .get("summary_result")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        });
    match fallback {
        Some(text) => Some(text.to_string()),
        None => Some(Value::Object(object.clone()).to_string()),
    }
}

// Legacy envelope: content fields sit at the top level, no `ok` flag.
fn legacy_envelope(payload: &Value) -> Option<String> {
    let content = ParsedContent {
        summary_result: string_field(payload, "summary_result").map(str::to_string),
        final_response: string_field(payload, "final_response").map(str::to_string),
    };
    if content.summary_result.is_none() || content.final_response.is_none() {
        return None;
    }
    Some(format_content(&content))
}

// Terminal strategy. Always yields a value, worst case the payload itself
// re-serialized as compact JSON.
fn loose_fields(payload: &Value) -> Option<String> {
    for key in ["response", "message", "data"] {
        if let Some(text) = string_field(payload, key) {
            return Some(text.to_string());
        }
    }
    Some(payload.to_string())
}

type ExtractFn = fn(&Value) -> Option<String>;

// Evaluated in order, first hit wins. Adding support for another backend
// envelope shape means inserting one more strategy here.
const STRATEGIES: &[ExtractFn] = &[
    flagged_string_envelope,
    flagged_object_envelope,
    legacy_envelope,
    loose_fields,
];

/// Normalize a decoded backend response body into the text to display.
/// Total over any `Value`: never panics, and `loose_fields` guarantees the
/// chain terminates with a string.
pub fn normalize(payload: &Value) -> String {
    for strategy in STRATEGIES {
        if let Some(text) = strategy(payload) {
            return text;
        }
    }
    payload.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rewriter_is_identity_without_dialect_tokens() {
        let input = r#"{"a": 1, "b": [2, 3], "text": "plain"}"#;
        assert_eq!(python_literals_to_json(input), input);
    }

    #[test]
    fn rewriter_converts_python_dict_text() {
        let got = python_literals_to_json("{'a': True, 'b': None}");
        assert_eq!(got, r#"{"a": true, "b": null}"#);
        assert!(serde_json::from_str::<Value>(&got).is_ok());
    }

    #[test]
    fn rewriter_converts_false_token() {
        assert_eq!(python_literals_to_json("{'ok': False}"), r#"{"ok": false}"#);
    }

    #[test]
    fn parse_rejects_non_dict_text() {
        assert_eq!(parse_python_dict("not a dict at all"), None);
    }

    #[test]
    fn parse_accepts_python_dict_with_content_fields() {
        let got = parse_python_dict("{'summary_result': 'S', 'final_response': 'F'}")
            .expect("should decode");
        assert_eq!(got.summary_result.as_deref(), Some("S"));
        assert_eq!(got.final_response.as_deref(), Some("F"));
    }

    #[test]
    fn parse_rejects_wrongly_typed_fields() {
        assert_eq!(parse_python_dict("{'summary_result': 5}"), None);
    }

    #[test]
    fn format_with_both_fields_labels_sections_in_order() {
        let content = ParsedContent {
            summary_result: Some("S".into()),
            final_response: Some("F".into()),
        };
        let got = format_content(&content);
        assert_eq!(got, "**Summary:**\nS\n\n**Recommendation:**\nF");
        let summary_at = got.find("**Summary:**").expect("summary label");
        let rec_at = got.find("**Recommendation:**").expect("recommendation label");
        assert!(summary_at < rec_at);
    }

    #[test]
    fn format_with_only_final_response_is_verbatim() {
        let content = ParsedContent {
            summary_result: None,
            final_response: Some("F".into()),
        };
        assert_eq!(format_content(&content), "F");
    }

    #[test]
    fn format_with_only_summary_is_verbatim() {
        let content = ParsedContent {
            summary_result: Some("S".into()),
            final_response: None,
        };
        assert_eq!(format_content(&content), "S");
    }

    #[test]
    fn format_treats_empty_strings_as_absent() {
        let content = ParsedContent {
            summary_result: Some(String::new()),
            final_response: Some(String::new()),
        };
        assert_eq!(format_content(&content), "");
    }

    #[test]
    fn normalize_flagged_envelope_with_decodable_string() {
        let payload = json!({
            "ok": true,
            "response": "{'summary_result': 'Buy', 'final_response': 'AAPL looks strong'}",
        });
        let got = normalize(&payload);
        assert_eq!(
            got,
            "**Summary:**\nBuy\n\n**Recommendation:**\nAAPL looks strong"
        );
    }

    #[test]
    fn normalize_flagged_envelope_with_plain_text_returns_it_raw() {
        let payload = json!({"ok": true, "response": "plain text reply"});
        assert_eq!(normalize(&payload), "plain text reply");
    }

    #[test]
    fn normalize_flagged_envelope_with_dict_lacking_content_returns_raw() {
        // Decodes fine but carries neither content field, so the raw string wins.
        let payload = json!({"ok": true, "response": "{'a': True, 'b': None}"});
        assert_eq!(normalize(&payload), "{'a': True, 'b': None}");
    }

    #[test]
    fn normalize_flagged_envelope_with_object_response() {
        let payload = json!({
            "ok": true,
            "response": {"summary_result": "X", "final_response": "Y"},
        });
        assert_eq!(normalize(&payload), "**Summary:**\nX\n\n**Recommendation:**\nY");
    }

    #[test]
    fn normalize_flagged_object_falls_back_to_single_field() {
        let payload = json!({"ok": true, "response": {"final_response": "only this"}});
        assert_eq!(normalize(&payload), "only this");
    }

    #[test]
    fn normalize_flagged_object_without_known_fields_serializes_it() {
        let payload = json!({"ok": true, "response": {"verdict": "hold"}});
        assert_eq!(normalize(&payload), r#"{"verdict":"hold"}"#);
    }

    #[test]
    fn normalize_legacy_envelope() {
        let payload = json!({"summary_result": "X", "final_response": "Y"});
        assert_eq!(normalize(&payload), "**Summary:**\nX\n\n**Recommendation:**\nY");
    }

    #[test]
    fn normalize_legacy_requires_both_fields() {
        let payload = json!({"summary_result": "X", "message": "fallback"});
        assert_eq!(normalize(&payload), "fallback");
    }

    #[test]
    fn normalize_prefers_response_then_message_then_data() {
        assert_eq!(normalize(&json!({"response": "r"})), "r");
        assert_eq!(normalize(&json!({"message": "m"})), "m");
        assert_eq!(normalize(&json!({"data": "d"})), "d");
        assert_eq!(normalize(&json!({"message": "m", "data": "d"})), "m");
    }

    #[test]
    fn normalize_unknown_payload_serializes_whole_body() {
        assert_eq!(normalize(&json!({"foo": "bar"})), r#"{"foo":"bar"}"#);
    }

    #[test]
    fn normalize_never_panics_on_odd_shapes() {
        for payload in [
            json!(null),
            json!("just a string"),
            json!([1, 2, 3]),
            json!({"ok": null, "response": ""}),
            json!({"ok": true, "response": 42}),
        ] {
            let got = normalize(&payload);
            assert!(!got.is_empty());
        }
    }
}
