//! Pull transcript text out of the various response shapes the web app returns.

use serde_json::Value;

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Extract transcript text from a successful response payload.
///
/// Precedence: `formattedTranscript`, then `transcript.text`, then the
/// newline-joined `transcript.segments[].text`. Returns `None` when nothing
/// non-empty is found.
pub fn extract_transcript_text(payload: &Value) -> Option<String> {
    if let Some(formatted) = non_empty_str(payload.get("formattedTranscript")) {
        return Some(formatted);
    }

    let transcript = payload.get("transcript")?.as_object()?;

    if let Some(text) = non_empty_str(transcript.get("text")) {
        return Some(text);
    }

    let lines: Vec<String> = transcript
        .get("segments")?
        .as_array()?
        .iter()
        .filter_map(|segment| non_empty_str(segment.get("text")))
        .collect();

    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Human-readable cause for a failed response payload.
pub fn error_message(payload: &Value) -> String {
    let message = match payload {
        Value::Object(map) => match map.get("error") {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        },
        other => other.to_string(),
    };

    if message.is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_formatted_transcript_wins() {
        let payload = json!({
            "formattedTranscript": "Speaker 1: hi",
            "transcript": { "text": "hi" }
        });
        assert_eq!(
            extract_transcript_text(&payload).as_deref(),
            Some("Speaker 1: hi")
        );
    }

    #[test]
    fn test_blank_formatted_falls_back_to_text() {
        let payload = json!({
            "formattedTranscript": "   ",
            "transcript": { "text": "  plain text \n" }
        });
        assert_eq!(extract_transcript_text(&payload).as_deref(), Some("plain text"));
    }

    #[test]
    fn test_segments_are_joined() {
        let payload = json!({
            "transcript": {
                "segments": [{ "text": "a" }, { "text": "b" }]
            }
        });
        assert_eq!(extract_transcript_text(&payload).as_deref(), Some("a\nb"));
    }

    #[test]
    fn test_segments_skip_blank_and_malformed_entries() {
        let payload = json!({
            "transcript": {
                "text": "",
                "segments": [
                    { "text": " first " },
                    { "text": "" },
                    { "start": 1.0 },
                    "loose string",
                    { "text": 7 },
                    { "text": "second" }
                ]
            }
        });
        assert_eq!(
            extract_transcript_text(&payload).as_deref(),
            Some("first\nsecond")
        );
    }

    #[test]
    fn test_nothing_usable() {
        assert_eq!(extract_transcript_text(&json!({})), None);
        assert_eq!(extract_transcript_text(&json!({ "transcript": "flat" })), None);
        assert_eq!(
            extract_transcript_text(&json!({ "transcript": { "segments": [] } })),
            None
        );
        assert_eq!(extract_transcript_text(&json!([1, 2])), None);
    }

    #[test]
    fn test_error_message_variants() {
        assert_eq!(error_message(&json!({ "error": "Drive file not shared" })), "Drive file not shared");
        assert_eq!(error_message(&json!({ "error": "" })), "Unknown error");
        assert_eq!(error_message(&json!({ "error": null })), "Unknown error");
        assert_eq!(error_message(&json!({})), "Unknown error");
        assert_eq!(error_message(&json!({ "error": { "code": 3 } })), r#"{"code":3}"#);
        assert_eq!(error_message(&json!("plain")), r#""plain""#);
    }
}
