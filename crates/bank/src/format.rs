//! Rendering retrieved memories for prompt injection.

use hcore::Payload;
use serde_json::Value;

/// Render retrieved payloads as a prompt block.
///
/// Expects item-shaped payloads (title, description, content); missing
/// keys render as `N/A`. An empty slice renders a fixed no-memories
/// line so the agent prompt never contains an empty section.
pub fn format_memories(payloads: &[Payload]) -> String {
    if payloads.is_empty() {
        return "No relevant memories found.".to_string();
    }

    payloads
        .iter()
        .map(|payload| {
            format!(
                "Title: {}\nDescription: {}\nContent: {}",
                field(payload, "title"),
                field(payload, "description"),
                field(payload, "content"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn field<'a>(payload: &'a Payload, key: &str) -> &'a str {
    payload.get(key).and_then(Value::as_str).unwrap_or("N/A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_of(value: serde_json::Value) -> Payload {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn empty_renders_placeholder() {
        assert_eq!(format_memories(&[]), "No relevant memories found.");
    }

    #[test]
    fn items_render_as_separated_blocks() {
        let payloads = vec![
            payload_of(json!({"title": "A", "description": "da", "content": "ca"})),
            payload_of(json!({"title": "B", "description": "db", "content": "cb"})),
        ];
        let rendered = format_memories(&payloads);
        assert_eq!(
            rendered,
            "Title: A\nDescription: da\nContent: ca\n---\nTitle: B\nDescription: db\nContent: cb"
        );
    }

    #[test]
    fn missing_fields_render_as_na() {
        let payloads = vec![payload_of(json!({"title": "A"}))];
        let rendered = format_memories(&payloads);
        assert!(rendered.contains("Description: N/A"));
        assert!(rendered.contains("Content: N/A"));
    }
}
