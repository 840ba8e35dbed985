//! Parse LLM output into findings

use crate::error::PipelineError;
use serde_json::{Map, Value};
use sorbent_domain::{Finding, FindingField};

/// Parse an LLM JSON response into findings.
///
/// Fails with `MalformedOutput` when the response is not JSON or not a JSON
/// array, or when any array element is not an object. Unknown keys are
/// ignored; null values count as absent.
pub fn parse_llm_response(response: &str) -> Result<Vec<Finding>, PipelineError> {
    let json_str = extract_json(response);

    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| PipelineError::MalformedOutput(format!("JSON parse error: {}", e)))?;

    let items = json
        .as_array()
        .ok_or_else(|| PipelineError::MalformedOutput("Expected JSON array".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let obj = item.as_object().ok_or_else(|| {
                PipelineError::MalformedOutput(format!(
                    "expected an object at index {}, got {}",
                    idx,
                    type_name(item)
                ))
            })?;
            Ok(finding_from_object(obj))
        })
        .collect()
}

/// Strip a Markdown code fence around the JSON, if any
fn extract_json(response: &str) -> &str {
    let mut body = response.trim();

    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }

    body.trim()
}

fn finding_from_object(obj: &Map<String, Value>) -> Finding {
    let mut finding = Finding::new();
    for field in FindingField::ALL {
        if let Some(text) = obj.get(field.key()).and_then(value_as_text) {
            finding.set(field, text);
        }
    }

    finding
}

/// Render a JSON value as cell text. Backends sometimes answer numbers or
/// lists where a string was asked for.
fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(value_as_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
