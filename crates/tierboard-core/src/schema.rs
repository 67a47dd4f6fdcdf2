//! Shallow schema check for incoming board payloads.
//!
//! The check is deliberately optimistic: it only looks at the version and
//! that the two structural collections are present. Tier and player shapes
//! are left to the typed decode in [`crate::sync`].

use crate::board::BOARD_VERSION;
use crate::sync::SyncError;
use serde_json::Value;

/// Validate a parsed JSON value as a board payload.
pub fn validate(value: &Value) -> Result<(), SyncError> {
    let Some(object) = value.as_object() else {
        return Err(SyncError::InvalidFormat("expected a JSON object".to_string()));
    };

    // `1.0` is the same JSON number as `1`.
    match object.get("version").and_then(Value::as_f64) {
        Some(v) if v == f64::from(BOARD_VERSION) => {}
        _ => {
            return Err(SyncError::InvalidFormat(format!(
                "unsupported version (expected {})",
                BOARD_VERSION
            )));
        }
    }

    for field in ["tiers", "players"] {
        if !object.get(field).is_some_and(is_truthy) {
            return Err(SyncError::InvalidFormat(format!("missing '{}'", field)));
        }
    }

    Ok(())
}

/// JSON truthiness: empty arrays and objects count as present.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
