use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use canvasforge_core::{EngineError, Result};

/// The JSON object returned for every operation.
///
/// Success: `{"success": true, "message"?: ..., ...payload fields}`.
/// Failure: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Value);

impl Envelope {
    /// Wrap a payload that serializes to an object; its fields are inlined.
    pub fn success(message: Option<String>, payload: impl Serialize) -> Result<Self> {
        let mut body = match serde_json::to_value(payload) {
            Ok(Value::Object(map)) => map,
            Ok(Value::Null) => Map::new(),
            Ok(other) => {
                let mut map = Map::new();
                map.insert("result".to_string(), other);
                map
            }
            Err(e) => {
                return Err(EngineError::validation(format!(
                    "Failed to serialize result: {}",
                    e
                )))
            }
        };
        body.insert("success".to_string(), Value::Bool(true));
        if let Some(message) = message {
            body.insert("message".to_string(), Value::String(message));
        }
        Ok(Self(Value::Object(body)))
    }

    pub fn failure(error: &EngineError) -> Self {
        Self(json!({ "error": error.to_string() }))
    }

    pub fn is_success(&self) -> bool {
        self.0.get("success").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn error(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_inlines_payload() {
        let env = Envelope::success(Some("done".into()), json!({"count": 2})).unwrap();
        assert!(env.is_success());
        assert_eq!(env.get("count"), Some(&json!(2)));
        assert_eq!(env.get("message"), Some(&json!("done")));
        assert!(env.error().is_none());
    }

    #[test]
    fn test_success_without_message() {
        let env = Envelope::success(None, ()).unwrap();
        assert_eq!(env.into_value(), json!({"success": true}));
    }

    #[test]
    fn test_failure_shape() {
        let env = Envelope::failure(&EngineError::index(5, 2));
        assert!(!env.is_success());
        assert_eq!(
            env.as_value(),
            &json!({"error": "Invalid shape index 5: canvas has 2 shapes"})
        );
    }
}
