//! The `{ data: ... }` response envelope.
//!
//! Every body is read as text first. A body that is not JSON becomes
//! `Envelope { data: None, raw: Some(body) }` instead of an error, so callers
//! inspect `data` on a single path.

use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub data: Option<Value>,
    pub raw: Option<String>,
}

impl Envelope {
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(mut map)) => Envelope {
                data: map.remove("data").filter(|v| !v.is_null()),
                raw: None,
            },
            Ok(_) => Envelope {
                data: None,
                raw: None,
            },
            Err(_) => Envelope {
                data: None,
                raw: Some(body.to_string()),
            },
        }
    }

    /// `data` if it is truthy in the JavaScript sense.
    pub fn into_truthy(self) -> Result<Value, ApiError> {
        match self.data {
            Some(data) if is_truthy(&data) => Ok(data),
            _ => Err(ApiError::MissingData { raw: self.raw }),
        }
    }

    /// `data` if it is an array.
    pub fn into_array(self) -> Result<Vec<Value>, ApiError> {
        match self.data {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(ApiError::MissingData { raw: self.raw }),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_json_body_becomes_null_data_with_raw_text() {
        let env = Envelope::parse("<html>502 Bad Gateway</html>");
        assert!(env.data.is_none());
        assert_eq!(env.raw.as_deref(), Some("<html>502 Bad Gateway</html>"));
    }

    #[test]
    fn object_without_data_has_no_data() {
        let env = Envelope::parse(r#"{"message":"nope"}"#);
        assert!(env.data.is_none());
        assert!(env.raw.is_none());
    }

    #[test]
    fn bare_array_is_not_an_envelope() {
        let env = Envelope::parse(r#"[{"id":1}]"#);
        assert!(env.into_array().is_err());
    }

    #[test]
    fn falsy_data_is_missing() {
        for body in [
            r#"{"data":null}"#,
            r#"{"data":false}"#,
            r#"{"data":0}"#,
            r#"{"data":""}"#,
        ] {
            let err = Envelope::parse(body).into_truthy().unwrap_err();
            assert!(matches!(err, ApiError::MissingData { .. }), "{body}");
        }
    }

    #[test]
    fn empty_object_data_is_truthy() {
        let data = Envelope::parse(r#"{"data":{}}"#).into_truthy().unwrap();
        assert_eq!(data, json!({}));
    }

    #[test]
    fn list_requires_an_array() {
        assert!(Envelope::parse(r#"{"data":[]}"#).into_array().unwrap().is_empty());
        assert!(Envelope::parse(r#"{"data":{"id":1}}"#).into_array().is_err());
    }
}
