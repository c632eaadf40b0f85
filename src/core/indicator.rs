// The error slot of the `(error, payload)` convention.
use std::error::Error as StdError;

use serde_json::Value;

use crate::core::coerce::{as_text, is_truthy};
use crate::core::envelope::MESSAGE_KEY;

const STACK_KEY: &str = "stack";

/// What a caller passes in the error position when canonicalizing.
///
/// `Absent` is the "no error" sentinel. A JSON value counts as an error only
/// when it is truthy (see [`is_truthy`]); a host error always does.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Indicator {
    #[default]
    Absent,
    Value(Value),
    Error {
        message: String,
        stack: Option<Value>,
    },
}

impl Indicator {
    /// Captures a host error by its `Display` text. Attach a trace through the
    /// `stack` field when one is available.
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        Indicator::Error {
            message: err.to_string(),
            stack: None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Indicator::Absent => false,
            Indicator::Value(value) => is_truthy(value),
            Indicator::Error { .. } => true,
        }
    }

    /// The message an error envelope should carry, if the indicator has one.
    pub(crate) fn message(&self) -> Option<String> {
        match self {
            Indicator::Absent => None,
            Indicator::Value(Value::String(text)) if !text.is_empty() => Some(text.clone()),
            Indicator::Value(Value::Object(map)) => map
                .get(MESSAGE_KEY)
                .filter(|message| is_truthy(message))
                .map(as_text),
            Indicator::Value(_) => None,
            Indicator::Error { message, .. } if !message.is_empty() => Some(message.clone()),
            Indicator::Error { .. } => None,
        }
    }

    pub(crate) fn stack(&self) -> Option<Value> {
        let stack = match self {
            Indicator::Value(Value::Object(map)) => map.get(STACK_KEY),
            Indicator::Error { stack, .. } => stack.as_ref(),
            _ => None,
        };
        stack.filter(|stack| is_truthy(stack)).cloned()
    }
}

impl From<Value> for Indicator {
    fn from(value: Value) -> Self {
        Indicator::Value(value)
    }
}

impl From<Option<Value>> for Indicator {
    fn from(value: Option<Value>) -> Self {
        value.map(Indicator::Value).unwrap_or_default()
    }
}

impl From<&str> for Indicator {
    fn from(message: &str) -> Self {
        Indicator::Value(Value::String(message.to_string()))
    }
}

impl From<String> for Indicator {
    fn from(message: String) -> Self {
        Indicator::Value(Value::String(message))
    }
}

#[cfg(test)]
mod tests {
    use super::Indicator;
    use serde_json::json;

    #[test]
    fn truthiness_follows_value_rules() {
        assert!(!Indicator::Absent.is_truthy());
        assert!(!Indicator::from(json!(null)).is_truthy());
        assert!(!Indicator::from(json!(0)).is_truthy());
        assert!(!Indicator::from("").is_truthy());
        assert!(Indicator::from("boom").is_truthy());
        assert!(Indicator::from(json!({})).is_truthy());

        let io = std::io::Error::other("");
        assert!(Indicator::from_error(&io).is_truthy());
    }

    #[test]
    fn message_extraction() {
        assert_eq!(Indicator::from("boom").message().as_deref(), Some("boom"));
        assert_eq!(
            Indicator::from(json!({"message": "bad"})).message().as_deref(),
            Some("bad")
        );
        assert_eq!(Indicator::from(json!({"message": ""})).message(), None);
        assert_eq!(Indicator::from(json!([1, 2, 3])).message(), None);
        assert_eq!(Indicator::from(json!(42)).message(), None);

        let io = std::io::Error::other("disk gone");
        assert_eq!(Indicator::from_error(&io).message().as_deref(), Some("disk gone"));
    }

    #[test]
    fn stack_extraction() {
        let value = Indicator::from(json!({"message": "bad", "stack": "a -> b"}));
        assert_eq!(value.stack(), Some(json!("a -> b")));
        assert_eq!(Indicator::from(json!({"stack": ""})).stack(), None);

        let err = Indicator::Error {
            message: "bad".to_string(),
            stack: Some(json!(["frame 0", "frame 1"])),
        };
        assert_eq!(err.stack(), Some(json!(["frame 0", "frame 1"])));
    }
}
