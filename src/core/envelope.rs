// Validated envelope value plus the internal builders used by constructors,
// canonicalization, and forwarding.
use std::fmt;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::core::status::{STATUS_KEY, Status};
use crate::core::validate::{Conformance, is_valid_map, map_status};

pub const DATA_KEY: &str = "data";
pub const MESSAGE_KEY: &str = "message";
pub const CODE_KEY: &str = "code";
pub const META_KEY: &str = "meta";

/// A JSON object that satisfies the envelope grammar in at least loose mode.
///
/// Unknown keys carried by a loosely valid input are preserved verbatim, so
/// an envelope passed through canonicalization serializes exactly as it came in.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    status: Status,
    fields: Map<String, Value>,
}

impl Envelope {
    /// Validates `value` under `mode`, handing the value back untouched on rejection.
    pub fn parse(value: Value, mode: Conformance) -> Result<Self, Value> {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(other),
        };
        if !is_valid_map(&map, mode) {
            return Err(Value::Object(map));
        }
        match map_status(&map) {
            Some(status) => Ok(Self {
                status,
                fields: map,
            }),
            None => Err(Value::Object(map)),
        }
    }

    pub(crate) fn success(data: Value, meta: Option<Value>) -> Self {
        let mut envelope = Self::with_status(Status::Success);
        envelope.fields.insert(DATA_KEY.to_string(), data);
        if let Some(meta) = meta {
            envelope.fields.insert(META_KEY.to_string(), meta);
        }
        envelope
    }

    pub(crate) fn fail(data: Value) -> Self {
        let mut envelope = Self::with_status(Status::Fail);
        envelope.fields.insert(DATA_KEY.to_string(), data);
        envelope
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        let mut envelope = Self::with_status(Status::Error);
        envelope
            .fields
            .insert(MESSAGE_KEY.to_string(), Value::String(message.into()));
        envelope
    }

    pub(crate) fn with_code(mut self, code: Value) -> Self {
        self.fields.insert(CODE_KEY.to_string(), code);
        self
    }

    pub(crate) fn with_data(mut self, data: Value) -> Self {
        self.fields.insert(DATA_KEY.to_string(), data);
        self
    }

    fn with_status(status: Status) -> Self {
        let mut fields = Map::new();
        fields.insert(STATUS_KEY.to_string(), Value::String(status.tag().to_string()));
        Self { status, fields }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn data(&self) -> Option<&Value> {
        self.fields.get(DATA_KEY)
    }

    /// The message, when it is a string. Loose inputs may carry other types;
    /// use [`Envelope::get`] to see those.
    pub fn message(&self) -> Option<&str> {
        self.fields.get(MESSAGE_KEY).and_then(Value::as_str)
    }

    pub fn code(&self) -> Option<&Value> {
        self.fields.get(CODE_KEY)
    }

    pub fn meta(&self) -> Option<&Value> {
        self.fields.get(META_KEY)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_data(mut self) -> Option<Value> {
        self.fields.remove(DATA_KEY)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        envelope.into_value()
    }
}

impl PartialEq<Value> for Envelope {
    fn eq(&self, other: &Value) -> bool {
        matches!(other, Value::Object(map) if *map == self.fields)
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.fields).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Envelope::parse(value, Conformance::Loose)
            .map_err(|_| de::Error::custom("value is not a japi envelope"))
    }
}

#[cfg(test)]
mod tests {
    use super::Envelope;
    use crate::core::status::Status;
    use crate::core::validate::Conformance;
    use serde_json::{Value, json};

    #[test]
    fn parse_keeps_unknown_keys_in_loose_mode() {
        let value = json!({"status": "success", "data": 1, "trace_id": "abc"});
        let envelope = Envelope::parse(value.clone(), Conformance::Loose).expect("loose");
        assert_eq!(envelope.status(), Status::Success);
        assert_eq!(envelope.get("trace_id"), Some(&json!("abc")));
        assert_eq!(envelope, value);

        let rejected = Envelope::parse(value.clone(), Conformance::Strict).unwrap_err();
        assert_eq!(rejected, value);
    }

    #[test]
    fn builders_produce_exact_shapes() {
        assert_eq!(
            Envelope::success(json!([1]), Some(json!("m"))),
            json!({"status": "success", "data": [1], "meta": "m"})
        );
        assert_eq!(Envelope::fail(Value::Null), json!({"status": "fail", "data": null}));
        assert_eq!(
            Envelope::error("bad").with_code(json!(7)),
            json!({"status": "error", "message": "bad", "code": 7})
        );
    }

    #[test]
    fn serde_round_trip_is_transparent() {
        let envelope = Envelope::error("bad").with_data(json!({"x": 1}));
        let text = serde_json::to_string(&envelope).expect("encode");
        assert_eq!(text, envelope.to_string());
        let decoded: Envelope = serde_json::from_str(&text).expect("decode");
        assert_eq!(decoded, envelope);

        let err = serde_json::from_str::<Envelope>(r#"{"status":"error"}"#).unwrap_err();
        assert!(err.to_string().contains("not a japi envelope"));
    }

    #[test]
    fn wire_text_puts_status_first() {
        let success = Envelope::success(json!(1), Some(json!({"m": 1})));
        assert_eq!(success.to_string(), r#"{"status":"success","data":1,"meta":{"m":1}}"#);

        let error = Envelope::error("bad").with_code(json!(9)).with_data(json!([]));
        assert_eq!(
            serde_json::to_string(&error).expect("encode"),
            r#"{"status":"error","message":"bad","code":9,"data":[]}"#
        );
        assert_eq!(
            serde_json::to_string(&error.into_value()).expect("encode"),
            r#"{"status":"error","message":"bad","code":9,"data":[]}"#
        );
    }

    #[test]
    fn accessors_read_fields() {
        let envelope = Envelope::error("bad").with_code(json!("E1"));
        assert_eq!(envelope.message(), Some("bad"));
        assert_eq!(envelope.code(), Some(&json!("E1")));
        assert_eq!(envelope.data(), None);
        assert!(!envelope.is_success());
        assert_eq!(Envelope::fail(json!(3)).into_data(), Some(json!(3)));
    }
}
