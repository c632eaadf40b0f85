// Canonicalization of `(error, payload, meta)` inputs into exactly one envelope.
// Payload validity is always judged in loose mode, whatever the registry says.
use serde_json::Value;
use tracing::trace;

use crate::core::coerce::is_truthy;
use crate::core::envelope::Envelope;
use crate::core::indicator::Indicator;
use crate::core::validate::Conformance;

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error. (japi)";
pub const NO_DATA_MESSAGE: &str = "No data returned.";

pub fn from_arguments(
    indicator: impl Into<Indicator>,
    payload: Option<Value>,
    meta: Option<Value>,
) -> Envelope {
    let indicator = indicator.into();

    if indicator.is_truthy() {
        trace!(target: "japi::canonical", "error indicator present");
        let message = indicator
            .message()
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
        let envelope = Envelope::error(message);
        return match indicator.stack() {
            Some(stack) => envelope.with_data(stack_data(stack)),
            None => envelope,
        };
    }

    let Some(payload) = payload else {
        trace!(target: "japi::canonical", "no payload");
        return Envelope::error(NO_DATA_MESSAGE);
    };

    match Envelope::parse(payload, Conformance::Loose) {
        Ok(envelope) => {
            trace!(target: "japi::canonical", status = %envelope.status(), "payload already an envelope");
            envelope
        }
        Err(payload) => {
            trace!(target: "japi::canonical", "wrapping payload as success");
            Envelope::success(payload, meta.filter(is_truthy))
        }
    }
}

pub fn from_pair<I: Into<Indicator>>(pair: (I, Value)) -> Envelope {
    let (indicator, payload) = pair;
    from_arguments(indicator, Some(payload), None)
}

/// Single-value form: a two-element array is unpacked as `[error, payload]`;
/// any other value is the error indicator itself, with no payload.
pub fn from_value(value: Value) -> Envelope {
    match value {
        Value::Array(items) if items.len() == 2 => {
            let mut items = items.into_iter();
            let indicator = items.next().unwrap_or(Value::Null);
            let payload = items.next().unwrap_or(Value::Null);
            from_pair((indicator, payload))
        }
        other => from_arguments(other, None, None),
    }
}

fn stack_data(stack: Value) -> Value {
    let mut data = serde_json::Map::new();
    data.insert("stack".to_string(), stack);
    Value::Object(data)
}
