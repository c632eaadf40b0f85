// Forwarding: classify a presumed envelope and dispatch it to an
// `(error, data)` callback exactly once.
use std::error::Error as StdError;
use std::fmt;

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::core::coerce::{as_text, is_truthy};
use crate::core::envelope::{CODE_KEY, DATA_KEY, Envelope, MESSAGE_KEY};
use crate::core::validate::Conformance;

pub const INVALID_ENVELOPE_MESSAGE: &str = "Invalid japi object.";
pub const ORIGINAL_OBJECT_KEY: &str = "originalObject";

/// Error handed to forward callbacks for `fail` and `error` envelopes.
#[derive(Clone, Debug, PartialEq)]
pub struct ForwardError {
    message: String,
    code: Option<Value>,
    data: Option<Value>,
}

impl ForwardError {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<&Value> {
        self.code.as_ref()
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(MESSAGE_KEY.to_string(), json!(self.message));
        if let Some(code) = &self.code {
            map.insert(CODE_KEY.to_string(), code.clone());
        }
        if let Some(data) = &self.data {
            map.insert(DATA_KEY.to_string(), data.clone());
        }
        Value::Object(map)
    }
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ForwardError {}

pub fn forward<F, R>(value: Value, mode: Conformance, callback: F) -> R
where
    F: FnOnce(Option<ForwardError>, Option<Value>) -> R,
{
    let envelope = match Envelope::parse(value, mode) {
        Ok(envelope) => envelope,
        Err(original) => {
            debug!(target: "japi::forward", strict = mode.is_strict(), "replacing invalid envelope");
            invalid_envelope(original)
        }
    };

    if envelope.is_success() {
        return callback(None, envelope.into_data());
    }

    let message = envelope
        .get(MESSAGE_KEY)
        .filter(|message| is_truthy(message))
        .map(as_text)
        .unwrap_or_else(|| format!("Jsend response status: {}", envelope.status()));
    let code = envelope.code().cloned();
    let data = envelope.into_data();
    let err = ForwardError {
        message,
        code,
        data: data.clone(),
    };
    callback(Some(err), data)
}

/// `forward` folded into a `Result`; success data defaults to `null`.
pub fn into_result(value: Value, mode: Conformance) -> Result<Value, ForwardError> {
    forward(value, mode, |err, data| match err {
        Some(err) => Err(err),
        None => Ok(data.unwrap_or(Value::Null)),
    })
}

fn invalid_envelope(original: Value) -> Envelope {
    let mut data = Map::new();
    data.insert(ORIGINAL_OBJECT_KEY.to_string(), original);
    Envelope::error(INVALID_ENVELOPE_MESSAGE).with_data(Value::Object(data))
}
