// Envelope constructors. These are the only operations that can fail, and only
// when their mandatory input is missing.
use serde_json::Value;
use tracing::debug;

use crate::core::coerce::{as_text, is_truthy};
use crate::core::envelope::{CODE_KEY, DATA_KEY, Envelope, MESSAGE_KEY};
use crate::core::error::{Error, ErrorKind};
use crate::core::status::Status;
use crate::core::validate::{Conformance, envelope_status, is_valid};

pub fn success(
    data: Option<Value>,
    meta: Option<Value>,
    mode: Conformance,
) -> Result<Envelope, Error> {
    let Some(data) = data else {
        debug!(target: "japi::construct", "success called without data");
        return Err(missing_argument("data", "success"));
    };
    let data = unwrap_status(data, Status::Success, mode);
    Ok(Envelope::success(data, meta.filter(is_truthy)))
}

pub fn fail(data: Option<Value>, mode: Conformance) -> Result<Envelope, Error> {
    let Some(data) = data else {
        debug!(target: "japi::construct", "fail called without data");
        return Err(missing_argument("data", "fail"));
    };
    Ok(Envelope::fail(unwrap_status(data, Status::Fail, mode)))
}

/// Builds an error envelope from a message string or an object carrying a
/// truthy `message`, whose `code` and `data` are copied when present.
pub fn error(message: Option<Value>) -> Result<Envelope, Error> {
    match message {
        Some(Value::String(message)) => Ok(Envelope::error(message)),
        Some(Value::Object(mut map))
            if map.get(MESSAGE_KEY).is_some_and(is_truthy) =>
        {
            let text = map.get(MESSAGE_KEY).map(as_text).unwrap_or_default();
            let mut envelope = Envelope::error(text);
            if let Some(code) = map.remove(CODE_KEY) {
                envelope = envelope.with_code(code);
            }
            if let Some(data) = map.remove(DATA_KEY) {
                envelope = envelope.with_data(data);
            }
            Ok(envelope)
        }
        _ => {
            debug!(target: "japi::construct", "error called without a usable message");
            Err(missing_argument("message", "error"))
        }
    }
}

// A valid envelope of the same status is replaced by its inner data.
fn unwrap_status(data: Value, status: Status, mode: Conformance) -> Value {
    if envelope_status(&data) != Some(status) || !is_valid(&data, mode) {
        return data;
    }
    match data {
        Value::Object(mut map) => map.remove(DATA_KEY).unwrap_or(Value::Null),
        other => other,
    }
}

fn missing_argument(name: &str, constructor: &str) -> Error {
    Error::new(ErrorKind::Argument)
        .with_message(format!(
            "\"{name}\" must be defined when calling japi.{constructor}. (japi)"
        ))
        .with_hint(format!("Pass a {name} value to `{constructor}`."))
}

#[cfg(test)]
mod tests {
    use super::{error, fail, success};
    use crate::core::error::ErrorKind;
    use crate::core::validate::Conformance;
    use serde_json::{Value, json};

    #[test]
    fn success_wraps_plain_data() {
        for data in [json!({"foo": "bar"}), json!([1, 2, 3]), json!("you got it"), json!(123), Value::Null] {
            let envelope = success(Some(data.clone()), None, Conformance::Loose).expect("success");
            assert_eq!(envelope, json!({"status": "success", "data": data}));
        }
    }

    #[test]
    fn constructed_envelopes_serialize_status_first() {
        let envelope = success(Some(json!(1)), None, Conformance::Loose).expect("success");
        assert_eq!(
            serde_json::to_string(&envelope).expect("encode"),
            r#"{"status":"success","data":1}"#
        );
        let envelope = fail(Some(json!({"b": 1, "a": 2})), Conformance::Loose).expect("fail");
        assert_eq!(envelope.to_string(), r#"{"status":"fail","data":{"b":1,"a":2}}"#);
    }

    #[test]
    fn success_unwraps_success_envelopes_only() {
        let inner = json!({"status": "success", "data": {"foo": "bar"}});
        let envelope = success(Some(inner.clone()), None, Conformance::Loose).expect("success");
        assert_eq!(envelope, inner);

        let fail_shape = json!({"status": "fail", "data": 1});
        let envelope = success(Some(fail_shape.clone()), None, Conformance::Loose).expect("success");
        assert_eq!(envelope, json!({"status": "success", "data": fail_shape}));
    }

    #[test]
    fn strict_mode_does_not_unwrap_over_permissive_envelopes() {
        let inner = json!({"status": "success", "data": 1, "extra": 2});
        let loose = success(Some(inner.clone()), None, Conformance::Loose).expect("loose");
        assert_eq!(loose, json!({"status": "success", "data": 1}));

        let strict = success(Some(inner.clone()), None, Conformance::Strict).expect("strict");
        assert_eq!(strict, json!({"status": "success", "data": inner}));
    }

    #[test]
    fn success_attaches_only_truthy_meta() {
        let with_meta = success(Some(json!(1)), Some(json!({"page": 2})), Conformance::Loose)
            .expect("success");
        assert_eq!(with_meta.meta(), Some(&json!({"page": 2})));

        let without = success(Some(json!(1)), Some(json!(0)), Conformance::Loose).expect("success");
        assert_eq!(without.meta(), None);
    }

    #[test]
    fn fail_unwraps_fail_envelopes() {
        let inner = json!({"status": "fail", "data": {"foo": "bar"}});
        assert_eq!(fail(Some(inner.clone()), Conformance::Loose).expect("fail"), inner);
        assert_eq!(
            fail(Some(Value::Null), Conformance::Loose).expect("fail"),
            json!({"status": "fail", "data": null})
        );
    }

    #[test]
    fn missing_data_is_an_argument_error() {
        let err = success(None, None, Conformance::Loose).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);
        assert_eq!(
            err.message(),
            Some("\"data\" must be defined when calling japi.success. (japi)")
        );
        assert_eq!(fail(None, Conformance::Strict).unwrap_err().kind(), ErrorKind::Argument);
    }

    #[test]
    fn error_copies_message_code_and_data() {
        let input = json!({"message": "bad", "code": 123, "data": {"x": 1}, "other": true});
        assert_eq!(
            error(Some(input)).expect("error"),
            json!({"status": "error", "message": "bad", "code": 123, "data": {"x": 1}})
        );
        assert_eq!(
            error(Some(json!("something bad"))).expect("error"),
            json!({"status": "error", "message": "something bad"})
        );
    }

    #[test]
    fn error_requires_a_message() {
        for input in [
            None,
            Some(json!({"code": "BAD_THINGS", "data": {"foo": "bar"}})),
            Some(json!({"message": ""})),
            Some(json!(42)),
            Some(Value::Null),
        ] {
            assert_eq!(error(input).unwrap_err().kind(), ErrorKind::Argument);
        }
    }
}
