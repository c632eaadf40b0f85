// Envelope shape validation: status lookup, required-key presence, strict key sets.
// Validation is total: any value that is not a JSON object is simply invalid.
use serde_json::{Map, Value};

use crate::core::status::{STATUS_KEY, Status};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Conformance {
    /// Extra keys are tolerated.
    #[default]
    Loose,
    /// Every key must belong to the status's allowed set.
    Strict,
}

impl Conformance {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Conformance::Strict
        } else {
            Conformance::Loose
        }
    }

    pub fn is_strict(self) -> bool {
        self == Conformance::Strict
    }
}

/// Returns the recognized status of `value`, without checking any other key.
pub fn envelope_status(value: &Value) -> Option<Status> {
    value.as_object().and_then(map_status)
}

pub(crate) fn map_status(map: &Map<String, Value>) -> Option<Status> {
    map.get(STATUS_KEY)
        .and_then(Value::as_str)
        .and_then(Status::from_tag)
}

pub fn is_valid(value: &Value, mode: Conformance) -> bool {
    match value.as_object() {
        Some(map) => is_valid_map(map, mode),
        None => false,
    }
}

pub fn is_valid_map(map: &Map<String, Value>, mode: Conformance) -> bool {
    let Some(status) = map_status(map) else {
        return false;
    };
    let spec = status.spec();
    if !spec.required.iter().all(|key| map.contains_key(*key)) {
        return false;
    }
    match mode {
        Conformance::Loose => true,
        Conformance::Strict => map.keys().all(|key| spec.is_allowed(key)),
    }
}
