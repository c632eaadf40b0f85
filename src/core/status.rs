// Static table of envelope statuses and the field sets each one admits.
use std::fmt;

pub const STATUS_KEY: &str = "status";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Status {
    Success,
    Fail,
    Error,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusSpec {
    /// Keys that must be present (presence, not truthiness).
    pub required: &'static [&'static str],
    /// Every key strict mode tolerates, required keys included.
    pub allowed: &'static [&'static str],
}

const SUCCESS_SPEC: StatusSpec = StatusSpec {
    required: &["status", "data"],
    allowed: &["status", "data", "meta"],
};

const FAIL_SPEC: StatusSpec = StatusSpec {
    required: &["status", "data"],
    allowed: &["status", "data"],
};

const ERROR_SPEC: StatusSpec = StatusSpec {
    required: &["status", "message"],
    allowed: &["status", "message", "data", "code"],
};

impl Status {
    pub const ALL: [Status; 3] = [Status::Success, Status::Fail, Status::Error];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "success" => Some(Status::Success),
            "fail" => Some(Status::Fail),
            "error" => Some(Status::Error),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Fail => "fail",
            Status::Error => "error",
        }
    }

    pub fn spec(self) -> &'static StatusSpec {
        match self {
            Status::Success => &SUCCESS_SPEC,
            Status::Fail => &FAIL_SPEC,
            Status::Error => &ERROR_SPEC,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl StatusSpec {
    pub fn is_allowed(&self, key: &str) -> bool {
        self.allowed.iter().any(|allowed| *allowed == key)
    }
}

#[cfg(test)]
mod tests {
    use super::Status;

    #[test]
    fn tags_round_trip() {
        for status in Status::ALL {
            assert_eq!(Status::from_tag(status.tag()), Some(status));
        }
        assert_eq!(Status::from_tag("ok"), None);
        assert_eq!(Status::from_tag("Success"), None);
    }

    #[test]
    fn required_keys_are_always_allowed() {
        for status in Status::ALL {
            let spec = status.spec();
            for key in spec.required {
                assert!(spec.is_allowed(key), "{status}: {key}");
            }
        }
    }

    #[test]
    fn fail_never_allows_meta() {
        assert!(Status::Success.spec().is_allowed("meta"));
        assert!(!Status::Fail.spec().is_allowed("meta"));
        assert!(!Status::Error.spec().is_allowed("meta"));
        assert!(Status::Error.spec().is_allowed("code"));
    }
}
