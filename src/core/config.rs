// Registry configuration: a single `strict` switch, fixed at construction.
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{Error, ErrorKind};
use crate::core::validate::Conformance;
use crate::json::parse;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub strict: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn conformance(&self) -> Conformance {
        Conformance::from_strict(self.strict)
    }

    pub fn from_value(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message("invalid config")
                .with_hint("The only recognized option is `strict` (boolean).")
                .with_source(err)
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read config")
                .with_path(path)
                .with_source(err)
        })?;
        let value: Value = parse::from_str(&text).map_err(|err| {
            Error::new(ErrorKind::Parse)
                .with_message("config is not valid json")
                .with_hint(parse::hint_for_error(&err, "config"))
                .with_path(path)
                .with_source(err)
        })?;
        Self::from_value(value).map_err(|err| err.with_path(path))
    }
}
