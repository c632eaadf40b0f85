//! Purpose: The configured registry that callers and adapters hold.
//! Exports: `Japi`.
//! Role: Binds the conformance mode once and exposes the envelope operations.
//! Invariants: Immutable after construction; safe to copy and share across threads.
//! Invariants: Canonicalization judges payloads loosely regardless of `strict`.

use serde_json::Value;

use crate::core::canonical;
use crate::core::config::Config;
use crate::core::construct;
use crate::core::envelope::Envelope;
use crate::core::error::Error;
use crate::core::forward::{self, ForwardError};
use crate::core::indicator::Indicator;
use crate::core::validate::{self, Conformance};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Japi {
    config: Config,
}

impl Japi {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn strict() -> Self {
        Self::new(Config::new().strict(true))
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn conformance(&self) -> Conformance {
        self.config.conformance()
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        validate::is_valid(value, self.conformance())
    }

    /// Validates and hands `value` to `callback` as `(error, data)`.
    ///
    /// Invalid input never reaches the callback as-is: it is replaced by an
    /// error envelope whose `data.originalObject` holds the original value.
    pub fn forward<F, R>(&self, value: Value, callback: F) -> R
    where
        F: FnOnce(Option<ForwardError>, Option<Value>) -> R,
    {
        forward::forward(value, self.conformance(), callback)
    }

    pub fn into_result(&self, value: Value) -> Result<Value, ForwardError> {
        forward::into_result(value, self.conformance())
    }

    pub fn from_arguments(
        &self,
        indicator: impl Into<Indicator>,
        payload: Option<Value>,
        meta: Option<Value>,
    ) -> Envelope {
        canonical::from_arguments(indicator, payload, meta)
    }

    pub fn from_pair<I: Into<Indicator>>(&self, pair: (I, Value)) -> Envelope {
        canonical::from_pair(pair)
    }

    pub fn from_value(&self, value: Value) -> Envelope {
        canonical::from_value(value)
    }

    pub fn success(&self, data: Option<Value>, meta: Option<Value>) -> Result<Envelope, Error> {
        construct::success(data, meta, self.conformance())
    }

    pub fn fail(&self, data: Option<Value>) -> Result<Envelope, Error> {
        construct::fail(data, self.conformance())
    }

    pub fn error(&self, message: Option<Value>) -> Result<Envelope, Error> {
        construct::error(message)
    }
}
