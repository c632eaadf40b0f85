//! Purpose: Define the stable public Rust API boundary for japi.
//! Exports: The registry, envelope value type, and supporting types.
//! Role: Public, additive-only surface for adapters and the CLI.
//! Invariants: Adapters only need `Japi` plus the types re-exported here.

mod japi;

pub use crate::core::canonical::{NO_DATA_MESSAGE, UNKNOWN_ERROR_MESSAGE};
pub use crate::core::coerce::is_truthy;
pub use crate::core::config::Config;
pub use crate::core::envelope::Envelope;
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::forward::{ForwardError, INVALID_ENVELOPE_MESSAGE};
pub use crate::core::indicator::Indicator;
pub use crate::core::status::{Status, StatusSpec};
pub use crate::core::validate::{Conformance, envelope_status};
pub use japi::Japi;
