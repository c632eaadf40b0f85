// Core modules implementing the envelope grammar, coercion rules, and error modeling.
pub mod canonical;
pub mod coerce;
pub mod config;
pub mod construct;
pub mod envelope;
pub mod error;
pub mod forward;
pub mod indicator;
pub mod status;
pub mod validate;
