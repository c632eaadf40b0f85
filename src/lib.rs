//! Purpose: JSend-style response envelopes for Rust callers and the `japi` CLI.
//! Exports: `api` (registry and envelope types), `core` (grammar, coercion, errors).
//! Role: Pure, synchronous contract layer; no I/O beyond optional config loading.
//! Invariants: Validation is total; only the three constructors can fail.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
#[doc(hidden)]
pub mod json;
