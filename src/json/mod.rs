//! Purpose: Internal JSON parsing boundary shared by the library and CLI.
//! Exports: `parse` module with decode helpers and failure categories.
//! Role: Single seam for parser usage so callsites avoid ad hoc decode logic.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub mod parse;
