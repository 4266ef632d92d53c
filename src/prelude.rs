//! Prelude module for the civil_calendar crate.
//!
//! Re-exports the derive macros shared by the tag types.

pub use derive_more::Display;
