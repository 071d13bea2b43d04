//! Observer surface for evaluation results.
//!
//! UI adapters subscribe to a watch channel of [`crate::budget::PillState`]
//! instead of polling independent mutable fields.

mod publisher;

pub use publisher::*;
