//! Core data model for iss-now.
//!
//! The record shape callers work with, independent of how the
//! upstream API happens to lay out its JSON.

mod position;

pub use position::PositionRecord;
