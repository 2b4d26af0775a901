//! Typed models of the legacy dialects, as parsed from their source documents.
//!
//! The models are loose where the dialects are loose (see [`crate::flexible`]) and
//! keep recognized-but-unmapped fields as raw values so the converter can report them.

pub mod drone;
pub mod gitlab;
