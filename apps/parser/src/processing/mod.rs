//! The `/process` pipeline: payload resolution, identity, scoring and persistence.

pub mod handlers;
pub mod payload;
pub mod persistence;
