//! Shared helpers for the release tools.

pub mod fs;
