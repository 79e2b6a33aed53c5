//! Shared test helpers.

pub mod package_helpers;
pub mod source_fixtures;
