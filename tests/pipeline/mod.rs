//! Pipeline tests
//!
//! End-to-end runs over packages written to temporary directories.

pub mod tests_run;
