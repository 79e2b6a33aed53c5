//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::codegen::SynthError;
use crate::hir::{IndexError, ManifestError, ResolveError, SelectError};
use crate::project::LoadError;

/// Any failure of a generation run. Nothing is recovered; every variant
/// aborts the run.
#[derive(Debug, Error)]
pub enum GenError {
    /// Reading sources, syntax errors, missing package.
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Input-shape errors in the Declaration Index.
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Synth(#[from] SynthError),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = GenError> = std::result::Result<T, E>;
