//! Wrapper synthesis.
//!
//! [`synthesize`] lowers selected candidates into the [`ir`] tree and
//! [`emit`] renders that tree as Go source.

pub mod ir;

mod emit;
mod synth;

pub use emit::{emit, emit_wrapper};
pub use ir::{Argument, GeneratedFile, PREAMBLE_IMPORTS, Wrapper};
pub use synth::{SynthError, lower, synthesize};
