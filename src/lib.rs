//! # handlergen
//!
//! Generates `net/http` handler wrappers for Go methods that return
//! `(T, int)` where `T` is annotated with `//mimetype <type>`.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline  → load, generate, write
//!   ↓
//! codegen   → Wrapper IR, synthesizer, Go emitter
//!   ↓
//! hir       → Declaration Index, Signature Resolver, Candidate Selector
//!   ↓
//! project   → Package loading
//!   ↓
//! parser    → Logos lexer, rowan CST, typed AST
//!   ↓
//! base      → Primitives (FileId, LineIndex, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → project → hir → codegen → pipeline)
// ============================================================================

/// Foundation types: FileId, positions, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Package loading: directory scan, parse, group by package
pub mod project;

/// Declarations, resolved types and candidate selection
pub mod hir;

/// Wrapper IR, synthesis and Go text emission
pub mod codegen;

/// Crate-wide error type
pub mod error;

/// End-to-end generation
pub mod pipeline;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, Position, TextRange, TextSize};

pub use codegen::{GeneratedFile, emit};
pub use error::{GenError, Result};
pub use hir::{DeclIndex, ExportCatalog, Importer};
pub use pipeline::{GenerateConfig, generate, run};
pub use project::{Module, load_package};
