//! High-level IR (HIR) - declarations, resolved types and candidates.
//!
//! ## Key Types
//!
//! - [`DeclIndex`] - methods, free functions and mimetype annotations
//! - [`Type`] / [`Signature`] - resolved types in `go/types` spelling
//! - [`Importer`] / [`ExportCatalog`] - type information of dependencies
//! - [`ResolvedDecl`] - an index declaration with its resolved signature
//! - [`Candidate`] - a declaration selected for wrapping
//!
//! ## Layers
//!
//! ```text
//! Module (parsed files)
//!     │
//!     ▼
//! DeclIndex::build          ← Declaration Index
//!     │
//!     ▼
//! resolve(module, index)    ← Signature Resolver
//!     │
//!     ▼
//! select(index, resolved)   ← Candidate Selector
//! ```

mod importer;
mod index;
mod resolve;
mod select;
mod types;

pub use importer::{
    ExportCatalog, ImportError, Importer, ManifestError, MemberKind, PackageExports,
    parse_manifest,
};
pub use index::{
    DeclIndex, Declaration, IndexError, MIMETYPE_MARKER, ParamSpec, Receiver, parse_mimetype,
};
pub use resolve::{ResolveError, ResolvedDecl, resolve};
pub use select::{Candidate, SelectError, select};
pub use types::{BASIC_TYPES, Field, InterfaceMember, Signature, Term, Type, Var};
