//! Candidate Selector.
//!
//! A resolved declaration is a candidate when it returns exactly
//! `(T, int)` and `T` carries a mimetype annotation. Matching free
//! functions are rejected: wrapping them is not supported yet.

use smol_str::SmolStr;
use thiserror::Error;

use super::index::{DeclIndex, Declaration};
use super::resolve::ResolvedDecl;
use super::types::{Signature, Type};
use crate::project::Module;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error(
        "{location}: function {name} matches the handler convention, but wrapping functions without a receiver is not supported yet"
    )]
    UnsupportedFunction { location: String, name: String },
}

/// A method paired with the mimetype of its first result.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub decl: &'a Declaration,
    pub signature: Signature,
    pub mimetype: SmolStr,
}

/// Why a declaration was not selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    ResultCount(usize),
    StatusNotInt,
    NotAnnotated,
}

/// Filters resolved declarations down to candidates, keeping their order.
pub fn select<'a>(
    module: &Module,
    index: &DeclIndex,
    resolved: Vec<ResolvedDecl<'a>>,
) -> Result<Vec<Candidate<'a>>, SelectError> {
    let mut candidates = Vec::new();
    for ResolvedDecl { decl, signature } in resolved {
        let mimetype = match annotated_result(index, &signature) {
            Ok(mimetype) => SmolStr::new(mimetype),
            Err(skip) => {
                tracing::trace!("skipping {}: {:?}", decl, skip);
                continue;
            }
        };
        if signature.recv.is_none() {
            return Err(SelectError::UnsupportedFunction {
                location: module.file(decl.file).location(decl.range()),
                name: decl.name.to_string(),
            });
        }
        tracing::trace!("selected {} ({})", decl, mimetype);
        candidates.push(Candidate {
            decl,
            signature,
            mimetype,
        });
    }
    Ok(candidates)
}

/// The mimetype of the first result when the signature has the
/// `(Annotated, int)` shape.
fn annotated_result<'i>(index: &'i DeclIndex, signature: &Signature) -> Result<&'i str, Skip> {
    let [first, status] = signature.results.as_slice() else {
        return Err(Skip::ResultCount(signature.results.len()));
    };
    if status.ty != Type::basic("int") {
        return Err(Skip::StatusNotInt);
    }
    index
        .mimetype(&first.ty.to_string())
        .ok_or(Skip::NotAnnotated)
}
