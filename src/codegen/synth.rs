//! Wrapper Synthesizer: candidates → [`GeneratedFile`].

use smol_str::SmolStr;
use thiserror::Error;

use super::ir::{Argument, GeneratedFile, PREAMBLE_IMPORTS, Wrapper};
use crate::hir::{Candidate, Type};
use crate::parser::AstNode;
use crate::project::Module;

/// Identifiers the wrapper body declares. A receiver with one of these
/// names, or with the package name of a preamble import, is renamed.
const WRAPPER_LOCALS: &[&str] = &["res", "req", "raw", "err", "parsed", "body", "retcode"];

/// Receiver name used when the candidate's cannot be reused.
const FALLBACK_RECEIVER: &str = "self";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SynthError {
    #[error(
        "{location}: parameter {position} of {method} has no name to read from the request body"
    )]
    UnnamedParameter {
        location: String,
        method: String,
        position: usize,
    },

    #[error("{location}: {method} has no receiver")]
    MissingReceiver { location: String, method: String },
}

/// Lowers every candidate, in order.
pub fn synthesize(module: &Module, candidates: &[Candidate<'_>]) -> Result<GeneratedFile, SynthError> {
    let mut file = GeneratedFile::new(module.name.clone());
    for candidate in candidates {
        file.wrappers.push(lower(module, candidate)?);
    }
    Ok(file)
}

fn is_reserved(name: &str) -> bool {
    name == "_"
        || WRAPPER_LOCALS.contains(&name)
        || PREAMBLE_IMPORTS
            .iter()
            .any(|path| path.rsplit('/').next() == Some(name))
}

fn is_request(ty: &Type) -> bool {
    ty.pointee().is_some_and(|t| t.is_named("net/http", "Request"))
}

fn is_response_writer(ty: &Type) -> bool {
    ty.is_named("net/http", "ResponseWriter")
}

/// Lowers one candidate to a [`Wrapper`].
pub fn lower(module: &Module, candidate: &Candidate<'_>) -> Result<Wrapper, SynthError> {
    let decl = candidate.decl;
    let file = module.file(decl.file);
    let Some(receiver) = &decl.receiver else {
        return Err(SynthError::MissingReceiver {
            location: file.location(decl.range()),
            method: decl.name.to_string(),
        });
    };

    let mut args = Vec::new();
    let mut write_body = true;
    let mut resolved = candidate.signature.params.iter();
    let mut position = 0;

    for spec in &decl.params {
        let names: Vec<Option<&SmolStr>> = if spec.names.is_empty() {
            vec![None]
        } else {
            spec.names.iter().map(Some).collect()
        };
        for name in names {
            position += 1;
            let Some(var) = resolved.next() else { break };
            let arg = if is_request(&var.ty) {
                Argument::Request
            } else if is_response_writer(&var.ty) {
                write_body = false;
                Argument::Response
            } else {
                let Some(key) = name.filter(|n| *n != "_") else {
                    return Err(SynthError::UnnamedParameter {
                        location: file.location(spec.ty.syntax().text_range()),
                        method: decl.to_string(),
                        position,
                    });
                };
                let assert_type = if spec.variadic {
                    Some(format!("[]{}", spec.type_text))
                } else if var.ty.is_empty_interface() {
                    None
                } else {
                    Some(spec.type_text.clone())
                };
                Argument::Field {
                    key: key.clone(),
                    assert_type,
                    variadic: spec.variadic,
                }
            };
            args.push(arg);
        }
    }

    let receiver_name = match &receiver.name {
        Some(name) if !is_reserved(name) => name.clone(),
        _ => SmolStr::new(FALLBACK_RECEIVER),
    };
    let decode_body = args.iter().any(|a| matches!(a, Argument::Field { .. }));

    tracing::trace!(
        "lowered {} ({} argument(s), decode: {}, write body: {})",
        decl,
        args.len(),
        decode_body,
        write_body
    );
    Ok(Wrapper {
        receiver_name,
        receiver_type: receiver.type_text(),
        name: format!("Handle{}", decl.name),
        target: decl.name.clone(),
        content_type: candidate.mimetype.clone(),
        decode_body,
        args,
        write_body,
    })
}
