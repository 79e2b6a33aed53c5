//! Declaration Index.
//!
//! One pass over every file of a package collects:
//! - methods, keyed by receiver type (`pkg.T` or `*pkg.T`) then method name;
//! - free functions, keyed by name;
//! - `//mimetype <token>` annotations on type declarations.
//!
//! Duplicates overwrite earlier entries. Nothing is filtered here.

use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{FileId, TextRange};
use crate::parser::{AstNode, FuncDecl, TypeExpr, TypeSpec};
use crate::project::{GoFile, Module};

/// Marker that starts an annotation comment.
pub const MIMETYPE_MARKER: &str = "//mimetype ";

/// Input-shape errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("{location}: expected exactly one receiver, found {count}")]
    ReceiverCount { location: String, count: usize },

    #[error("{location}: unsupported receiver type {text}")]
    ReceiverShape { location: String, text: String },
}

/// Receiver of a method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    /// Receiver variable, `None` when omitted.
    pub name: Option<SmolStr>,
    /// Base type name, unqualified.
    pub base: SmolStr,
    pub pointer: bool,
    pub range: TextRange,
}

impl Receiver {
    /// Index key, e.g. `*main.H`.
    pub fn key(&self, package: &str) -> String {
        format!("{}{}.{}", if self.pointer { "*" } else { "" }, package, self.base)
    }

    /// Receiver type as written without a package qualifier, e.g. `*H`.
    pub fn type_text(&self) -> String {
        format!("{}{}", if self.pointer { "*" } else { "" }, self.base)
    }
}

/// Parameter names sharing one declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Empty for an unnamed parameter.
    pub names: Vec<SmolStr>,
    /// Canonical text of the declared type; for `...T` this is `T`.
    pub type_text: String,
    pub variadic: bool,
    pub ty: TypeExpr,
}

impl ParamSpec {
    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }
}

/// A function or method as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: SmolStr,
    pub receiver: Option<Receiver>,
    pub params: Vec<ParamSpec>,
    pub file: FileId,
    pub node: FuncDecl,
}

impl Declaration {
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn range(&self) -> TextRange {
        self.node.syntax().text_range()
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.receiver {
            Some(recv) => write!(f, "({}).{}", recv.type_text(), self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The Declaration Index of one package.
#[derive(Debug, Clone, Default)]
pub struct DeclIndex {
    package: SmolStr,
    methods: IndexMap<String, IndexMap<SmolStr, Declaration>>,
    functions: IndexMap<SmolStr, Declaration>,
    mimetypes: IndexMap<String, String>,
}

impl DeclIndex {
    /// Builds the index from every file of `module`.
    pub fn build(module: &Module) -> Result<Self, IndexError> {
        let mut builder = IndexBuilder::new(module.name.clone());
        for file in module.files() {
            builder.visit_file(file)?;
        }
        let index = builder.finish();
        tracing::debug!("methods {:?}", index.method_names());
        tracing::debug!("functions {:?}", index.functions.keys().collect::<Vec<_>>());
        tracing::debug!("mimetypes {:?}", index.mimetypes);
        Ok(index)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn methods(&self) -> &IndexMap<String, IndexMap<SmolStr, Declaration>> {
        &self.methods
    }

    pub fn functions(&self) -> &IndexMap<SmolStr, Declaration> {
        &self.functions
    }

    pub fn mimetypes(&self) -> &IndexMap<String, String> {
        &self.mimetypes
    }

    /// Annotation for a fully qualified type name such as `main.Msg`.
    pub fn mimetype(&self, type_name: &str) -> Option<&str> {
        self.mimetypes.get(type_name).map(String::as_str)
    }

    pub fn method(&self, receiver_key: &str, name: &str) -> Option<&Declaration> {
        self.methods.get(receiver_key)?.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&Declaration> {
        self.functions.get(name)
    }

    /// Methods by receiver key in first-seen order, then free functions.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.methods
            .values()
            .flat_map(|methods| methods.values())
            .chain(self.functions.values())
    }

    fn method_names(&self) -> Vec<String> {
        self.methods
            .iter()
            .flat_map(|(key, methods)| methods.keys().map(move |m| format!("{}.{}", key, m)))
            .collect()
    }
}

/// Accumulator consumed into an immutable [`DeclIndex`].
struct IndexBuilder {
    package: SmolStr,
    methods: IndexMap<String, IndexMap<SmolStr, Declaration>>,
    functions: IndexMap<SmolStr, Declaration>,
    mimetypes: IndexMap<String, String>,
}

impl IndexBuilder {
    fn new(package: SmolStr) -> Self {
        Self {
            package,
            methods: IndexMap::new(),
            functions: IndexMap::new(),
            mimetypes: IndexMap::new(),
        }
    }

    fn visit_file(&mut self, file: &GoFile) -> Result<(), IndexError> {
        let tree = file.tree();
        for spec in tree.type_specs() {
            self.visit_type_spec(file, &spec);
        }
        for func in tree.func_decls() {
            self.visit_func(file, func)?;
        }
        Ok(())
    }

    fn visit_type_spec(&mut self, file: &GoFile, spec: &TypeSpec) {
        let Some(name) = spec.name() else {
            return;
        };
        let comments = [spec.trailing_comment(), spec.leading_comment()];
        for comment in comments.into_iter().flatten() {
            let text = comment.text().trim_end();
            if !text.starts_with("//mimetype") {
                continue;
            }
            match parse_mimetype(text) {
                Some(mimetype) => {
                    self.mimetypes
                        .insert(format!("{}.{}", self.package, name.text()), mimetype.to_string());
                    return;
                }
                None => tracing::debug!(
                    "{}: ignoring malformed annotation {:?} on type {}",
                    file.location(comment.text_range()),
                    text,
                    name.text()
                ),
            }
        }
    }

    fn visit_func(&mut self, file: &GoFile, func: FuncDecl) -> Result<(), IndexError> {
        let Some(name) = func.name().map(|n| n.text()) else {
            return Ok(());
        };
        let receiver = match func.receiver() {
            Some(recv) => Some(receiver_of(file, &recv)?),
            None => None,
        };
        let params = func
            .params()
            .map(|list| {
                list.groups()
                    .into_iter()
                    .map(|group| {
                        let (type_text, variadic) = match &group.ty {
                            TypeExpr::Variadic(v) => {
                                (v.elem().map(|t| t.text()).unwrap_or_default(), true)
                            }
                            ty => (ty.text(), false),
                        };
                        ParamSpec {
                            names: group.names,
                            type_text,
                            variadic,
                            ty: group.ty,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let decl = Declaration {
            name: name.clone(),
            receiver,
            params,
            file: file.id,
            node: func,
        };
        match &decl.receiver {
            Some(recv) => {
                let key = recv.key(&self.package);
                self.methods.entry(key).or_default().insert(name, decl);
            }
            None => {
                self.functions.insert(name, decl);
            }
        }
        Ok(())
    }

    fn finish(self) -> DeclIndex {
        DeclIndex {
            package: self.package,
            methods: self.methods,
            functions: self.functions,
            mimetypes: self.mimetypes,
        }
    }
}

/// Extracts the receiver: exactly one, named at most once, of type `T` or `*T`.
fn receiver_of(file: &GoFile, recv: &crate::parser::Receiver) -> Result<Receiver, IndexError> {
    let range = recv.syntax().text_range();
    let groups = recv.groups();
    let count: usize = groups.iter().map(|g| g.arity()).sum();
    let [group] = groups.as_slice() else {
        return Err(IndexError::ReceiverCount {
            location: file.location(range),
            count,
        });
    };
    if count != 1 {
        return Err(IndexError::ReceiverCount {
            location: file.location(range),
            count,
        });
    }

    let shape_err = || IndexError::ReceiverShape {
        location: file.location(group.ty.syntax().text_range()),
        text: group.ty.text(),
    };
    let (base, pointer) = match &group.ty {
        TypeExpr::Name(name) => (name.simple_name().ok_or_else(shape_err)?, false),
        TypeExpr::Pointer(ptr) => match ptr.elem() {
            Some(TypeExpr::Name(name)) => (name.simple_name().ok_or_else(shape_err)?, true),
            _ => return Err(shape_err()),
        },
        _ => return Err(shape_err()),
    };

    Ok(Receiver {
        name: group.names.first().cloned(),
        base,
        pointer,
        range,
    })
}

/// The token of a well-formed `//mimetype <token>` comment.
pub fn parse_mimetype(comment: &str) -> Option<&str> {
    let value = comment.strip_prefix(MIMETYPE_MARKER)?;
    (!value.is_empty() && !value.contains(char::is_whitespace)).then_some(value)
}
