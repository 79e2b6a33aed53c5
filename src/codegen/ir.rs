//! Wrapper IR.
//!
//! The synthesizer produces this tree; [`super::emit`] is the only code that
//! turns it into Go text.

use smol_str::SmolStr;

/// Imports every generated file starts with.
pub const PREAMBLE_IMPORTS: [&str; 3] = ["io", "net/http", "encoding/json"];

/// A complete generated Go file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub package: SmolStr,
    pub imports: Vec<SmolStr>,
    pub wrappers: Vec<Wrapper>,
}

impl GeneratedFile {
    pub fn new(package: impl Into<SmolStr>) -> Self {
        Self {
            package: package.into(),
            imports: PREAMBLE_IMPORTS.iter().map(|p| SmolStr::new(p)).collect(),
            wrappers: Vec::new(),
        }
    }
}

/// One `net/http` handler method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapper {
    pub receiver_name: SmolStr,
    /// Receiver type without package qualifier, e.g. `*H`.
    pub receiver_type: String,
    /// `Handle<Target>`
    pub name: String,
    /// Method being wrapped.
    pub target: SmolStr,
    pub content_type: SmolStr,
    /// Decode the JSON request body into `parsed`.
    pub decode_body: bool,
    pub args: Vec<Argument>,
    /// Write the first result as the response body.
    pub write_body: bool,
}

impl Wrapper {
    pub fn fields(&self) -> impl Iterator<Item = &Argument> {
        self.args
            .iter()
            .filter(|arg| matches!(arg, Argument::Field { .. }))
    }
}

/// How one argument of the wrapped call is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// The wrapper's `req`.
    Request,
    /// The wrapper's `res`.
    Response,
    /// `parsed["key"]`, asserted to `assert_type` unless it is `None`.
    Field {
        key: SmolStr,
        assert_type: Option<String>,
        /// Spread with `...` into a variadic parameter.
        variadic: bool,
    },
}
