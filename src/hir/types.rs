//! Resolved type model.
//!
//! Types are structural values. Defined types are referenced by package
//! path and name only, so recursive declarations need no cycles in the
//! value graph; their underlying types live in the resolver's type table.
//!
//! `Display` follows the `go/types` textual form with full package paths:
//! `main.Msg`, `*main.H`, `net/http.Request`, `map[string]int`,
//! `func(a int) (string, error)`.

use std::fmt;

use smol_str::SmolStr;

use crate::parser::ChanDir;

/// Predeclared basic types of the universe scope.
pub const BASIC_TYPES: &[&str] = &[
    "bool",
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "float32",
    "float64",
    "complex64",
    "complex128",
    "byte",
    "rune",
];

/// A resolved Go type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Predeclared basic type, by name.
    Basic(SmolStr),
    /// A defined type. `path` is empty for universe types such as `error`.
    Named {
        path: SmolStr,
        name: SmolStr,
        args: Vec<Type>,
    },
    TypeParam(SmolStr),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    /// Array length is kept as written.
    Array {
        len: String,
        elem: Box<Type>,
    },
    Map {
        key: Box<Type>,
        value: Box<Type>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<Type>,
    },
    Func(Box<Signature>),
    Struct(Vec<Field>),
    Interface(Vec<InterfaceMember>),
}

impl Type {
    pub fn basic(name: &str) -> Self {
        Type::Basic(SmolStr::new(name))
    }

    pub fn named(path: &str, name: &str) -> Self {
        Type::Named {
            path: SmolStr::new(path),
            name: SmolStr::new(name),
            args: Vec::new(),
        }
    }

    pub fn pointer(elem: Type) -> Self {
        Type::Pointer(Box::new(elem))
    }

    pub fn slice(elem: Type) -> Self {
        Type::Slice(Box::new(elem))
    }

    pub fn empty_interface() -> Self {
        Type::Interface(Vec::new())
    }

    /// True for exactly the predeclared basic type `name`.
    pub fn is_basic(&self, name: &str) -> bool {
        matches!(self, Type::Basic(n) if n == name)
    }

    /// True for the defined type `path.name`, uninstantiated.
    pub fn is_named(&self, path: &str, name: &str) -> bool {
        matches!(
            self,
            Type::Named { path: p, name: n, args } if p == path && n == name && args.is_empty()
        )
    }

    /// `interface{}` and `any`.
    pub fn is_empty_interface(&self) -> bool {
        matches!(self, Type::Interface(members) if members.is_empty())
    }

    /// The pointee of a pointer type.
    pub fn pointee(&self) -> Option<&Type> {
        match self {
            Type::Pointer(elem) => Some(elem),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic(name) | Type::TypeParam(name) => write!(f, "{}", name),
            Type::Named { path, name, args } => {
                if !path.is_empty() {
                    write!(f, "{}.", path)?;
                }
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "[{}]", join(args, ", "))?;
                }
                Ok(())
            }
            Type::Pointer(elem) => write!(f, "*{}", elem),
            Type::Slice(elem) => write!(f, "[]{}", elem),
            Type::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            Type::Map { key, value } => write!(f, "map[{}]{}", key, value),
            Type::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {}", elem),
                ChanDir::Send => write!(f, "chan<- {}", elem),
                ChanDir::Recv => write!(f, "<-chan {}", elem),
            },
            Type::Func(sig) => write!(f, "func{}", sig),
            Type::Struct(fields) => write!(f, "struct{{{}}}", join(fields, "; ")),
            Type::Interface(members) => write!(f, "interface{{{}}}", join(members, "; ")),
        }
    }
}

fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

/// A struct field. `name` is `None` for embedded fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: Option<SmolStr>,
    pub ty: Type,
    pub tag: Option<String>,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{} ", name)?;
        }
        write!(f, "{}", self.ty)?;
        if let Some(tag) = &self.tag {
            write!(f, " {}", tag)?;
        }
        Ok(())
    }
}

/// A term of a union constraint, `~T` or `T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    pub tilde: bool,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InterfaceMember {
    Method { name: SmolStr, signature: Signature },
    Union(Vec<Term>),
}

impl fmt::Display for InterfaceMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceMember::Method { name, signature } => write!(f, "{}{}", name, signature),
            InterfaceMember::Union(terms) => {
                let terms: Vec<_> = terms
                    .iter()
                    .map(|t| format!("{}{}", if t.tilde { "~" } else { "" }, t.ty))
                    .collect();
                write!(f, "{}", terms.join(" | "))
            }
        }
    }
}

/// A parameter, result or receiver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Var {
    pub name: Option<SmolStr>,
    pub ty: Type,
}

impl Var {
    pub fn new(name: Option<SmolStr>, ty: Type) -> Self {
        Self { name, ty }
    }
}

/// A resolved function signature.
///
/// `params` has one entry per declared name (or per unnamed parameter).
/// When `variadic` is set the last parameter's type is the slice `[]T`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    pub recv: Option<Var>,
    pub params: Vec<Var>,
    pub results: Vec<Var>,
    pub variadic: bool,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.params.len().saturating_sub(1);
        let params: Vec<_> = self
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let ty = match (&p.ty, self.variadic && i == last) {
                    (Type::Slice(elem), true) => format!("...{}", elem),
                    (ty, _) => ty.to_string(),
                };
                match &p.name {
                    Some(name) => format!("{} {}", name, ty),
                    None => ty,
                }
            })
            .collect();
        write!(f, "({})", params.join(", "))?;

        match self.results.as_slice() {
            [] => Ok(()),
            [single] if single.name.is_none() => write!(f, " {}", single.ty),
            results => {
                let results: Vec<_> = results
                    .iter()
                    .map(|r| match &r.name {
                        Some(name) => format!("{} {}", name, r.ty),
                        None => r.ty.to_string(),
                    })
                    .collect();
                write!(f, " ({})", results.join(", "))
            }
        }
    }
}
