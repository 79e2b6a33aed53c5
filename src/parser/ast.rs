//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for Go syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! [`TypeExpr`] also renders the canonical source text of a type, the
//! spelling `go/format` would print.

use std::fmt;

use smol_str::SmolStr;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens().filter_map(|e| e.into_token())
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    tokens(node).any(|t| t.kind() == kind)
}

fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.children().find_map(N::cast)
}

fn children<N: AstNode>(node: &SyntaxNode) -> Vec<N> {
    node.children().filter_map(N::cast).collect()
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    /// Wrap the root of a parse tree.
    pub(crate) fn from_root(node: SyntaxNode) -> Self {
        debug_assert_eq!(node.kind(), SyntaxKind::SOURCE_FILE);
        Self(node)
    }

    pub fn package_clause(&self) -> Option<PackageClause> {
        child(&self.0)
    }

    pub fn package_name(&self) -> Option<SmolStr> {
        self.package_clause()?.name().map(|n| n.text())
    }

    pub fn import_specs(&self) -> impl Iterator<Item = ImportSpec> + '_ {
        self.0
            .children()
            .filter_map(ImportDecl::cast)
            .flat_map(|decl| decl.specs())
    }

    pub fn type_decls(&self) -> impl Iterator<Item = TypeDecl> + '_ {
        self.0.children().filter_map(TypeDecl::cast)
    }

    pub fn type_specs(&self) -> impl Iterator<Item = TypeSpec> + '_ {
        self.type_decls().flat_map(|decl| decl.specs())
    }

    pub fn func_decls(&self) -> impl Iterator<Item = FuncDecl> + '_ {
        self.0.children().filter_map(FuncDecl::cast)
    }

    /// Specs of both `var` and `const` declarations.
    pub fn value_specs(&self) -> impl Iterator<Item = ValueSpec> + '_ {
        self.0
            .children()
            .filter(|n| matches!(n.kind(), SyntaxKind::VAR_DECL | SyntaxKind::CONST_DECL))
            .flat_map(|decl| children::<ValueSpec>(&decl))
    }
}

// ============================================================================
// Names
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::IDENT)
    }

    pub fn text(&self) -> SmolStr {
        self.ident()
            .map(|t| SmolStr::new(t.text()))
            .unwrap_or_default()
    }
}

ast_node!(PackageClause, PACKAGE_CLAUSE);

impl PackageClause {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }
}

// ============================================================================
// Imports
// ============================================================================

ast_node!(ImportDecl, IMPORT_DECL);

impl ImportDecl {
    pub fn specs(&self) -> Vec<ImportSpec> {
        children(&self.0)
    }
}

/// How an import is bound in the file scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportName {
    /// `import name "path"`
    Named(SmolStr),
    /// `import . "path"`
    Dot,
    /// `import _ "path"`
    Blank,
}

ast_node!(ImportSpec, IMPORT_SPEC);

impl ImportSpec {
    /// The explicit local name, if the import has one.
    pub fn local_name(&self) -> Option<ImportName> {
        if let Some(name) = child::<Name>(&self.0) {
            let text = name.text();
            return Some(if text == "_" {
                ImportName::Blank
            } else {
                ImportName::Named(text)
            });
        }
        has_token(&self.0, SyntaxKind::DOT).then_some(ImportName::Dot)
    }

    pub fn path_token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| matches!(t.kind(), SyntaxKind::STRING | SyntaxKind::RAW_STRING))
    }

    /// The import path without quotes.
    pub fn path(&self) -> Option<String> {
        let token = self.path_token()?;
        let text = token.text();
        Some(text[1..text.len().saturating_sub(1).max(1)].to_string())
    }
}

// ============================================================================
// Type declarations
// ============================================================================

ast_node!(TypeDecl, TYPE_DECL);

impl TypeDecl {
    /// `type ( ... )`
    pub fn is_grouped(&self) -> bool {
        has_token(&self.0, SyntaxKind::L_PAREN)
    }

    pub fn specs(&self) -> Vec<TypeSpec> {
        children(&self.0)
    }
}

ast_node!(TypeSpec, TYPE_SPEC);

impl TypeSpec {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        child(&self.0)
    }

    /// `type A = B`
    pub fn is_alias(&self) -> bool {
        has_token(&self.0, SyntaxKind::EQ)
    }

    pub fn ty(&self) -> Option<TypeExpr> {
        child(&self.0)
    }

    fn decl(&self) -> Option<TypeDecl> {
        self.0.parent().and_then(TypeDecl::cast)
    }

    /// The line comment on the same line, right after the spec.
    pub fn trailing_comment(&self) -> Option<SyntaxToken> {
        let mut token = self.0.last_token()?.next_token();
        while let Some(t) = token {
            match t.kind() {
                SyntaxKind::WHITESPACE | SyntaxKind::BLOCK_COMMENT if !t.text().contains('\n') => {
                    token = t.next_token()
                }
                SyntaxKind::LINE_COMMENT => return Some(t),
                _ => return None,
            }
        }
        None
    }

    /// The line comment on its own line directly above the type spec (or above
    /// the `type` keyword of an ungrouped declaration).
    pub fn leading_comment(&self) -> Option<SyntaxToken> {
        let anchor = match self.decl() {
            Some(decl) if !decl.is_grouped() => decl.syntax().first_token()?,
            _ => self.0.first_token()?,
        };
        let mut token = anchor.prev_token();
        while let Some(t) = token {
            match t.kind() {
                SyntaxKind::WHITESPACE if t.text().matches('\n').count() <= 1 => {
                    token = t.prev_token()
                }
                SyntaxKind::LINE_COMMENT => {
                    let own_line = match t.prev_token() {
                        None => true,
                        Some(prev) => {
                            prev.kind() == SyntaxKind::WHITESPACE
                                && (prev.text().contains('\n') || prev.prev_token().is_none())
                        }
                    };
                    return own_line.then_some(t);
                }
                _ => return None,
            }
        }
        None
    }
}

ast_node!(TypeParamList, TYPE_PARAM_LIST);

impl TypeParamList {
    pub fn params(&self) -> Vec<TypeParam> {
        children(&self.0)
    }

    /// All declared parameter names, in order.
    pub fn names(&self) -> Vec<SmolStr> {
        self.params()
            .iter()
            .flat_map(|p| p.names())
            .map(|n| n.text())
            .collect()
    }
}

ast_node!(TypeParam, TYPE_PARAM);

impl TypeParam {
    pub fn names(&self) -> Vec<Name> {
        children(&self.0)
    }

    pub fn constraint(&self) -> Option<TypeElem> {
        child(&self.0)
    }
}

// ============================================================================
// Value declarations
// ============================================================================

ast_node!(ValueSpec, VALUE_SPEC);

impl ValueSpec {
    pub fn names(&self) -> Vec<Name> {
        children(&self.0)
    }

    /// The declared type of `var x T = ...`; `None` when it is inferred.
    pub fn ty(&self) -> Option<TypeExpr> {
        child(&self.0)
    }
}

// ============================================================================
// Functions
// ============================================================================

ast_node!(FuncDecl, FUNC_DECL);

impl FuncDecl {
    pub fn receiver(&self) -> Option<Receiver> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        child(&self.0)
    }

    pub fn params(&self) -> Option<ParamList> {
        child(&self.0)
    }

    pub fn result(&self) -> Option<FuncResult> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

ast_node!(Block, BLOCK);

/// Parameters sharing one declared type, e.g. `a, b int`.
///
/// `names` is empty for unnamed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamGroup {
    pub names: Vec<SmolStr>,
    pub ty: TypeExpr,
}

impl ParamGroup {
    /// Number of parameters this group declares.
    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }
}

impl fmt::Display for ParamGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.names.is_empty() {
            write!(f, "{} ", self.names.join(", "))?;
        }
        write!(f, "{}", self.ty)
    }
}

/// Apply Go's grouping rule to the PARAM entries of a list.
///
/// If any entry carries a name, bare identifiers before it are names that
/// share its type. Otherwise every entry is an unnamed parameter.
fn param_groups(node: &SyntaxNode) -> Vec<ParamGroup> {
    let params: Vec<Param> = children(node);
    if params.iter().all(|p| p.name().is_none()) {
        return params
            .iter()
            .filter_map(Param::ty)
            .map(|ty| ParamGroup { names: Vec::new(), ty })
            .collect();
    }

    let mut groups = Vec::new();
    let mut pending = Vec::new();
    for param in params {
        match param.name() {
            None => {
                if let Some(ident) = param.ty().and_then(|ty| match ty {
                    TypeExpr::Name(name) => name.simple_name(),
                    _ => None,
                }) {
                    pending.push(ident);
                }
            }
            Some(name) => {
                pending.push(name.text());
                if let Some(ty) = param.ty() {
                    groups.push(ParamGroup {
                        names: std::mem::take(&mut pending),
                        ty,
                    });
                }
            }
        }
    }
    groups
}

fn groups_text(groups: &[ParamGroup]) -> String {
    groups
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

ast_node!(Receiver, RECEIVER);

impl Receiver {
    pub fn params(&self) -> Vec<Param> {
        children(&self.0)
    }

    pub fn groups(&self) -> Vec<ParamGroup> {
        param_groups(&self.0)
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    pub fn params(&self) -> Vec<Param> {
        children(&self.0)
    }

    pub fn groups(&self) -> Vec<ParamGroup> {
        param_groups(&self.0)
    }
}

impl fmt::Display for ParamList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", groups_text(&self.groups()))
    }
}

ast_node!(Param, PARAM);

impl Param {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn ty(&self) -> Option<TypeExpr> {
        child(&self.0)
    }
}

ast_node!(FuncResult, RESULT);

impl FuncResult {
    pub fn param_list(&self) -> Option<ParamList> {
        child(&self.0)
    }

    pub fn ty(&self) -> Option<TypeExpr> {
        child(&self.0)
    }

    /// Result groups; a bare result type is one unnamed group.
    pub fn groups(&self) -> Vec<ParamGroup> {
        match (self.param_list(), self.ty()) {
            (Some(list), _) => list.groups(),
            (None, Some(ty)) => vec![ParamGroup {
                names: Vec::new(),
                ty,
            }],
            (None, None) => Vec::new(),
        }
    }
}

impl fmt::Display for FuncResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.param_list(), self.ty()) {
            (Some(list), _) => write!(f, "{}", list),
            (None, Some(ty)) => write!(f, "{}", ty),
            (None, None) => Ok(()),
        }
    }
}

fn signature_text(
    f: &mut fmt::Formatter<'_>,
    params: Option<ParamList>,
    result: Option<FuncResult>,
) -> fmt::Result {
    match params {
        Some(params) => write!(f, "{}", params)?,
        None => write!(f, "()")?,
    }
    if let Some(result) = result {
        write!(f, " {}", result)?;
    }
    Ok(())
}

// ============================================================================
// Types
// ============================================================================

/// Any type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    Name(TypeName),
    Pointer(PointerType),
    Slice(SliceType),
    Array(ArrayType),
    Map(MapType),
    Chan(ChanType),
    Func(FuncType),
    Struct(StructType),
    Interface(InterfaceType),
    Paren(ParenType),
    Variadic(VariadicType),
}

impl AstNode for TypeExpr {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::TYPE_NAME
                | SyntaxKind::POINTER_TYPE
                | SyntaxKind::SLICE_TYPE
                | SyntaxKind::ARRAY_TYPE
                | SyntaxKind::MAP_TYPE
                | SyntaxKind::CHAN_TYPE
                | SyntaxKind::FUNC_TYPE
                | SyntaxKind::STRUCT_TYPE
                | SyntaxKind::INTERFACE_TYPE
                | SyntaxKind::PAREN_TYPE
                | SyntaxKind::VARIADIC_TYPE
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::TYPE_NAME => Some(Self::Name(TypeName(node))),
            SyntaxKind::POINTER_TYPE => Some(Self::Pointer(PointerType(node))),
            SyntaxKind::SLICE_TYPE => Some(Self::Slice(SliceType(node))),
            SyntaxKind::ARRAY_TYPE => Some(Self::Array(ArrayType(node))),
            SyntaxKind::MAP_TYPE => Some(Self::Map(MapType(node))),
            SyntaxKind::CHAN_TYPE => Some(Self::Chan(ChanType(node))),
            SyntaxKind::FUNC_TYPE => Some(Self::Func(FuncType(node))),
            SyntaxKind::STRUCT_TYPE => Some(Self::Struct(StructType(node))),
            SyntaxKind::INTERFACE_TYPE => Some(Self::Interface(InterfaceType(node))),
            SyntaxKind::PAREN_TYPE => Some(Self::Paren(ParenType(node))),
            SyntaxKind::VARIADIC_TYPE => Some(Self::Variadic(VariadicType(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Name(n) => n.syntax(),
            Self::Pointer(n) => n.syntax(),
            Self::Slice(n) => n.syntax(),
            Self::Array(n) => n.syntax(),
            Self::Map(n) => n.syntax(),
            Self::Chan(n) => n.syntax(),
            Self::Func(n) => n.syntax(),
            Self::Struct(n) => n.syntax(),
            Self::Interface(n) => n.syntax(),
            Self::Paren(n) => n.syntax(),
            Self::Variadic(n) => n.syntax(),
        }
    }
}

impl TypeExpr {
    /// Canonical source text of this type.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn elem(f: &mut fmt::Formatter<'_>, ty: Option<TypeExpr>) -> fmt::Result {
            match ty {
                Some(ty) => write!(f, "{}", ty),
                None => Ok(()),
            }
        }

        match self {
            Self::Name(name) => {
                if let Some(qualifier) = name.qualifier() {
                    write!(f, "{}.", qualifier)?;
                }
                write!(f, "{}", name.name().unwrap_or_default())?;
                let args = name.type_args();
                if !args.is_empty() {
                    let args: Vec<_> = args.iter().map(ToString::to_string).collect();
                    write!(f, "[{}]", args.join(", "))?;
                }
                Ok(())
            }
            Self::Pointer(ptr) => {
                write!(f, "*")?;
                elem(f, ptr.elem())
            }
            Self::Slice(slice) => {
                write!(f, "[]")?;
                elem(f, slice.elem())
            }
            Self::Array(array) => {
                write!(f, "[{}]", array.len_text())?;
                elem(f, array.elem())
            }
            Self::Map(map) => {
                write!(f, "map[")?;
                elem(f, map.key())?;
                write!(f, "]")?;
                elem(f, map.value())
            }
            Self::Chan(chan) => {
                match chan.dir() {
                    ChanDir::Both => write!(f, "chan ")?,
                    ChanDir::Send => write!(f, "chan<- ")?,
                    ChanDir::Recv => write!(f, "<-chan ")?,
                }
                elem(f, chan.elem())
            }
            Self::Func(func) => {
                write!(f, "func")?;
                signature_text(f, func.params(), func.result())
            }
            Self::Struct(st) => {
                let fields: Vec<_> = st.fields().iter().map(ToString::to_string).collect();
                write!(f, "struct{{{}}}", fields.join("; "))
            }
            Self::Interface(iface) => {
                let elems: Vec<_> = iface.elems().iter().map(ToString::to_string).collect();
                write!(f, "interface{{{}}}", elems.join("; "))
            }
            Self::Paren(paren) => {
                write!(f, "(")?;
                elem(f, paren.inner())?;
                write!(f, ")")
            }
            Self::Variadic(variadic) => {
                write!(f, "...")?;
                elem(f, variadic.elem())
            }
        }
    }
}

ast_node!(TypeName, TYPE_NAME);

impl TypeName {
    fn idents(&self) -> Vec<SyntaxToken> {
        tokens(&self.0)
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .collect()
    }

    /// The package qualifier of `pkg.Name`.
    pub fn qualifier(&self) -> Option<SmolStr> {
        let idents = self.idents();
        (idents.len() == 2).then(|| SmolStr::new(idents[0].text()))
    }

    pub fn ident(&self) -> Option<SyntaxToken> {
        self.idents().pop()
    }

    pub fn name(&self) -> Option<SmolStr> {
        self.ident().map(|t| SmolStr::new(t.text()))
    }

    /// The identifier, when this is an unqualified name without type arguments.
    pub fn simple_name(&self) -> Option<SmolStr> {
        if self.qualifier().is_some() || self.type_arg_list().is_some() {
            return None;
        }
        self.name()
    }

    pub fn type_arg_list(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::TYPE_ARG_LIST)
    }

    pub fn type_args(&self) -> Vec<TypeExpr> {
        self.type_arg_list()
            .map(|list| children(&list))
            .unwrap_or_default()
    }
}

ast_node!(PointerType, POINTER_TYPE);

impl PointerType {
    pub fn elem(&self) -> Option<TypeExpr> {
        child(&self.0)
    }
}

ast_node!(SliceType, SLICE_TYPE);

impl SliceType {
    pub fn elem(&self) -> Option<TypeExpr> {
        child(&self.0)
    }
}

ast_node!(ArrayType, ARRAY_TYPE);

impl ArrayType {
    /// The length expression as written, without trivia.
    pub fn len_text(&self) -> String {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::ARRAY_LEN)
            .map(|len| {
                len.descendants_with_tokens()
                    .filter_map(|e| e.into_token())
                    .filter(|t| !t.kind().is_trivia())
                    .map(|t| t.text().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn elem(&self) -> Option<TypeExpr> {
        child(&self.0)
    }
}

ast_node!(MapType, MAP_TYPE);

impl MapType {
    pub fn key(&self) -> Option<TypeExpr> {
        self.0.children().filter_map(TypeExpr::cast).next()
    }

    pub fn value(&self) -> Option<TypeExpr> {
        self.0.children().filter_map(TypeExpr::cast).nth(1)
    }
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

ast_node!(ChanType, CHAN_TYPE);

impl ChanType {
    pub fn dir(&self) -> ChanDir {
        let kinds: Vec<_> = tokens(&self.0)
            .map(|t| t.kind())
            .filter(|k| !k.is_trivia())
            .collect();
        match kinds.as_slice() {
            [SyntaxKind::ARROW, ..] => ChanDir::Recv,
            [SyntaxKind::CHAN_KW, SyntaxKind::ARROW, ..] => ChanDir::Send,
            _ => ChanDir::Both,
        }
    }

    pub fn elem(&self) -> Option<TypeExpr> {
        child(&self.0)
    }
}

ast_node!(FuncType, FUNC_TYPE);

impl FuncType {
    pub fn params(&self) -> Option<ParamList> {
        child(&self.0)
    }

    pub fn result(&self) -> Option<FuncResult> {
        child(&self.0)
    }
}

ast_node!(StructType, STRUCT_TYPE);

impl StructType {
    pub fn fields(&self) -> Vec<Field> {
        children(&self.0)
    }
}

ast_node!(Field, FIELD);

impl Field {
    /// Declared names; empty for an embedded field.
    pub fn names(&self) -> Vec<Name> {
        children(&self.0)
    }

    pub fn ty(&self) -> Option<TypeExpr> {
        child(&self.0)
    }

    pub fn tag(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::FIELD_TAG)
            .map(|tag| tag.text().to_string().trim().to_string())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.names().iter().map(Name::text).collect();
        if !names.is_empty() {
            write!(f, "{} ", names.join(", "))?;
        }
        if let Some(ty) = self.ty() {
            write!(f, "{}", ty)?;
        }
        if let Some(tag) = self.tag() {
            write!(f, " {}", tag)?;
        }
        Ok(())
    }
}

ast_node!(InterfaceType, INTERFACE_TYPE);

/// A method or an embedded type element of an interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InterfaceElem {
    Method(MethodElem),
    Type(TypeElem),
}

impl InterfaceType {
    pub fn elems(&self) -> Vec<InterfaceElem> {
        self.0
            .children()
            .filter_map(|n| match n.kind() {
                SyntaxKind::METHOD_ELEM => Some(InterfaceElem::Method(MethodElem(n))),
                SyntaxKind::TYPE_ELEM => Some(InterfaceElem::Type(TypeElem(n))),
                _ => None,
            })
            .collect()
    }

    /// `interface{}`
    pub fn is_empty(&self) -> bool {
        self.elems().is_empty()
    }
}

impl fmt::Display for InterfaceElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method(method) => {
                write!(f, "{}", method.name().map(|n| n.text()).unwrap_or_default())?;
                signature_text(f, method.params(), method.result())
            }
            Self::Type(elem) => write!(f, "{}", elem),
        }
    }
}

ast_node!(MethodElem, METHOD_ELEM);

impl MethodElem {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn params(&self) -> Option<ParamList> {
        child(&self.0)
    }

    pub fn result(&self) -> Option<FuncResult> {
        child(&self.0)
    }
}

ast_node!(TypeElem, TYPE_ELEM);

impl TypeElem {
    pub fn terms(&self) -> Vec<TypeTerm> {
        children(&self.0)
    }
}

impl fmt::Display for TypeElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<_> = self
            .terms()
            .iter()
            .map(|term| {
                let tilde = if term.has_tilde() { "~" } else { "" };
                let ty = term.ty().map(|t| t.text()).unwrap_or_default();
                format!("{}{}", tilde, ty)
            })
            .collect();
        write!(f, "{}", terms.join(" | "))
    }
}

ast_node!(TypeTerm, TYPE_TERM);

impl TypeTerm {
    pub fn has_tilde(&self) -> bool {
        has_token(&self.0, SyntaxKind::TILDE)
    }

    pub fn ty(&self) -> Option<TypeExpr> {
        child(&self.0)
    }
}

ast_node!(ParenType, PAREN_TYPE);

impl ParenType {
    pub fn inner(&self) -> Option<TypeExpr> {
        child(&self.0)
    }
}

ast_node!(VariadicType, VARIADIC_TYPE);

impl VariadicType {
    pub fn elem(&self) -> Option<TypeExpr> {
        child(&self.0)
    }
}
