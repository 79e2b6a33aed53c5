//! Signature Resolver.
//!
//! Type-checks the package-level declarations of a [`Module`] (function
//! bodies are not looked at) and attaches a resolved [`Signature`] to every
//! declaration of the [`DeclIndex`].
//!
//! ## Scopes
//!
//! Identifiers in type expressions are looked up in order:
//!
//! 1. type parameters of the enclosing declaration
//! 2. package scope (types, functions, variables, constants of all files)
//! 3. file scope (import names, dot-imported members)
//! 4. universe (`int`, `string`, `error`, `any`, ...)
//!
//! Any failure is fatal; there is no partial result.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use thiserror::Error;

use super::importer::{ImportError, Importer, MemberKind, PackageExports};
use super::index::{DeclIndex, Declaration, Receiver};
use super::types::{BASIC_TYPES, Field, InterfaceMember, Signature, Term, Type, Var};
use crate::base::{FileId, TextRange, is_exported};
use crate::parser::{
    AstNode, FuncDecl, FuncResult, ImportName, InterfaceElem, ParamGroup, ParamList, TypeElem,
    TypeExpr, TypeName, TypeParamList, TypeSpec,
};
use crate::project::Module;

/// Semantic errors. Each carries a `path:line:col` location.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{location}: could not import {path}: {source}")]
    Import {
        location: String,
        path: String,
        #[source]
        source: ImportError,
    },

    #[error("{location}: undefined: {name}")]
    Undefined { location: String, name: String },

    #[error("{location}: {name} is not a type")]
    NotAType { location: String, name: String },

    #[error("{location}: name {name} not exported by package {package}")]
    Unexported {
        location: String,
        name: String,
        package: String,
    },

    #[error("{location}: {name} redeclared in this block")]
    Redeclared { location: String, name: String },

    #[error("{location}: invalid receiver type {name}: {reason}")]
    InvalidReceiver {
        location: String,
        name: String,
        reason: String,
    },

    #[error("{location}: invalid recursive type {name}")]
    RecursiveType { location: String, name: String },

    #[error("{location}: {message}")]
    Invalid { location: String, message: String },
}

/// A declaration from the index together with its resolved signature.
#[derive(Debug, Clone)]
pub struct ResolvedDecl<'a> {
    pub decl: &'a Declaration,
    pub signature: Signature,
}

/// Resolves every declaration of `index`, in index order.
pub fn resolve<'a>(
    module: &Module,
    index: &'a DeclIndex,
    importer: &dyn Importer,
) -> Result<Vec<ResolvedDecl<'a>>, ResolveError> {
    let mut resolver = Resolver::new(module, importer)?;
    resolver.check_type_decls()?;
    resolver.check_value_decls()?;

    let resolved = index
        .declarations()
        .map(|decl| {
            let signature = resolver.signature(decl)?;
            tracing::trace!("{}: {}", decl, Type::Func(Box::new(signature.clone())));
            Ok(ResolvedDecl { decl, signature })
        })
        .collect::<Result<Vec<_>, ResolveError>>()?;

    tracing::debug!(
        "Resolved {} declaration(s) in package {}",
        resolved.len(),
        module.name
    );
    Ok(resolved)
}

/// A package-level object.
enum Object {
    Type(TypeObject),
    Func,
    Value,
}

struct TypeObject {
    file: FileId,
    spec: TypeSpec,
    alias: bool,
    params: Vec<SmolStr>,
}

enum Binding<'i> {
    Package(&'i PackageExports),
    Member(&'i PackageExports, MemberKind),
    /// An import without export data; an error only once a checked type
    /// refers to it.
    Missing(ImportError),
}

#[derive(Default)]
struct FileScope<'i> {
    names: FxHashMap<SmolStr, Binding<'i>>,
    /// Dot imports without export data, in import order.
    missing_dot: Vec<ImportError>,
}

/// Lookup context for one type expression.
#[derive(Debug, Clone)]
struct Ctx {
    file: FileId,
    type_params: Vec<SmolStr>,
    /// Aliases being expanded, outermost first.
    aliases: Vec<SmolStr>,
}

impl Ctx {
    fn new(file: FileId, type_params: Vec<SmolStr>) -> Self {
        Self {
            file,
            type_params,
            aliases: Vec::new(),
        }
    }
}

struct Resolver<'m> {
    module: &'m Module,
    package: SmolStr,
    objects: IndexMap<SmolStr, Object>,
    files: Vec<FileScope<'m>>,
    /// Right-hand sides of defined (non-alias) types.
    underlying: IndexMap<SmolStr, Type>,
}

type Result<T, E = ResolveError> = std::result::Result<T, E>;

impl<'m> Resolver<'m> {
    fn new(module: &'m Module, importer: &'m dyn Importer) -> Result<Self> {
        let mut resolver = Self {
            module,
            package: module.name.clone(),
            objects: IndexMap::new(),
            files: Vec::new(),
            underlying: IndexMap::new(),
        };
        resolver.collect_objects()?;
        resolver.collect_imports(importer)?;
        Ok(resolver)
    }

    fn location(&self, file: FileId, range: TextRange) -> String {
        self.module.file(file).location(range)
    }

    // =========================================================================
    // Scopes
    // =========================================================================

    fn declare(&mut self, name: SmolStr, object: Object, file: FileId, range: TextRange) -> Result<()> {
        if name == "_" {
            return Ok(());
        }
        if self.objects.contains_key(&name) {
            return Err(ResolveError::Redeclared {
                location: self.location(file, range),
                name: name.to_string(),
            });
        }
        self.objects.insert(name, object);
        Ok(())
    }

    fn collect_objects(&mut self) -> Result<()> {
        let module = self.module;
        let mut methods: FxHashSet<(SmolStr, SmolStr)> = FxHashSet::default();

        for file in module.files() {
            let tree = file.tree();
            for spec in tree.type_specs() {
                let Some(name) = spec.name() else { continue };
                let params = spec
                    .type_params()
                    .map(|list| list.names())
                    .unwrap_or_default();
                let object = TypeObject {
                    file: file.id,
                    alias: spec.is_alias(),
                    params,
                    spec,
                };
                self.declare(name.text(), Object::Type(object), file.id, name.syntax().text_range())?;
            }

            for func in tree.func_decls() {
                let Some(name) = func.name() else { continue };
                let range = name.syntax().text_range();
                match receiver_base(&func) {
                    Some(base) => {
                        if name.text() != "_" && !methods.insert((base.clone(), name.text())) {
                            return Err(ResolveError::Redeclared {
                                location: self.location(file.id, range),
                                name: format!("method {}.{}", base, name.text()),
                            });
                        }
                    }
                    None if name.text() == "init" => {}
                    None => self.declare(name.text(), Object::Func, file.id, range)?,
                }
            }

            for spec in tree.value_specs() {
                for name in spec.names() {
                    self.declare(name.text(), Object::Value, file.id, name.syntax().text_range())?;
                }
            }
        }
        Ok(())
    }

    fn collect_imports(&mut self, importer: &'m dyn Importer) -> Result<()> {
        let module = self.module;
        for file in module.files() {
            let mut scope = FileScope::default();
            for spec in file.tree().import_specs() {
                let range = spec.syntax().text_range();
                let path = spec.path().unwrap_or_default();
                let local_name = spec.local_name();

                let exports = match importer.import(&path) {
                    Ok(exports) => exports,
                    Err(source) => {
                        tracing::debug!("no export data for {}, resolving its uses lazily", path);
                        match local_name {
                            Some(ImportName::Blank) => {}
                            Some(ImportName::Dot) => scope.missing_dot.push(source),
                            Some(ImportName::Named(name)) => {
                                self.bind(&mut scope, file.id, range, name, Binding::Missing(source))?
                            }
                            None => {
                                let name = SmolStr::new(path.rsplit('/').next().unwrap_or(&path));
                                self.bind(&mut scope, file.id, range, name, Binding::Missing(source))?
                            }
                        }
                        continue;
                    }
                };

                let bindings = match local_name {
                    Some(ImportName::Blank) => Vec::new(),
                    Some(ImportName::Dot) => exports
                        .members()
                        .into_iter()
                        .map(|(name, kind)| (name, Binding::Member(exports, kind)))
                        .collect(),
                    Some(ImportName::Named(name)) => vec![(name, Binding::Package(exports))],
                    None => vec![(exports.name.clone(), Binding::Package(exports))],
                };
                for (name, binding) in bindings {
                    self.bind(&mut scope, file.id, range, name, binding)?;
                }
            }
            self.files.push(scope);
        }
        Ok(())
    }

    /// Adds a file-scope name; it must not clash with another import or a
    /// package-level object.
    fn bind(
        &self,
        scope: &mut FileScope<'m>,
        file: FileId,
        range: TextRange,
        name: SmolStr,
        binding: Binding<'m>,
    ) -> Result<()> {
        if scope.names.contains_key(&name) || self.objects.contains_key(&name) {
            return Err(ResolveError::Redeclared {
                location: self.location(file, range),
                name: name.to_string(),
            });
        }
        scope.names.insert(name, binding);
        Ok(())
    }

    // =========================================================================
    // Type declarations
    // =========================================================================

    /// Resolves every type declaration and rejects invalid recursion.
    fn check_type_decls(&mut self) -> Result<()> {
        let mut underlying = IndexMap::new();
        for (name, object) in &self.objects {
            let Object::Type(object) = object else { continue };
            let ctx = Ctx::new(object.file, object.params.clone());
            if let Some(list) = object.spec.type_params() {
                self.check_type_params(&list, &ctx)?;
            }
            if object.alias {
                self.alias_target(name, object, &ctx)?;
            } else {
                let rhs = self.required(object.spec.ty(), object.spec.syntax().text_range(), &ctx)?;
                underlying.insert(name.clone(), rhs);
            }
        }
        self.underlying = underlying;

        for (name, rhs) in &self.underlying {
            let mut visited = FxHashSet::default();
            if self.embeds(rhs, name, &mut visited) {
                let Some(Object::Type(object)) = self.objects.get(name) else {
                    continue;
                };
                let range = object
                    .spec
                    .name()
                    .map(|n| n.syntax().text_range())
                    .unwrap_or_else(|| object.spec.syntax().text_range());
                return Err(ResolveError::RecursiveType {
                    location: self.location(object.file, range),
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Resolves the declared types of package-level `var` and `const`
    /// specs. Initializers are not checked.
    fn check_value_decls(&self) -> Result<()> {
        for file in self.module.files() {
            let ctx = Ctx::new(file.id, Vec::new());
            for spec in file.tree().value_specs() {
                if let Some(ty) = spec.ty() {
                    self.resolve_type(&ty, &ctx)?;
                }
            }
        }
        Ok(())
    }

    fn check_type_params(&self, list: &TypeParamList, ctx: &Ctx) -> Result<()> {
        for param in list.params() {
            if let Some(constraint) = param.constraint() {
                self.resolve_union(&constraint, ctx)?;
            }
        }
        Ok(())
    }

    /// True when `ty` contains `target` without indirection.
    fn embeds(&self, ty: &Type, target: &str, visited: &mut FxHashSet<SmolStr>) -> bool {
        match ty {
            Type::Named { path, name, .. } if *path == self.package => {
                if name == target {
                    return true;
                }
                if !visited.insert(name.clone()) {
                    return false;
                }
                self.underlying
                    .get(name)
                    .is_some_and(|rhs| self.embeds(rhs, target, visited))
            }
            Type::Array { elem, .. } => self.embeds(elem, target, visited),
            Type::Struct(fields) => fields.iter().any(|f| self.embeds(&f.ty, target, visited)),
            _ => false,
        }
    }

    /// Follows local defined types down to a type literal.
    fn underlying_of(&self, name: &str) -> Option<&Type> {
        let mut current = self.underlying.get(name)?;
        for _ in 0..=self.underlying.len() {
            match current {
                Type::Named { path, name, .. } if *path == self.package => {
                    current = self.underlying.get(name)?;
                }
                _ => return Some(current),
            }
        }
        None
    }

    fn alias_target(&self, name: &SmolStr, object: &TypeObject, ctx: &Ctx) -> Result<Type> {
        if ctx.aliases.contains(name) {
            let range = object
                .spec
                .name()
                .map(|n| n.syntax().text_range())
                .unwrap_or_else(|| object.spec.syntax().text_range());
            return Err(ResolveError::RecursiveType {
                location: self.location(object.file, range),
                name: format!("alias {}", name),
            });
        }
        let mut aliases = ctx.aliases.clone();
        aliases.push(name.clone());
        let inner = Ctx {
            file: object.file,
            type_params: object.params.clone(),
            aliases,
        };
        self.required(object.spec.ty(), object.spec.syntax().text_range(), &inner)
    }

    // =========================================================================
    // Type expressions
    // =========================================================================

    fn required(&self, ty: Option<TypeExpr>, parent: TextRange, ctx: &Ctx) -> Result<Type> {
        match ty {
            Some(ty) => self.resolve_type(&ty, ctx),
            None => Err(ResolveError::Invalid {
                location: self.location(ctx.file, parent),
                message: "missing type".to_string(),
            }),
        }
    }

    fn resolve_type(&self, expr: &TypeExpr, ctx: &Ctx) -> Result<Type> {
        let range = expr.syntax().text_range();
        match expr {
            TypeExpr::Name(name) => self.resolve_type_name(name, ctx),
            TypeExpr::Pointer(ptr) => Ok(Type::pointer(self.required(ptr.elem(), range, ctx)?)),
            TypeExpr::Slice(slice) => Ok(Type::slice(self.required(slice.elem(), range, ctx)?)),
            TypeExpr::Array(array) => Ok(Type::Array {
                len: array.len_text(),
                elem: Box::new(self.required(array.elem(), range, ctx)?),
            }),
            TypeExpr::Map(map) => Ok(Type::Map {
                key: Box::new(self.required(map.key(), range, ctx)?),
                value: Box::new(self.required(map.value(), range, ctx)?),
            }),
            TypeExpr::Chan(chan) => Ok(Type::Chan {
                dir: chan.dir(),
                elem: Box::new(self.required(chan.elem(), range, ctx)?),
            }),
            TypeExpr::Func(func) => {
                let sig = self.signature_of(None, func.params(), func.result(), ctx)?;
                Ok(Type::Func(Box::new(sig)))
            }
            TypeExpr::Struct(st) => {
                let mut fields = Vec::new();
                let mut seen = FxHashSet::default();
                for field in st.fields() {
                    let field_range = field.syntax().text_range();
                    let ty = self.required(field.ty(), field_range, ctx)?;
                    let names = field.names();
                    if names.is_empty() {
                        fields.push(Field {
                            name: None,
                            ty,
                            tag: field.tag(),
                        });
                        continue;
                    }
                    for name in names {
                        let text = name.text();
                        if text != "_" && !seen.insert(text.clone()) {
                            return Err(ResolveError::Redeclared {
                                location: self.location(ctx.file, name.syntax().text_range()),
                                name: text.to_string(),
                            });
                        }
                        fields.push(Field {
                            name: Some(text),
                            ty: ty.clone(),
                            tag: field.tag(),
                        });
                    }
                }
                Ok(Type::Struct(fields))
            }
            TypeExpr::Interface(iface) => {
                let mut members = Vec::new();
                for elem in iface.elems() {
                    match elem {
                        InterfaceElem::Method(method) => {
                            let name = method.name().map(|n| n.text()).unwrap_or_default();
                            let signature =
                                self.signature_of(None, method.params(), method.result(), ctx)?;
                            members.push(InterfaceMember::Method { name, signature });
                        }
                        InterfaceElem::Type(elem) => {
                            members.push(InterfaceMember::Union(self.resolve_union(&elem, ctx)?));
                        }
                    }
                }
                Ok(Type::Interface(members))
            }
            TypeExpr::Paren(paren) => self.required(paren.inner(), range, ctx),
            TypeExpr::Variadic(_) => Err(ResolveError::Invalid {
                location: self.location(ctx.file, range),
                message: "invalid use of ...".to_string(),
            }),
        }
    }

    fn resolve_union(&self, elem: &TypeElem, ctx: &Ctx) -> Result<Vec<Term>> {
        elem.terms()
            .iter()
            .map(|term| {
                let ty = self.required(term.ty(), term.syntax().text_range(), ctx)?;
                Ok(Term {
                    tilde: term.has_tilde(),
                    ty,
                })
            })
            .collect()
    }

    fn resolve_type_name(&self, name: &TypeName, ctx: &Ctx) -> Result<Type> {
        let location = self.location(ctx.file, name.syntax().text_range());
        let ident = name.name().unwrap_or_default();
        let args = name
            .type_args()
            .iter()
            .map(|arg| self.resolve_type(arg, ctx))
            .collect::<Result<Vec<_>>>()?;

        if let Some(qualifier) = name.qualifier() {
            return self.resolve_qualified(&qualifier, &ident, args, ctx, location);
        }

        if ctx.type_params.contains(&ident) {
            if !args.is_empty() {
                return Err(not_generic(location, &ident));
            }
            return Ok(Type::TypeParam(ident));
        }

        match self.objects.get(&ident) {
            Some(Object::Type(object)) => return self.instantiate(&ident, object, args, ctx, location),
            Some(Object::Func | Object::Value) => {
                return Err(ResolveError::NotAType {
                    location,
                    name: ident.to_string(),
                });
            }
            None => {}
        }

        match self.files[ctx.file.index()].names.get(&ident) {
            Some(Binding::Package(_) | Binding::Missing(_)) => Err(ResolveError::Invalid {
                location,
                message: format!("use of package {} without selector", ident),
            }),
            Some(Binding::Member(exports, MemberKind::Type)) => Ok(Type::Named {
                path: exports.path.clone(),
                name: ident,
                args,
            }),
            Some(Binding::Member(_, MemberKind::Value)) => Err(ResolveError::NotAType {
                location,
                name: ident.to_string(),
            }),
            None => {
                let missing_dot = self.files[ctx.file.index()].missing_dot.first();
                universe(ident, args, location.clone()).map_err(|err| match (err, missing_dot) {
                    // The name may come from a dot import we know nothing about.
                    (ResolveError::Undefined { .. }, Some(source)) => ResolveError::Import {
                        location,
                        path: source.path.clone(),
                        source: source.clone(),
                    },
                    (err, _) => err,
                })
            }
        }
    }

    fn instantiate(
        &self,
        ident: &SmolStr,
        object: &TypeObject,
        args: Vec<Type>,
        ctx: &Ctx,
        location: String,
    ) -> Result<Type> {
        if object.alias {
            if !args.is_empty() {
                return Err(not_generic(location, ident));
            }
            return self.alias_target(ident, object, ctx);
        }
        if object.params.len() != args.len() {
            let message = if args.is_empty() {
                format!("cannot use generic type {} without instantiation", ident)
            } else if object.params.is_empty() {
                format!("{} is not a generic type", ident)
            } else {
                format!(
                    "wrong number of type arguments for {}: got {}, want {}",
                    ident,
                    args.len(),
                    object.params.len()
                )
            };
            return Err(ResolveError::Invalid { location, message });
        }
        Ok(Type::Named {
            path: self.package.clone(),
            name: ident.clone(),
            args,
        })
    }

    fn resolve_qualified(
        &self,
        qualifier: &SmolStr,
        ident: &SmolStr,
        args: Vec<Type>,
        ctx: &Ctx,
        location: String,
    ) -> Result<Type> {
        let full = format!("{}.{}", qualifier, ident);
        match self.files[ctx.file.index()].names.get(qualifier) {
            Some(Binding::Package(exports)) => {
                if !is_exported(ident) {
                    return Err(ResolveError::Unexported {
                        location,
                        name: ident.to_string(),
                        package: qualifier.to_string(),
                    });
                }
                match exports.member(ident) {
                    Some(MemberKind::Type) => Ok(Type::Named {
                        path: exports.path.clone(),
                        name: ident.clone(),
                        args,
                    }),
                    Some(MemberKind::Value) => Err(ResolveError::NotAType { location, name: full }),
                    None => Err(ResolveError::Undefined { location, name: full }),
                }
            }
            Some(Binding::Missing(source)) => Err(ResolveError::Import {
                location,
                path: source.path.clone(),
                source: source.clone(),
            }),
            Some(Binding::Member(..)) => Err(ResolveError::NotAType { location, name: full }),
            None if self.objects.contains_key(qualifier) || ctx.type_params.contains(qualifier) => {
                Err(ResolveError::NotAType { location, name: full })
            }
            None => Err(ResolveError::Undefined {
                location,
                name: qualifier.to_string(),
            }),
        }
    }

    // =========================================================================
    // Signatures
    // =========================================================================

    fn signature_of(
        &self,
        recv: Option<Var>,
        params: Option<ParamList>,
        result: Option<FuncResult>,
        ctx: &Ctx,
    ) -> Result<Signature> {
        let mut sig = Signature {
            recv,
            ..Signature::default()
        };

        if let Some(list) = params {
            let groups = list.groups();
            let last = groups.len().saturating_sub(1);
            for (i, group) in groups.iter().enumerate() {
                let ty = match &group.ty {
                    TypeExpr::Variadic(variadic) => {
                        if i != last || group.names.len() > 1 {
                            return Err(final_param_only(self.location(ctx.file, group.ty.syntax().text_range())));
                        }
                        sig.variadic = true;
                        Type::slice(self.required(variadic.elem(), group.ty.syntax().text_range(), ctx)?)
                    }
                    ty => self.resolve_type(ty, ctx)?,
                };
                push_vars(&mut sig.params, group, ty);
            }
        }

        if let Some(result) = result {
            for group in result.groups() {
                if let TypeExpr::Variadic(_) = group.ty {
                    return Err(final_param_only(self.location(ctx.file, group.ty.syntax().text_range())));
                }
                let ty = self.resolve_type(&group.ty, ctx)?;
                push_vars(&mut sig.results, &group, ty);
            }
        }
        Ok(sig)
    }

    /// Resolved signature of an indexed declaration.
    fn signature(&self, decl: &Declaration) -> Result<Signature> {
        let func: &FuncDecl = &decl.node;
        let range = func
            .name()
            .map(|n| n.syntax().text_range())
            .unwrap_or_else(|| decl.range());

        let mut type_params = Vec::new();
        if let Some(list) = func.type_params() {
            if decl.is_method() {
                return Err(ResolveError::Invalid {
                    location: self.location(decl.file, list.syntax().text_range()),
                    message: "methods cannot have type parameters".to_string(),
                });
            }
            type_params = list.names();
            self.check_type_params(&list, &Ctx::new(decl.file, type_params.clone()))?;
        }
        let ctx = Ctx::new(decl.file, type_params);

        let recv = match &decl.receiver {
            Some(receiver) => Some(self.receiver_var(decl.file, receiver)?),
            None => None,
        };
        let sig = self.signature_of(recv, func.params(), func.result(), &ctx)?;

        let entry_point = decl.name == "init" || (decl.name == "main" && self.package == "main");
        if decl.receiver.is_none() && entry_point && (!sig.params.is_empty() || !sig.results.is_empty()) {
            return Err(ResolveError::Invalid {
                location: self.location(decl.file, range),
                message: format!("func {} must have no arguments and no return values", decl.name),
            });
        }

        let mut seen = FxHashSet::default();
        let names = sig
            .recv
            .iter()
            .chain(&sig.params)
            .chain(&sig.results)
            .filter_map(|v| v.name.as_ref())
            .filter(|n| *n != "_");
        for name in names {
            if !seen.insert(name) {
                return Err(ResolveError::Redeclared {
                    location: self.location(decl.file, range),
                    name: name.to_string(),
                });
            }
        }
        Ok(sig)
    }

    fn receiver_var(&self, file: FileId, receiver: &Receiver) -> Result<Var> {
        let location = self.location(file, receiver.range);
        let invalid = |reason: &str| ResolveError::InvalidReceiver {
            location: location.clone(),
            name: receiver.type_text(),
            reason: reason.to_string(),
        };

        match self.objects.get(&receiver.base) {
            Some(Object::Type(object)) => {
                if object.alias {
                    return Err(invalid("cannot define methods on an alias"));
                }
                if !object.params.is_empty() {
                    return Err(invalid("generic type requires type arguments"));
                }
                if let Some(Type::Pointer(_) | Type::Interface(_)) = self.underlying_of(&receiver.base) {
                    return Err(invalid("pointer or interface type"));
                }
            }
            Some(Object::Func | Object::Value) => return Err(invalid("not a type")),
            None if self.files[file.index()].names.contains_key(&receiver.base)
                || is_universe_type(&receiver.base) =>
            {
                return Err(invalid("cannot define new methods on non-local type"));
            }
            None => {
                return Err(ResolveError::Undefined {
                    location,
                    name: receiver.base.to_string(),
                });
            }
        }

        let base = Type::Named {
            path: self.package.clone(),
            name: receiver.base.clone(),
            args: Vec::new(),
        };
        let ty = if receiver.pointer { Type::pointer(base) } else { base };
        Ok(Var::new(receiver.name.clone(), ty))
    }
}

/// Base type name of a method receiver, for duplicate detection.
fn receiver_base(func: &FuncDecl) -> Option<SmolStr> {
    let group = func.receiver()?.groups().into_iter().next()?;
    match group.ty {
        TypeExpr::Name(name) => name.name(),
        TypeExpr::Pointer(ptr) => match ptr.elem()? {
            TypeExpr::Name(name) => name.name(),
            _ => None,
        },
        _ => None,
    }
}

fn push_vars(vars: &mut Vec<Var>, group: &ParamGroup, ty: Type) {
    if group.names.is_empty() {
        vars.push(Var::new(None, ty));
    } else {
        vars.extend(group.names.iter().map(|n| Var::new(Some(n.clone()), ty.clone())));
    }
}

fn not_generic(location: String, name: &str) -> ResolveError {
    ResolveError::Invalid {
        location,
        message: format!("{} is not a generic type", name),
    }
}

fn final_param_only(location: String) -> ResolveError {
    ResolveError::Invalid {
        location,
        message: "can only use ... with final parameter in list".to_string(),
    }
}

fn is_universe_type(name: &str) -> bool {
    BASIC_TYPES.contains(&name) || matches!(name, "error" | "any" | "comparable")
}

/// Predeclared names of the universe scope.
fn universe(ident: SmolStr, args: Vec<Type>, location: String) -> Result<Type> {
    let ty = match ident.as_str() {
        name if BASIC_TYPES.contains(&name) => Type::Basic(ident.clone()),
        "error" | "comparable" => Type::Named {
            path: SmolStr::default(),
            name: ident.clone(),
            args: Vec::new(),
        },
        "any" => Type::empty_interface(),
        "true" | "false" | "nil" | "iota" | "append" | "cap" | "clear" | "close" | "complex"
        | "copy" | "delete" | "imag" | "len" | "make" | "max" | "min" | "new" | "panic"
        | "print" | "println" | "real" | "recover" => {
            return Err(ResolveError::NotAType {
                location,
                name: ident.to_string(),
            });
        }
        _ => {
            return Err(ResolveError::Undefined {
                location,
                name: ident.to_string(),
            });
        }
    };
    if !args.is_empty() {
        return Err(not_generic(location, &ident));
    }
    Ok(ty)
}
