//! Signature resolution and candidate selection tests.

use handlergen::hir::{
    DeclIndex, ExportCatalog, PackageExports, ResolveError, SelectError, Type, resolve, select,
};
use rstest::rstest;

use crate::helpers::package_helpers::*;
use crate::helpers::source_fixtures::*;

fn selected_names(package: &str, files: &[(&str, &str)]) -> Vec<String> {
    let module = module_from_sources(package, files);
    let index = DeclIndex::build(&module).unwrap();
    let resolved = resolve(&module, &index, &ExportCatalog::std()).unwrap();
    select(&module, &index, resolved)
        .unwrap()
        .iter()
        .map(|c| format!("{} {}", c.decl, c.mimetype))
        .collect()
}

#[test]
fn test_resolved_signatures_use_full_paths() {
    let module = module_from_sources("api", &[("api.go", MIXED_PACKAGE)]);
    let index = DeclIndex::build(&module).unwrap();
    let resolved = resolve(&module, &index, &ExportCatalog::std()).unwrap();

    let get = resolved.iter().find(|r| r.decl.name == "Get").unwrap();
    assert_eq!(
        get.signature.to_string(),
        "(id string, limit int, req *net/http.Request) (api.Report, int)"
    );
    assert_eq!(get.signature.results[1].ty, Type::basic("int"));

    let put = resolved.iter().find(|r| r.decl.name == "Put").unwrap();
    assert!(put.signature.variadic);
    assert!(put.signature.params[1].ty.is_empty_interface());
}

#[test]
fn test_select_mixed_package() {
    assert_eq!(
        selected_names("api", &[("api.go", MIXED_PACKAGE)]),
        vec![
            "(Store).Get application/json",
            "(*Store).Put application/json",
            "(*Store).Dump application/json",
        ]
    );
}

#[test]
fn test_select_skips_non_handlers() {
    let names = selected_names("main", &[("types.go", MSG_TYPES), ("h.go", NOT_HANDLERS)]);
    assert!(names.is_empty(), "{:?}", names);
}

#[test]
fn test_select_rejects_free_function() {
    let module = module_from_sources("main", &[("types.go", MSG_TYPES), ("f.go", FREE_FUNCTION)]);
    let index = DeclIndex::build(&module).unwrap();
    let resolved = resolve(&module, &index, &ExportCatalog::std()).unwrap();
    let err = select(&module, &index, resolved).unwrap_err();

    let SelectError::UnsupportedFunction { name, location } = &err;
    assert_eq!(name, "Greet");
    assert!(location.starts_with("pkg/f.go:3:"), "{}", location);
    assert!(err.to_string().contains("not supported"));
}

#[test]
fn test_alias_result_is_matched_by_its_target() {
    let source = r#"package main

type Out = Msg

type H struct{}

func (h H) Get() (Out, int) { return "", 200 }
"#;
    assert_eq!(
        selected_names("main", &[("types.go", MSG_TYPES), ("h.go", source)]),
        vec!["(H).Get text/plain"]
    );
}

#[test]
fn test_manifest_package_types_resolve() {
    let source = r#"package main

import "example.com/store"

type H struct{}

func (h *H) Find(item store.Item) (Msg, int) { return "", 200 }
"#;
    let module = module_from_sources("main", &[("types.go", MSG_TYPES), ("h.go", source)]);
    let index = DeclIndex::build(&module).unwrap();

    let err = resolve(&module, &index, &ExportCatalog::std()).unwrap_err();
    assert!(matches!(err, ResolveError::Import { .. }), "{:?}", err);

    let mut catalog = ExportCatalog::std();
    catalog.insert(PackageExports::new("example.com/store", "store").with_types(["Item"]));
    let resolved = resolve(&module, &index, &catalog).unwrap();
    assert_eq!(
        resolved[0].signature.params[0].ty.to_string(),
        "example.com/store.Item"
    );
}

#[rstest]
#[case(
    "package main\n\ntype H struct{}\n\nfunc (h H) Get(x Missing) (Msg, int) { return \"\", 0 }\n",
    "undefined: Missing"
)]
#[case(
    "package main\n\nimport \"net/http\"\n\ntype H struct{}\n\nfunc (h H) Get(x http.request) (Msg, int) { return \"\", 0 }\n",
    "not exported"
)]
#[case(
    "package main\n\nvar v int\n\ntype H struct{}\n\nfunc (h H) Get(x v) (Msg, int) { return \"\", 0 }\n",
    "v is not a type"
)]
#[case(
    "package main\n\ntype H struct{}\n\ntype H int\n",
    "H redeclared"
)]
#[case(
    "package main\n\nfunc (s string) Len() int { return 0 }\n",
    "invalid receiver type"
)]
#[case(
    "package main\n\ntype A = B\n\ntype B = A\n",
    "invalid recursive type"
)]
fn test_resolve_errors(#[case] source: &str, #[case] message: &str) {
    let module = module_from_sources("main", &[("types.go", MSG_TYPES), ("bad.go", source)]);
    let index = DeclIndex::build(&module).unwrap();
    let err = resolve(&module, &index, &ExportCatalog::std()).unwrap_err();
    let text = err.to_string();
    assert!(text.starts_with("pkg/bad.go:"), "{}", text);
    assert!(text.contains(message), "{}", text);
}

#[test]
fn test_import_used_only_in_bodies_needs_no_export_data() {
    let source = r#"package main

import (
	"log/slog"
	"regexp"
)

var word = regexp.MustCompile(`\w+`)

type H struct{}

func (h *H) Match(text string) (Msg, int) {
	slog.Info("matching", "text", text)
	if word.MatchString(text) {
		return "yes", 200
	}
	return "no", 404
}
"#;
    assert_eq!(
        selected_names("main", &[("types.go", MSG_TYPES), ("h.go", source)]),
        vec!["(*H).Match text/plain"]
    );
}

#[test]
fn test_unknown_import_fails_where_a_type_uses_it() {
    let source = r#"package main

import "regexp"

type H struct{}

func (h *H) Match(re *regexp.Regexp) (Msg, int) { return "", 200 }
"#;
    let module = module_from_sources("main", &[("types.go", MSG_TYPES), ("h.go", source)]);
    let index = DeclIndex::build(&module).unwrap();
    let err = resolve(&module, &index, &ExportCatalog::std()).unwrap_err();
    match &err {
        ResolveError::Import { location, path, .. } => {
            assert_eq!(path, "regexp");
            assert!(location.starts_with("pkg/h.go:7:"), "{}", location);
        }
        other => panic!("expected import error, got {:?}", other),
    }
}
