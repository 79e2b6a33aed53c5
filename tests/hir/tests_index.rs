//! Declaration Index tests.

use handlergen::hir::{DeclIndex, IndexError};

use crate::helpers::package_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_index_spans_files() {
    let module = module_from_sources("main", &[("types.go", MSG_TYPES), ("h.go", GREET_HANDLER)]);
    let index = DeclIndex::build(&module).unwrap();

    assert_eq!(index.package(), "main");
    assert_eq!(index.mimetype("main.Msg"), Some("text/plain"));
    assert_eq!(index.mimetype("main.Page"), None);

    let greet = index.method("*main.H", "Greet").unwrap();
    assert!(greet.is_method());
    assert_eq!(greet.to_string(), "(*H).Greet");
    assert_eq!(greet.params.len(), 1);
    assert_eq!(greet.params[0].type_text, "string");
}

#[test]
fn test_index_keeps_value_and_pointer_receivers_apart() {
    let module = module_from_sources("api", &[("api.go", MIXED_PACKAGE)]);
    let index = DeclIndex::build(&module).unwrap();

    assert!(index.method("api.Store", "Get").is_some());
    assert!(index.method("*api.Store", "Get").is_none());
    assert!(index.method("*api.Store", "Put").is_some());
    assert!(index.function("helper").is_some());

    let names: Vec<_> = index.declarations().map(|d| d.name.to_string()).collect();
    assert_eq!(names, vec!["Get", "Put", "Dump", "helper"]);
}

#[test]
fn test_index_ignores_other_packages() {
    let other = "package other\n\n//mimetype text/html\ntype Msg string\n";
    let module = module_from_sources("main", &[("a.go", MSG_TYPES), ("b.go", other)]);
    let index = DeclIndex::build(&module).unwrap();
    assert_eq!(index.mimetypes().len(), 1);
    assert_eq!(index.mimetype("main.Msg"), Some("text/plain"));
}

#[test]
fn test_later_annotation_wins() {
    let first = "package main\n\n//mimetype text/plain\ntype Msg string\n";
    let second = "package main\n\ntype Other int //mimetype text/csv\n";
    let module = module_from_sources("main", &[("a.go", first), ("b.go", second)]);
    let index = DeclIndex::build(&module).unwrap();
    assert_eq!(index.mimetype("main.Other"), Some("text/csv"));
    assert_eq!(index.mimetypes().len(), 2);
}

#[test]
fn test_malformed_annotation_is_ignored() {
    let source = "package main\n\n//mimetype\ntype A string\n\n//mimetype text/plain extra\ntype B string\n";
    let module = module_from_sources("main", &[("a.go", source)]);
    let index = DeclIndex::build(&module).unwrap();
    assert!(index.mimetypes().is_empty());
}

#[test]
fn test_unsupported_receiver_shape() {
    let source = "package main\n\ntype H struct{}\n\nfunc (h **H) Bad() {}\n";
    let module = module_from_sources("main", &[("a.go", source)]);
    let err = DeclIndex::build(&module).unwrap_err();
    assert!(matches!(err, IndexError::ReceiverShape { .. }), "{:?}", err);
    assert!(err.to_string().starts_with("pkg/a.go:5:"), "{}", err);
}
