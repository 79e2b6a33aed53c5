//! `run` tests: load from disk, generate, write.

use std::fs;

use handlergen::project::LoadError;
use handlergen::{GenError, GenerateConfig, run};
use tempfile::TempDir;

use crate::helpers::package_helpers::*;
use crate::helpers::source_fixtures::*;

fn config(src: &TempDir, out: &TempDir, package: &str) -> GenerateConfig {
    GenerateConfig::new(package, output_path(out)).with_source_dir(src.path())
}

#[test]
fn test_run_writes_wrappers() {
    let src = write_package(&[("types.go", MSG_TYPES), ("h.go", GREET_HANDLER)]);
    let out = TempDir::new().unwrap();

    let count = run(&config(&src, &out, "main")).unwrap();
    assert_eq!(count, 1);

    let text = fs::read_to_string(output_path(&out)).unwrap();
    assert!(text.starts_with("package main\n"));
    assert!(text.contains("func (h *H) HandleGreet(res http.ResponseWriter, req *http.Request) {"));
    assert!(text.contains("body, retcode := h.Greet(parsed[\"name\"].(string))"));
}

#[test]
fn test_run_is_deterministic() {
    let src = write_package(&[("api.go", MIXED_PACKAGE), ("extra.go", "package api\n")]);
    let out = TempDir::new().unwrap();
    let config = config(&src, &out, "api");

    run(&config).unwrap();
    let first = fs::read(output_path(&out)).unwrap();
    run(&config).unwrap();
    let second = fs::read(output_path(&out)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_run_skips_test_files_and_other_packages() {
    let broken_test = "package main\n\nfunc (h *H) TestOnly( {\n";
    let src = write_package(&[
        ("types.go", MSG_TYPES),
        ("h.go", GREET_HANDLER),
        ("h_test.go", broken_test),
        ("tool.go", "package tool\n\nfunc Run() {}\n"),
        ("notes.txt", "not go"),
    ]);
    let out = TempDir::new().unwrap();
    assert_eq!(run(&config(&src, &out, "main")).unwrap(), 1);
}

#[test]
fn test_free_function_aborts_without_output() {
    let src = write_package(&[("types.go", MSG_TYPES), ("f.go", FREE_FUNCTION)]);
    let out = TempDir::new().unwrap();

    let err = run(&config(&src, &out, "main")).unwrap_err();
    assert!(matches!(err, GenError::Select(_)), "{:?}", err);
    assert!(!output_path(&out).exists());
}

#[test]
fn test_syntax_error_aborts_without_output() {
    let src = write_package(&[("types.go", MSG_TYPES), ("bad.go", SYNTAX_ERROR)]);
    let out = TempDir::new().unwrap();

    let err = run(&config(&src, &out, "main")).unwrap_err();
    match &err {
        GenError::Load(LoadError::Syntax { path, diagnostics }) => {
            assert!(path.ends_with("bad.go"));
            assert!(!diagnostics.is_empty());
            assert!(diagnostics[0].contains("bad.go:"), "{:?}", diagnostics);
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
    assert!(!output_path(&out).exists());
}

#[test]
fn test_package_not_found() {
    let src = write_package(&[("types.go", MSG_TYPES)]);
    let out = TempDir::new().unwrap();

    let err = run(&config(&src, &out, "api")).unwrap_err();
    match &err {
        GenError::Load(LoadError::PackageNotFound { name, found, .. }) => {
            assert_eq!(name, "api");
            assert_eq!(found, &vec!["main".to_string()]);
        }
        other => panic!("expected missing package, got {:?}", other),
    }
    assert!(err.to_string().contains("found: main"));
    assert!(!output_path(&out).exists());
}

#[test]
fn test_missing_source_dir() {
    let out = TempDir::new().unwrap();
    let config = GenerateConfig::new("main", output_path(&out))
        .with_source_dir(out.path().join("does-not-exist"));
    let err = run(&config).unwrap_err();
    assert!(matches!(err, GenError::Load(LoadError::Io { .. })), "{:?}", err);
}

#[test]
fn test_run_with_export_manifest() {
    let handler = r#"package main

import (
	"net/http"

	"example.com/store"
)

type H struct {
	db *store.Client
}

func (h *H) Find(id string, req *http.Request) (Msg, int) {
	return "", 200
}
"#;
    let src = write_package(&[("types.go", MSG_TYPES), ("h.go", handler)]);
    let out = TempDir::new().unwrap();

    let err = run(&config(&src, &out, "main")).unwrap_err();
    assert!(err.to_string().contains("example.com/store"), "{}", err);

    let manifest = out.path().join("store.json");
    fs::write(
        &manifest,
        r#"{ "path": "example.com/store", "types": ["Client", "Item"], "values": ["Open"] }"#,
    )
    .unwrap();
    let config = config(&src, &out, "main").with_exports(vec![manifest]);
    assert_eq!(run(&config).unwrap(), 1);

    let text = fs::read_to_string(output_path(&out)).unwrap();
    assert!(text.contains("h.Find(parsed[\"id\"].(string), req)"));
}

#[test]
fn test_malformed_manifest() {
    let src = write_package(&[("types.go", MSG_TYPES), ("h.go", GREET_HANDLER)]);
    let out = TempDir::new().unwrap();
    let manifest = out.path().join("bad.json");
    fs::write(&manifest, r#"{ "path": "example.com/store", "kinds": [] }"#).unwrap();

    let err = run(&config(&src, &out, "main").with_exports(vec![manifest])).unwrap_err();
    assert!(matches!(err, GenError::Manifest(_)), "{:?}", err);
    assert!(!output_path(&out).exists());
}

#[test]
fn test_undefined_variable_type_aborts_without_output() {
    let config_var = "package main\n\nvar cfg Missing\n";
    let src = write_package(&[
        ("config.go", config_var),
        ("h.go", GREET_HANDLER),
        ("types.go", MSG_TYPES),
    ]);
    let out = TempDir::new().unwrap();

    let err = run(&config(&src, &out, "main")).unwrap_err();
    assert!(matches!(err, GenError::Resolve(_)), "{:?}", err);
    assert!(err.to_string().contains("undefined: Missing"), "{}", err);
    assert!(!output_path(&out).exists());
}
