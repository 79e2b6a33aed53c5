//! Helpers for building packages in memory and on disk.

use std::fs;
use std::path::{Path, PathBuf};

use handlergen::codegen::{self, GeneratedFile};
use handlergen::hir::ExportCatalog;
use handlergen::project::{self, Module};
use handlergen::{GenError, generate};
use tempfile::TempDir;

/// Parses in-memory files and selects `package`.
pub fn module_from_sources(package: &str, files: &[(&str, &str)]) -> Module {
    try_module_from_sources(package, files).unwrap_or_else(|e| panic!("load failed: {}", e))
}

pub fn try_module_from_sources(
    package: &str,
    files: &[(&str, &str)],
) -> Result<Module, project::LoadError> {
    let dir = Path::new("pkg");
    let sources = files
        .iter()
        .map(|(name, text)| (dir.join(name), text.to_string()))
        .collect();
    project::parse_package(dir, package, sources)
}

/// Runs generation over in-memory files with the built-in catalog.
pub fn generate_from_sources(
    package: &str,
    files: &[(&str, &str)],
) -> Result<GeneratedFile, GenError> {
    let module = try_module_from_sources(package, files)?;
    generate(&module, &ExportCatalog::std())
}

/// Generated Go text for in-memory files. Panics on failure.
pub fn emit_from_sources(package: &str, files: &[(&str, &str)]) -> String {
    match generate_from_sources(package, files) {
        Ok(file) => codegen::emit(&file),
        Err(e) => panic!("generation failed: {}", e),
    }
}

/// Writes `files` into a fresh temporary directory.
pub fn write_package(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, text) in files {
        fs::write(dir.path().join(name), text).unwrap();
    }
    dir
}

/// Output location kept apart from the sources so reruns see the same input.
pub fn output_path(out_dir: &TempDir) -> PathBuf {
    out_dir.path().join("handlers_gen.go")
}
