use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use thiserror::Error;

use super::{GoFile, Module};
use crate::base::FileId;

/// Errors raised while turning a directory into a [`Module`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// A directory or source file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file has syntax errors; one `path:line:col: message` each.
    #[error("{}", .diagnostics.join("\n"))]
    Syntax {
        path: PathBuf,
        diagnostics: Vec<String>,
    },

    /// No file in the directory declares the requested package.
    #[error("package {name} not found in {} (found: {})", .dir.display(), found_list(.found))]
    PackageNotFound {
        name: String,
        dir: PathBuf,
        found: Vec<String>,
    },
}

fn found_list(found: &[String]) -> String {
    if found.is_empty() {
        "none".to_string()
    } else {
        found.join(", ")
    }
}

/// Collects the `.go` files directly inside `dir`, excluding `_test.go`
/// files, sorted by path.
pub fn collect_go_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_go = path.extension().is_some_and(|ext| ext == "go");
        let is_test = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with("_test.go"));
        if path.is_file() && is_go && !is_test {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Loads and parses the package named `package` from `dir`.
pub fn load_package(dir: &Path, package: &str) -> Result<Module, LoadError> {
    let paths = collect_go_files(dir)?;
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        match fs::read_to_string(&path) {
            Ok(text) => sources.push((path, text)),
            Err(source) => return Err(LoadError::Io { path, source }),
        }
    }
    parse_package(dir, package, sources)
}

/// Parses in-memory sources and picks out one package.
///
/// Every file is parsed, whatever its package; the first file with syntax
/// errors aborts the load.
pub fn parse_package(
    dir: &Path,
    package: &str,
    sources: Vec<(PathBuf, String)>,
) -> Result<Module, LoadError> {
    let mut by_package: BTreeMap<SmolStr, Vec<GoFile>> = BTreeMap::new();

    for (i, (path, text)) in sources.into_iter().enumerate() {
        let file = GoFile::new(FileId::new(i as u32), path, text);
        if !file.parse.ok() {
            let diagnostics = file
                .parse
                .errors
                .iter()
                .map(|e| format!("{}: {}", file.location(e.range), e.message))
                .collect();
            return Err(LoadError::Syntax {
                path: file.path,
                diagnostics,
            });
        }
        if let Some(name) = file.package_name() {
            by_package.entry(name).or_default().push(file);
        }
    }

    match by_package.remove(package) {
        Some(files) => {
            tracing::debug!(
                "Loaded package {} from {} file(s) in {}",
                package,
                files.len(),
                dir.display()
            );
            Ok(Module::new(package, dir, files))
        }
        None => Err(LoadError::PackageNotFound {
            name: package.to_string(),
            dir: dir.to_path_buf(),
            found: by_package.keys().map(ToString::to_string).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, text: &str) {
        fs::write(dir.path().join(name), text).unwrap();
    }

    #[test]
    fn test_collect_skips_tests_and_other_extensions() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.go", "package p\n");
        write(&dir, "a.go", "package p\n");
        write(&dir, "a_test.go", "package p\n");
        write(&dir, "notes.txt", "package p\n");
        fs::create_dir(dir.path().join("sub.go")).unwrap();

        let names: Vec<_> = collect_go_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.go", "b.go"]);
    }

    #[test]
    fn test_load_groups_by_package() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.go", "package api\n\ntype H struct{}\n");
        write(&dir, "b.go", "package api\n\nfunc F() {}\n");
        write(&dir, "tool.go", "package main\n\nfunc main() {}\n");

        let module = load_package(dir.path(), "api").unwrap();
        assert_eq!(module.name, "api");
        assert_eq!(module.files().len(), 2);
        assert_eq!(module.files()[1].id, FileId::new(1));
        assert!(module.files()[0].path.ends_with("a.go"));
    }

    #[test]
    fn test_package_not_found_lists_found_packages() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.go", "package api\n");
        write(&dir, "b.go", "package main\n");

        let err = load_package(dir.path(), "web").unwrap_err();
        match &err {
            LoadError::PackageNotFound { name, found, .. } => {
                assert_eq!(name, "web");
                assert_eq!(found, &vec!["api".to_string(), "main".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("found: api, main"));
    }

    #[test]
    fn test_syntax_error_reports_location() {
        let err = parse_package(
            Path::new("."),
            "p",
            vec![(PathBuf::from("bad.go"), "package p\n\nfunc (\n".to_string())],
        )
        .unwrap_err();
        match err {
            LoadError::Syntax { path, diagnostics } => {
                assert_eq!(path, PathBuf::from("bad.go"));
                assert!(!diagnostics.is_empty());
                assert!(diagnostics[0].starts_with("bad.go:"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_package(&dir.path().join("missing"), "p").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
