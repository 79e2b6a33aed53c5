//! Package loading.
//!
//! A [`Module`] is one Go package: every non-test `.go` file in a source
//! directory whose package clause names it, parsed once and kept in file
//! name order. Everything downstream (index, resolver, synthesizer) reads
//! from the same parsed files.

mod loader;

use std::path::{Path, PathBuf};

use smol_str::SmolStr;

use crate::base::{FileId, LineIndex, Position, TextRange};
use crate::parser::{self, Parse};

pub use loader::{LoadError, collect_go_files, load_package, parse_package};

/// A parsed Go source file.
#[derive(Debug, Clone)]
pub struct GoFile {
    pub id: FileId,
    pub path: PathBuf,
    pub text: String,
    pub parse: Parse,
    line_index: LineIndex,
}

impl GoFile {
    pub fn new(id: FileId, path: PathBuf, text: String) -> Self {
        let parse = parser::parse_go(&text);
        let line_index = LineIndex::new(&text);
        Self {
            id,
            path,
            text,
            parse,
            line_index,
        }
    }

    /// Typed root of the file's syntax tree.
    pub fn tree(&self) -> parser::SourceFile {
        self.parse.source_file()
    }

    pub fn package_name(&self) -> Option<SmolStr> {
        self.tree().package_name()
    }

    pub fn position(&self, range: TextRange) -> Position {
        self.line_index.position(range.start())
    }

    /// `path:line:col` for diagnostics.
    pub fn location(&self, range: TextRange) -> String {
        format!("{}:{}", self.path.display(), self.position(range))
    }
}

/// One Go package, ready for analysis.
#[derive(Debug, Clone)]
pub struct Module {
    pub name: SmolStr,
    pub dir: PathBuf,
    files: Vec<GoFile>,
}

impl Module {
    /// Files are renumbered so that `FileId`s index into the module.
    pub fn new(name: impl Into<SmolStr>, dir: impl AsRef<Path>, files: Vec<GoFile>) -> Self {
        let files = files
            .into_iter()
            .enumerate()
            .map(|(i, mut file)| {
                file.id = FileId::new(i as u32);
                file
            })
            .collect();
        Self {
            name: name.into(),
            dir: dir.as_ref().to_path_buf(),
            files,
        }
    }

    pub fn files(&self) -> &[GoFile] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> &GoFile {
        &self.files[id.index()]
    }
}
