//! Generation pipeline: load → index → resolve → select → synthesize → emit.

use std::fs;
use std::path::PathBuf;

use crate::codegen::{self, GeneratedFile};
use crate::error::{GenError, Result};
use crate::hir::{self, DeclIndex, ExportCatalog, Importer};
use crate::project::{self, Module};

/// Settings of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Package to analyze.
    pub package: String,
    /// File the wrappers are written to.
    pub output: PathBuf,
    /// Directory holding the package sources.
    pub source_dir: PathBuf,
    /// Export manifests layered over the built-in catalog.
    pub exports: Vec<PathBuf>,
}

impl GenerateConfig {
    pub fn new(package: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            package: package.into(),
            output: output.into(),
            source_dir: PathBuf::from("."),
            exports: Vec::new(),
        }
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn with_exports(mut self, exports: Vec<PathBuf>) -> Self {
        self.exports = exports;
        self
    }

    /// The built-in catalog plus every configured manifest.
    pub fn importer(&self) -> Result<ExportCatalog> {
        let mut catalog = ExportCatalog::std();
        for manifest in &self.exports {
            catalog.load_manifest(manifest)?;
        }
        Ok(catalog)
    }
}

/// Runs index, resolve, select and synthesize over a loaded module.
pub fn generate(module: &Module, importer: &dyn Importer) -> Result<GeneratedFile> {
    let index = DeclIndex::build(module)?;
    let resolved = hir::resolve(module, &index, importer)?;
    let candidates = hir::select(module, &index, resolved)?;
    tracing::info!("found {} to wrap", candidates.len());
    Ok(codegen::synthesize(module, &candidates)?)
}

/// Loads the configured package, generates wrappers and writes the output
/// file. Returns the number of wrappers written.
///
/// The output file is only created once generation has succeeded.
pub fn run(config: &GenerateConfig) -> Result<usize> {
    let importer = config.importer()?;
    let module = project::load_package(&config.source_dir, &config.package)?;
    let file = generate(&module, &importer)?;
    let text = codegen::emit(&file);

    fs::write(&config.output, text).map_err(|source| GenError::Write {
        path: config.output.clone(),
        source,
    })?;
    tracing::info!(
        "wrote {} wrapper(s) to {}",
        file.wrappers.len(),
        config.output.display()
    );
    Ok(file.wrappers.len())
}
