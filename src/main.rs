use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use handlergen::GenerateConfig;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "handlergen")]
#[command(about = "Generate net/http handler wrappers for annotated Go methods")]
struct Args {
    /// Name of the package to parse
    #[arg(long)]
    pkg: String,

    /// Output file for wrappers
    #[arg(long)]
    out: PathBuf,

    /// Directory holding the package sources
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// JSON export manifest for an imported package (repeatable)
    #[arg(long = "exports", value_name = "FILE")]
    exports: Vec<PathBuf>,
}

impl From<Args> for GenerateConfig {
    fn from(args: Args) -> Self {
        GenerateConfig::new(args.pkg, args.out)
            .with_source_dir(args.dir)
            .with_exports(args.exports)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    let config = GenerateConfig::from(args);
    match handlergen::run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
