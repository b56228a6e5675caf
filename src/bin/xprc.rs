//! Command-line interface for xpr-core.
//!
//! Usage:
//!   xprc merge `<index.json>`              - Merge every folder named by a manifest
//!   xprc parse `<rule.xpr>` [--pretty]     - Print one compiled rule group as JSON
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use xpr_core::{compile, merge};

#[derive(Parser)]
#[command(name = "xprc", version, about = "Compile and merge XPR rule files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge every folder's rule.xpr and trans.json into the manifest's output directory
    Merge {
        /// Path to the project's index.json
        manifest: PathBuf,
    },
    /// Compile a single XPR file and print it as JSON
    Parse {
        path: PathBuf,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Merge { manifest } => {
            let outcome = merge(&manifest)?;
            println!("{outcome}");
        }
        Command::Parse { path, pretty } => {
            let source = std::fs::read_to_string(&path).into_diagnostic()?;
            let group = compile(&source, &path.to_string_lossy())?;
            let json = if pretty {
                serde_json::to_string_pretty(&group)
            } else {
                serde_json::to_string(&group)
            }
            .into_diagnostic()?;
            println!("{json}");
        }
    }
    Ok(())
}
