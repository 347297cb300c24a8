//! jsonschema-model CLI
//!
//! Command-line interface for deriving class models from JSON Schema
//! documents.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use jsonschema_model::analyze;

#[derive(Parser)]
#[command(name = "jsonschema-model")]
#[command(about = "Derive class models from JSON Schema documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a schema file or a directory of schema files
    Analyze {
        /// Input: a JSON Schema file, or a directory whose direct children
        /// are analyzed as one batch
        path: PathBuf,

        /// Name of the resulting model
        #[arg(long, default_value = "model")]
        name: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            path,
            name,
            output,
            pretty,
        } => run_analyze(&path, &name, output, pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_analyze(
    path: &std::path::Path,
    name: &str,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), u8> {
    let model = analyze(path, name).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let json_output = if pretty {
        serde_json::to_string_pretty(&model)
    } else {
        serde_json::to_string(&model)
    }
    .map_err(|e| {
        eprintln!("Error serializing model: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}
