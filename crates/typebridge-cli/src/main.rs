//! typebridge CLI - code generator for schema documents
//!
//! Commands:
//! - `typebridge generate` - Generate TypeScript declarations from a schema document
//! - `typebridge check` - Validate that a schema document parses and renders

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod check;
mod codegen;
mod generate;

#[derive(Parser)]
#[command(name = "typebridge")]
#[command(author, version, about = "Code generator for typebridge schema documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript declarations from a schema document
    Generate {
        /// Path to the JSON schema document (an object of name -> schema)
        #[arg(short, long)]
        input: String,

        /// Output path for the generated declarations
        #[arg(short, long, default_value = "types.d.ts")]
        output: String,

        /// Declaration keyword placed before each type (e.g. `export`, `declare`)
        #[arg(short, long, default_value = "export")]
        prefix: String,
    },

    /// Validate that a schema document parses and renders
    Check {
        /// Path to the JSON schema document
        #[arg(short, long)]
        input: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            prefix,
        } => {
            generate::run(&input, &output, &prefix)?;
        }
        Commands::Check { input } => {
            check::run(&input)?;
        }
    }

    Ok(())
}
