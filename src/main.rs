//! Bulletinload CLI - import delimited text files into bulletin XML
//!
//! # Commands
//!
//! ```bash
//! bulletinload import data.txt --script mapping.rhai --delimiter '\|'
//! bulletinload headers data.txt --delimiter '\|'     # show resolved columns
//! bulletinload check data.txt --script mapping.rhai --delimiter '\|'
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG` for more detail (for example
//! `RUST_LOG=bulletinload=debug`).

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use bulletinload::pipeline::{default_output_path, Importer};
use bulletinload::reader::DelimitedSource;

#[derive(Parser)]
#[command(name = "bulletinload")]
#[command(about = "Import delimited text files into bulletin XML documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full import and write the XML document
    Import {
        /// Input delimited text file
        input: PathBuf,

        /// Mapping script file
        #[arg(short, long)]
        script: PathBuf,

        /// Delimiter pattern, a regex (e.g. '\|' or '\t')
        #[arg(short, long)]
        delimiter: String,

        /// Output file (default: input path with an .xml extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the column labels a delimiter pattern resolves
    Headers {
        /// Input delimited text file
        input: PathBuf,

        /// Delimiter pattern, a regex (e.g. '\|' or '\t')
        #[arg(short, long)]
        delimiter: String,
    },

    /// Run the whole import without writing the document
    Check {
        /// Input delimited text file
        input: PathBuf,

        /// Mapping script file
        #[arg(short, long)]
        script: PathBuf,

        /// Delimiter pattern, a regex (e.g. '\|' or '\t')
        #[arg(short, long)]
        delimiter: String,
    },
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Import {
            input,
            script,
            delimiter,
            output,
        } => cmd_import(&input, &script, &delimiter, output.as_deref()),

        Commands::Headers { input, delimiter } => cmd_headers(&input, &delimiter),

        Commands::Check {
            input,
            script,
            delimiter,
        } => cmd_check(&input, &script, &delimiter),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_import(
    input: &Path,
    script: &Path,
    delimiter: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Importing: {}", input.display());

    let mut importer = Importer::from_paths(input, script, delimiter)?;
    eprintln!("   Columns: {}", importer.headers().join(", "));

    let dest = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input),
    };
    importer.import_to(&dest)?;

    eprintln!("Wrote {}", dest.display());
    Ok(())
}

fn cmd_headers(input: &Path, delimiter: &str) -> Result<(), Box<dyn std::error::Error>> {
    let source = DelimitedSource::from_path(input, delimiter)?;

    eprintln!("{} columns:", source.headers().len());
    for (i, label) in source.headers().iter().enumerate() {
        println!("[{:2}] {}", i + 1, label);
    }
    eprintln!("{} data rows", source.row_count());

    Ok(())
}

fn cmd_check(
    input: &Path,
    script: &Path,
    delimiter: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Checking: {}", input.display());

    let mut importer = Importer::from_paths(input, script, delimiter)?;
    let document = importer.run()?;

    eprintln!("OK: document would be {} bytes", document.len());
    Ok(())
}
