mod convert;
mod data_only;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sqlite2pg")]
#[command(version)]
#[command(about = "Convert SQLite dump files into PostgreSQL-loadable SQL", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a SQLite dump (schema and data) to PostgreSQL format
    Convert {
        /// Input SQLite SQL file (supports .gz, .bz2, .xz, .zst compression)
        input_file: PathBuf,

        /// Output PostgreSQL SQL file
        output_file: PathBuf,

        /// Run the conversion without writing the output file
        #[arg(long)]
        dry_run: bool,
    },

    /// Convert a SQLite dump to PostgreSQL data-only format (INSERT statements only)
    DataOnly {
        /// Input SQLite SQL file (supports .gz, .bz2, .xz, .zst compression)
        input_file: PathBuf,

        /// Output PostgreSQL SQL file
        output_file: PathBuf,

        /// Render epoch timestamps in UTC instead of local time
        #[arg(long)]
        utc: bool,

        /// Run the conversion without writing the output file
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Convert {
            input_file,
            output_file,
            dry_run,
        } => convert::run(input_file, output_file, dry_run),
        Commands::DataOnly {
            input_file,
            output_file,
            utc,
            dry_run,
        } => data_only::run(input_file, output_file, utc, dry_run),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sqlite2pg", &mut io::stdout());
            Ok(())
        }
    }
}
