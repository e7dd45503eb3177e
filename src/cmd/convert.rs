//! Convert command CLI handler.

use sqlite2pg::convert::{self, ConvertConfig, ConvertStats};
use std::path::PathBuf;

pub fn run(input_file: PathBuf, output_file: PathBuf, dry_run: bool) -> anyhow::Result<()> {
    let config = ConvertConfig {
        input: input_file,
        output: output_file,
        dry_run,
    };

    let stats = convert::run_schema(&config)?;

    if dry_run {
        print_stats(&stats);
        return Ok(());
    }

    println!(
        "Converted {} to {}",
        config.input.display(),
        config.output.display()
    );
    println!("Conversion completed successfully!");
    Ok(())
}

fn print_stats(stats: &ConvertStats) {
    eprintln!();
    eprintln!("Conversion Statistics:");
    eprintln!("  Input size: {} bytes", stats.input_bytes);
    eprintln!("  Output size: {} bytes", stats.output_bytes);
    eprintln!();
    eprintln!("(Dry run - no output written)");
}
