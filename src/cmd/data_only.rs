//! Data-only command CLI handler.

use sqlite2pg::convert::{self, DataOnlyConfig, DataOnlyStats};
use std::path::PathBuf;

pub fn run(
    input_file: PathBuf,
    output_file: PathBuf,
    utc: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = DataOnlyConfig {
        input: input_file,
        output: output_file,
        dry_run,
        utc,
    };

    let Some(stats) = convert::run_data_only(&config)? else {
        println!("No INSERT statements found in input file");
        println!("Data conversion completed successfully!");
        return Ok(());
    };

    if dry_run {
        print_stats(&stats);
        return Ok(());
    }

    println!(
        "Converted {} INSERT statements from {} to {}",
        stats.insert_statements,
        config.input.display(),
        config.output.display()
    );
    println!("Data conversion completed successfully!");
    Ok(())
}

fn print_stats(stats: &DataOnlyStats) {
    eprintln!();
    eprintln!("Conversion Statistics:");
    eprintln!("  INSERT statements: {}", stats.insert_statements);
    eprintln!("  Timestamps converted: {}", stats.timestamps_converted);
    if stats.timestamps_unconverted > 0 {
        eprintln!("  Timestamps left as text: {}", stats.timestamps_unconverted);
    }
    eprintln!();
    eprintln!("(Dry run - no output written)");
}
