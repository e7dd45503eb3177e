//! SQLite → PostgreSQL dump conversion.
//!
//! Two independent pipelines:
//! - [`SchemaConverter`] rewrites a full dump (CREATE TABLE + INSERT)
//! - [`DataOnlyConverter`] keeps only INSERT statements and rewrites values
//!   (epoch timestamps, 0/1 booleans, NULL row ids)
//!
//! Both operate on the whole file as one string buffer.

mod data_only;
pub mod rules;
mod schema;
mod timestamps;

pub use data_only::{DataOnlyConverter, DataOnlyOutput, DataOnlyStats, INSERT_PREFIX};
pub use schema::{SchemaConverter, SCHEMA_PREAMBLE};
pub use timestamps::{
    convert_timestamps, epoch_to_literal, EpochLiteral, TimestampCounts, TimestampZone,
    MILLIS_THRESHOLD,
};

use crate::input;
use std::path::PathBuf;

/// Configuration for the schema-and-data conversion
#[derive(Debug, Default)]
pub struct ConvertConfig {
    /// Input SQLite dump
    pub input: PathBuf,
    /// Output PostgreSQL file
    pub output: PathBuf,
    /// Convert without writing the output file
    pub dry_run: bool,
}

/// Configuration for the data-only conversion
#[derive(Debug, Default)]
pub struct DataOnlyConfig {
    /// Input SQLite dump
    pub input: PathBuf,
    /// Output PostgreSQL file
    pub output: PathBuf,
    /// Convert without writing the output file
    pub dry_run: bool,
    /// Render timestamps in UTC instead of local time
    pub utc: bool,
}

/// Statistics from a schema-and-data conversion
#[derive(Debug, Default, Clone, Copy)]
pub struct ConvertStats {
    pub input_bytes: u64,
    pub output_bytes: u64,
}

/// Convert a full dump and write it to `config.output`.
pub fn run_schema(config: &ConvertConfig) -> anyhow::Result<ConvertStats> {
    let content = input::read_dump(&config.input)?;
    let converted = SchemaConverter::new().convert(&content);

    if !config.dry_run {
        input::write_output(&config.output, &converted)?;
    }

    Ok(ConvertStats {
        input_bytes: content.len() as u64,
        output_bytes: converted.len() as u64,
    })
}

/// Convert the INSERT statements of a dump and write them to `config.output`.
///
/// Returns `Ok(None)` without touching the output path when the input holds
/// no INSERT statements.
pub fn run_data_only(config: &DataOnlyConfig) -> anyhow::Result<Option<DataOnlyStats>> {
    let content = input::read_dump(&config.input)?;

    let zone = if config.utc {
        TimestampZone::Utc
    } else {
        TimestampZone::Local
    };
    let converter = DataOnlyConverter::new().with_zone(zone);

    let Some(output) = converter.convert(&content) else {
        return Ok(None);
    };

    if !config.dry_run {
        input::write_output(&config.output, &output.content)?;
    }

    Ok(Some(output.stats))
}
