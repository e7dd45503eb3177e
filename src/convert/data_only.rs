//! Data-only conversion: keep the INSERT statements of a SQLite dump and
//! rewrite their values for PostgreSQL.
//!
//! Value rewriting is positional, not type-aware:
//! - epoch integers become quoted timestamps
//! - `0`/`1` next to a comma or parenthesis become `FALSE`/`TRUE`
//! - a leading `NULL` becomes `DEFAULT`

use super::rules;
use super::timestamps::{self, TimestampZone};
use chrono::{Local, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Statement prefix a line must start with to be kept
pub const INSERT_PREFIX: &str = "INSERT INTO";

/// Boolean rewrites, applied in order
const BOOLEAN_REPLACEMENTS: [(&str, &str); 6] = [
    (",0,", ",FALSE,"),
    (",1,", ",TRUE,"),
    ("(0,", "(FALSE,"),
    ("(1,", "(TRUE,"),
    (",0)", ",FALSE)"),
    (",1)", ",TRUE)"),
];

static RE_DOUBLED_QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r#"""([^"]+)"""#).unwrap());

/// Statistics from a data-only conversion
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DataOnlyStats {
    /// INSERT lines kept from the input
    pub insert_statements: u64,
    /// Epoch values rewritten as timestamps
    pub timestamps_converted: u64,
    /// Epoch-looking values left as quoted digits
    pub timestamps_unconverted: u64,
}

/// Rendered output plus what happened while producing it
#[derive(Debug, Clone)]
pub struct DataOnlyOutput {
    pub content: String,
    pub stats: DataOnlyStats,
}

/// Extracts and rewrites INSERT statements from a SQLite dump
#[derive(Debug, Clone)]
pub struct DataOnlyConverter {
    zone: TimestampZone,
    generated_at: NaiveDateTime,
}

impl Default for DataOnlyConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl DataOnlyConverter {
    pub fn new() -> Self {
        Self {
            zone: TimestampZone::Local,
            generated_at: Local::now().naive_local(),
        }
    }

    pub fn with_zone(mut self, zone: TimestampZone) -> Self {
        self.zone = zone;
        self
    }

    /// Fix the "Generated on" header time
    pub fn with_generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Convert a dump. Returns None when it holds no INSERT statements.
    pub fn convert(&self, content: &str) -> Option<DataOnlyOutput> {
        let lines = self.extract_insert_lines(content);
        if lines.is_empty() {
            return None;
        }

        let mut stats = DataOnlyStats {
            insert_statements: lines.len() as u64,
            ..Default::default()
        };

        let mut body = rules::quote_insert_table(&lines.join("\n"));

        let (converted, counts) = timestamps::convert_timestamps(&body, self.zone);
        body = converted;
        stats.timestamps_converted = counts.converted;
        stats.timestamps_unconverted = counts.unconverted;

        body = self.convert_booleans(&body);
        body = rules::leading_null_to_default(&body);
        body = self.collapse_doubled_quotes(&body);

        Some(DataOnlyOutput {
            content: self.render(&body),
            stats,
        })
    }

    /// Lines whose trimmed start is `INSERT INTO`, untrimmed, in input order
    pub fn extract_insert_lines<'a>(&self, content: &'a str) -> Vec<&'a str> {
        content
            .split('\n')
            .filter(|line| line.trim_start().starts_with(INSERT_PREFIX))
            .collect()
    }

    /// Rewrite `0`/`1` at value-list boundaries to `FALSE`/`TRUE`.
    ///
    /// Each pattern replaces non-overlapping matches, so in `,0,0,` only the
    /// first zero is rewritten.
    pub fn convert_booleans(&self, content: &str) -> String {
        let mut result = content.to_string();
        for (from, to) in BOOLEAN_REPLACEMENTS {
            result = result.replace(from, to);
        }
        result
    }

    /// `""name""` → `"name"`
    pub fn collapse_doubled_quotes(&self, content: &str) -> String {
        RE_DOUBLED_QUOTES
            .replace_all(content, r#""${1}""#)
            .to_string()
    }

    /// Wrap the converted body with session settings and FK-check toggles.
    pub fn render(&self, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + 512);
        out.push_str("-- Data import for PostgreSQL (converted from SQLite)\n");
        out.push_str(&format!(
            "-- Generated on {}\n",
            self.generated_at.format(timestamps::TIMESTAMP_FORMAT)
        ));
        out.push_str("SET client_encoding = 'UTF8';\n");
        out.push_str("SET standard_conforming_strings = on;\n");
        out.push('\n');
        out.push_str("-- Temporarily disable foreign key checks for data import\n");
        out.push_str("SET session_replication_role = replica;\n");
        out.push('\n');
        out.push_str(body);
        out.push_str("\n\n-- Re-enable foreign key checks\n");
        out.push_str("SET session_replication_role = DEFAULT;\n");
        out
    }
}
