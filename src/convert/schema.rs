//! Schema-and-data conversion of a full SQLite dump.
//!
//! Rewrites table definitions and INSERT statements for PostgreSQL:
//! - PRAGMA removal
//! - Identifier quoting (backticks → double quotes)
//! - Type keyword casing (integer → INTEGER, ...)
//! - AUTOINCREMENT → SERIAL
//! - Boolean literal casing
//! - REFERENCES quoting
//!
//! The rules are blind text substitutions. A column literally named `text`
//! or `real` is upper-cased along with the real type keywords.

use super::rules;
use once_cell::sync::Lazy;
use regex::Regex;

/// Header written before the converted dump
pub const SCHEMA_PREAMBLE: &str = "-- Converted from SQLite to PostgreSQL
SET client_encoding = 'UTF8';
SET standard_conforming_strings = on;

";

static RE_PRAGMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"PRAGMA[^;]+;").unwrap());
static RE_BACKTICK: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

static RE_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\binteger\b").unwrap());
static RE_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btext\b").unwrap());
static RE_REAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\breal\b").unwrap());
static RE_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bnumeric\b").unwrap());

static RE_AUTOINCREMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bINTEGER PRIMARY KEY AUTOINCREMENT\b").unwrap());
static RE_DEFAULT_TS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"DEFAULT \(CURRENT_TIMESTAMP\)").unwrap());

static RE_FALSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfalse\b").unwrap());
static RE_TRUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\btrue\b").unwrap());

static RE_REFERENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"REFERENCES ([^(]+)\(([^)]+)\)").unwrap());
static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Converts a full SQLite dump (schema and data) to PostgreSQL syntax
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaConverter;

impl SchemaConverter {
    pub fn new() -> Self {
        Self
    }

    /// Run every rule in order and prepend the session preamble.
    pub fn convert(&self, content: &str) -> String {
        let mut result = self.strip_pragmas(content);
        result = self.backticks_to_double_quotes(&result);
        result = self.normalize_type_keywords(&result);
        result = self.autoincrement_to_serial(&result);
        result = self.normalize_default_timestamp(&result);
        result = self.uppercase_booleans(&result);
        result = rules::quote_insert_table(&result);
        result = rules::leading_null_to_default(&result);
        result = self.quote_references(&result);
        result = self.collapse_blank_lines(&result);

        let mut output = String::with_capacity(SCHEMA_PREAMBLE.len() + result.len());
        output.push_str(SCHEMA_PREAMBLE);
        output.push_str(&result);
        output
    }

    /// Remove `PRAGMA ...;` directives
    pub fn strip_pragmas(&self, content: &str) -> String {
        RE_PRAGMA.replace_all(content, "").to_string()
    }

    /// Convert backtick identifiers to double quotes
    pub fn backticks_to_double_quotes(&self, content: &str) -> String {
        RE_BACKTICK.replace_all(content, r#""${1}""#).to_string()
    }

    /// Upper-case the SQLite storage class keywords
    pub fn normalize_type_keywords(&self, content: &str) -> String {
        let result = RE_INTEGER.replace_all(content, "INTEGER");
        let result = RE_TEXT.replace_all(&result, "TEXT");
        let result = RE_REAL.replace_all(&result, "REAL");
        RE_NUMERIC.replace_all(&result, "NUMERIC").to_string()
    }

    /// INTEGER PRIMARY KEY AUTOINCREMENT → SERIAL PRIMARY KEY
    pub fn autoincrement_to_serial(&self, content: &str) -> String {
        RE_AUTOINCREMENT
            .replace_all(content, "SERIAL PRIMARY KEY")
            .to_string()
    }

    /// DEFAULT (CURRENT_TIMESTAMP) → DEFAULT CURRENT_TIMESTAMP
    pub fn normalize_default_timestamp(&self, content: &str) -> String {
        RE_DEFAULT_TS
            .replace_all(content, "DEFAULT CURRENT_TIMESTAMP")
            .to_string()
    }

    /// Lowercase `true`/`false` → `TRUE`/`FALSE`. Case-sensitive.
    pub fn uppercase_booleans(&self, content: &str) -> String {
        let result = RE_FALSE.replace_all(content, "FALSE");
        RE_TRUE.replace_all(&result, "TRUE").to_string()
    }

    /// `REFERENCES table(col)` → `REFERENCES "table"("col")`
    ///
    /// Everything between `REFERENCES ` and the opening parenthesis is taken as
    /// the table name, so `REFERENCES users (id)` keeps the trailing space
    /// inside the quotes.
    pub fn quote_references(&self, content: &str) -> String {
        RE_REFERENCES
            .replace_all(content, r#"REFERENCES "${1}"("${2}")"#)
            .to_string()
    }

    /// Collapse runs of blank (or whitespace-only) lines to one blank line
    pub fn collapse_blank_lines(&self, content: &str) -> String {
        RE_BLANK_LINES.replace_all(content, "\n\n").to_string()
    }
}
