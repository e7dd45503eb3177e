//! Substitution rules shared by both converters.
//!
//! Each rule is a total function over the whole dump buffer: when nothing
//! matches, the input comes back unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

/// Bare table name after `INSERT INTO` (anything up to a quote, whitespace or `(`)
static RE_INSERT_TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"INSERT INTO ([^"\s(]+)"#).unwrap());

static RE_VALUES_NULL: Lazy<Regex> = Lazy::new(|| Regex::new(r"VALUES\(NULL,").unwrap());

/// Wrap the table name of every `INSERT INTO name` in double quotes.
///
/// Names that already start with a double quote are left alone, so
/// `INSERT INTO "users"` passes through untouched.
pub fn quote_insert_table(content: &str) -> String {
    RE_INSERT_TABLE
        .replace_all(content, r#"INSERT INTO "${1}""#)
        .to_string()
}

/// Replace a NULL first value (SQLite's rowid placeholder) with DEFAULT so the
/// PostgreSQL sequence assigns the key.
pub fn leading_null_to_default(content: &str) -> String {
    RE_VALUES_NULL
        .replace_all(content, "VALUES(DEFAULT,")
        .to_string()
}
