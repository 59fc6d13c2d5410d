//! Placeholder substitution.
//!
//! The output of [`bind`] is meant to be compared against an expected string in
//! tests. Values are quoted but never escaped, so the result must not be sent to
//! a real database.

use crate::{Error, Result, Value};

/// The positional placeholder marker.
pub const PLACEHOLDER: char = '?';

/// Returns the number of placeholders in `template`.
pub fn placeholder_count(template: &str) -> usize {
    template.matches(PLACEHOLDER).count()
}

/// Substitutes each placeholder in `template`, left to right, with the
/// corresponding value wrapped in double quotes.
///
/// Values beyond the number of placeholders are ignored. Text coming from a
/// value is not scanned again, so a value containing `?` does not consume the
/// next value.
///
/// ```
/// use sqlmock::{bind, params};
///
/// let sql = bind("SELECT * FROM users WHERE name = ? AND age = ?", &params!["Fred", 10]);
/// assert_eq!(
///     sql.unwrap(),
///     r#"SELECT * FROM users WHERE name = "Fred" AND age = "10""#
/// );
/// ```
pub fn bind(template: &str, values: &[Value]) -> Result<String> {
    let placeholders = placeholder_count(template);
    if values.len() < placeholders {
        return Err(Error::FormatMismatch {
            placeholders,
            values: values.len(),
        });
    }

    let mut pieces = template.split(PLACEHOLDER);
    let mut sql = String::with_capacity(template.len());
    sql.push_str(pieces.next().unwrap_or_default());
    for (piece, value) in pieces.zip(values) {
        sql.push('"');
        sql.push_str(&value.to_string());
        sql.push('"');
        sql.push_str(piece);
    }
    Ok(sql)
}
