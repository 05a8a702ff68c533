//! SQL string-literal escaping
//!
//! Values are always emitted as single-quoted string literals; no type
//! inference is attempted.

/// Escape one field for embedding in a SQL string literal.
///
/// Every embedded single quote is replaced with the escape text followed
/// by the original quote (a plain textual substitution across the whole
/// field), and the result is wrapped in single quotes.
pub fn escape_field(field: &str, escape_char: &str) -> String {
    let escaped = field.replace('\'', &format!("{escape_char}'"));
    format!("'{escaped}'")
}

/// Escape every field of a row, preserving order.
pub fn escape_row(fields: &[String], escape_char: &str) -> Vec<String> {
    fields
        .iter()
        .map(|field| escape_field(field, escape_char))
        .collect()
}
