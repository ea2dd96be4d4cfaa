//! Field-type normalization for export cells
//!
//! Maps raw field-type tokens to the display strings written into workbook
//! type columns. This is a fixed lookup, intentionally simplified: it does
//! not infer precision or scale for numeric types beyond the `double`
//! special case, and callers must supply the correct length for `string`
//! fields.

/// Length substituted when a `string` field carries no usable length.
const DEFAULT_STRING_LENGTH: u32 = 500;

/// Normalize a raw field-type token to its export display string.
///
/// Matching is case-insensitive. Tokens outside the fixed table pass
/// through with only their first character upper-cased.
#[must_use]
pub fn normalize_field_type(raw_type: &str, length: Option<u32>) -> String {
    if raw_type.eq_ignore_ascii_case("reference") {
        return "Lookup(User)".to_string();
    }
    if raw_type.eq_ignore_ascii_case("double") {
        return "Number(4,0)".to_string();
    }
    if raw_type.eq_ignore_ascii_case("string") {
        let length = match length {
            Some(0) | None => DEFAULT_STRING_LENGTH,
            Some(length) => length,
        };
        return format!("Text({length})");
    }
    capitalize_first(raw_type)
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
