//! Sheet naming for workbook assembly
//!
//! Sheet names must be unique within a workbook and at most 31 characters.
//! Lengths are counted in `char`s, never bytes, so multi-byte labels
//! truncate cleanly.

use std::collections::HashSet;

use fieldbook_core::types::SHEET_NAME_MAX_LEN;

/// Characters the workbook format forbids in sheet names.
const FORBIDDEN_CHARS: [char; 6] = ['\\', '/', '?', '*', '[', ']'];

/// Strip forbidden characters and truncate to the sheet-name cap.
#[must_use]
pub fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .collect();
    truncate_chars(&cleaned, SHEET_NAME_MAX_LEN)
}

/// Return a collision-free sheet name for `desired`.
///
/// The desired name is truncated to 31 characters; if that is taken, an
/// increasing integer suffix is appended, re-truncating the base each time
/// so the result stays within the cap: the available base space shrinks as
/// the suffix gains digits. The used-set is not mutated; callers insert the
/// returned name before the next allocation of the same assembly session.
#[must_use]
pub fn allocate(desired: &str, used: &HashSet<String>) -> String {
    let base = truncate_chars(desired, SHEET_NAME_MAX_LEN);
    if !used.contains(&base) {
        return base;
    }
    let mut suffix: u32 = 1;
    loop {
        let digits = suffix.to_string();
        let room = SHEET_NAME_MAX_LEN.saturating_sub(digits.len());
        let candidate = format!("{}{digits}", truncate_chars(&base, room));
        if !used.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
