//! Parsing of comma-separated item names (alternatives and criteria).

use std::collections::HashSet;

use super::ValidationError;

/// Splits comma-separated free text into an ordered list of item names.
///
/// Entries are trimmed. Empty entries and repeated names are rejected because
/// matrices are addressed by label and a repeated label would be ambiguous.
///
/// # Errors
/// - `EmptyField` if the input contains no names at all
/// - `InvalidFormat` for an empty entry (e.g. `"A,,B"`) or a duplicate
pub fn parse_item_names(input: &str, field: &str) -> Result<Vec<String>, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }

    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for (position, raw) in input.split(',').enumerate() {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ValidationError::invalid_format(
                field,
                format!("entry {} is empty", position + 1),
            ));
        }
        if !seen.insert(name) {
            return Err(ValidationError::invalid_format(
                field,
                format!("duplicate name '{}'", name),
            ));
        }
        names.push(name.to_string());
    }

    Ok(names)
}
