use crate::error::{LedgerError, LedgerResult};

/// Keep alphabetic characters only, then upper-case the first and lower-case the rest.
#[inline]
pub fn normalize(name: &str) -> String {
    let mut letters = name.chars().filter(|c| c.is_alphabetic());

    match letters.next() {
        Some(first) => first
            .to_uppercase()
            .chain(letters.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Normalize a person name, rejecting input with no letters at all.
pub fn normalize_required(field: &'static str, name: &str) -> LedgerResult<String> {
    let normalized = normalize(name);
    if normalized.is_empty() {
        return Err(LedgerError::invalid(field, "must contain at least one letter"));
    }
    Ok(normalized)
}
