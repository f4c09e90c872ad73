/// Comparison key for stat names: trimmed and upper-cased.
pub(crate) fn fold_stat_name(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Comparison key for character names: lower-cased with everything but ASCII
/// letters and digits removed.
pub(crate) fn compact_name(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        .collect()
}
