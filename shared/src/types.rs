//! Common types and identifier helpers used across the platform

/// Format a sequential entity identifier, e.g. `ORD-007` or `CUST-012`.
///
/// Sequence numbers are zero-padded to three digits but grow past 999
/// without truncation.
pub fn format_entity_id(prefix: &str, sequence: u64) -> String {
    format!("{}-{:03}", prefix, sequence)
}

/// Extract the numeric sequence from an entity identifier such as `ORD-042`.
pub fn parse_entity_sequence(id: &str) -> Option<u64> {
    id.rsplit('-').next()?.parse().ok()
}

/// ISO 7064 mod 97-10 check digits for a numeric value.
///
/// Returns a value in `1..=98`; appending it as two digits makes the whole
/// number verify as `n % 97 == 1`.
pub fn mod97_check(value: u64) -> u8 {
    (98 - (value * 100 % 97)) as u8
}
