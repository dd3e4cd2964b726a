use std::ops::Range;

pub type IntentName = String;
pub type SlotName = String;
pub type EntityName = String;

/// Marker put in front of a token's raw value when the token was preceded by a space
pub const SPACE: char = '\u{2581}';

pub fn ranges_overlap(lhs: &Range<usize>, rhs: &Range<usize>) -> bool {
    lhs.start < rhs.end && rhs.start < lhs.end
}

fn is_space(c: char) -> bool {
    c == SPACE || c.is_whitespace()
}

/// Splits a raw token value into its leading whitespace, with space markers
/// replaced by actual spaces, and the remaining surface text
pub fn split_leading_space(raw_value: &str) -> (String, &str) {
    let surface_start = raw_value
        .char_indices()
        .find(|(_, c)| !is_space(*c))
        .map(|(ix, _)| ix)
        .unwrap_or_else(|| raw_value.len());
    let leading_space = raw_value[..surface_start]
        .chars()
        .map(|c| if c == SPACE { ' ' } else { c })
        .collect();
    (leading_space, &raw_value[surface_start..])
}
