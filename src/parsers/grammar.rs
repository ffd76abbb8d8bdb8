//! Container grammar shared by every LiveStats decoder.
//!
//! A payload such as `[1|9|UMTS] [NI.Type=CEL] [NI.Name=Modem]` is a list of
//! bracketed containers separated by `"] ["`. Each container holds `|`-separated
//! fields, either positional values or `key=value` pairs.

use super::types::Fields;

pub const CONTAINER_DELIMITER: &str = "] [";
pub const FIELD_DELIMITER: char = '|';
pub const PAIR_DELIMITER: char = '=';

/// Split a payload into containers with every bracket character removed.
///
/// An empty payload has no containers.
pub fn containers(data: &str) -> Vec<String> {
    if data.is_empty() {
        return vec![];
    }
    data.split(CONTAINER_DELIMITER).map(strip_brackets).collect()
}

pub fn strip_brackets(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '[' | ']')).collect()
}

pub fn fields(container: &str) -> impl Iterator<Item = &str> {
    container.split(FIELD_DELIMITER)
}

/// Split a field once on `=`. Fields without `=` are not pairs.
pub fn split_pair(field: &str) -> Option<(&str, &str)> {
    field.split_once(PAIR_DELIMITER)
}

pub fn has_pairs(container: &str) -> bool {
    container.contains(PAIR_DELIMITER)
}

/// Merge every `key=value` field of a container. Later keys overwrite earlier ones.
pub fn merge_pairs(container: &str, out: &mut Fields) {
    for field in fields(container) {
        merge_pair(field, out);
    }
}

/// Merge a single `key=value` text, leaving `out` untouched when there is no `=`.
pub fn merge_pair(text: &str, out: &mut Fields) {
    if let Some((key, value)) = split_pair(text) {
        out.insert(key.to_string(), value.to_string());
    }
}

/// Write positional fields to `keys` in order.
///
/// Keys past the end of the container are left out of the mapping.
pub fn assign_positional(container: &str, keys: &[&str], out: &mut Fields) {
    for (key, value) in keys.iter().zip(fields(container)) {
        out.insert((*key).to_string(), value.to_string());
    }
}
