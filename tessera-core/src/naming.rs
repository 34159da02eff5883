//! Naming helpers for catalog entities
//!
//! FQNs are dot-separated; a segment wrapped in double quotes may itself
//! contain dots (e.g. `mysql.shop."orders.v2"`).

use crate::domain::pipeline::PipelineType;

const FQN_SEPARATOR: char = '.';

/// Characters that are not allowed in generated pipeline names
const SPECIAL_CHARS: &[char] = &[
    '&', '/', '\\', '#', ',', ' ', '+', '(', ')', '$', '~', '%', '.', '\'', '"', ':', '*', '?',
    '<', '>', '{', '}',
];

/// Splits an FQN into its segments, keeping quoted segments intact
///
/// Quotes are stripped from the returned segments.
pub fn split_fqn(fqn: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in fqn.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            FQN_SEPARATOR if !in_quotes => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);

    parts
}

/// Last segment of an FQN (the entity's own name)
pub fn name_from_fqn(fqn: &str) -> String {
    split_fqn(fqn).pop().unwrap_or_default()
}

/// Replaces every special character with `_`
pub fn replace_special_chars(text: &str) -> String {
    text.chars()
        .map(|c| if SPECIAL_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Default name of an ingestion pipeline for a source
pub fn ingestion_name(source_name: &str, pipeline_type: PipelineType) -> String {
    format!("{}_{}", source_name, pipeline_type)
}
