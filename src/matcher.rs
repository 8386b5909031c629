//! Regex compilation and file-name filtering.
//!
//! Matching is an unanchored search: the pattern may match anywhere inside a
//! name (`Regex::is_match` semantics). Callers that want whole-name matches
//! anchor the pattern themselves (`^...$`).

use regex::Regex;
use tracing::debug;

use crate::errors::MoverError;

/// Compile `pattern`, surfacing compilation failure as a typed error rather
/// than an empty match set.
pub fn compile(pattern: &str) -> Result<Regex, MoverError> {
    Regex::new(pattern).map_err(|source| MoverError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Filter `names` down to those matching `re`, preserving the input order.
/// An empty result is a valid outcome, distinct from a compile failure.
pub fn filter_names(re: &Regex, names: &[String]) -> Vec<String> {
    let matched: Vec<String> = names.iter().filter(|n| re.is_match(n)).cloned().collect();
    debug!(
        pattern = %re.as_str(),
        candidates = names.len(),
        matched = matched.len(),
        "Filtered file names"
    );
    matched
}
