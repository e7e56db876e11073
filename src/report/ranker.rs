use std::cmp::Ordering;

use super::types::Suggestion;

/// Orders suggestions by score, highest first. `sort_by` is stable, so
/// equal scores keep their input order and an expanded index keeps pointing
/// at the same suggestion across re-fetches.
pub fn rank(mut suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    suggestions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    suggestions
}
