// Utility functions for the recommendation engine

use crate::models::Candidate;
use std::cmp::Ordering;

/// Sort candidates by score descending, product id ascending on ties.
/// Tie-breaking on the id keeps output stable across runs.
/// Note: NaN scores are treated as equal to any other score.
pub fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecommendationSource;

    fn candidate(product_id: &str, score: f64) -> Candidate {
        Candidate {
            product_id: product_id.to_string(),
            score,
            source: RecommendationSource::Content,
        }
    }

    #[test]
    fn test_sorts_by_score_descending() {
        let mut candidates = vec![candidate("a", 0.2), candidate("b", 0.9), candidate("c", 0.5)];
        sort_candidates(&mut candidates);
        let ids: Vec<&str> = candidates.iter().map(|c| c.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_break_by_product_id() {
        let mut candidates = vec![candidate("z", 0.5), candidate("a", 0.5), candidate("m", 0.5)];
        sort_candidates(&mut candidates);
        let ids: Vec<&str> = candidates.iter().map(|c| c.product_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "m", "z"]);
    }
}
