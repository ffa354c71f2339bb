//! Pearson correlation over the mutual set of two sparse rating vectors.

use crate::index::RatingVector;

/// Pearson correlation of `a` and `b` over the peers both contain.
///
/// Returns 0 when the vectors share no peer or either side has no variance
/// over the shared peers. The result is clamped to `[-1, 1]`.
pub fn pearson(a: RatingVector<'_>, b: RatingVector<'_>) -> f64 {
    let (a_peers, a_ratings) = (a.peers(), a.ratings());
    let (b_peers, b_ratings) = (b.peers(), b.ratings());

    let mut n = 0usize;
    let (mut sum_a, mut sum_b) = (0.0f64, 0.0f64);
    let (mut sum_a2, mut sum_b2, mut sum_ab) = (0.0f64, 0.0f64, 0.0f64);

    let (mut i, mut j) = (0, 0);
    while i < a_peers.len() && j < b_peers.len() {
        match a_peers[i].cmp(&b_peers[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                let x = f64::from(a_ratings[i]);
                let y = f64::from(b_ratings[j]);
                n += 1;
                sum_a += x;
                sum_b += y;
                sum_a2 += x * x;
                sum_b2 += y * y;
                sum_ab += x * y;
                i += 1;
                j += 1;
            }
        }
    }

    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    let numerator = sum_ab - sum_a * sum_b / n;
    let variance_product = (sum_a2 - sum_a * sum_a / n) * (sum_b2 - sum_b * sum_b / n);
    // Also catches a product that rounding pushed below zero.
    if variance_product <= 0.0 || variance_product.is_nan() {
        return 0.0;
    }
    (numerator / variance_product.sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RatingRow;

    fn row(pairs: &[(i64, i32)]) -> RatingRow {
        RatingRow::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn three_point_example_matches_closed_form() {
        let a = row(&[(1, 5), (2, 3), (3, 4)]);
        let b = row(&[(1, 4), (2, 2), (3, 5)]);
        // numerator 2, variances 2 and 14/3
        let expected = 2.0 / (2.0 * 14.0 / 3.0f64).sqrt();
        let score = pearson(a.as_vector(), b.as_vector());
        assert!((score - expected).abs() < 1e-12, "got {score}");
        assert!((score - 0.6547).abs() < 1e-4);
    }

    #[test]
    fn only_mutual_peers_count() {
        let a = row(&[(1, 5), (2, 3), (3, 4), (7, 1)]);
        let b = row(&[(1, 4), (2, 2), (3, 5), (9, 5)]);
        let narrowed = pearson(
            row(&[(1, 5), (2, 3), (3, 4)]).as_vector(),
            row(&[(1, 4), (2, 2), (3, 5)]).as_vector(),
        );
        assert_eq!(pearson(a.as_vector(), b.as_vector()), narrowed);
    }

    #[test]
    fn zero_variance_scores_zero() {
        let flat = row(&[(1, 5), (2, 5)]);
        let other = row(&[(1, 1), (2, 4)]);
        assert_eq!(pearson(flat.as_vector(), other.as_vector()), 0.0);
        assert_eq!(pearson(other.as_vector(), flat.as_vector()), 0.0);
    }

    #[test]
    fn disjoint_or_empty_scores_zero() {
        let a = row(&[(1, 5), (2, 3)]);
        let b = row(&[(3, 4), (4, 1)]);
        assert_eq!(pearson(a.as_vector(), b.as_vector()), 0.0);
        assert_eq!(pearson(a.as_vector(), RatingVector::default()), 0.0);
    }

    #[test]
    fn single_mutual_peer_scores_zero() {
        let a = row(&[(1, 5), (2, 3)]);
        let b = row(&[(1, 2), (5, 3)]);
        assert_eq!(pearson(a.as_vector(), b.as_vector()), 0.0);
    }

    #[test]
    fn perfectly_anticorrelated() {
        let a = row(&[(1, 1), (2, 2), (3, 3)]);
        let b = row(&[(1, 3), (2, 2), (3, 1)]);
        assert!((pearson(a.as_vector(), b.as_vector()) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn self_correlation_is_one() {
        let a = row(&[(1, 1), (2, 4), (3, 2)]);
        assert!((pearson(a.as_vector(), a.as_vector()) - 1.0).abs() < 1e-12);
    }
}
