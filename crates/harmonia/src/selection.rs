//! Chart-biased random choice of scale degrees.

use rand::Rng;

/// Closeness of every index to a fractional target position, `1 - |i - t| / n`.
fn closeness(len: usize, fraction: f64) -> impl Iterator<Item = f64> {
    let n = len as f64;
    let target = fraction * (n - 1.0).max(0.0);
    (0..len).map(move |i| 1.0 - (i as f64 - target).abs() / n)
}

/// Probability of each scale degree for a planet.
///
/// Each weight averages the closeness to the sign-degree position
/// (`degree / 30`) and to the house position (`house / 12`); the result is
/// normalised to sum to 1.
pub fn scale_degree_weights(scale_len: usize, sign_degree: f64, house: u8) -> Vec<f64> {
    if scale_len == 0 {
        return Vec::new();
    }
    let weights: Vec<f64> = closeness(scale_len, sign_degree / 30.0)
        .zip(closeness(scale_len, house as f64 / 12.0))
        .map(|(by_degree, by_house)| ((by_degree + by_house) / 2.0).max(0.0))
        .collect();

    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return vec![1.0 / scale_len as f64; scale_len];
    }
    weights.into_iter().map(|w| w / total).collect()
}

/// Cumulative-weight roulette over normalised weights.
pub fn select_weighted<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if roll < cumulative {
            return index;
        }
    }
    // rounding left the roll past the last bucket
    weights.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_weights_are_normalised_and_biased() {
        let weights = scale_degree_weights(7, 0.0, 1);
        assert_eq!(weights.len(), 7);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        // both targets sit near the root
        assert!(weights[0] > weights[6]);

        let late = scale_degree_weights(7, 29.0, 12);
        assert!(late[6] > late[0]);
    }

    #[test]
    fn test_single_degree_scale() {
        assert_eq!(scale_degree_weights(1, 15.0, 6), vec![1.0]);
        assert!(scale_degree_weights(0, 15.0, 6).is_empty());
    }

    #[test]
    fn test_roulette_stays_in_range_and_follows_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let weights = [0.0, 1.0, 0.0];
        for _ in 0..100 {
            assert_eq!(select_weighted(&weights, &mut rng), 1);
        }

        let weights = scale_degree_weights(7, 0.0, 1);
        let mut hits = [0usize; 7];
        for _ in 0..5000 {
            hits[select_weighted(&weights, &mut rng)] += 1;
        }
        assert!(hits[0] > hits[6]);
    }
}
