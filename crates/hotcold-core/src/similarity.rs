//! Cosine similarity between embedding vectors.

use crate::error::{GameError, GameResult};

/// Compute the cosine similarity of two vectors.
///
/// Components are accumulated in `f64`. Returns a value in `[-1.0, 1.0]`;
/// if either vector has zero norm the result is `0.0`.
///
/// # Errors
///
/// [`GameError::DimensionMismatch`] when the vectors differ in length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> GameResult<f64> {
    if a.len() != b.len() {
        return Err(GameError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let x = f64::from(x);
        let y = f64::from(y);
        dot = x.mul_add(y, dot);
        norm_a = x.mul_add(x, norm_a);
        norm_b = y.mul_add(y, norm_b);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_similarity_is_one() {
        let v = [0.3_f32, -1.2, 4.5, 0.01];
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < 1e-9, "got {sim}");
    }

    #[test]
    fn orthogonal_is_zero() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 2.0]).unwrap();
        assert!(sim.abs() < 1e-12);
    }

    #[test]
    fn opposite_is_negative_one() {
        let sim = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_vectors_give_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn empty_vectors_give_zero() {
        assert_eq!(cosine_similarity(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn scale_invariant() {
        let a = cosine_similarity(&[1.0, 2.0, 3.0], &[3.0, 1.0, 2.0]).unwrap();
        let b = cosine_similarity(&[10.0, 20.0, 30.0], &[3.0, 1.0, 2.0]).unwrap();
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn length_mismatch_errors() {
        let err = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            GameError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }
}
