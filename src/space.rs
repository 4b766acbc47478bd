//! Similarity-space abstractions.
//!
//! A [`Space`] is the distance oracle the index consumes: given two payloads
//! it returns a scalar distance. The space may be **non-metric**: the index
//! never assumes symmetry or the triangle inequality, only that smaller means
//! closer under `f32::total_cmp` ordering.

use crate::distance;

/// A distance oracle over payloads of type `P`.
///
/// Implementations must not mutate shared state: distance computation runs
/// concurrently from indexing workers without any locks held.
///
/// Any `Fn(&P, &P) -> f32` closure is a `Space`, which keeps ad-hoc spaces
/// cheap to stand up:
///
/// ```
/// use entorno::Space;
///
/// let space = |a: &i64, b: &i64| (a - b).abs() as f32;
/// assert_eq!(space.distance(&3, &10), 7.0);
/// ```
pub trait Space<P> {
    /// Distance from `a` to `b`. Smaller is closer.
    fn distance(&self, a: &P, b: &P) -> f32;
}

impl<P, F> Space<P> for F
where
    F: Fn(&P, &P) -> f32,
{
    #[inline]
    fn distance(&self, a: &P, b: &P) -> f32 {
        self(a, b)
    }
}

/// Euclidean (L2) distance over dense-vector payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl<P: AsRef<[f32]>> Space<P> for Euclidean {
    #[inline]
    fn distance(&self, a: &P, b: &P) -> f32 {
        distance::l2_distance(a.as_ref(), b.as_ref())
    }
}

/// Cosine distance $1 - \cos(a,b)$ over dense-vector payloads.
///
/// Computes norms on the fly; inputs need not be pre-normalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cosine;

impl<P: AsRef<[f32]>> Space<P> for Cosine {
    #[inline]
    fn distance(&self, a: &P, b: &P) -> f32 {
        distance::cosine_distance(a.as_ref(), b.as_ref())
    }
}

/// Absolute difference over scalar payloads, `|a - b|`.
///
/// The simplest possible space; mostly useful for tests and sanity checks
/// where exact expected neighbors are easy to reason about.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteDifference;

impl Space<i64> for AbsoluteDifference {
    #[inline]
    fn distance(&self, a: &i64, b: &i64) -> f32 {
        (a - b).abs() as f32
    }
}

impl Space<f32> for AbsoluteDifference {
    #[inline]
    fn distance(&self, a: &f32, b: &f32) -> f32 {
        (a - b).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_over_vec_payloads() {
        let a = vec![0.0_f32, 0.0];
        let b = vec![3.0_f32, 4.0];
        assert!((Euclidean.distance(&a, &b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn absolute_difference_over_integers() {
        assert_eq!(AbsoluteDifference.distance(&34_i64, &30_i64), 4.0);
        assert_eq!(AbsoluteDifference.distance(&30_i64, &34_i64), 4.0);
    }

    #[test]
    fn closures_are_spaces() {
        // A deliberately asymmetric (non-metric) space.
        let skewed = |a: &f32, b: &f32| if a < b { b - a } else { (a - b) * 2.0 };
        assert_eq!(skewed.distance(&1.0, &3.0), 2.0);
        assert_eq!(skewed.distance(&3.0, &1.0), 4.0);
    }
}
