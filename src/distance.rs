//! Distance helpers for dense vectors.
//!
//! The index itself is metric-agnostic: all distance computation goes through
//! a [`Space`](crate::space::Space) implementation. This module provides the
//! handful of dense-vector functions the shipped spaces are built on.

/// L2 (Euclidean) distance.
///
/// If dimensions mismatch, this returns `f32::INFINITY` (so the pair is never
/// selected as a nearest neighbor).
#[inline]
#[must_use]
pub fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f32>()
        .sqrt()
}

/// Cosine distance $1 - \cos(a,b)$.
///
/// Computes norms when needed, so it does **not** require pre-normalized
/// vectors. Zero-norm inputs get distance 1.0.
#[inline]
#[must_use]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }
    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a < 1e-10 || norm_b < 1e-10 {
        return 1.0;
    }
    1.0 - (dot(a, b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Dot product.
#[inline]
#[must_use]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// L2 norm.
#[inline]
#[must_use]
pub fn norm(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

/// Normalize a vector to unit L2 norm.
#[inline]
#[must_use]
pub fn normalize(v: &[f32]) -> Vec<f32> {
    let n = norm(v);
    if n < 1e-10 {
        return vec![0.0; v.len()];
    }
    v.iter().map(|x| x / n).collect()
}
