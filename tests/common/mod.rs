//! Shared test utilities for Lambert solver integration tests.

#![allow(dead_code)]

pub mod kepler;

pub fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn norm(v: &[f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

pub fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn vec_diff_mag(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    norm(&[a[0] - b[0], a[1] - b[1], a[2] - b[2]])
}

/// Battin's consistency residual for a departure velocity.
///
/// `(v1 x r1) . (v1 x (r2 - r1)) + mu * r2 . (r2/|r2| - r1/|r1|)` vanishes for
/// any conic through r1 with velocity v1 that also passes through r2.
pub fn delta_guidance_error(r1: &[f64; 3], r2: &[f64; 3], v1: &[f64; 3], mu: f64) -> f64 {
    let chord = [r2[0] - r1[0], r2[1] - r1[1], r2[2] - r1[2]];
    let (n1, n2) = (norm(r1), norm(r2));
    let dir = [
        r2[0] / n2 - r1[0] / n1,
        r2[1] / n2 - r1[1] / n1,
        r2[2] / n2 - r1[2] / n1,
    ];
    dot(&cross(v1, r1), &cross(v1, &chord)) + mu * dot(r2, &dir)
}
