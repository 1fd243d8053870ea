//! Small fixed-size vector helpers used by the geometry and velocity modules.

/// Euclidean norm of a 3-vector.
#[inline]
pub fn norm(v: &[f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

/// Dot product.
#[inline]
pub fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cross product `a x b`.
#[inline]
pub fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn sub(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale(v: &[f64; 3], k: f64) -> [f64; 3] {
    [v[0] * k, v[1] * k, v[2] * k]
}

/// `a * u + b * w`
#[inline]
pub fn combine(a: f64, u: &[f64; 3], b: f64, w: &[f64; 3]) -> [f64; 3] {
    [
        a * u[0] + b * w[0],
        a * u[1] + b * w[1],
        a * u[2] + b * w[2],
    ]
}
