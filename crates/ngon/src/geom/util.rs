use nalgebra::Vector2;

/// Decrement modulo `n`: maps 0 to `n - 1`. Returns 0 when `n == 0`.
#[inline]
pub fn decmod(k: usize, n: usize) -> usize {
    if n == 0 {
        0
    } else if k == 0 {
        n - 1
    } else {
        (k - 1) % n
    }
}

/// Increment modulo `n`. Returns 0 when `n == 0`.
#[inline]
pub fn incmod(k: usize, n: usize) -> usize {
    if n == 0 {
        0
    } else {
        (k + 1) % n
    }
}

/// Cross product of (b - a) and (c - a): twice the signed area of abc.
#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}
