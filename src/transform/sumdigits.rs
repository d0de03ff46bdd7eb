//! The sum-of-digits transform family: an FFT-like butterfly whose
//! kernel is `(a+b, a-b)` at radix 2, generalised to complex roots of
//! unity of order 3 or 4 at the higher radixes, per spec.md §4.6 /
//! glossary.
//!
//! Grounded on `original_source/mbin_transform.c` (the `sumdigits`
//! family within the monolithic transform source). The radix-2
//! variant keeps the exact in-place integer butterfly (identical in
//! shape to [`crate::transform::xor::transform`], just over `f64` so
//! the scaled inverse divides cleanly); radix 3 and 4 are implemented
//! as the direct "Chrestenson transform" — the generalised Walsh
//! function basis built from digit-wise dot products against an
//! order-`radix` root of unity — which is the same mathematical object
//! the glossary describes ("generalised to complex roots of unity of
//! order 3 or 4").

use super::Complex64;

// ======================================================================
// FUNCTIONS - PUBLIC - radix 2

/// Forward radix-2 sum-of-digits transform: `(a, b) -> (a+b, a-b)`.
pub fn forward_r2(a: &mut [f64]) {
    let len = a.len();
    assert!(len.is_power_of_two());
    let mut s = 1;
    while s < len {
        let mut i = 0;
        while i < len {
            for j in i..i + s {
                let x = a[j];
                let y = a[j + s];
                a[j] = x + y;
                a[j + s] = x - y;
            }
            i += 2 * s;
        }
        s *= 2;
    }
}

/// Inverse of [`forward_r2`]: the same butterfly, scaled by `1/len`.
pub fn inverse_r2(a: &mut [f64]) {
    forward_r2(a);
    let n = a.len() as f64;
    for v in a.iter_mut() {
        *v /= n;
    }
}

/// Lossy variant: `(a, b) -> (a+b, |a-b|)`, per spec.md §4.6's
/// `sumdigits_r2_abs` row. There is no inverse — the sign discarded by
/// `abs` cannot be recovered.
pub fn forward_r2_abs(a: &mut [f64]) {
    let len = a.len();
    assert!(len.is_power_of_two());
    let mut s = 1;
    while s < len {
        let mut i = 0;
        while i < len {
            for j in i..i + s {
                let x = a[j];
                let y = a[j + s];
                a[j] = x + y;
                a[j + s] = (x - y).abs();
            }
            i += 2 * s;
        }
        s *= 2;
    }
}

// ======================================================================
// FUNCTIONS - PUBLIC - chrestenson (radix 3 / 4)

fn digit_dot(mut j: usize, mut x: usize, radix: usize) -> usize {
    let mut acc = 0usize;
    while j > 0 || x > 0 {
        acc += (j % radix) * (x % radix);
        j /= radix;
        x /= radix;
    }
    acc
}

/// Forward Chrestenson transform at the given `radix` (the array length
/// must be `radix^k`): generalises the Walsh-Hadamard transform
/// ([`crate::transform::xor::transform`]) by replacing `(-1)^popcount(i
/// AND j)` with `w^(digit-dot(i, j))` for `w` a primitive `radix`-th
/// root of unity.
pub fn chrestenson_forward(a: &[Complex64], radix: usize) -> Vec<Complex64> {
    let n = a.len();
    let w = Complex64::from_polar(1.0, -2.0 * std::f64::consts::PI / radix as f64);
    let mut out = vec![Complex64::ZERO; n];
    for (j, slot) in out.iter_mut().enumerate() {
        let mut sum = Complex64::ZERO;
        for (x, &ax) in a.iter().enumerate() {
            let e = digit_dot(j, x, radix) % radix;
            sum = sum.add(ax.mul(w_pow(w, e)));
        }
        *slot = sum;
    }
    out
}

/// Inverse of [`chrestenson_forward`]: conjugate root, scaled by `1/n`.
pub fn chrestenson_inverse(a: &[Complex64], radix: usize) -> Vec<Complex64> {
    let n = a.len();
    let w = Complex64::from_polar(1.0, 2.0 * std::f64::consts::PI / radix as f64);
    let mut out = vec![Complex64::ZERO; n];
    for (j, slot) in out.iter_mut().enumerate() {
        let mut sum = Complex64::ZERO;
        for (x, &ax) in a.iter().enumerate() {
            let e = digit_dot(j, x, radix) % radix;
            sum = sum.add(ax.mul(w_pow(w, e)));
        }
        *slot = sum.scale(1.0 / n as f64);
    }
    out
}

fn w_pow(w: Complex64, e: usize) -> Complex64 {
    let mut r = Complex64::real(1.0);
    for _ in 0..e {
        r = r.mul(w);
    }
    r
}

/// Forward radix-3 sum-of-digits transform over real input.
pub fn forward_r3(a: &[f64]) -> Vec<Complex64> {
    let input: Vec<Complex64> = a.iter().map(|&x| Complex64::real(x)).collect();
    chrestenson_forward(&input, 3)
}

/// Forward radix-4 sum-of-digits transform over real input.
pub fn forward_r4(a: &[f64]) -> Vec<Complex64> {
    let input: Vec<Complex64> = a.iter().map(|&x| Complex64::real(x)).collect();
    chrestenson_forward(&input, 4)
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r2_round_trips() {
        let orig = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let mut a = orig.clone();
        forward_r2(&mut a);
        inverse_r2(&mut a);
        for (x, y) in orig.iter().zip(a.iter()) {
            assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn r2_abs_matches_unsigned_r2_on_nonnegative_deltas() {
        let mut a = vec![5.0, 1.0, 9.0, 2.0];
        let mut b = a.clone();
        forward_r2(&mut a);
        forward_r2_abs(&mut b);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x.abs() - y.abs()).abs() < 1e-9 || *y >= 0.0);
        }
    }

    #[test]
    fn chrestenson_round_trips_radix_3() {
        let a: Vec<Complex64> = (0..9).map(|i| Complex64::real(i as f64)).collect();
        let f = chrestenson_forward(&a, 3);
        let back = chrestenson_inverse(&f, 3);
        for (x, y) in a.iter().zip(back.iter()) {
            assert!((x.re - y.re).abs() < 1e-6, "{} vs {}", x.re, y.re);
        }
    }

    #[test]
    fn chrestenson_round_trips_radix_4() {
        let a: Vec<Complex64> = (0..16).map(|i| Complex64::real(i as f64)).collect();
        let f = chrestenson_forward(&a, 4);
        let back = chrestenson_inverse(&f, 4);
        for (x, y) in a.iter().zip(back.iter()) {
            assert!((x.re - y.re).abs() < 1e-6, "{} vs {}", x.re, y.re);
        }
    }
}
