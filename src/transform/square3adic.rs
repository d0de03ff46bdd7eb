//! The square-wave 3-adic transform (`fst`): an integer-domain butterfly
//! over `(Z/3Z)^2`-valued vectors, each point encoded as a single `u8`,
//! with an 8-phase piecewise-constant rotation table standing in for the
//! ordinary complex twiddle, per spec.md §4.6 / glossary's "2-D
//! integer-coordinate FFT over `Z/3Z^2`".
//!
//! Grounded on `original_source/mbin_fst.c`: a vector is packed as
//! `r_x + 3*r_y` for `r_x, r_y` in `0..3` (9 possible values, though only
//! 8 nonzero ones plus 0 ever occur as the "no value" element);
//! [`ANGLE_TO_VECTOR`]/[`VECTOR_TO_ANGLE`] are
//! `mbin_fst_angle_to_vector`/`vector_to_angle`; [`multiply_2d`] and
//! [`angleadd_2d`] are `mbin_fst_multiply_2d`/`angleadd_2d`; [`add_2d`]
//! and [`sub_2d`] are `mbin_fst_add_2d`/`sub_2d`; [`forward`]/[`inverse`]
//! are `mbin_fst_fwd_2d`/`inv_2d` — the same in-place butterfly and
//! final/initial bit-reversal reorder pass as [`super::triangle`], but
//! with a fixed bit-reversed-index mask of 2 (the 8-phase angle only
//! spans 3 bits) rather than `max / 4`.
//!
//! Unlike the old placeholder this replaces, the transform length here
//! is `2^k` (a butterfly over `k` stages), not `3^k` — the "3-adic" in
//! the name describes the per-element vector space, not the array
//! length's radix.

/// Maps an 8-phase angle (plus the implicit zero/no-value padding the
/// original leaves past index 15) back to a packed vector
/// (`mbin_fst_angle_to_vector`). Index 16 and above are the sentinel
/// region: angle-adding the zero vector always lands back on 0.
const ANGLE_TO_VECTOR: [u8; 33] = [
    1, 7, 6, 8, 2, 5, 3, 4, 1, 7, 6, 8, 2, 5, 3, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0,
];

/// Maps a packed vector to its angle (`mbin_fst_vector_to_angle`). Index
/// 0 (the zero vector) maps to the sentinel `16`, which lands in
/// [`ANGLE_TO_VECTOR`]'s always-zero tail.
const VECTOR_TO_ANGLE: [u8; 9] = [16, 0, 4, 6, 7, 5, 2, 1, 3];

/// Two-dimensional vector multiplication (`mbin_fst_multiply_2d`):
/// converts both operands to angles, adds, converts back.
pub fn multiply_2d(a: u8, b: u8) -> u8 {
    let angle = VECTOR_TO_ANGLE[a as usize] + VECTOR_TO_ANGLE[b as usize];
    ANGLE_TO_VECTOR[angle as usize]
}

/// Rotates `a` by `angle` (`mbin_fst_angleadd_2d`): the twiddle multiply
/// the butterfly network below uses.
fn angleadd_2d(a: u8, angle: u8) -> u8 {
    let a_angle = VECTOR_TO_ANGLE[a as usize];
    ANGLE_TO_VECTOR[(a_angle + angle) as usize]
}

/// Two-dimensional vector addition (`mbin_fst_add_2d`): componentwise
/// mod 3, exploiting that `a + b` taken mod 3 over the packed
/// representation already gives the `r_x` sum, and `a/3 + b/3` mod 3
/// gives the `r_y` sum.
fn add_2d(a: u8, b: u8) -> u8 {
    let r_x = (a + b) % 3;
    let r_y = ((a / 3) + (b / 3)) % 3;
    r_x + 3 * r_y
}

/// Two-dimensional vector subtraction (`mbin_fst_sub_2d`).
fn sub_2d(a: u8, b: u8) -> u8 {
    let r_x = (9 + a - b) % 3;
    let r_y = (3 + (a / 3) - (b / 3)) % 3;
    r_x + 3 * r_y
}

/// Forward square-wave 3-adic transform, in place (`mbin_fst_fwd_2d`).
/// `data.len()` must be a power of two; every element must be one of
/// the 9 packed vector values `0..=8`.
pub fn forward(data: &mut [u8]) {
    let max = data.len();
    assert!(max.is_power_of_two(), "transform length must be a power of two");
    if max <= 1 {
        return;
    }

    let mut step = max;
    loop {
        step /= 2;
        if step == 0 {
            break;
        }
        let mut y = 0;
        let mut z: u8 = 0;
        while y != max {
            for x in 0..step {
                let t0 = data[x + y];
                let t1 = angleadd_2d(data[x + y + step], z);
                data[x + y] = add_2d(t0, t1);
                data[x + y + step] = sub_2d(t0, t1);
            }
            z = super::add_bitreversed(z as usize, 2) as u8;
            y += 2 * step;
        }
    }

    let bits = max.trailing_zeros();
    for x in 0..max {
        let y = super::bitrev_lowbits(x, bits);
        if y < x {
            data.swap(x, y);
        }
    }
}

/// Inverse of [`forward`] (`mbin_fst_inv_2d`).
pub fn inverse(data: &mut [u8]) {
    let max = data.len();
    assert!(max.is_power_of_two(), "transform length must be a power of two");
    if max <= 1 {
        return;
    }

    let bits = max.trailing_zeros();
    for x in 0..max {
        let y = super::bitrev_lowbits(x, bits);
        if y < x {
            data.swap(x, y);
        }
    }

    let mut step = 1;
    while step != max {
        let mut y = 0;
        let mut z: u8 = 0;
        while y != max {
            for x in 0..step {
                let t0 = add_2d(data[x + y], data[x + y + step]);
                let t1 = sub_2d(data[x + y], data[x + y + step]);
                data[x + y] = t0;
                data[x + y + step] = angleadd_2d(t1, (8 - z) & 7);
            }
            z = super::add_bitreversed(z as usize, 2) as u8;
            y += 2 * step;
        }
        step *= 2;
    }
}

/// Pointwise vector multiply of two forward-transformed arrays
/// (`mbin_fst_mul_2d`), the step between [`forward`] and [`inverse`]
/// that realizes convolution under the square-wave-multiply algebra.
pub fn mul(pa: &[u8], pb: &[u8]) -> Vec<u8> {
    assert_eq!(pa.len(), pb.len());
    pa.iter().zip(pb.iter()).map(|(&a, &b)| multiply_2d(a, b)).collect()
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let orig = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut data = orig.clone();
        forward(&mut data);
        inverse(&mut data);
        assert_eq!(data, orig);
    }

    #[test]
    fn angleadd_of_zero_vector_is_always_zero() {
        for angle in 0u8..8 {
            assert_eq!(angleadd_2d(0, angle), 0);
        }
    }

    /// The untouched leg at every butterfly step is the packed zero
    /// vector `0`, and [`angleadd_2d`] of `0` is always `0` (its angle
    /// lands in the table's always-zero sentinel region), so a single
    /// nonzero value propagates unrotated to every output slot.
    #[test]
    fn impulse_transforms_to_a_flat_array() {
        let mut data = vec![0u8; 4];
        data[0] = 1;
        forward(&mut data);
        assert_eq!(data, vec![1, 1, 1, 1]);
    }

    /// Pointwise-multiplying by the (flat) transform of the impulse is
    /// the identity, so `inverse(mul(forward(a), forward(e0))) == a` —
    /// spec.md §8 property 7's convolution-equivalence check
    /// instantiated at the multiplicative identity (packed value `1`,
    /// the "positive, 0 degrees" vector).
    #[test]
    fn convolution_with_impulse_is_identity() {
        let a = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut impulse = vec![0u8; 8];
        impulse[0] = 1;

        let mut fa = a.clone();
        forward(&mut fa);
        let mut fe = impulse;
        forward(&mut fe);

        let prod = mul(&fa, &fe);
        let mut back = prod;
        inverse(&mut back);
        assert_eq!(back, a);
    }
}
