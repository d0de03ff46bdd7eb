//! The "triangle-wave" transform (`ftt`): a lossless integer-domain
//! analogue of the FFT that replaces `sin`/`cos` with a piecewise-linear
//! triangular-wave phase function, so the transform of rational input
//! stays rational (no irrational roots of unity involved), per spec.md
//! §4.6 / glossary.
//!
//! Grounded on `original_source/mbin_ftt.c`: [`Cf`] is `mbin_cf_t`, a
//! two-dimensional vector representing a point on the "triangle" unit
//! circle (the boundary of the L1 ball) rather than the ordinary unit
//! circle; [`cos_cf`]/[`sin_cf`]/[`acos_cf`] are
//! `mbin_ftt_cosf`/`sinf`/`acosf`; [`angleadd_cf`] and [`multiply_cf`]
//! are `mbin_ftt_angleadd_cf`/`multiply_cf` (rotate a vector by a given
//! phase, and compose two vectors' phases); [`forward`]/[`inverse`] are
//! `mbin_ftt_fwd_cf`/`inv_cf`, the same in-place butterfly network and
//! bit-reversed twiddle indexing (`super::add_bitreversed`) as every
//! other transform family here, just with `angleadd_cf` standing in for
//! the ordinary complex twiddle multiply.

/// A point on the triangle-wave unit circle (`mbin_cf_t`): not a
/// complex number, though it plays the same structural role here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cf {
    /// "Cosine" component.
    pub x: f64,
    /// "Sine" component.
    pub y: f64,
}

impl Cf {
    /// The zero vector.
    pub const ZERO: Cf = Cf { x: 0.0, y: 0.0 };

    /// Embeds a real scalar as `(x, 0)`.
    pub const fn real(x: f64) -> Cf {
        Cf { x, y: 0.0 }
    }

    fn add(self, rhs: Cf) -> Cf {
        Cf { x: self.x + rhs.x, y: self.y + rhs.y }
    }

    fn sub(self, rhs: Cf) -> Cf {
        Cf { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Phase (in turns, `[0, 0.25]`) such that `cos_cf(phase) == x` for `x`
/// in `[-1, 1]` (`mbin_ftt_acosf`).
fn acos_cf(x: f64) -> f64 {
    let x = x.abs();
    if x == 1.0 {
        0.0
    } else if x == 0.0 {
        0.25
    } else {
        (x.ceil() - x) * 0.25
    }
}

/// Triangle wave as a function of phase `x` in turns (`mbin_ftt_cosf`).
fn cos_cf(x: f64) -> f64 {
    let mut x = x - x.floor();
    if x == 0.0 {
        return 1.0;
    } else if x == 0.5 {
        return -1.0;
    }
    x *= 4.0;
    if x < 1.0 {
        x.ceil() - x
    } else if x < 2.0 {
        x.floor() - x
    } else if x < 3.0 {
        x - x.ceil()
    } else {
        x - x.floor()
    }
}

/// `mbin_ftt_sinf`: the same triangle wave, a quarter-turn out of phase.
fn sin_cf(x: f64) -> f64 {
    cos_cf(x + 0.75)
}

fn quadrant(v: Cf) -> u8 {
    (v.x < 0.0) as u8 + 2 * (v.y < 0.0) as u8
}

fn phase_of(normalized_x: f64, quadrant: u8) -> f64 {
    match quadrant {
        0 => acos_cf(normalized_x),
        1 => 0.5 - acos_cf(normalized_x),
        2 => 1.0 - acos_cf(normalized_x),
        3 => 0.5 + acos_cf(normalized_x),
        _ => unreachable!("quadrant is always in 0..4"),
    }
}

/// Rotates `a` by `angle` turns (`mbin_ftt_angleadd_cf`): the twiddle
/// multiply the butterfly network below uses in place of ordinary
/// complex multiplication by `e^{i*angle}`.
fn angleadd_cf(mut a: Cf, angle: f64) -> Cf {
    let gain = a.x.abs() + a.y.abs();
    let q = quadrant(a);
    if gain != 0.0 {
        a.x /= gain;
    }
    let angle = angle + phase_of(a.x, q);
    Cf { x: cos_cf(angle) * gain, y: sin_cf(angle) * gain }
}

/// Vector multiplication for triangle-wave vectors (`mbin_ftt_multiply_cf`):
/// composes the two phases and multiplies the two gains.
pub fn multiply_cf(mut a: Cf, mut b: Cf) -> Cf {
    let ga = a.x.abs() + a.y.abs();
    let gb = b.x.abs() + b.y.abs();
    let qa = quadrant(a);
    let qb = quadrant(b);
    if ga != 0.0 {
        a.x /= ga;
    }
    if gb != 0.0 {
        b.x /= gb;
    }
    let angle = phase_of(a.x, qa) + phase_of(b.x, qb);
    let gain = ga * gb;
    Cf { x: cos_cf(angle) * gain, y: sin_cf(angle) * gain }
}

/// Forward triangle-wave transform, in place (`mbin_ftt_fwd_cf`).
/// `data.len()` must be a power of two.
pub fn forward(data: &mut [Cf]) {
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
        let mut z = 0;
        while y != max {
            let angle = z as f64 / max as f64;
            for x in 0..step {
                let t0 = data[x + y];
                let t1 = angleadd_cf(data[x + y + step], angle);
                data[x + y] = t0.add(t1);
                data[x + y + step] = t0.sub(t1);
            }
            z = super::add_bitreversed(z, max / 4);
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

/// Inverse of [`forward`] (`mbin_ftt_inv_cf`).
pub fn inverse(data: &mut [Cf]) {
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
        let mut z = 0;
        while y != max {
            let angle = (max - z) as f64 / max as f64;
            for x in 0..step {
                let t0 = data[x + y].add(data[x + y + step]);
                let t1 = data[x + y].sub(data[x + y + step]);
                data[x + y] = t0;
                data[x + y + step] = angleadd_cf(t1, angle);
            }
            z = super::add_bitreversed(z, max / 4);
            y += 2 * step;
        }
        step *= 2;
    }
}

/// Pointwise triangle-vector multiply of two forward-transformed
/// arrays (`mbin_ftt_mul_cf`), the step between [`forward`] and
/// [`inverse`] that realizes convolution under the triangle-multiply
/// algebra.
pub fn mul(pa: &[Cf], pb: &[Cf]) -> Vec<Cf> {
    assert_eq!(pa.len(), pb.len());
    pa.iter().zip(pb.iter()).map(|(&a, &b)| multiply_cf(a, b)).collect()
}

/// Convenience wrapper: embeds a real array as [`Cf::real`] and
/// forward-transforms it.
pub fn forward_real(a: &[f64]) -> Vec<Cf> {
    let mut data: Vec<Cf> = a.iter().map(|&x| Cf::real(x)).collect();
    forward(&mut data);
    data
}

/// Convenience wrapper: inverse-transforms and takes the `x` component
/// of each slot.
pub fn inverse_real(a: &[Cf]) -> Vec<f64> {
    let mut data = a.to_vec();
    inverse(&mut data);
    data.iter().map(|c| c.x).collect()
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let orig = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let f = forward_real(&orig);
        let back = inverse_real(&f);
        for (x, y) in orig.iter().zip(back.iter()) {
            assert!((x - y).abs() < 1e-9, "{x} vs {y}");
        }
    }

    /// The transform of an impulse is flat: at every butterfly step the
    /// untouched leg is the zero vector, and `angleadd_cf` of the zero
    /// vector is the zero vector regardless of angle (its gain is 0),
    /// so the single nonzero value simply propagates, unrotated, to
    /// every slot — the same "impulse -> flat spectrum" identity an
    /// ordinary DFT has, derived here directly from the butterfly
    /// network instead of assumed.
    #[test]
    fn impulse_transforms_to_a_flat_array() {
        let mut data = vec![Cf::ZERO; 4];
        data[0] = Cf::real(1.0);
        forward(&mut data);
        for c in &data {
            assert!((c.x - 1.0).abs() < 1e-9, "{c:?}");
            assert!(c.y.abs() < 1e-9, "{c:?}");
        }
    }

    /// Pointwise-multiplying any transform by the (flat) transform of
    /// the impulse is the identity, so `inverse(mul(forward(a),
    /// forward(e0))) == a` — convolution with the impulse reproduces
    /// the input, the spec.md §8 property 7 convolution-equivalence
    /// check instantiated at the identity element of the algebra.
    #[test]
    fn convolution_with_impulse_is_identity() {
        let a = vec![3.0, -1.0, 4.0, 1.0, 5.0, -9.0, 2.0, 6.0];
        let mut impulse = vec![Cf::ZERO; 8];
        impulse[0] = Cf::real(1.0);

        let fa = forward_real(&a);
        let mut fe = impulse.clone();
        forward(&mut fe);

        let prod = mul(&fa, &fe);
        let back = inverse_real(&prod);
        for (x, y) in a.iter().zip(back.iter()) {
            assert!((x - y).abs() < 1e-9, "{x} vs {y}");
        }
    }
}
