//! The higher-power transform (`hpt`): a butterfly network over the
//! ring extension `Z[sqrt(-3)]`, represented as pairs `(r0, r1)` standing
//! for `r0 + r1*sqrt(-3)`, per spec.md §4.6 / glossary's "double-complex
//! `(a0+a1*sqrt(3))*(b0+b1*sqrt(3))` multiplication".
//!
//! Grounded on `original_source/mbin_hpt.c`: [`Hp`] is `hpt_double_t`;
//! [`Hp::mul_fwd`]/[`Hp::mul_inv`] are `mul_fwd_double`/`mul_inv_double`;
//! [`Hp::exp_fwd`]/[`Hp::exp_inv`] are `exp_fwd_double`/`exp_inv_double`
//! (binary exponentiation under the respective multiplication); and
//! [`forward`]/[`inverse`] are `xform_fwd_double`/`xform_inv_double`, the
//! same bit-reversed-twiddle butterfly network
//! ([`super::add_bitreversed`]) as [`super::triangle`] and
//! [`super::square3adic`] use — except that, faithfully to the original,
//! there is no final/initial bit-reversal reordering pass here.

/// An element `r0 + r1*sqrt(-3)` of the ring the higher-power transform
/// operates over (`hpt_double_t`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hp {
    /// Rational part.
    pub r0: i64,
    /// Coefficient of `sqrt(-3)`.
    pub r1: i64,
}

impl Hp {
    /// The zero element.
    pub const ZERO: Hp = Hp { r0: 0, r1: 0 };

    /// The multiplicative identity under [`Hp::mul_fwd`].
    pub const ONE_FWD: Hp = Hp { r0: 1, r1: 0 };

    /// The multiplicative identity under [`Hp::mul_inv`].
    pub const ONE_INV: Hp = Hp { r0: 0, r1: 1 };

    /// Embeds an integer as a rational element.
    pub const fn real(r0: i64) -> Hp {
        Hp { r0, r1: 0 }
    }

    fn add(self, rhs: Hp) -> Hp {
        Hp { r0: self.r0 + rhs.r0, r1: self.r1 + rhs.r1 }
    }

    fn sub(self, rhs: Hp) -> Hp {
        Hp { r0: self.r0 - rhs.r0, r1: self.r1 - rhs.r1 }
    }

    /// "Forward" multiplication (`mul_fwd_double`): ordinary
    /// `Z[sqrt(-3)]` multiplication, `(a0+a1*w)(b0+b1*w)` with `w^2 = -3`.
    pub fn mul_fwd(self, rhs: Hp) -> Hp {
        let top = 3 * self.r1 * rhs.r1;
        Hp {
            r0: self.r0 * rhs.r0 - top,
            r1: self.r0 * rhs.r1 + self.r1 * rhs.r0,
        }
    }

    /// "Inverse" multiplication (`mul_inv_double`): the dual operation
    /// used when walking the twiddle table backwards in [`inverse`];
    /// divides by 3 rather than multiplying by it, so is only exact when
    /// the dividend is a multiple of 3 (guaranteed by the twiddle values
    /// this transform produces internally).
    pub fn mul_inv(self, rhs: Hp) -> Hp {
        let top = self.r0 * rhs.r0 / 3;
        Hp {
            r0: self.r0 * rhs.r1 + self.r1 * rhs.r0,
            r1: self.r1 * rhs.r1 - top,
        }
    }

    /// Binary exponentiation under [`Hp::mul_fwd`] (`exp_fwd_double`).
    pub fn exp_fwd(self, mut power: u32) -> Hp {
        let mut base = self;
        let mut result = Hp::ONE_FWD;
        while power != 0 {
            if power & 1 != 0 {
                result = result.mul_fwd(base);
            }
            base = base.mul_fwd(base);
            power >>= 1;
        }
        result
    }

    /// Binary exponentiation under [`Hp::mul_inv`] (`exp_inv_double`).
    pub fn exp_inv(self, mut power: u32) -> Hp {
        let mut base = self;
        let mut result = Hp::ONE_INV;
        while power != 0 {
            if power & 1 != 0 {
                result = result.mul_inv(base);
            }
            base = base.mul_inv(base);
            power >>= 1;
        }
        result
    }
}

/// Forward higher-power transform, in place (`mbin_hpt_xform_fwd_double`).
/// `data.len()` must be a power of two. Unlike [`super::triangle::forward`]
/// and [`super::square3adic::forward`], this has no bit-reversal
/// reordering pass — the original does not have one either.
pub fn forward(data: &mut [Hp]) {
    let max = data.len();
    assert!(max.is_power_of_two(), "transform length must be a power of two");
    if max <= 1 {
        return;
    }

    let base = Hp { r0: 0, r1: 1 };
    let mut step = max;
    loop {
        step /= 2;
        if step == 0 {
            break;
        }
        let mut y = 0;
        let mut z = 0;
        while y != max {
            let twiddle = base.exp_fwd(z as u32);
            for x in 0..step {
                let t0 = data[x + y];
                let t1 = data[x + y + step].mul_fwd(twiddle);
                data[x + y] = t0.add(t1);
                data[x + y + step] = t0.sub(t1);
            }
            z = super::add_bitreversed(z, max / 4);
            y += 2 * step;
        }
    }
}

/// Inverse of [`forward`] (`mbin_hpt_xform_inv_double`).
pub fn inverse(data: &mut [Hp]) {
    let max = data.len();
    assert!(max.is_power_of_two(), "transform length must be a power of two");
    if max <= 1 {
        return;
    }

    let base = Hp { r0: 1, r1: 0 };
    let mut step = 1;
    while step != max {
        let mut y = 0;
        let mut z = 0;
        while y != max {
            let twiddle = base.exp_inv(z as u32);
            for x in 0..step {
                let t0 = data[x + y].add(data[x + y + step]);
                let t1 = data[x + y].sub(data[x + y + step]);
                data[x + y] = t0;
                data[x + y + step] = t1.mul_inv(twiddle);
            }
            z = super::add_bitreversed(z, max / 4);
            y += 2 * step;
        }
        step *= 2;
    }
}

/// Pointwise multiply of two forward-transformed arrays
/// (`mul_fwd_double` applied elementwise), the step between [`forward`]
/// and [`inverse`] that realizes convolution under this algebra.
pub fn mul(pa: &[Hp], pb: &[Hp]) -> Vec<Hp> {
    assert_eq!(pa.len(), pb.len());
    pa.iter().zip(pb.iter()).map(|(&a, &b)| a.mul_fwd(b)).collect()
}

// ======================================================================
// TESTS
