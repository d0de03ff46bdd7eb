//! The 2-vector extension of the `GF(2)[x]` cyclic ring: pairs `(a0,
//! a1)` forming a degree-2 extension, used where the base ring alone
//! doesn't have enough roots of unity. Grounded on
//! `original_source/mbin_xor.c`'s `mbin_xor2v_*` family (the `_64`
//! cyclic-modulus variants; the `_any` duplicates that reduce by an
//! arbitrary polynomial are left out as redundant plumbing over the
//! same formulas — see DESIGN.md).

use super::gf2::{mul_mod, rol_mod};

/// An element `a0 + a1*w` of the extension ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Xor2v {
    /// The "low" component, coefficient of the ring's own generator.
    pub a0: u64,
    /// The "high" component, coefficient of the extension root `w`.
    pub a1: u64,
}

/// The additive/exponentiation-accumulator identity, `(0, 1)`.
pub const ZERO: Xor2v = Xor2v { a0: 0, a1: 1 };
/// The multiplicative unit, `(1, 3)`.
pub const UNIT: Xor2v = Xor2v { a0: 1, a1: 3 };
/// The "negative" generator used to walk the discrete log, `(1, 0)`.
pub const NEGA: Xor2v = Xor2v { a0: 1, a1: 0 };

impl Xor2v {
    /// Builds the element `a0 + a1*w`.
    pub fn new(a0: u64, a1: u64) -> Self {
        Xor2v { a0, a1 }
    }

    /// Componentwise XOR — addition in the extension ring.
    pub fn xor(self, rhs: Self) -> Self {
        Xor2v::new(self.a0 ^ rhs.a0, self.a1 ^ rhs.a1)
    }

    /// Multiplication modulo the cyclic ring `GF(2)[x]/(x^p + 1)`.
    pub fn mul_mod(self, rhs: Self, p: u32) -> Self {
        let val = rhs.a1 ^ rhs.a0 ^ rol_mod(rhs.a0, 1, p);
        let a0 = mul_mod(self.a0, val, p) ^ mul_mod(self.a1, rhs.a0, p);
        let a1 = mul_mod(self.a0, rhs.a0, p) ^ mul_mod(self.a1, rhs.a1, p);
        Xor2v::new(a0, a1)
    }

    /// `self * self`.
    pub fn square_mod(self, p: u32) -> Self {
        let val = mul_mod(self.a0, self.a0, p);
        let a0 = val ^ rol_mod(val, 1, p);
        let a1 = val ^ mul_mod(self.a1, self.a1, p);
        Xor2v::new(a0, a1)
    }

    /// `self^y`.
    pub fn exp_mod(mut self, mut y: u64, p: u32) -> Self {
        let mut r = ZERO;
        while y != 0 {
            if y & 1 != 0 {
                r = r.mul_mod(self, p);
            }
            self = self.square_mod(p);
            y >>= 1;
        }
        r
    }

    /// Discrete log of `self` base [`NEGA`]: multiply by `NEGA` until
    /// reaching [`ZERO`], counting steps.
    pub fn log_mod(mut self, p: u32) -> u64 {
        let mut r = 0u64;
        while self != ZERO {
            self = self.mul_mod(NEGA, p);
            r += 1;
        }
        r
    }

    /// Negation: swap the two components, then renormalise by
    /// multiplying by [`UNIT`].
    pub fn neg_mod(self, p: u32) -> Self {
        Xor2v::new(self.a1, self.a0).mul_mod(UNIT, p)
    }
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_is_involution() {
        let a = Xor2v::new(5, 9);
        assert_eq!(a.xor(a), Xor2v::new(0, 0));
    }

    #[test]
    fn exp_mod_zero_is_identity_power() {
        let x = Xor2v::new(1, 2);
        assert_eq!(x.exp_mod(0, 5), ZERO);
    }

    #[test]
    fn neg_mod_is_an_involution_up_to_unit_normalisation() {
        let p = 5;
        let x = Xor2v::new(1, 2);
        let nn = x.neg_mod(p).neg_mod(p);
        // double negation returns to a UNIT-scaled copy of x, not
        // necessarily x itself, since neg_mod renormalises each time.
        assert_eq!(nn, x.mul_mod(UNIT, p).mul_mod(UNIT, p));
    }

    #[test]
    fn log_mod_terminates_for_small_p() {
        let p = 4;
        let x = NEGA.exp_mod(3, p);
        let log = x.log_mod(p);
        assert_eq!(NEGA.exp_mod(log, p), x);
    }
}
