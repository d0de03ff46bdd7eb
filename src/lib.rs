//! Multi-radix and XOR-ring integer arithmetic, with the fast butterfly
//! transforms that turn pointwise convolution under one of these
//! algebras into pointwise multiplication in a transformed domain.
//!
//! The crate is organised leaves-first, the same dependency order
//! spec.md §2 lays out:
//!
//! - [`bits`]: width-generic bit primitives (popcount, isolators, bit
//!   reversal, masked counters, unaligned bit-stream I/O).
//! - [`oddring`]: inverse/power/log in the ring of odd residues mod a
//!   power of two.
//! - [`radix`]: positional arithmetic over the small-radix, T-base,
//!   named (G/H/U/V/M) and balanced-ternary/base-two-thirds/base-minus-
//!   three number systems.
//! - [`xorring`]: `GF(2)[x]` and `GF(3)[x]` polynomial rings, plus the
//!   2-vector extension ring.
//! - [`modarray`]: Chinese-remainder "mod array" residue arithmetic.
//! - [`transform`]: in-place butterfly transforms (additive, greater-
//!   equal, XOR/Walsh-Hadamard, sum-of-digits, triangle-wave, 3-adic
//!   square-wave, modular NTT, higher-power) and the equation-based
//!   transform-coefficient solver.
//! - [`convolution`]: the canonical forward/pointwise-multiply/inverse
//!   recipe wired on top of `transform`, plus 3-way split (`x3`) and
//!   NTT-backed big-integer multiplication.
//! - [`filter`]: linear-recurrence discovery and fast-forward
//!   evaluation, over floats, a prime field, and the XOR ring.
//! - [`equation`]: sparse Gaussian elimination over `GF(2)` and over
//!   floats/doubles — the shared tool behind `filter`, `transform::solve`,
//!   and polynomial inversion.
//! - [`numerics`]: square roots, a binomial coefficient, sums of
//!   squares, a 2-adic cosine/sine series, the Lucas `π²` recurrence,
//!   and three escalating factor searches.
//!
//! Deliberately out of scope, per spec.md §1: the debug/printing
//! surface, the expression-tree parser, `fp_t` fixed-precision
//! remainder arithmetic, and the thin operator-overloaded wrappers.

#![deny(missing_docs)]

use std::fmt;

pub mod bits;
pub mod convolution;
pub mod equation;
pub mod filter;
pub mod modarray;
pub mod numerics;
pub mod oddring;
pub mod radix;
pub mod transform;
pub mod xorring;

// ======================================================================
// Error - PUBLIC

/// Errors surfaced by the two solver categories spec.md §7 calls out as
/// genuine failures rather than sentinel-zero returns: a contradictory
/// `GF(2)`/float linear system, and a filter table with no pivot on
/// some column. Every other failure mode spec.md §7 lists (sentinel-
/// zero divide-by-zero, domain violations) is returned as an `Option`
/// or a zero value at the call site, the way the original C does it —
/// callers validate those upstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The equation solver ([`equation::simplify`]/[`equation::solve`])
    /// reduced some equation to `0 = 1`.
    Contradiction,
    /// The filter table builder ([`filter`]) found no usable pivot on
    /// some column of the bilinear system, even after re-ordering.
    SingularSystem,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Contradiction => write!(f, "equation system is contradictory (0 = 1)"),
            Error::SingularSystem => write!(f, "linear system has no pivot on some column"),
        }
    }
}

impl std::error::Error for Error {}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_human_readable() {
        assert_eq!(
            Error::Contradiction.to_string(),
            "equation system is contradictory (0 = 1)"
        );
        assert_eq!(
            Error::SingularSystem.to_string(),
            "linear system has no pivot on some column"
        );
    }
}
