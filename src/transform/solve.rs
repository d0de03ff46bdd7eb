//! The transform-coefficient puzzle solver, per spec.md §4.6's closing
//! bullet: "given pointwise products observed at multiple inputs,
//! infers the coefficient table of a bilinear transform."
//!
//! This is exactly [`crate::equation::solve_func`]/[`crate::equation::solve_table`]
//! applied with the transform's own combining operation — the same
//! sparse `GF(2)` solver that discovers closed-form expressions for
//! functions of `x, y` (spec.md §4.7) is what the original's transform
//! puzzle-solver is built on, so this module is a thin,
//! transform-flavoured re-export rather than a second implementation.

pub use crate::equation::{solve_func, solve_table, BinOp};

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_xor_bilinear_table() {
        let eqs = solve_func(2, |x| x, |y| y, |r| r & 1 != 0, BinOp::Xor).unwrap();
        assert!(!eqs.is_empty());
    }
}
