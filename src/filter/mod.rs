//! Linear-recurrence filter engine: given a sample sequence, discovers
//! the order-`n` linear recurrence it satisfies, then lets the caller
//! jump arbitrarily far ahead in the sequence via binary exponentiation
//! of the recurrence's companion matrix (`filter_exp`), per spec.md
//! §4.8.
//!
//! Three parallel variants cover the rings this crate cares about:
//! [`floatfilter`] (`f64`, solved by pivoted Gaussian elimination),
//! [`modfilter`] (a single prime modulus), and [`xorfilter`] (`GF(2)`,
//! built on [`crate::xorring::gf2`]). Each is grounded on the same
//! recurrence-discovery algorithm, specialised to its own field's
//! arithmetic rather than unified behind one generic trait — matching
//! the single monolithic `original_source/mbin_filter.c`, which
//! likewise implements every variant (`_d` float, `_p_32` prime-field,
//! `_cd` complex-double, `xor2_filter_*`) side by side rather than
//! splitting them into separate files.

pub mod floatfilter;
pub mod modfilter;
pub mod xorfilter;
