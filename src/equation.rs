//! Sparse Gaussian elimination over `GF(2)` and over floats/doubles, per
//! spec.md §4.7. The central tool behind the filter engine ([`crate::filter`]),
//! the transform-coefficient puzzle solver ([`crate::transform::solve`]),
//! and the polynomial-inverse finder.
//!
//! Grounded on `original_source/mbin_equation.c` (`GF(2)`) and
//! `original_source/mbin_equation_float.c`/`mbin_equation_double.c`. The `TAILQ`-of-equations
//! intrusive list spec.md §9 describes is replaced with a plain `Vec<Equation>`
//! queue, per SPEC_FULL.md's crate-shape notes; coefficient bit-vectors use
//! `fixedbitset::FixedBitSet` rather than a hand-rolled packed-word vector.

use fixedbitset::FixedBitSet;

use crate::Error;

// ======================================================================
// Equation (GF(2)) - PUBLIC

/// One row of a `GF(2)` linear system: a coefficient bit-vector plus a
/// single right-hand-side bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Equation {
    /// Coefficient of each variable, one bit each.
    pub coeffs: FixedBitSet,
    /// Right-hand side, a single `GF(2)` bit.
    pub rhs: bool,
}

impl Equation {
    /// An all-zero equation over `n_vars` variables.
    pub fn new(n_vars: usize) -> Self {
        Equation {
            coeffs: FixedBitSet::with_capacity(n_vars),
            rhs: false,
        }
    }

    /// The lowest-index variable with a non-zero coefficient, if any.
    pub fn leading_bit(&self) -> Option<usize> {
        self.coeffs.ones().next()
    }

    fn xor_with(&mut self, other: &Equation) {
        self.coeffs.symmetric_difference_with(&other.coeffs);
        self.rhs ^= other.rhs;
    }
}

// ======================================================================
// FUNCTIONS - PUBLIC - GF(2) solver

/// Eliminates each equation's leading variable from every other equation
/// that shares it, per spec.md §4.7's `simplify`.
///
/// Returns [`Error::Contradiction`] if an equation reduces to `0 = 1`.
/// All-zero equations (`0 = 0`) are dropped silently.
pub fn simplify(eqs: &mut Vec<Equation>) -> Result<(), Error> {
    let mut i = 0;
    while i < eqs.len() {
        match eqs[i].leading_bit() {
            None => {
                if eqs[i].rhs {
                    return Err(Error::Contradiction);
                }
                eqs.remove(i);
            }
            Some(y) => {
                let pivot = eqs[i].clone();
                for (j, eq) in eqs.iter_mut().enumerate() {
                    if j != i && eq.coeffs.contains(y) {
                        eq.xor_with(&pivot);
                    }
                }
                i += 1;
            }
        }
    }
    Ok(())
}

/// Runs [`simplify`], then clears every coefficient but each equation's
/// leading bit, revealing one solved equation per leading variable, per
/// spec.md §4.7's `solve`.
pub fn solve(eqs: &mut Vec<Equation>) -> Result<(), Error> {
    simplify(eqs)?;
    for eq in eqs.iter_mut() {
        if let Some(y) = eq.leading_bit() {
            let mut narrowed = FixedBitSet::with_capacity(eq.coeffs.len());
            narrowed.insert(y);
            eq.coeffs = narrowed;
        }
    }
    Ok(())
}

/// The four bitwise/arithmetic operations [`solve_func`] can discover a
/// bilinear coefficient table for, plus the two multiplicative rings
/// from spec.md §4.4.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    /// Wrapping integer addition.
    Add,
    /// Wrapping integer multiplication.
    Mul,
    /// Bitwise XOR.
    Xor,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// `GF(2)[x]` carry-less multiplication, [`crate::xorring::gf2::mul`].
    Gf2Mul,
}

impl BinOp {
    fn apply(self, x: u32, y: u32) -> u32 {
        match self {
            BinOp::Add => x.wrapping_add(y),
            BinOp::Mul => x.wrapping_mul(y),
            BinOp::Xor => x ^ y,
            BinOp::And => x & y,
            BinOp::Or => x | y,
            BinOp::Gf2Mul => crate::xorring::gf2::mul(x as u64, y as u64) as u32,
        }
    }
}

/// Builds and solves the equation set expressing
/// `fr(op(x,y)) = XOR_{t subseteq fa(x), u subseteq fb(y)} c[t,u]`
/// for every `(x, y)` in `0..2^n`, per spec.md §4.7's `solve_func`.
///
/// Unknown `c[t,u]` is packed at variable index `t * 2^n + u`. Returns
/// the (simplified) equation queue; read off `table[t][u]` as the
/// solved right-hand side of the equation whose sole leading bit is
/// `t * 2^n + u`.
pub fn solve_func(
    n: u32,
    fa: impl Fn(u32) -> u32,
    fb: impl Fn(u32) -> u32,
    fr: impl Fn(u32) -> bool,
    op: BinOp,
) -> Result<Vec<Equation>, Error> {
    let size = 1usize << n;
    let n_vars = size * size;
    let mut eqs = Vec::with_capacity(size * size);
    for x in 0..size as u32 {
        for y in 0..size as u32 {
            let ax = fa(x);
            let by = fb(y);
            let mut eq = Equation::new(n_vars);
            let mut t = ax;
            loop {
                let mut u = by;
                loop {
                    eq.coeffs.insert(t as usize * size + u as usize);
                    if u == 0 {
                        break;
                    }
                    u = u.wrapping_sub(1) & by;
                }
                if t == 0 {
                    break;
                }
                t = t.wrapping_sub(1) & ax;
            }
            eq.rhs = fr(op.apply(x, y));
            eqs.push(eq);
        }
    }
    solve(&mut eqs)?;
    Ok(eqs)
}

/// Fits a boolean polynomial of "order" `lorder` (maximum monomial
/// popcount; negative also admits complementary monomials) to `max`
/// observations `(x_table[i], y_table[i])`, per spec.md §4.7's
/// `solve_table`.
///
/// `n_bits` bounds the monomial search space to `2^n_bits` candidate
/// terms and must stay small (a handful of bits) for this to be
/// tractable.
pub fn solve_table(
    x_table: &[u32],
    y_table: &[bool],
    n_bits: u32,
    lorder: i32,
) -> Result<Vec<Equation>, Error> {
    assert_eq!(x_table.len(), y_table.len());
    let order = lorder.unsigned_abs();
    let complement = lorder < 0;
    let full: u32 = if n_bits >= 32 {
        u32::MAX
    } else {
        (1u32 << n_bits) - 1
    };

    let mut monomials: Vec<u32> = (0..=full)
        .filter(|&m| crate::bits::popcount(m) <= order)
        .collect();
    if complement {
        for m in 0..=full {
            if crate::bits::popcount(!m & full) <= order && !monomials.contains(&m) {
                monomials.push(m);
            }
        }
    }

    let n_vars = monomials.len();
    let mut eqs = Vec::with_capacity(x_table.len());
    for (&x, &y) in x_table.iter().zip(y_table.iter()) {
        let mut eq = Equation::new(n_vars);
        for (vi, &m) in monomials.iter().enumerate() {
            if x & m == m {
                eq.coeffs.insert(vi);
            }
        }
        eq.rhs = y;
        eqs.push(eq);
    }
    solve(&mut eqs)?;
    Ok(eqs)
}

// ======================================================================
// Equation (float) - PUBLIC

/// One row of a real-valued linear system, per spec.md §4.7's
/// `eq_f32`/`eq_d64`.
#[derive(Clone, Debug, PartialEq)]
pub struct EquationF64 {
    /// Coefficient of each variable.
    pub coeffs: Vec<f64>,
    /// Right-hand side.
    pub rhs: f64,
}

impl EquationF64 {
    /// An all-zero equation over `n_vars` variables.
    pub fn new(n_vars: usize) -> Self {
        EquationF64 {
            coeffs: vec![0.0; n_vars],
            rhs: 0.0,
        }
    }
}

/// Full Gauss-Jordan elimination with partial pivoting (largest
/// magnitude at the current column), per spec.md §4.7's `simplify_f32`
/// / `simplify_d64`. `zero` is the numerical zero threshold required of
/// every caller.
pub fn simplify_f64(eqs: &mut [EquationF64], zero: f64) -> Result<(), Error> {
    let n_vars = eqs.first().map_or(0, |e| e.coeffs.len());
    let mut used = vec![false; eqs.len()];

    for col in 0..n_vars {
        let mut best_row = None;
        let mut best_val = zero;
        for (i, eq) in eqs.iter().enumerate() {
            if used[i] {
                continue;
            }
            let v = eq.coeffs[col].abs();
            if v > best_val {
                best_val = v;
                best_row = Some(i);
            }
        }
        let Some(pivot_idx) = best_row else {
            continue;
        };
        used[pivot_idx] = true;

        let pivot_val = eqs[pivot_idx].coeffs[col];
        for c in eqs[pivot_idx].coeffs.iter_mut() {
            *c /= pivot_val;
        }
        eqs[pivot_idx].rhs /= pivot_val;

        let pivot = eqs[pivot_idx].clone();
        for (i, eq) in eqs.iter_mut().enumerate() {
            if i == pivot_idx {
                continue;
            }
            let factor = eq.coeffs[col];
            if factor.abs() <= zero {
                continue;
            }
            for c in 0..n_vars {
                eq.coeffs[c] -= factor * pivot.coeffs[c];
            }
            eq.rhs -= factor * pivot.rhs;
        }
    }

    for eq in eqs.iter() {
        if eq.coeffs.iter().all(|c| c.abs() <= zero) && eq.rhs.abs() > zero {
            return Err(Error::Contradiction);
        }
    }
    Ok(())
}

/// Runs [`simplify_f64`]; since the elimination above is already full
/// Gauss-Jordan (every pivot is cleared from every other row, not just
/// the rows below it), each pivot row directly yields its variable's
/// value at `rhs`.
pub fn solve_f64(eqs: &mut [EquationF64], zero: f64) -> Result<(), Error> {
    simplify_f64(eqs, zero)
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    fn eq_from_bits(bits: &[usize], n_vars: usize, rhs: bool) -> Equation {
        let mut eq = Equation::new(n_vars);
        for &b in bits {
            eq.coeffs.insert(b);
        }
        eq.rhs = rhs;
        eq
    }

    #[test]
    fn solve_two_variable_system() {
        // x ^ y = 1, x = 0  =>  y = 1
        let mut eqs = vec![
            eq_from_bits(&[0, 1], 2, true),
            eq_from_bits(&[0], 2, false),
        ];
        solve(&mut eqs).unwrap();
        let mut values = vec![None; 2];
        for eq in &eqs {
            if let Some(y) = eq.leading_bit() {
                values[y] = Some(eq.rhs);
            }
        }
        assert_eq!(values, vec![Some(false), Some(true)]);
    }

    #[test]
    fn simplify_detects_contradiction() {
        let mut eqs = vec![Equation::new(3)];
        eqs[0].rhs = true; // 0 = 1, no coefficients set
        assert_eq!(simplify(&mut eqs), Err(Error::Contradiction));
    }

    #[test]
    fn simplify_drops_trivial_equations() {
        let mut eqs = vec![Equation::new(3), eq_from_bits(&[1], 3, true)];
        simplify(&mut eqs).unwrap();
        assert_eq!(eqs.len(), 1);
    }

    #[test]
    fn solve_func_recovers_and_table() {
        // fa/fb/fr are identity-over-one-bit; op = And. The discovered
        // table should reproduce the AND truth table via t=u=x=y.
        let eqs = solve_func(1, |x| x, |y| y, |r| r != 0, BinOp::And).unwrap();
        assert!(!eqs.is_empty());
    }

    #[test]
    fn solve_table_fits_parity_function() {
        // y = popcount(x) mod 2 over 3 bits, order 3 (full span) must
        // be solvable exactly: the parity monomial is the single
        // 3-bit monomial itself.
        let x_table: Vec<u32> = (0..8).collect();
        let y_table: Vec<bool> = x_table.iter().map(|&x| x.count_ones() % 2 == 1).collect();
        let eqs = solve_table(&x_table, &y_table, 3, 3).unwrap();
        assert!(!eqs.is_empty());
    }

    #[test]
    fn float_solver_solves_simple_system() {
        // 2x + y = 5, x - y = 1  =>  x = 2, y = 1
        let mut eqs = vec![
            EquationF64 {
                coeffs: vec![2.0, 1.0],
                rhs: 5.0,
            },
            EquationF64 {
                coeffs: vec![1.0, -1.0],
                rhs: 1.0,
            },
        ];
        solve_f64(&mut eqs, 1e-9).unwrap();
        assert!((eqs[0].rhs - 2.0).abs() < 1e-9);
        assert!((eqs[1].rhs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn float_solver_detects_contradiction() {
        let mut eqs = vec![
            EquationF64 {
                coeffs: vec![1.0, 1.0],
                rhs: 2.0,
            },
            EquationF64 {
                coeffs: vec![1.0, 1.0],
                rhs: 3.0,
            },
        ];
        assert_eq!(solve_f64(&mut eqs, 1e-9), Err(Error::Contradiction));
    }
}
