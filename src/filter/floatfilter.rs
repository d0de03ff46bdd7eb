//! `f64` linear-recurrence filter: discovers the order-`n` recurrence
//! `x[k] = sum_i coeffs[i] * x[k-n+i]` a sample sequence satisfies, then
//! advances it arbitrarily far via companion-matrix exponentiation.
//!
//! Grounded on `original_source/mbin_filter.c`.

/// An order-`n` linear recurrence over `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatFilter {
    /// Recurrence order `n`: each term depends on the `n` preceding ones.
    pub order: usize,
    /// `coeffs[i]` weights `x[k-n+i]` in `x[k] = sum_i coeffs[i] * x[k-n+i]`.
    pub coeffs: Vec<f64>,
}

type Matrix = Vec<Vec<f64>>;

fn identity(n: usize) -> Matrix {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

fn matmul(a: &Matrix, b: &Matrix) -> Matrix {
    let n = a.len();
    let m = b[0].len();
    let k = b.len();
    let mut out = vec![vec![0.0; m]; n];
    for i in 0..n {
        for t in 0..k {
            let v = a[i][t];
            if v == 0.0 {
                continue;
            }
            for j in 0..m {
                out[i][j] += v * b[t][j];
            }
        }
    }
    out
}

fn matvec(a: &Matrix, v: &[f64]) -> Vec<f64> {
    a.iter().map(|row| row.iter().zip(v.iter()).map(|(x, y)| x * y).sum()).collect()
}

fn matpow(a: &Matrix, mut exp: u64) -> Matrix {
    let n = a.len();
    let mut result = identity(n);
    let mut base = a.clone();
    while exp != 0 {
        if exp & 1 != 0 {
            result = matmul(&result, &base);
        }
        base = matmul(&base, &base);
        exp >>= 1;
    }
    result
}

impl FloatFilter {
    /// The companion matrix of this recurrence: advancing the state
    /// vector `[x[k-n], .., x[k-1]]` by one step yields
    /// `[x[k-n+1], .., x[k]]`.
    fn companion(&self) -> Matrix {
        let n = self.order;
        let mut m = vec![vec![0.0; n]; n];
        for i in 0..n.saturating_sub(1) {
            m[i][i + 1] = 1.0;
        }
        if n > 0 {
            m[n - 1] = self.coeffs.clone();
        }
        m
    }

    /// One recurrence step: the next term given the trailing `order`
    /// history (oldest first).
    pub fn apply(&self, history: &[f64]) -> f64 {
        assert_eq!(history.len(), self.order);
        history.iter().zip(self.coeffs.iter()).map(|(x, c)| x * c).sum()
    }

    /// Jumps `steps` terms ahead of the given `order`-length history
    /// (oldest first), returning the resulting trailing history.
    pub fn exp(&self, history: &[f64], steps: u64) -> Vec<f64> {
        assert_eq!(history.len(), self.order);
        let m = matpow(&self.companion(), steps);
        matvec(&m, history)
    }
}

/// Discovers the order-`n` recurrence satisfied by `samples`, via
/// Gaussian elimination with partial pivoting over the `n` equations
/// formed from consecutive length-`n` windows. Requires
/// `samples.len() >= 2 * n`. Returns [`Error::SingularSystem`] if the
/// windows are linearly dependent.
///
/// [`Error::SingularSystem`]: crate::Error::SingularSystem
pub fn discover(samples: &[f64], n: usize) -> Result<FloatFilter, crate::Error> {
    assert!(samples.len() >= 2 * n && n > 0);
    let mut aug: Vec<Vec<f64>> = (0..n)
        .map(|row| {
            let mut r: Vec<f64> = samples[row..row + n].to_vec();
            r.push(samples[row + n]);
            r
        })
        .collect();

    for col in 0..n {
        let mut pivot = col;
        let mut best = aug[col][col].abs();
        for row in (col + 1)..n {
            if aug[row][col].abs() > best {
                best = aug[row][col].abs();
                pivot = row;
            }
        }
        if best < 1e-12 {
            return Err(crate::Error::SingularSystem);
        }
        aug.swap(col, pivot);
        let p = aug[col][col];
        for v in aug[col].iter_mut() {
            *v /= p;
        }
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[row][col];
            if factor == 0.0 {
                continue;
            }
            for c in 0..=n {
                aug[row][c] -= factor * aug[col][c];
            }
        }
    }

    let coeffs: Vec<f64> = aug.iter().map(|row| row[n]).collect();
    Ok(FloatFilter { order: n, coeffs })
}

/// Discovers the recurrence satisfied by the pointwise product of the
/// sequences `a` and `b` generate, which has order at most
/// `a.order * b.order`. `seed_a`/`seed_b` are the initial `order`-length
/// histories for each filter.
pub fn filter_mul(
    a: &FloatFilter,
    seed_a: &[f64],
    b: &FloatFilter,
    seed_b: &[f64],
) -> Result<FloatFilter, crate::Error> {
    let n = a.order * b.order;
    let needed = 2 * n + n.max(a.order).max(b.order);
    let seq_a = generate(a, seed_a, needed);
    let seq_b = generate(b, seed_b, needed);
    let product: Vec<f64> = seq_a.iter().zip(seq_b.iter()).map(|(x, y)| x * y).collect();
    discover(&product, n)
}

fn generate(f: &FloatFilter, seed: &[f64], len: usize) -> Vec<f64> {
    assert_eq!(seed.len(), f.order);
    let mut out = seed.to_vec();
    while out.len() < len {
        let tail = &out[out.len() - f.order..];
        out.push(f.apply(tail));
    }
    out
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_fibonacci_recurrence() {
        let mut fib = vec![1.0, 1.0];
        for i in 2..12 {
            let next = fib[i - 1] + fib[i - 2];
            fib.push(next);
        }
        let f = discover(&fib, 2).unwrap();
        assert!((f.coeffs[0] - 1.0).abs() < 1e-9);
        assert!((f.coeffs[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn exp_jumps_ahead_matches_direct_generation() {
        let mut fib = vec![1.0, 1.0];
        for i in 2..20 {
            let next = fib[i - 1] + fib[i - 2];
            fib.push(next);
        }
        let f = discover(&fib[..10], 2).unwrap();
        let jumped = f.exp(&[fib[0], fib[1]], 9);
        assert!((jumped[0] - fib[9]).abs() < 1e-6);
        assert!((jumped[1] - fib[10]).abs() < 1e-6);
    }

    #[test]
    fn filter_mul_discovers_product_recurrence() {
        let mut fib = vec![1.0, 1.0];
        for i in 2..24 {
            let next = fib[i - 1] + fib[i - 2];
            fib.push(next);
        }
        let f = discover(&fib, 2).unwrap();
        let g = filter_mul(&f, &[1.0, 1.0], &f, &[1.0, 1.0]).unwrap();
        assert_eq!(g.order, 4);
        let generated = generate(&g, &fib[0..4].iter().zip(fib[0..4].iter()).map(|(a, b)| a * b).collect::<Vec<_>>(), 10);
        for (i, v) in generated.iter().enumerate() {
            assert!((v - fib[i] * fib[i]).abs() < 1e-3, "index {i}: {v} vs {}", fib[i] * fib[i]);
        }
    }
}
