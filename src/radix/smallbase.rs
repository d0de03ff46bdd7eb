//! Positional base-N arithmetic for `N in {3, 4, 5, 6, 7}`, digits
//! packed little-endian at a fixed `ceil(log2(N))` bits per digit
//! inside a `u32`, per spec.md §4.3.
//!
//! All five radixes share one generic implementation. The original C
//! source spells out `mbin_base3.c`..`mbin_base7.c` separately as well
//! as a radix-agnostic `mbin_baseN.c` (which derives `stepmask`/
//! `stepshift` from `msb(2*radix-1)`); this module follows `mbin_baseN.c`
//! since the per-radix files only differ in which constant they inline.

/// Bits occupied by one digit of the given radix.
pub const fn digit_bits(radix: u32) -> u32 {
    let mut bits = 0;
    let mut cap = 1u32;
    while cap < radix {
        cap *= 2;
        bits += 1;
    }
    if bits == 0 {
        1
    } else {
        bits
    }
}

fn digit_count(radix: u32) -> u32 {
    32 / digit_bits(radix)
}

fn digit_mask(radix: u32) -> u32 {
    (1 << digit_bits(radix)) - 1
}

/// Extracts digit `i` (0 = least significant) of `x`.
pub fn digit(x: u32, radix: u32, i: u32) -> u32 {
    (x >> (i * digit_bits(radix))) & digit_mask(radix)
}

/// `true` if every digit of `x` is `< radix`, i.e. no digit overflows.
pub fn is_valid(x: u32, radix: u32) -> bool {
    for i in 0..digit_count(radix) {
        if digit(x, radix, i) >= radix {
            return false;
        }
    }
    true
}

/// Digit-wise add with carry propagation between digits.
pub fn add(a: u32, b: u32, radix: u32) -> u32 {
    let bits = digit_bits(radix);
    let mut carry = 0u32;
    let mut result = 0u32;
    for i in 0..digit_count(radix) {
        let sum = digit(a, radix, i) + digit(b, radix, i) + carry;
        carry = sum / radix;
        result |= (sum % radix) << (i * bits);
    }
    result
}

/// Digit-wise subtract. Inverse of [`add`]: `sub(add(a,b), b) == a`
/// when no digit of the result underflows past digit 0.
pub fn sub(a: u32, b: u32, radix: u32) -> u32 {
    let bits = digit_bits(radix);
    let mut borrow = 0i64;
    let mut result = 0u32;
    for i in 0..digit_count(radix) {
        let mut d = digit(a, radix, i) as i64 - digit(b, radix, i) as i64 - borrow;
        if d < 0 {
            d += radix as i64;
            borrow = 1;
        } else {
            borrow = 0;
        }
        result |= (d as u32) << (i * bits);
    }
    result
}

/// Schoolbook digit-wise multiplication.
pub fn mul(a: u32, b: u32, radix: u32) -> u32 {
    let bits = digit_bits(radix);
    let n = digit_count(radix);
    let mut acc = vec![0u64; n as usize + 1];
    for i in 0..n {
        let da = digit(a, radix, i) as u64;
        if da == 0 {
            continue;
        }
        let mut carry = 0u64;
        for j in 0..n {
            if i + j >= n {
                break;
            }
            let db = digit(b, radix, j) as u64;
            let idx = (i + j) as usize;
            let sum = acc[idx] + da * db + carry;
            acc[idx] = sum % radix as u64;
            carry = sum / radix as u64;
        }
    }
    let mut result = 0u32;
    for (i, d) in acc.iter().enumerate().take(n as usize) {
        result |= (*d as u32) << (i as u32 * bits);
    }
    result
}

/// Division where the divisor's lowest digit is non-zero: classic
/// schoolbook long division, digit by digit from the top.
pub fn div_odd(r: u32, d: u32, radix: u32) -> u32 {
    if digit(d, radix, 0) == 0 {
        return 0;
    }
    div(r, d, radix)
}

/// General division by repeated subtraction after shifting the divisor
/// to align with the dividend's top digit.
pub fn div(mut r: u32, d: u32, radix: u32) -> u32 {
    if d == 0 {
        return 0;
    }
    let bits = digit_bits(radix);
    let n = digit_count(radix);

    let d_top = (0..n).rev().find(|&i| digit(d, radix, i) != 0).unwrap_or(0);
    let r_top = (0..n).rev().find(|&i| digit(r, radix, i) != 0).unwrap_or(0);
    if r_top < d_top {
        return 0;
    }

    let mut quotient = 0u32;
    let mut shift = r_top - d_top;
    loop {
        let shifted_d = shl_digits(d, radix, shift);
        let mut q_digit = 0u32;
        while q_digit < radix - 1 && cmp_magnitude(r, shifted_d, radix) != std::cmp::Ordering::Less
        {
            r = sub(r, shifted_d, radix);
            q_digit += 1;
        }
        quotient |= q_digit << (shift * bits);
        if shift == 0 {
            break;
        }
        shift -= 1;
    }
    quotient
}

fn shl_digits(x: u32, radix: u32, n: u32) -> u32 {
    let bits = digit_bits(radix);
    let count = digit_count(radix);
    let mut result = 0u32;
    for i in (0..count).rev() {
        if i >= n {
            let src = digit(x, radix, i - n);
            result |= src << (i * bits);
        }
    }
    result
}

fn cmp_magnitude(a: u32, b: u32, radix: u32) -> std::cmp::Ordering {
    for i in (0..digit_count(radix)).rev() {
        let da = digit(a, radix, i);
        let db = digit(b, radix, i);
        if da != db {
            return da.cmp(&db);
        }
    }
    std::cmp::Ordering::Equal
}

/// Converts a natural binary integer to packed base-`radix` digits.
pub fn rebase_n22(mut x: u64, radix: u32) -> u32 {
    let bits = digit_bits(radix);
    let mut result = 0u32;
    let mut i = 0u32;
    while x != 0 && i < digit_count(radix) {
        let d = (x % radix as u64) as u32;
        result |= d << (i * bits);
        x /= radix as u64;
        i += 1;
    }
    result
}

/// Inverse of [`rebase_n22`]: packed base-`radix` digits to a natural
/// binary integer.
pub fn rebase_22n(packed: u32, radix: u32) -> u64 {
    let mut result = 0u64;
    let mut place = 1u64;
    for i in 0..digit_count(radix) {
        result += digit(packed, radix, i) as u64 * place;
        place = place.saturating_mul(radix as u64);
    }
    result
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_bits_matches_ceil_log2() {
        assert_eq!(digit_bits(3), 2);
        assert_eq!(digit_bits(4), 2);
        assert_eq!(digit_bits(5), 3);
        assert_eq!(digit_bits(6), 3);
        assert_eq!(digit_bits(7), 3);
    }

    #[test]
    fn roundtrip_all_radixes() {
        for radix in [3u32, 4, 5, 6, 7] {
            let max_digits = digit_count(radix).min(5);
            let limit = (radix as u64).pow(max_digits);
            for x in 0..limit {
                let packed = rebase_n22(x, radix);
                assert!(is_valid(packed, radix));
                assert_eq!(rebase_22n(packed, radix), x, "radix {radix} x {x}");
            }
        }
    }

    #[test]
    fn add_sub_are_inverses() {
        for radix in [3u32, 4, 5, 6, 7] {
            for a in 0..20u64 {
                for b in 0..20u64 {
                    let pa = rebase_n22(a, radix);
                    let pb = rebase_n22(b, radix);
                    let sum = add(pa, pb, radix);
                    // only check when sum fits in the digit width used
                    if rebase_22n(sum, radix) == a + b {
                        assert_eq!(sub(sum, pb, radix), pa, "radix {radix} a {a} b {b}");
                    }
                }
            }
        }
    }

    #[test]
    fn mul_identities() {
        for radix in [3u32, 4, 5, 6, 7] {
            let zero = rebase_n22(0, radix);
            let one = rebase_n22(1, radix);
            for x in 0..10u64 {
                let px = rebase_n22(x, radix);
                assert_eq!(mul(zero, px, radix), zero);
                assert_eq!(rebase_22n(mul(one, px, radix), radix), x);
            }
        }
    }

    #[test]
    fn mul_is_commutative() {
        for radix in [3u32, 4, 5, 6, 7] {
            for a in 0..8u64 {
                for b in 0..8u64 {
                    let pa = rebase_n22(a, radix);
                    let pb = rebase_n22(b, radix);
                    assert_eq!(mul(pa, pb, radix), mul(pb, pa, radix));
                }
            }
        }
    }

    #[test]
    fn div_recovers_quotient() {
        for radix in [3u32, 4, 5, 6, 7] {
            for a in 0..50u64 {
                for b in 1..8u64 {
                    let pa = rebase_n22(a, radix);
                    let pb = rebase_n22(b, radix);
                    let q = div(pa, pb, radix);
                    assert_eq!(rebase_22n(q, radix), a / b, "radix {radix} a {a} b {b}");
                }
            }
        }
    }
}
