//! The process-wide FPX complex-32 wave table, per spec.md §5 and §6:
//! a `2^16`-entry table over `Z/65537Z` (the Fermat prime `F4`, [`super::ntt::NTT_PRIME`]),
//! lazily initialised by an explicit [`init_c32`] call and read-only
//! thereafter. Index `i` is the `i`-th power of a primitive root of the
//! full multiplicative group, and the second half of the table negates
//! the first half in the field, exactly as spec.md §6 requires.
//!
//! Grounded on `original_source/mbin_fpx.c`'s `mbin_fpx_init_c32`
//! global-table pattern. Per spec.md §9's "global mutable state"
//! re-shaping note, the table is re-architected as an explicitly
//! initialised immutable singleton (`once_cell::sync::OnceCell`)
//! instead of a process-global array written once from C: the first
//! caller to reach [`init_c32`] builds it, every later caller (from any
//! thread) observes the same completed table, with no separate locking
//! needed once init has happened — matching spec.md §5's "treat as
//! immutable after init; no locking needed if init precedes any use".

use once_cell::sync::OnceCell;

use super::ntt::{primitive_root_for_len, NTT_PRIME};

/// Number of entries in the table: `2^16`.
pub const LEN: usize = 1 << 16;

static TABLE: OnceCell<Vec<u64>> = OnceCell::new();

fn build() -> Vec<u64> {
    let half = LEN / 2;
    let root = primitive_root_for_len(LEN);
    let mut table = vec![0u64; LEN];
    let mut acc = 1u64;
    for slot in table.iter_mut().take(half) {
        *slot = acc;
        acc = (acc * root) % NTT_PRIME;
    }
    for i in 0..half {
        table[i + half] = (NTT_PRIME - table[i]) % NTT_PRIME;
    }
    table
}

/// Initialises the table on first call (idempotent on every later
/// call) and returns a reference to it. Every subsequent call, from
/// any point in the process, observes the same table.
pub fn init_c32() -> &'static [u64] {
    TABLE.get_or_init(build)
}

// ======================================================================
// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_2_to_16_entries() {
        assert_eq!(init_c32().len(), LEN);
    }

    #[test]
    fn second_half_negates_first_half() {
        let table = init_c32();
        let half = LEN / 2;
        for i in 0..half {
            assert_eq!((table[i] + table[i + half]) % NTT_PRIME, 0);
        }
    }

    #[test]
    fn index_i_is_ith_power_of_the_root() {
        let table = init_c32();
        let root = table[1];
        let mut acc = 1u64;
        for &entry in table.iter().take(32) {
            assert_eq!(entry, acc);
            acc = (acc * root) % NTT_PRIME;
        }
    }

    #[test]
    fn repeated_init_returns_the_same_table() {
        let first = init_c32().to_vec();
        let second = init_c32();
        assert_eq!(first, second);
    }
}
