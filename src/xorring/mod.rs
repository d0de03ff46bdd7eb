//! XOR-ring arithmetic: `GF(2)[x]` ([`gf2`]), its 2-vector extension
//! ([`gf2v`]), and `GF(3)[x]` ([`gf3`]), per spec.md §4.4.

pub mod gf2;
pub mod gf2v;
pub mod gf3;
