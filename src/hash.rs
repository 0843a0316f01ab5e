//! The universal hash family shared by the outer and inner levels.
//!
//! `h_{a,b,m}(x) = ((a*x + b) mod p) mod m` with `p = 4_294_967_311`, the
//! smallest prime strictly greater than `2^32`. Membership in the
//! 2-universal family is what makes the FKS retry loops in
//! [`crate::inner_set`] and [`crate::perfect_hash_set`] terminate in
//! expected `O(1)` iterations.

use rand::Rng;

/// Smallest prime strictly greater than `2^32`.
pub const PRIME: u64 = 4_294_967_311;

/// A drawn `(a, b)` coefficient pair plus the table size `m` it hashes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    a: u64,
    b: u64,
    m: u32,
}

impl HashParams {
    /// Draw fresh coefficients for modulus `m`. `a` is drawn from `[1, p-1]`
    /// so the hash can never degenerate to `b mod m` for every input; `b` is
    /// drawn from `[0, p-1]`.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, m: u32) -> Self {
        let a = rng.random_range(1..PRIME);
        let b = rng.random_range(0..PRIME);
        Self { a, b, m }
    }

    /// The table size this hash maps into.
    pub fn modulus(&self) -> u32 {
        self.m
    }

    /// Evaluate `h(x) = ((a*x + b) mod p) mod m`.
    ///
    /// `m` must be positive — callers never evaluate a hash over an empty
    /// table (an empty [`InnerSet`](crate::inner_set::InnerSet) short-circuits
    /// before reaching here).
    #[inline]
    pub fn hash(&self, x: u32) -> usize {
        debug_assert!(self.m > 0, "hash evaluated with modulus 0");
        // Widen to u128 rather than splitting `a` into high/low 32-bit
        // halves (the reference implementation's overflow-avoidance
        // technique): both give the identical mathematical result, and a
        // native wide multiply is the idiomatic choice once one is
        // available (cf. `StrongerIntHash` in ptr_hash's u128-widening
        // style).
        let product = (self.a as u128) * (x as u128) + (self.b as u128);
        ((product % PRIME as u128) % self.m as u128) as usize
    }
}
