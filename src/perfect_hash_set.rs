//! The outer level of the FKS scheme: distributes the universe into `n`
//! buckets and builds one [`InnerSet`] per bucket, retrying until the total
//! slot budget `Σ|bucket[i]|^2 <= 3n` is met.

use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::PerfectHashError;
use crate::hash::HashParams;
use crate::inner_set::InnerSet;
use crate::set::PerfectHashSetLike;

/// Defensive cap on outer-hash retries (spec §5). Expected retries are
/// `<= 3` (Markov's inequality: `E[S] < 2n` so `Pr[S > 3n] < 2/3`); this
/// cap only guards against a pathological RNG.
const MAX_OUTER_RETRIES: u32 = 10_000;

/// A static-key perfect hash set over `u32`, built with the two-level FKS
/// scheme. Once [`PerfectHashSet::init`] succeeds, `insert`/`erase`/`find`
/// run in worst-case constant time and `is_possible` never fails.
#[derive(Debug, Clone)]
pub struct PerfectHashSet {
    hash_outer: Option<HashParams>,
    inner: Vec<InnerSet>,
    count: usize,
}

impl PerfectHashSet {
    /// Build the set from a seeded RNG, so construction traces are
    /// reproducible (spec §5: "seed must be observable to tests").
    pub fn init_with_rng<R: Rng + ?Sized>(
        universe: &[u32],
        rng: &mut R,
    ) -> Result<Self, PerfectHashError> {
        let n = universe.len();
        if n == 0 {
            return Ok(Self {
                hash_outer: None,
                inner: Vec::new(),
                count: 0,
            });
        }

        let n_u32 = n as u32;
        for attempt in 0..MAX_OUTER_RETRIES {
            let hash_outer = HashParams::sample(rng, n_u32);
            match partition(&hash_outer, universe, n) {
                Ok(buckets) => {
                    debug_assert_eq!(hash_outer.modulus(), n_u32, "outer hash modulus must match n");
                    let total_squared: u64 = buckets.iter().map(|b| (b.len() as u64).pow(2)).sum();
                    if total_squared > 3 * n as u64 {
                        continue;
                    }
                    let mut inner = Vec::with_capacity(n);
                    for bucket in &buckets {
                        // An inner construction can itself exhaust its retry
                        // budget or find a duplicate; surface it rather than
                        // silently retrying the whole outer hash.
                        inner.push(InnerSet::init(bucket, rng)?);
                    }
                    debug!(
                        "outer hash for {} keys settled after {} attempt(s), {} total inner slots",
                        n,
                        attempt + 1,
                        total_squared
                    );
                    return Ok(Self {
                        hash_outer: Some(hash_outer),
                        inner,
                        count: 0,
                    });
                }
                Err(x) => return Err(PerfectHashError::DuplicateKey(x)),
            }
        }
        Err(PerfectHashError::ConstructionExhausted)
    }

    /// Build the set with a fresh seed drawn from the OS entropy source.
    /// For reproducible construction traces use [`Self::init_with_seed`] or
    /// [`Self::init_with_rng`].
    pub fn init(universe: &[u32]) -> Result<Self, PerfectHashError> {
        let mut rng = ChaCha8Rng::from_os_rng();
        Self::init_with_rng(universe, &mut rng)
    }

    /// Build the set from an explicit seed (spec §5: the seed must be
    /// observable to tests so a construction can be replayed).
    pub fn init_with_seed(universe: &[u32], seed: u64) -> Result<Self, PerfectHashError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::init_with_rng(universe, &mut rng)
    }

    fn bucket_index(&self, x: u32) -> Option<usize> {
        self.hash_outer.as_ref().map(|h| h.hash(x))
    }

    /// Total inner-table slot count across every bucket (`Σ|bucket|^2`).
    /// Exposed so external callers can verify the space bound spec §4.3
    /// guarantees after construction.
    pub fn total_slots(&self) -> usize {
        self.inner.iter().map(InnerSet::slot_count).sum()
    }
}

impl PerfectHashSetLike for PerfectHashSet {
    fn insert(&mut self, x: u32) -> Result<(), PerfectHashError> {
        let idx = self.bucket_index(x).ok_or(PerfectHashError::NotInUniverse(x))?;
        if self.inner[idx].insert(x)? {
            self.count += 1;
        }
        Ok(())
    }

    fn erase(&mut self, x: u32) -> Result<(), PerfectHashError> {
        let idx = self.bucket_index(x).ok_or(PerfectHashError::NotInUniverse(x))?;
        if self.inner[idx].erase(x)? {
            self.count -= 1;
        }
        Ok(())
    }

    fn find(&self, x: u32) -> Result<bool, PerfectHashError> {
        let idx = self.bucket_index(x).ok_or(PerfectHashError::NotInUniverse(x))?;
        self.inner[idx].find(x)
    }

    fn is_possible(&self, x: u32) -> bool {
        match self.bucket_index(x) {
            Some(idx) => self.inner[idx].is_possible(x),
            None => false,
        }
    }

    fn size(&self) -> usize {
        self.count
    }
}

/// Partition `universe` into `n` buckets by `hash_outer`, sort-and-scanning
/// each bucket for duplicates as it goes (spec §9's preferred replacement
/// for the source's size-3 special case). Returns the offending key on the
/// first duplicate found.
fn partition(hash_outer: &HashParams, universe: &[u32], n: usize) -> Result<Vec<Vec<u32>>, u32> {
    let mut buckets: Vec<Vec<u32>> = vec![Vec::new(); n];
    for &x in universe {
        buckets[hash_outer.hash(x)].push(x);
    }
    for bucket in &mut buckets {
        if bucket.len() < 2 {
            continue;
        }
        bucket.sort_unstable();
        for pair in bucket.windows(2) {
            if pair[0] == pair[1] {
                return Err(pair[0]);
            }
        }
    }
    Ok(buckets)
}

/// Builder mirroring the teacher's `KvStoreBuilder`, convenient for
/// constructing a set from an iterator of keys rather than a `Vec`.
#[derive(Debug, Default)]
pub struct PerfectHashSetBuilder {
    keys: Vec<u32>,
    seed: Option<u64>,
}

impl PerfectHashSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, key: u32) -> Self {
        self.keys.push(key);
        self
    }

    pub fn extend<I: IntoIterator<Item = u32>>(mut self, iter: I) -> Self {
        self.keys.extend(iter);
        self
    }

    /// Fix the construction seed, so the built set's coefficient draws are
    /// reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<PerfectHashSet, PerfectHashError> {
        match self.seed {
            Some(seed) => PerfectHashSet::init_with_seed(&self.keys, seed),
            None => PerfectHashSet::init(&self.keys),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(keys: &[u32]) -> PerfectHashSet {
        PerfectHashSet::init_with_seed(keys, 1).unwrap()
    }

    #[test]
    fn s1_empty_universe() {
        let mut set = build(&[]);
        assert_eq!(set.size(), 0);
        assert!(matches!(
            set.insert(0),
            Err(PerfectHashError::NotInUniverse(0))
        ));
        assert!(matches!(
            set.find(0),
            Err(PerfectHashError::NotInUniverse(0))
        ));
        assert!(!set.is_possible(0));
    }

    #[test]
    fn s2_singleton() {
        let mut set = build(&[42]);
        assert_eq!(set.size(), 0);
        assert!(set.is_possible(42));
        assert_eq!(set.find(42), Ok(false));
        set.insert(42).unwrap();
        assert_eq!(set.size(), 1);
        assert_eq!(set.find(42), Ok(true));
        set.erase(42).unwrap();
        assert_eq!(set.size(), 0);
        assert_eq!(set.find(42), Ok(false));
        assert!(matches!(
            set.insert(7),
            Err(PerfectHashError::NotInUniverse(7))
        ));
    }

    #[test]
    fn s3_permutation_invariance() {
        let base = vec![1u32, 2, 3, 4, 5];
        let mut permuted = base.clone();
        permuted.reverse();
        for universe in [base, permuted] {
            let set = build(&universe);
            for k in 1..=5u32 {
                assert!(set.is_possible(k));
            }
            assert!(!set.is_possible(0));
            assert!(!set.is_possible(6));
            assert_eq!(set.size(), 0);
        }
    }

    #[test]
    fn s4_duplicate_detection() {
        let err = PerfectHashSet::init_with_seed(&[1, 2, 3, 2], 1).unwrap_err();
        assert_eq!(err, PerfectHashError::DuplicateKey(2));
    }

    #[test]
    fn s5_large_value_keys() {
        let universe = vec![
            u32::MAX - 4,
            u32::MAX - 3,
            u32::MAX - 2,
            u32::MAX - 1,
            u32::MAX,
        ];
        let mut set = build(&universe);
        for &k in &universe {
            assert!(set.is_possible(k));
        }
        set.insert(u32::MAX).unwrap();
        assert_eq!(set.find(u32::MAX), Ok(true));
    }

    #[test]
    fn s6_insert_idempotence() {
        let mut set = build(&[10]);
        set.insert(10).unwrap();
        set.insert(10).unwrap();
        assert_eq!(set.size(), 1);
        set.erase(10).unwrap();
        assert_eq!(set.size(), 0);
    }

    #[test]
    fn space_bound_holds_after_construction() {
        let universe: Vec<u32> = (0..500).map(|i| i * 31).collect();
        let set = build(&universe);
        let n = universe.len() as u64;
        // Reconstruct the per-bucket squared sizes from slot counts: an
        // inner set's slot count is exactly |bucket|^2 (or 0 for an empty
        // bucket), so summing them reproduces S directly.
        let s: u64 = set
            .inner
            .iter()
            .map(|i| i.slot_count() as u64)
            .sum();
        assert!(s <= 3 * n, "space bound violated: S={s} n={n}");
    }

    #[test]
    fn builder_pattern_round_trips() {
        let mut set = PerfectHashSetBuilder::new()
            .insert(1)
            .insert(2)
            .extend([3, 4])
            .with_seed(77)
            .build()
            .unwrap();
        for k in 1..=4u32 {
            assert!(set.is_possible(k));
        }
        set.insert(3).unwrap();
        assert_eq!(set.find(3), Ok(true));
    }
}
