//! The inner level of the FKS scheme: a single collision-free hash table
//! sized to the square of its bucket's element count.

use log::trace;
use rand::Rng;

use crate::error::PerfectHashError;
use crate::hash::HashParams;

/// Defensive cap on inner-hash retries. Expected retries are `< 2`
/// (Markov's inequality over a 2-universal family with `k^2` slots for `k`
/// keys); this cap only guards against a pathological RNG and is never hit
/// in ordinary operation.
const MAX_RETRIES: u32 = 10_000;

/// A single bucket's collision-free table.
///
/// Invariants (spec §3):
/// 1. for every assigned key `x`, `slot_key[h(x)] == Some(x)`;
/// 2. `h` is injective over the assigned keys;
/// 3. `present[i]` only ever set for a slot with a recorded key.
#[derive(Debug, Clone)]
pub struct InnerSet {
    hash: Option<HashParams>,
    slot_key: Vec<Option<u32>>,
    present: Vec<bool>,
}

impl InnerSet {
    /// Build the inner table for one bucket. `keys` must be pairwise
    /// distinct — the caller ([`PerfectHashSet`](crate::PerfectHashSet))
    /// verifies this during outer partitioning, but a duplicate found here
    /// (belt-and-suspenders, spec §4.2) still surfaces as `DuplicateKey`.
    pub fn init<R: Rng + ?Sized>(
        keys: &[u32],
        rng: &mut R,
    ) -> Result<Self, PerfectHashError> {
        if keys.is_empty() {
            return Ok(Self {
                hash: None,
                slot_key: Vec::new(),
                present: Vec::new(),
            });
        }

        let k = keys.len() as u64;
        let m_inner_wide = k * k;
        let m_inner = u32::try_from(m_inner_wide).map_err(|_| PerfectHashError::ConstructionExhausted)?;

        for attempt in 0..MAX_RETRIES {
            let hash = HashParams::sample(rng, m_inner);
            match try_place(&hash, keys, m_inner as usize) {
                Ok(slot_key) => {
                    debug_assert_eq!(hash.modulus(), m_inner, "inner hash modulus must match k^2");
                    trace!(
                        "inner set of {} keys placed after {} attempt(s)",
                        keys.len(),
                        attempt + 1
                    );
                    return Ok(Self {
                        hash: Some(hash),
                        present: vec![false; m_inner as usize],
                        slot_key,
                    });
                }
                Err(PlaceOutcome::Duplicate(x)) => return Err(PerfectHashError::DuplicateKey(x)),
                Err(PlaceOutcome::Collision) => continue,
            }
        }
        Err(PerfectHashError::ConstructionExhausted)
    }

    /// Number of slots in this bucket's table (`k^2` for `k` assigned keys,
    /// `0` for an empty bucket). Exposed for space-bound verification.
    pub fn slot_count(&self) -> usize {
        self.slot_key.len()
    }

    fn slot(&self, x: u32) -> Option<usize> {
        self.hash.as_ref().map(|h| h.hash(x))
    }

    /// `true` iff `m_inner > 0` and `x` was one of the bucket's assigned
    /// keys. Never fails.
    pub fn is_possible(&self, x: u32) -> bool {
        match self.slot(x) {
            Some(slot) => self.slot_key[slot] == Some(x),
            None => false,
        }
    }

    fn check_possible(&self, x: u32) -> Result<usize, PerfectHashError> {
        let slot = self.slot(x).ok_or(PerfectHashError::NotInUniverse(x))?;
        if self.slot_key[slot] == Some(x) {
            Ok(slot)
        } else {
            Err(PerfectHashError::NotInUniverse(x))
        }
    }

    /// Sets the presence bit. Returns whether it changed (`0 -> 1`).
    pub fn insert(&mut self, x: u32) -> Result<bool, PerfectHashError> {
        let slot = self.check_possible(x)?;
        let changed = !self.present[slot];
        self.present[slot] = true;
        Ok(changed)
    }

    /// Clears the presence bit. Returns whether it changed (`1 -> 0`).
    pub fn erase(&mut self, x: u32) -> Result<bool, PerfectHashError> {
        let slot = self.check_possible(x)?;
        let changed = self.present[slot];
        self.present[slot] = false;
        Ok(changed)
    }

    pub fn find(&self, x: u32) -> Result<bool, PerfectHashError> {
        let slot = self.check_possible(x)?;
        Ok(self.present[slot])
    }
}

enum PlaceOutcome {
    Collision,
    Duplicate(u32),
}

/// One placement attempt: hash every key, fail fast on the first collision
/// (reporting `Duplicate` if the colliding keys are equal, `Collision`
/// otherwise so the caller resamples).
fn try_place(
    hash: &HashParams,
    keys: &[u32],
    m_inner: usize,
) -> Result<Vec<Option<u32>>, PlaceOutcome> {
    let mut slot_key: Vec<Option<u32>> = vec![None; m_inner];
    for &x in keys {
        let slot = hash.hash(x);
        match slot_key[slot] {
            Some(existing) if existing == x => return Err(PlaceOutcome::Duplicate(x)),
            Some(_) => return Err(PlaceOutcome::Collision),
            None => slot_key[slot] = Some(x),
        }
    }
    Ok(slot_key)
}
