//! The oracle the perfect hash set is validated against: a sorted universe
//! for binary-search universe-membership, and an ordered set of currently
//! present keys.
//!
//! Grounded on `original_source/tests.h`'s `WorkingSet`: there, possibility
//! is `std::binary_search` over a sorted `vector<unsigned>` and presence is
//! a `std::set<unsigned>`; here the analogous idiomatic types are a sorted
//! `Vec<u32>` (binary search via `slice::binary_search`) and a `BTreeSet<u32>`.

use std::collections::BTreeSet;

use crate::error::PerfectHashError;
use crate::set::PerfectHashSetLike;

/// Ordered-container oracle against which [`PerfectHashSet`](crate::PerfectHashSet)
/// is validated differentially.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    universe: Vec<u32>,
    present: BTreeSet<u32>,
}

impl ReferenceSet {
    /// Build the oracle from `universe`. Duplicate detection is a
    /// sort-and-scan over the whole universe (spec §9's preferred
    /// simplification over the source's bucket-local shortcuts), so both
    /// implementations detect every duplicate the same way.
    pub fn init(universe: &[u32]) -> Result<Self, PerfectHashError> {
        let mut sorted = universe.to_vec();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                return Err(PerfectHashError::DuplicateKey(pair[0]));
            }
        }
        Ok(Self {
            universe: sorted,
            present: BTreeSet::new(),
        })
    }

    fn check_possible(&self, x: u32) -> Result<(), PerfectHashError> {
        if self.universe.binary_search(&x).is_ok() {
            Ok(())
        } else {
            Err(PerfectHashError::NotInUniverse(x))
        }
    }
}

impl PerfectHashSetLike for ReferenceSet {
    fn insert(&mut self, x: u32) -> Result<(), PerfectHashError> {
        self.check_possible(x)?;
        self.present.insert(x);
        Ok(())
    }

    fn erase(&mut self, x: u32) -> Result<(), PerfectHashError> {
        self.check_possible(x)?;
        self.present.remove(&x);
        Ok(())
    }

    fn find(&self, x: u32) -> Result<bool, PerfectHashError> {
        self.check_possible(x)?;
        Ok(self.present.contains(&x))
    }

    fn is_possible(&self, x: u32) -> bool {
        self.universe.binary_search(&x).is_ok()
    }

    fn size(&self) -> usize {
        self.present.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s1_empty_universe() {
        let mut set = ReferenceSet::init(&[]).unwrap();
        assert_eq!(set.size(), 0);
        assert!(matches!(
            set.insert(0),
            Err(PerfectHashError::NotInUniverse(0))
        ));
        assert!(!set.is_possible(0));
    }

    #[test]
    fn s4_duplicate_detection() {
        let err = ReferenceSet::init(&[1, 2, 3, 2]).unwrap_err();
        assert_eq!(err, PerfectHashError::DuplicateKey(2));
    }

    #[test]
    fn round_trip_leaves_state_unchanged() {
        let mut set = ReferenceSet::init(&[1, 2, 3]).unwrap();
        set.insert(1).unwrap();
        set.erase(1).unwrap();
        assert_eq!(set.size(), 0);
        assert_eq!(set.find(1), Ok(false));
    }
}
