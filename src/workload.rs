//! Differential-test workload generators (spec §1's "suite of workload
//! generators"), grounded on `original_source/tests.h`'s
//! `RandomUniqueSeqAndCorectRandomQueriesTest`.
//!
//! Each generator produces a universe and an operation sequence to replay
//! against both [`crate::PerfectHashSet`] and [`crate::ReferenceSet`]; the
//! driver binary (`src/bin/fksctl.rs`) is the only consumer.

use rand::Rng;

/// One step of a differential test's operation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert(u32),
    Erase(u32),
    Find(u32),
    IsPossible(u32),
    Size,
}

/// A universe plus the sequence of operations to run against it.
#[derive(Debug, Clone)]
pub struct Workload {
    pub universe: Vec<u32>,
    pub actions: Vec<Action>,
}

/// Which workload shape to generate, matching spec §1's named suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    /// Uniformly random, deduplicated universe; uniformly random actions.
    Random,
    /// A small contiguous range of keys, each permutation equally likely —
    /// exercises spec §8 scenario S3 (permutation invariance).
    Permutation,
    /// Deliberately contains a duplicate so `init` must raise
    /// `DuplicateKey` — exercises spec §8 scenario S4.
    DegenerateDuplicate,
    /// Keys clustered into a few residues modulo a small number, stressing
    /// bucket-size skew and the outer retry loop.
    Adversarial,
}

impl WorkloadKind {
    pub fn generate<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        max_elements: u32,
        max_queries: u32,
    ) -> Workload {
        match self {
            WorkloadKind::Random => random(rng, max_elements, max_queries),
            WorkloadKind::Permutation => permutation(rng, max_elements, max_queries),
            WorkloadKind::DegenerateDuplicate => {
                degenerate_duplicate(rng, max_elements, max_queries)
            }
            WorkloadKind::Adversarial => adversarial(rng, max_elements, max_queries),
        }
    }
}

fn random_actions<R: Rng + ?Sized>(
    rng: &mut R,
    universe: &[u32],
    max_queries: u32,
) -> Vec<Action> {
    if universe.is_empty() {
        return Vec::new();
    }
    let n_queries = rng.random_range(0..=max_queries);
    (0..n_queries)
        .map(|_| {
            let idx = rng.random_range(0..universe.len());
            let key = universe[idx];
            match rng.random_range(0..5) {
                0 => Action::Insert(key),
                1 => Action::Erase(key),
                2 => Action::Find(key),
                3 => Action::IsPossible(key),
                _ => Action::Size,
            }
        })
        .collect()
}

fn random<R: Rng + ?Sized>(rng: &mut R, max_elements: u32, max_queries: u32) -> Workload {
    let n = rng.random_range(0..=max_elements);
    let mut universe: Vec<u32> = (0..n).map(|_| rng.random::<u32>()).collect();
    universe.sort_unstable();
    universe.dedup();
    let actions = random_actions(rng, &universe, max_queries);
    Workload { universe, actions }
}

fn permutation<R: Rng + ?Sized>(rng: &mut R, max_elements: u32, max_queries: u32) -> Workload {
    let n = rng.random_range(0..=max_elements);
    let mut universe: Vec<u32> = (0..n).collect();
    // Fisher-Yates.
    for i in (1..universe.len()).rev() {
        let j = rng.random_range(0..=i);
        universe.swap(i, j);
    }
    let actions = random_actions(rng, &universe, max_queries);
    Workload { universe, actions }
}

fn degenerate_duplicate<R: Rng + ?Sized>(
    rng: &mut R,
    max_elements: u32,
    max_queries: u32,
) -> Workload {
    let n = rng.random_range(2..=max_elements.max(2));
    let mut universe: Vec<u32> = (0..n - 1).collect();
    let duplicate = universe[rng.random_range(0..universe.len())];
    universe.push(duplicate);
    let actions = random_actions(rng, &universe, max_queries);
    Workload { universe, actions }
}

fn adversarial<R: Rng + ?Sized>(rng: &mut R, max_elements: u32, max_queries: u32) -> Workload {
    let n = rng.random_range(0..=max_elements);
    // A handful of residues modulo a small prime skews bucket sizes much
    // more than a uniform draw would, stressing the outer `S <= 3n` retry
    // loop described in spec §4.3.
    const RESIDUES: [u32; 4] = [1, 2, 3, 5];
    let modulus = 97u32;
    let mut universe: Vec<u32> = (0..n)
        .map(|i| {
            let residue = RESIDUES[(i as usize) % RESIDUES.len()];
            i.wrapping_mul(modulus).wrapping_add(residue)
        })
        .collect();
    universe.sort_unstable();
    universe.dedup();
    let actions = random_actions(rng, &universe, max_queries);
    Workload { universe, actions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn all_kinds_produce_a_duplicate_free_universe_except_the_degenerate_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for kind in [
            WorkloadKind::Random,
            WorkloadKind::Permutation,
            WorkloadKind::Adversarial,
        ] {
            let w = kind.generate(&mut rng, 50, 20);
            let mut sorted = w.universe.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), w.universe.len());
        }
    }

    #[test]
    fn degenerate_duplicate_always_contains_a_repeat() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let w = WorkloadKind::DegenerateDuplicate.generate(&mut rng, 10, 5);
        let mut sorted = w.universe.clone();
        sorted.sort_unstable();
        let has_duplicate = sorted.windows(2).any(|p| p[0] == p[1]);
        assert!(has_duplicate);
    }

    #[test]
    fn permutation_universe_is_a_contiguous_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let w = WorkloadKind::Permutation.generate(&mut rng, 8, 5);
        let mut sorted = w.universe.clone();
        sorted.sort_unstable();
        let expected: Vec<u32> = (0..sorted.len() as u32).collect();
        assert_eq!(sorted, expected);
    }
}
