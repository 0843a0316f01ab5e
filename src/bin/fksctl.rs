//! Differential test driver for the perfect hash set (spec §6's CLI
//! contract). This binary is the "external collaborator" spec.md §1 carves
//! out of THE CORE's scope: argument parsing, workload generation, timing,
//! and console reporting. It exercises [`perfect_hash_set::PerfectHashSet`]
//! against [`perfect_hash_set::ReferenceSet`] and reports any divergence.
//!
//! Grounded on `original_source/tests.h`'s `test()` loop and its
//! `WorkingSet`/`ITest` shapes; CLI parsing style is `DennisOSRM-toolbox-rs`'s
//! `clap::Parser` derive.

use std::fmt::Display;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use perfect_hash_set::set::PerfectHashSetLike;
use perfect_hash_set::workload::{Action, WorkloadKind};
use perfect_hash_set::{PerfectHashError, PerfectHashSet, ReferenceSet};

/// The CLI's `typeOfTest` vocabulary (spec §6), mapped onto the library's
/// internal [`WorkloadKind`].
#[derive(ValueEnum, Clone, Copy, Debug)]
enum TypeOfTestArg {
    Random,
    Permutation,
    DegenerateDuplicate,
    Adversarial,
}

impl From<TypeOfTestArg> for WorkloadKind {
    fn from(t: TypeOfTestArg) -> Self {
        match t {
            TypeOfTestArg::Random => WorkloadKind::Random,
            TypeOfTestArg::Permutation => WorkloadKind::Permutation,
            TypeOfTestArg::DegenerateDuplicate => WorkloadKind::DegenerateDuplicate,
            TypeOfTestArg::Adversarial => WorkloadKind::Adversarial,
        }
    }
}

/// Differential test driver: replays randomly-generated operation
/// sequences against `PerfectHashSet` and `ReferenceSet` and reports any
/// disagreement.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// Workload shape to generate.
    #[clap(long, value_enum, default_value = "random")]
    type_of_test: TypeOfTestArg,

    /// Number of independent differential test iterations to run.
    #[clap(long, default_value_t = 100)]
    number_of_tests: u32,

    /// Upper bound on the size of a generated universe.
    #[clap(long, default_value_t = 200)]
    max_number_of_elements: u32,

    /// Upper bound on the number of operations per iteration.
    #[clap(long, default_value_t = 500)]
    max_number_of_queries: u32,

    /// Print the wall-clock duration of the whole run.
    #[clap(long, action)]
    time_measure: bool,

    /// Seed for the workload generator (not the sets under test — each
    /// iteration derives its own construction seed from this one, so a
    /// fixed value makes a whole run reproducible).
    #[clap(long, default_value_t = 0)]
    seed: u64,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "command line arguments:")?;
        writeln!(f, "type_of_test: {:?}", self.type_of_test)?;
        writeln!(f, "number_of_tests: {}", self.number_of_tests)?;
        writeln!(
            f,
            "max_number_of_elements: {}",
            self.max_number_of_elements
        )?;
        writeln!(f, "max_number_of_queries: {}", self.max_number_of_queries)?;
        writeln!(f, "time_measure: {}", self.time_measure)
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = <Arguments as clap::Parser>::parse();
    info!("{args}");

    let kind: WorkloadKind = args.type_of_test.into();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let start = Instant::now();
    for test_number in 0..args.number_of_tests {
        run_one(
            kind,
            &mut rng,
            args.max_number_of_elements,
            args.max_number_of_queries,
            test_number,
        );
    }
    println!();

    if args.time_measure {
        println!("elapsed: {:?}", start.elapsed());
    }
}

/// One differential test iteration: build both implementations over the
/// same generated universe, then replay the same action sequence against
/// both, printing `+` on success or a mismatch diagnostic (spec §6/§7).
fn run_one(
    kind: WorkloadKind,
    rng: &mut ChaCha8Rng,
    max_elements: u32,
    max_queries: u32,
    test_number: u32,
) {
    let workload = kind.generate(rng, max_elements, max_queries);
    let construction_seed = rand::Rng::random(rng);

    let reference = ReferenceSet::init(&workload.universe);
    let perfect = PerfectHashSet::init_with_seed(&workload.universe, construction_seed);

    let (mut reference, mut perfect) = match (reference, perfect) {
        (Ok(r), Ok(p)) => (r, p),
        (Err(re), Err(pe)) => {
            if error_kinds_match(re, pe) {
                print!("+");
                return;
            }
            println!("Different Exception result - test {test_number}");
            return;
        }
        _ => {
            println!("Different Exception result - test {test_number}");
            return;
        }
    };

    for action in &workload.actions {
        if !step(&mut reference, &mut perfect, *action, test_number) {
            return;
        }
    }

    print!("+");
}

/// Applies one action to both implementations, comparing results/errors.
/// Returns `false` (and prints a diagnostic) on the first mismatch, per
/// spec §7's "halts the current iteration, proceeding to the next".
fn step(
    reference: &mut ReferenceSet,
    perfect: &mut PerfectHashSet,
    action: Action,
    test_number: u32,
) -> bool {
    match action {
        Action::Insert(x) => {
            let r = reference.insert(x);
            let p = perfect.insert(x);
            errors_agree(r, p, test_number)
        }
        Action::Erase(x) => {
            let r = reference.erase(x);
            let p = perfect.erase(x);
            errors_agree(r, p, test_number)
        }
        Action::Find(x) => match (reference.find(x), perfect.find(x)) {
            (Ok(r), Ok(p)) => {
                if r != p {
                    println!("Different Answers - test {test_number}");
                    return false;
                }
                true
            }
            (r, p) => errors_agree(r.map(|_| ()), p.map(|_| ()), test_number),
        },
        Action::IsPossible(x) => {
            if reference.is_possible(x) != perfect.is_possible(x) {
                println!("Different Answers - test {test_number}");
                return false;
            }
            true
        }
        Action::Size => {
            if reference.size() != perfect.size() {
                println!("Different Answers - test {test_number}");
                return false;
            }
            true
        }
    }
}

fn errors_agree(
    r: Result<(), PerfectHashError>,
    p: Result<(), PerfectHashError>,
    test_number: u32,
) -> bool {
    match (r, p) {
        (Ok(()), Ok(())) => true,
        (Err(re), Err(pe)) if error_kinds_match(re, pe) => true,
        _ => {
            println!("Different Exception result - test {test_number}");
            false
        }
    }
}

fn error_kinds_match(a: PerfectHashError, b: PerfectHashError) -> bool {
    std::mem::discriminant(&a) == std::mem::discriminant(&b)
}
