use perfect_hash_set::{PerfectHashSet, PerfectHashSetLike, ReferenceSet};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Perfect Hash Set - Basic Usage Example");
    println!("=======================================");

    // Method 1: building from a fixed seed, for a reproducible construction trace.
    println!("\nBuilding from a fixed universe:");
    let universe = vec![10u32, 20, 30, 40, 50];
    let mut set = PerfectHashSet::init_with_seed(&universe, 42)?;
    println!("Set built over {} keys", universe.len());

    // Universe membership never fails.
    println!("\nUniverse membership checks:");
    for key in [10, 25, 50, 99] {
        println!("  is_possible({key}) = {}", set.is_possible(key));
    }

    // Insert a few keys, then look them up.
    println!("\nInserting and finding:");
    for key in [10, 30, 50] {
        set.insert(key)?;
        println!("  inserted {key}, find({key}) = {:?}", set.find(key));
    }
    println!("  size = {}", set.size());

    // Keys outside the initial universe are rejected, not silently ignored.
    println!("\nOut-of-universe keys are rejected:");
    match set.insert(999) {
        Ok(()) => println!("  unexpectedly accepted 999"),
        Err(e) => println!("  insert(999) -> {e}"),
    }

    // Method 2: via the builder, convenient when keys arrive incrementally.
    println!("\nBuilding via PerfectHashSetBuilder:");
    let mut built = perfect_hash_set::PerfectHashSetBuilder::new()
        .insert(1)
        .insert(2)
        .extend([3, 4, 5])
        .with_seed(7)
        .build()?;
    built.insert(3)?;
    println!("  built set size = {}", built.size());

    // The reference set is the oracle PerfectHashSet is validated against;
    // both answer identically for every operation on the same universe.
    println!("\nComparing against the reference oracle:");
    let mut oracle = ReferenceSet::init(&universe)?;
    for key in [10, 30, 50] {
        oracle.insert(key)?;
    }
    for key in [10, 20, 30, 40, 50, 99] {
        assert_eq!(set.find(key).ok(), oracle.find(key).ok());
    }
    println!("  perfect hash set and reference set agree on every query");

    Ok(())
}
