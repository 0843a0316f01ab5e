//! The polymorphic set capability both [`PerfectHashSet`](crate::PerfectHashSet)
//! and [`ReferenceSet`](crate::ReferenceSet) implement — the Rust expression
//! of the source's `ISet` virtual interface (spec §9: "implementers may use
//! tagged variants, interface abstractions, or generic parameters").
//!
//! A trait rather than a virtual base class: the differential driver in
//! `src/bin/fksctl.rs` only ever needs a uniform call site, which a trait
//! object (`&mut dyn PerfectHashSetLike`) or a generic function over `T:
//! PerfectHashSetLike` both provide without the indirection a C++-style
//! abstract class would force on every operation.

use crate::error::PerfectHashError;

/// `init` is deliberately not part of this trait: each implementation's
/// constructor has a different useful shape (seeded RNG for
/// `PerfectHashSet`, none needed for `ReferenceSet`), and spec §3's
/// lifecycle ("a set is constructed once... re-initialising overwrites all
/// state") is naturally expressed as "build a new value", which Rust's
/// ownership model favors over in-place reinitialization anyway.
pub trait PerfectHashSetLike {
    /// Sets `x` present. No-op (but still `Ok`) if already present.
    /// Fails with `NotInUniverse` if `x` is outside the initial universe.
    fn insert(&mut self, x: u32) -> Result<(), PerfectHashError>;

    /// Clears `x`'s presence. No-op (but still `Ok`) if already absent.
    /// Fails with `NotInUniverse` if `x` is outside the initial universe.
    fn erase(&mut self, x: u32) -> Result<(), PerfectHashError>;

    /// Whether `x` is currently present. Fails with `NotInUniverse` if `x`
    /// is outside the initial universe.
    fn find(&self, x: u32) -> Result<bool, PerfectHashError>;

    /// Whether `x` belongs to the initial universe. Never fails.
    fn is_possible(&self, x: u32) -> bool;

    /// Number of keys currently present.
    fn size(&self) -> usize;
}
