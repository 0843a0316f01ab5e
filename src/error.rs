use thiserror::Error;

/// Errors raised by [`PerfectHashSet`](crate::PerfectHashSet) and
/// [`ReferenceSet`](crate::ReferenceSet).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerfectHashError {
    #[error("duplicate key {0} in universe")]
    DuplicateKey(u32),

    #[error("key {0} is not in the initial universe")]
    NotInUniverse(u32),

    #[error("construction did not converge within the retry budget")]
    ConstructionExhausted,
}
