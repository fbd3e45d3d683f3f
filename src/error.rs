/// Invalid construction parameters.
///
/// Returned by every table constructor and by [`DoubleHashProbe::with_prime`]
/// before any storage is allocated.
///
/// [`DoubleHashProbe::with_prime`]: crate::probe::DoubleHashProbe::with_prime
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The requested slot or bucket count was zero.
    #[error("capacity must be a positive integer")]
    ZeroCapacity,

    /// The open-addressing resize factor was outside the open interval
    /// `(0, 1)`, or was NaN.
    #[error("resize factor must lie strictly between 0 and 1, got {0}")]
    ResizeFactorOutOfRange(f64),

    /// The separate-chaining chain limit was zero.
    #[error("max chain size must be a positive integer")]
    ZeroMaxChainSize,

    /// The double-hashing prime was zero.
    #[error("double hashing prime must be a positive integer")]
    ZeroPrime,
}

/// The error type for table operations.
///
/// Key capability requirements (hashing and equality for every table, total
/// ordering for tree buckets) are expressed as trait bounds, so violating them
/// is a compile error rather than a variant here.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The table could not be constructed.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The key is not present in the table.
    #[error("key not found")]
    NotFound,
}

/// A `Result` defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
