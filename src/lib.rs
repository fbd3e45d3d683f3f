#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bucket;
mod config;
mod entry;
mod error;
pub mod hasher;
mod iter;

/// Hash tables that store every entry in one flat slot array.
///
/// One generic [`OpenAddressingTable`] covers linear, quadratic and
/// double-hash probing, selected through its [`ProbeStrategy`] parameter.
///
/// [`ProbeStrategy`]: crate::probe::ProbeStrategy
pub mod open_addressing;

pub mod probe;

/// Hash tables that keep one bucket per slot.
///
/// One generic [`SeparateChainingTable`] covers vector, linked-list and tree
/// buckets, selected through its [`Bucket`] parameter.
///
/// [`Bucket`]: crate::bucket::Bucket
pub mod separate_chaining;

#[cfg(any(test, feature = "stats"))]
pub mod stats;

#[cfg(test)]
mod conformance;
#[cfg(test)]
mod test_util;

pub use config::ChainingConfig;
pub use config::OpenAddressingConfig;
pub use entry::Entry;
pub use error::ConfigError;
pub use error::Error;
pub use error::Result;
pub use hasher::DefaultHashBuilder;
pub use iter::Keys;
pub use iter::Values;
pub use open_addressing::DoubleHashingTable;
pub use open_addressing::LinearProbingTable;
pub use open_addressing::OpenAddressingTable;
pub use open_addressing::QuadraticProbingTable;
pub use separate_chaining::DynamicArrayChainingTable;
pub use separate_chaining::LinkedListChainingTable;
pub use separate_chaining::SeparateChainingTable;
pub use separate_chaining::TreeChainingTable;
