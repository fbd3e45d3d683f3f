//! Selection of the hasher used when a table is built without one.

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used by `new()` and `Default`.
        ///
        /// With the `foldhash` feature this is `foldhash::fast::RandomState`:
        /// each table gets its own seed, and that seed is fixed for the
        /// table's lifetime, so cached hashes stay valid across resizes.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used by `new()` and `Default`.
        ///
        /// Without `foldhash` this is the standard library's SipHash-based
        /// `RandomState`.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        compile_error!("collision-maps needs either the `foldhash` or the `std` feature for a default hasher");
    }
}
