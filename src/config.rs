use crate::error::ConfigError;

/// Construction parameters for an [`OpenAddressingTable`].
///
/// The defaults are 64 slots and a resize factor of `0.7`.
///
/// # Examples
///
/// ```rust
/// use collision_maps::OpenAddressingConfig;
///
/// let config = OpenAddressingConfig::default()
///     .capacity(10)
///     .resize_factor(0.8);
/// assert!(config.validate().is_ok());
///
/// assert!(OpenAddressingConfig::default().resize_factor(1.0).validate().is_err());
/// ```
///
/// [`OpenAddressingTable`]: crate::OpenAddressingTable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenAddressingConfig {
    pub(crate) capacity: usize,
    pub(crate) resize_factor: f64,
}

impl OpenAddressingConfig {
    /// Slot count used when none is given.
    pub const DEFAULT_CAPACITY: usize = 64;
    /// Load factor at which the table doubles, used when none is given.
    pub const DEFAULT_RESIZE_FACTOR: f64 = 0.7;

    /// Sets the initial number of slots. Must be positive.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the load factor (`len / capacity`) at which the table doubles.
    /// Must lie strictly between 0 and 1.
    pub fn resize_factor(mut self, resize_factor: f64) -> Self {
        self.resize_factor = resize_factor;
        self
    }

    /// Checks every parameter against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        // Written so NaN fails too.
        if !(self.resize_factor > 0.0 && self.resize_factor < 1.0) {
            return Err(ConfigError::ResizeFactorOutOfRange(self.resize_factor));
        }
        Ok(())
    }
}

impl Default for OpenAddressingConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            resize_factor: Self::DEFAULT_RESIZE_FACTOR,
        }
    }
}

/// Construction parameters for a [`SeparateChainingTable`].
///
/// The defaults are 40 buckets and a chain limit of 5. The table doubles as
/// soon as an insert brings any bucket to `max_chain_size` entries.
///
/// [`SeparateChainingTable`]: crate::SeparateChainingTable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainingConfig {
    pub(crate) capacity: usize,
    pub(crate) max_chain_size: usize,
}

impl ChainingConfig {
    /// Bucket count used when none is given.
    pub const DEFAULT_CAPACITY: usize = 40;
    /// Chain length that triggers growth, used when none is given.
    pub const DEFAULT_MAX_CHAIN_SIZE: usize = 5;

    /// Sets the initial number of buckets. Must be positive.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the bucket length that triggers growth. Must be positive.
    pub fn max_chain_size(mut self, max_chain_size: usize) -> Self {
        self.max_chain_size = max_chain_size;
        self
    }

    /// Checks every parameter against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_chain_size == 0 {
            return Err(ConfigError::ZeroMaxChainSize);
        }
        Ok(())
    }
}

impl Default for ChainingConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            max_chain_size: Self::DEFAULT_MAX_CHAIN_SIZE,
        }
    }
}
