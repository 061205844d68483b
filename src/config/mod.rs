//! Configuration for container behavior.
//!
//! [`ContainerConfig`] controls the limits and allocation behavior of a
//! [`BufferContainer`](crate::BufferContainer) created through
//! [`BufferContainer::create_with_config`](crate::BufferContainer::create_with_config).
//!
//! # Example
//!
//! ```
//! use samplebuf::ContainerConfig;
//!
//! let config = ContainerConfig::new(1 << 20, true)?;
//!
//! let config = ContainerConfig::default()
//!     .with_initial_capacity(4096)
//!     .with_debug(true);
//!
//! # Ok::<(), samplebuf::ContainerError>(())
//! ```

use crate::error::ContainerError;

/// Default upper bound on the element count accepted by fallible growth.
pub const DEFAULT_MAX_LEN: usize = isize::MAX as usize;

/// Configuration for a buffer container.
///
/// - `max_len` - Upper bound enforced when [`try_reserve`](crate::BufferContainer::try_reserve) grows the buffer
/// - `release_on_squeeze` - Whether `squeeze` hands spare capacity back to the allocator
/// - `debug` - Initial value of the object debug flag
/// - `initial_capacity` - Capacity allocated at creation, without changing `len()`
///
/// # Example
///
/// ```
/// use samplebuf::ContainerConfig;
///
/// let config = ContainerConfig::default()
///     .with_max_len(1024)
///     .with_release_on_squeeze(false);
///
/// assert_eq!(config.max_len(), 1024);
/// assert!(!config.release_on_squeeze());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerConfig {
    max_len: usize,
    release_on_squeeze: bool,
    debug: bool,
    initial_capacity: usize,
}

impl ContainerConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidConfig`] if `max_len` is zero.
    pub fn new(max_len: usize, release_on_squeeze: bool) -> Result<Self, ContainerError> {
        if max_len == 0 {
            return Err(ContainerError::InvalidConfig {
                message: "max_len must be non-zero",
            });
        }

        Ok(Self {
            max_len,
            release_on_squeeze,
            debug: false,
            initial_capacity: 0,
        })
    }

    /// Sets the maximum element count.
    ///
    /// Note: This does not validate the configuration. Use [`ContainerConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Sets whether `squeeze` releases spare capacity.
    pub fn with_release_on_squeeze(mut self, release: bool) -> Self {
        self.release_on_squeeze = release;
        self
    }

    /// Sets the initial debug flag.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the capacity allocated at creation.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Returns the maximum element count.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Returns whether `squeeze` releases spare capacity.
    pub fn release_on_squeeze(&self) -> bool {
        self.release_on_squeeze
    }

    /// Returns the initial debug flag.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the capacity allocated at creation.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use samplebuf::ContainerConfig;
    ///
    /// let config = ContainerConfig::default().with_max_len(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ContainerError> {
        Self::new(self.max_len, self.release_on_squeeze)?;

        if self.initial_capacity > self.max_len {
            return Err(ContainerError::InvalidConfig {
                message: "initial_capacity cannot be greater than max_len",
            });
        }

        Ok(())
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            release_on_squeeze: true,
            debug: false,
            initial_capacity: 0,
        }
    }
}
