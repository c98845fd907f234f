//! Vector configuration.

use std::env;

/// Environment variable to override the default of
/// [`VectorConfig::null_checking`] in [`VectorConfig::from_env`].
pub const NULL_CHECK_FOR_GET_ENV: &str = "XNGIN_NULL_CHECK_FOR_GET";

/// Configuration of a vector.
///
/// It is fixed when the vector is constructed and inherited by
/// every vector created as its transfer destination, so behavior
/// of a vector never changes during its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorConfig {
    /// Whether `get()` fails when reading a null slot.
    ///
    /// Default: true.
    pub null_checking: bool,

    /// Number of slots to allocate when an empty vector grows
    /// for the first time.
    ///
    /// Default: 3970.
    pub initial_capacity: usize,

    /// Maximum byte size of a single buffer.
    /// Growing beyond it fails with capacity exhausted error.
    ///
    /// Default: `isize::MAX`.
    pub max_allocation_bytes: usize,
}

impl VectorConfig {
    pub const DEFAULT_INITIAL_CAPACITY: usize = 3970;

    pub const DEFAULT_MAX_ALLOCATION_BYTES: usize = isize::MAX as usize;

    #[inline]
    pub fn new() -> Self {
        VectorConfig {
            null_checking: true,
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            max_allocation_bytes: Self::DEFAULT_MAX_ALLOCATION_BYTES,
        }
    }

    /// Create a config with defaults, where null checking can be
    /// turned off by setting [`NULL_CHECK_FOR_GET_ENV`] to
    /// `false` or `0`.
    pub fn from_env() -> Self {
        let mut cfg = Self::new();
        if let Ok(val) = env::var(NULL_CHECK_FOR_GET_ENV) {
            match parse_flag(&val) {
                Some(flag) => cfg.null_checking = flag,
                None => log::warn!(
                    "ignore invalid value {:?} of {}, null checking stays {}",
                    val,
                    NULL_CHECK_FOR_GET_ENV,
                    cfg.null_checking
                ),
            }
        }
        cfg
    }

    #[inline]
    pub fn null_checking(mut self, null_checking: bool) -> Self {
        self.null_checking = null_checking;
        self
    }

    #[inline]
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    #[inline]
    pub fn max_allocation_bytes(mut self, max_allocation_bytes: usize) -> Self {
        self.max_allocation_bytes = max_allocation_bytes;
        self
    }
}

impl Default for VectorConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" => Some(true),
        "false" | "0" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = VectorConfig::default();
        assert!(cfg.null_checking);
        assert_eq!(3970, cfg.initial_capacity);
        assert_eq!(isize::MAX as usize, cfg.max_allocation_bytes);
    }

    #[test]
    fn test_config_builder() {
        let cfg = VectorConfig::new()
            .null_checking(false)
            .initial_capacity(16)
            .max_allocation_bytes(1024);
        assert!(!cfg.null_checking);
        assert_eq!(16, cfg.initial_capacity);
        assert_eq!(1024, cfg.max_allocation_bytes);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(Some(true), parse_flag("TRUE"));
        assert_eq!(Some(false), parse_flag(" 0 "));
        assert_eq!(Some(false), parse_flag("off"));
        assert_eq!(None, parse_flag("maybe"));
    }
}
