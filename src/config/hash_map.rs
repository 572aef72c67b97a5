//! Hash container configuration.

use super::{parse_env_var, Config};
use crate::error::{PrimError, Result};
use crate::hash_map::{
    DEFAULT_INITIAL_SIZE, DEFAULT_LOAD_FACTOR, FAST_LOAD_FACTOR, MAX_TABLE_SIZE,
};

/// Sizing of an open hash map or set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashMapConfig {
    /// Number of entries the table holds before its first resize
    pub initial_capacity: usize,
    /// Maximum fill ratio of the probed region, in `(0, 1]`
    pub load_factor: f32,
}

impl HashMapConfig {
    /// Create a configuration with explicit values.
    pub fn new(initial_capacity: usize, load_factor: f32) -> Self {
        Self { initial_capacity, load_factor }
    }

    /// Replace the initial capacity.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Replace the load factor.
    pub fn with_load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }
}

impl Default for HashMapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_SIZE,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl Config for HashMapConfig {
    fn validate(&self) -> Result<()> {
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(PrimError::invalid_argument(format!(
                "load_factor must be in (0, 1], got {}",
                self.load_factor
            )));
        }
        let slots = (self.initial_capacity as f64 / self.load_factor as f64).ceil();
        if slots > MAX_TABLE_SIZE as f64 {
            return Err(PrimError::invalid_argument(format!(
                "initial_capacity {} needs more than {} slots",
                self.initial_capacity, MAX_TABLE_SIZE
            )));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            initial_capacity: parse_env_var(
                &format!("{}HASH_INITIAL_CAPACITY", prefix),
                defaults.initial_capacity,
            ),
            load_factor: parse_env_var(&format!("{}HASH_LOAD_FACTOR", prefix), defaults.load_factor),
        };
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            initial_capacity: 1024,
            load_factor: FAST_LOAD_FACTOR,
        }
    }

    fn memory_preset() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_SIZE,
            load_factor: 0.9,
        }
    }
}
