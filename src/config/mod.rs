//! Configuration APIs for primkit
//!
//! Containers can be sized and tuned through configuration types instead of
//! raw constructor arguments. Every configuration type implements [`Config`],
//! which provides validation, initialization from environment variables and
//! a few presets.
//!
//! # Preset Configurations
//!
//! ```rust
//! use primkit::config::{Config, HashMapConfig};
//!
//! // Short probe sequences at the cost of memory
//! let config = HashMapConfig::performance_preset();
//! assert!(config.validate().is_ok());
//!
//! // Dense tables
//! let config = HashMapConfig::memory_preset();
//! assert!(config.load_factor > 0.75);
//! ```
//!
//! # Environment Initialization
//!
//! ```rust
//! use primkit::config::{Config, HashMapConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads PRIMKIT_HASH_INITIAL_CAPACITY and PRIMKIT_HASH_LOAD_FACTOR
//! let config = HashMapConfig::from_env()?;
//!
//! // Same variables under a custom prefix
//! let config = HashMapConfig::from_env_with_prefix("MYAPP_")?;
//! # Ok(())
//! # }
//! ```
//!
//! Unparsable environment values are logged at `warn` level and replaced by
//! the default.

use crate::error::Result;
use std::env;
use std::fmt;
use std::str::FromStr;

pub mod hash_map;


pub use hash_map::HashMapConfig;

/// Common configuration trait providing validation, environment
/// initialization and preset management.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, `Err` with details if invalid.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Environment variables use the format `PRIMKIT_{COMPONENT}_{FIELD}`,
    /// for example `PRIMKIT_HASH_LOAD_FACTOR=0.5`.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix("PRIMKIT_")
    }

    /// Initialize configuration from environment variables with a custom prefix.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The environment variable prefix to use
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Get a performance-optimized preset configuration.
    ///
    /// Trades memory for speed.
    fn performance_preset() -> Self;

    /// Get a memory-optimized preset configuration.
    fn memory_preset() -> Self;

    /// Get a balanced preset configuration.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }
}

/// Parse an environment variable, falling back to `default`.
///
/// A variable that is set but does not parse is logged and ignored.
///
/// # Arguments
///
/// * `var_name` - The environment variable name
/// * `default` - The value used when the variable is unset or invalid
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    match env::var(var_name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!(
                    "ignoring invalid value {:?} for {}, using {}",
                    raw,
                    var_name,
                    default
                );
                default
            }
        },
        Err(_) => default,
    }
}
