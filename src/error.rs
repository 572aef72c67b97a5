//! Error handling for the primkit library
//!
//! Absence of a key is never an error in this crate: lookups and removals on
//! missing keys return the container's default return value (or `None` from
//! the `_opt` variants). The errors below are reserved for invalid arguments
//! and programmer errors such as structural modification during a cursor walk.

use thiserror::Error;

/// Main error type for the primkit library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrimError {
    /// Invalid constructor or method argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument
        message: String,
    },

    /// Parallel key/value arrays of different lengths
    #[error("Length mismatch: {keys} keys but {values} values")]
    LengthMismatch {
        /// Number of keys supplied
        keys: usize,
        /// Number of values supplied
        values: usize,
    },

    /// An offset/length window outside the supplied arrays
    #[error("Out of bounds: offset {offset} + length {length} exceeds size {size}")]
    OutOfBounds {
        /// Start of the requested window
        offset: usize,
        /// Length of the requested window
        length: usize,
        /// Size of the backing arrays
        size: usize,
    },

    /// Inverted or otherwise unusable key range
    #[error("Invalid range: {message}")]
    InvalidRange {
        /// Description of the range problem
        message: String,
    },

    /// Insertion through a range view with a key outside the view's bounds
    #[error("Key out of range: {message}")]
    KeyOutOfRange {
        /// Description of the key and bounds
        message: String,
    },

    /// The container was structurally modified while a cursor was open
    #[error("Concurrent modification: expected modification count {expected}, found {actual}")]
    ConcurrentModification {
        /// Modification count snapshotted by the cursor
        expected: u64,
        /// Modification count found on the container
        actual: u64,
    },

    /// Operation not valid in the current cursor state
    #[error("Illegal state: {message}")]
    IllegalState {
        /// Description of the state violation
        message: String,
    },
}

impl PrimError {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    /// Create a length mismatch error
    pub fn length_mismatch(keys: usize, values: usize) -> Self {
        Self::LengthMismatch { keys, values }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(offset: usize, length: usize, size: usize) -> Self {
        Self::OutOfBounds { offset, length, size }
    }

    /// Create an invalid range error
    pub fn invalid_range<S: Into<String>>(message: S) -> Self {
        Self::InvalidRange { message: message.into() }
    }

    /// Create a key out of range error
    pub fn key_out_of_range<S: Into<String>>(message: S) -> Self {
        Self::KeyOutOfRange { message: message.into() }
    }

    /// Create a concurrent modification error
    pub fn concurrent_modification(expected: u64, actual: u64) -> Self {
        Self::ConcurrentModification { expected, actual }
    }

    /// Create an illegal state error
    pub fn illegal_state<S: Into<String>>(message: S) -> Self {
        Self::IllegalState { message: message.into() }
    }

    /// Check if this error signals a bug in the calling code rather than bad input
    pub fn is_programmer_error(&self) -> bool {
        match self {
            Self::ConcurrentModification { .. } => true,
            Self::IllegalState { .. } => true,
            Self::InvalidArgument { .. } => false,
            Self::LengthMismatch { .. } => false,
            Self::OutOfBounds { .. } => false,
            Self::InvalidRange { .. } => false,
            Self::KeyOutOfRange { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "argument",
            Self::LengthMismatch { .. } => "length",
            Self::OutOfBounds { .. } => "bounds",
            Self::InvalidRange { .. } => "range",
            Self::KeyOutOfRange { .. } => "range",
            Self::ConcurrentModification { .. } => "modification",
            Self::IllegalState { .. } => "state",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PrimError>;

/// Assert that parallel key/value arrays have the same length
#[inline]
pub fn check_parallel_arrays(keys: usize, values: usize) -> Result<()> {
    if keys != values {
        Err(PrimError::length_mismatch(keys, values))
    } else {
        Ok(())
    }
}

/// Assert that `offset..offset + length` lies within arrays of `size` elements
#[inline]
pub fn check_slice_window(offset: usize, length: usize, size: usize) -> Result<()> {
    match offset.checked_add(length) {
        Some(end) if end <= size => Ok(()),
        _ => Err(PrimError::out_of_bounds(offset, length, size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PrimError::invalid_argument("load factor");
        assert_eq!(err.category(), "argument");
        assert!(!err.is_programmer_error());
    }

    #[test]
    fn test_parallel_array_checking() {
        assert!(check_parallel_arrays(3, 3).is_ok());
        assert!(check_parallel_arrays(0, 0).is_ok());
        assert_eq!(
            check_parallel_arrays(3, 2),
            Err(PrimError::LengthMismatch { keys: 3, values: 2 })
        );
    }

    #[test]
    fn test_slice_window_checking() {
        assert!(check_slice_window(0, 10, 10).is_ok());
        assert!(check_slice_window(10, 0, 10).is_ok());
        assert!(check_slice_window(5, 6, 10).is_err());
        assert!(check_slice_window(usize::MAX, 2, 10).is_err());
    }

    #[test]
    fn test_programmer_errors() {
        assert!(PrimError::concurrent_modification(1, 2).is_programmer_error());
        assert!(PrimError::illegal_state("no current entry").is_programmer_error());
        assert!(!PrimError::invalid_range("5 > 3").is_programmer_error());
        assert!(!PrimError::key_out_of_range("9 not in [1, 5)").is_programmer_error());
    }

    #[test]
    fn test_error_display() {
        let err = PrimError::length_mismatch(3, 2);
        let display = format!("{}", err);
        assert!(display.contains("Length mismatch"));
        assert!(display.contains('3'));
        assert!(display.contains('2'));

        let cme = PrimError::concurrent_modification(7, 9);
        let display = format!("{}", cme);
        assert!(display.contains("Concurrent modification"));
        assert!(display.contains('7'));
        assert!(display.contains('9'));
    }

    #[test]
    fn test_error_debug() {
        let err = PrimError::invalid_range("debug test");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("InvalidRange"));
        assert!(debug_str.contains("debug test"));
    }
}
