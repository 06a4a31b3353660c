//! Runtime errors for the few fallible conversions in the crate.
//!
//! Everything about a vector type's register layout is checked at compile
//! time; only data coming in from unsized slices can be wrong at run time.

use core::fmt;

/// Error returned when a vector or matrix is built from a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorError {
    /// The slice does not hold exactly as many elements as the target type.
    LengthMismatch {
        /// The logical length of the target type.
        expected: usize,
        /// The length of the slice that was supplied.
        found: usize,
    },
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::LengthMismatch { expected, found } => write!(
                f,
                "Length mismatch: expected {} elements, found {}",
                expected, found
            ),
        }
    }
}

impl core::error::Error for VectorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "std")]
    #[test]
    fn display_names_both_lengths() {
        use std::string::ToString;

        let err = VectorError::LengthMismatch {
            expected: 3,
            found: 5,
        };
        assert_eq!(
            err.to_string(),
            "Length mismatch: expected 3 elements, found 5"
        );
    }
}
