//! Error types for tensorcv

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using tensorcv's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tensorcv operations
///
/// `InvalidArgument` and `UnsupportedDType`/`UnsupportedDepth` are detected
/// before any OpenCV call is made. `Vision` carries a failure raised inside
/// OpenCV, forwarded without reinterpretation.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or mismatched shape/parameter
    #[error("invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Tensor element type outside the fixed element-to-depth table
    #[error("unsupported element type {dtype} for '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// Image pixel depth outside the fixed element-to-depth table
    #[error("no tensor element type for OpenCV depth {depth} in '{op}'")]
    UnsupportedDepth {
        /// The raw OpenCV depth code
        depth: i32,
        /// The operation name
        op: &'static str,
    },

    /// Failure raised by OpenCV, forwarded verbatim
    #[error("opencv error: {0}")]
    Vision(#[from] opencv::Error),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create an unsupported depth error
    pub fn unsupported_depth(depth: i32, op: &'static str) -> Self {
        Self::UnsupportedDepth { depth, op }
    }
}
