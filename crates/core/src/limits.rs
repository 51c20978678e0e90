//! Size limits for manifests
//!
//! This module defines the limits enforced while reading, parsing and
//! patching a project manifest. Violations result in `LimitError`, which
//! converts into [`crate::Error::LimitExceeded`].
//!
//! Real-world manifests are a few hundred kilobytes with a nesting depth
//! under ten; the defaults leave generous headroom above that.

use thiserror::Error;

/// Limits applied to a single patch run
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum manifest size in bytes (default: 64MB)
    pub max_manifest_bytes: usize,

    /// Maximum nesting depth of dictionaries and arrays (default: 64)
    pub max_nesting_depth: usize,

    /// Maximum identifier draws per allocation before giving up (default: 64)
    pub max_id_attempts: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_manifest_bytes: 64 * 1024 * 1024, // 64MB
            max_nesting_depth: 64,
            max_id_attempts: 64,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    ///
    /// Useful for unit tests that exercise limit enforcement without
    /// building huge inputs.
    pub fn with_small_limits() -> Self {
        Limits {
            max_manifest_bytes: 4096,
            max_nesting_depth: 4,
            max_id_attempts: 4,
        }
    }

    /// Validate the manifest size
    pub fn validate_manifest_size(&self, len: usize) -> Result<(), LimitError> {
        if len > self.max_manifest_bytes {
            return Err(LimitError::ManifestTooLarge {
                actual: len,
                max: self.max_manifest_bytes,
            });
        }
        Ok(())
    }

    /// Validate a nesting depth reached by the parser
    pub fn validate_depth(&self, depth: usize) -> Result<(), LimitError> {
        if depth > self.max_nesting_depth {
            return Err(LimitError::NestingTooDeep {
                actual: depth,
                max: self.max_nesting_depth,
            });
        }
        Ok(())
    }
}

/// Limit validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// Manifest exceeds maximum size
    #[error("Manifest too large: {actual} bytes exceeds maximum {max}")]
    ManifestTooLarge {
        /// Actual size in bytes
        actual: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Nesting exceeds maximum depth
    #[error("Nesting too deep: {actual} levels exceeds maximum {max}")]
    NestingTooDeep {
        /// Actual nesting depth
        actual: usize,
        /// Maximum allowed depth
        max: usize,
    },
}
