//! Crate-level error types.
//!
//! The simulation itself has no failure modes: every tank and shell operation
//! is total.  Errors only arise at the edges, while reading and validating the
//! runtime configuration.
//!
//! ## Usage
//!
//! ```rust
//! use tanks::error::{TankError, TankResult};
//!
//! fn positive(name: &'static str, value: f32) -> TankResult<()> {
//!     if value > 0.0 {
//!         Ok(())
//!     } else {
//!         Err(TankError::InvalidSetting {
//!             name,
//!             value: value.to_string(),
//!             expected: "> 0",
//!         })
//!     }
//! }
//! # assert!(positive("speed", 1.0).is_ok());
//! ```

use std::fmt;
use std::io;

/// Top-level error enum for the tank games.
#[derive(Debug)]
pub enum TankError {
    /// The configuration file exists but could not be read.
    ConfigRead {
        /// Path that was opened.
        path: String,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::TanksConfig`].
    ConfigParse {
        /// Path that was parsed.
        path: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A configuration value is outside the range the simulation supports.
    InvalidSetting {
        /// Name of the offending key.
        name: &'static str,
        /// The rejected value, formatted for logging.
        value: String,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for TankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TankError::ConfigRead { path, source } => {
                write!(f, "failed to read config '{}': {}", path, source)
            }
            TankError::ConfigParse { path, message } => {
                write!(f, "failed to parse config '{}': {}", path, message)
            }
            TankError::InvalidSetting {
                name,
                value,
                expected,
            } => write!(
                f,
                "setting '{}' = {} is invalid (expected {})",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for TankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TankError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using [`TankError`] as the error type.
pub type TankResult<T> = Result<T, TankError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive and finite.
pub fn require_positive(name: &'static str, value: f32) -> TankResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TankError::InvalidSetting {
            name,
            value: value.to_string(),
            expected: "a finite value > 0",
        })
    }
}

/// Returns an error unless the integer `value` is non-zero.
pub fn require_nonzero(name: &'static str, value: u64) -> TankResult<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(TankError::InvalidSetting {
            name,
            value: value.to_string(),
            expected: "> 0",
        })
    }
}
