//! Benford's Law conformity analysis.
//!
//! Leading-digit extraction, the theoretical Benford distribution,
//! divergence metrics (SSD, RMSSD, Hellinger, Kullback–Leibler),
//! power-divergence tests (chi-square, G-test) and bootstrap averaging.

pub mod distribution;
pub mod error;
pub mod metrics;
pub mod types;

#[cfg(feature = "conformity")]
pub mod conformity;

#[cfg(feature = "histogram")]
pub mod histogram;

#[cfg(all(feature = "divergence", feature = "bootstrap"))]
pub mod analysis;

pub use distribution::{
    count_first_digit, get_theoretical_freq_benford, normalize_first_digit, BenfordValue,
};
pub use error::BenfordError;
pub use types::*;

/// Standard result type for all benford operations
pub type BenfordResult<T> = Result<T, BenfordError>;
