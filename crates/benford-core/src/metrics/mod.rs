#[cfg(feature = "divergence")]
pub mod divergence;
pub mod magnitude;
