#[cfg(feature = "bootstrap")]
pub mod bootstrap;
pub mod power_divergence;

pub use power_divergence::{chi2_test, g_test, power_divergence_test, TestType};
