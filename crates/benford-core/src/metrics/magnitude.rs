//! Physical and order-of-magnitude spread of a dataset (Nigrini, 2012).
//!
//! Benford behaviour is only expected from data spanning several orders of
//! magnitude. Neither diagnostic guards against a zero or negative minimum:
//! the ratio comes back infinite, negative or NaN.

use tracing::info;

use crate::distribution::BenfordValue;

/// Physical order of magnitude, `max / min`.
///
/// An empty dataset yields NaN.
pub fn calculate_pom<T: BenfordValue>(data_obs: &[T]) -> f64 {
    let (min, max) = data_obs
        .iter()
        .map(BenfordValue::as_f64)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let pom = max / min;
    info!(pom, "physical order of magnitude");
    pom
}

/// Order of magnitude, `log10(max / min)`.
pub fn calculate_oom<T: BenfordValue>(data_obs: &[T]) -> f64 {
    let oom = calculate_pom(data_obs).log10();
    info!(oom, "order of magnitude");
    oom
}
