//! Distances between an observed and a theoretical proportion vector.
//!
//! The four metrics keep a soft failure contract: when the two vectors
//! differ in length they return [`LENGTH_MISMATCH`] (`-1.0`) instead of an
//! error. [`divergence_report`] is the checked entry point that turns a
//! mismatch into [`BenfordError::LengthMismatch`].
//!
//! References: Nigrini, *Benford's Law: Applications for Forensic
//! Accounting, Auditing, and Fraud Detection* (Wiley, 2012) for SSD;
//! Mocnik, *Benford's law and geographical information* (IJGIS, 2021) for
//! the Hellinger and Kullback–Leibler distances.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::BenfordError;
use crate::types::LENGTH_MISMATCH;
use crate::BenfordResult;

/// Sum of squares deviation, computed on percentages.
///
/// `Σ (100·f_obs − 100·f_theo)²`
pub fn calculate_ssd(f_obs: &[f64], f_theo: &[f64]) -> f64 {
    if f_obs.len() != f_theo.len() {
        return LENGTH_MISMATCH;
    }
    let ssd: f64 = f_obs
        .iter()
        .zip(f_theo)
        .map(|(o, t)| (100.0 * o - 100.0 * t).powi(2))
        .sum();
    info!(ssd, "sum of squares deviation");
    ssd
}

/// Root mean sum of squares deviation, `√(SSD / n)`.
pub fn calculate_rmssd(f_obs: &[f64], f_theo: &[f64]) -> f64 {
    if f_obs.len() != f_theo.len() {
        return LENGTH_MISMATCH;
    }
    let rmssd = (calculate_ssd(f_obs, f_theo) / f_theo.len() as f64).sqrt();
    info!(rmssd, "root mean sum of squares deviation");
    rmssd
}

/// Hellinger distance as published for Benford analysis.
///
/// `√(0.5 · (Σ (√f_obs − √f_theo))²)`: the element-wise root differences are
/// summed first and the sum is squared.
pub fn calculate_dist_hellinger(f_obs: &[f64], f_theo: &[f64]) -> f64 {
    if f_obs.len() != f_theo.len() {
        return LENGTH_MISMATCH;
    }
    let root_diff: f64 = f_obs
        .iter()
        .zip(f_theo)
        .map(|(o, t)| o.sqrt() - t.sqrt())
        .sum();
    let dist_h = (0.5 * root_diff.powi(2)).sqrt();
    info!(dist_h, "Hellinger distance");
    dist_h
}

/// Kullback–Leibler distance in base 10, `Σ f_obs · log10(f_obs / f_theo)`.
///
/// Groups with a zero observed proportion contribute nothing.
pub fn calculate_dist_k_and_l(f_obs: &[f64], f_theo: &[f64]) -> f64 {
    if f_obs.len() != f_theo.len() {
        return LENGTH_MISMATCH;
    }
    let dist_kl: f64 = f_obs
        .iter()
        .zip(f_theo)
        .map(|(&o, &t)| if o == 0.0 { 0.0 } else { o * (o / t).log10() })
        .sum();
    info!(dist_kl, "Kullback & Leibler distance");
    dist_kl
}

/// All four divergence metrics for one pair of vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DivergenceReport {
    pub ssd: f64,
    pub rmssd: f64,
    pub hellinger: f64,
    pub kullback_leibler: f64,
}

/// Compute every divergence metric, rejecting vectors of unequal length.
pub fn divergence_report(f_obs: &[f64], f_theo: &[f64]) -> BenfordResult<DivergenceReport> {
    if f_obs.len() != f_theo.len() {
        return Err(BenfordError::LengthMismatch {
            context: "divergence metrics".into(),
            expected: f_theo.len(),
            actual: f_obs.len(),
        });
    }
    Ok(DivergenceReport {
        ssd: calculate_ssd(f_obs, f_theo),
        rmssd: calculate_rmssd(f_obs, f_theo),
        hellinger: calculate_dist_hellinger(f_obs, f_theo),
        kullback_leibler: calculate_dist_k_and_l(f_obs, f_theo),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const THEO: [f64; 9] = [
        0.30103, 0.17609126, 0.12493874, 0.09691001, 0.07918125, 0.06694679, 0.05799195,
        0.05115252, 0.0457574,
    ];
    const OBS: [f64; 9] = [0.30, 0.18, 0.1, 0.12, 0.08, 0.07, 0.06, 0.05, 0.04];
    const SHORT: [f64; 8] = [0.30, 0.18, 0.1, 0.12, 0.08, 0.07, 0.06, 0.05];

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_ssd() {
        let ssd = calculate_ssd(&OBS, &THEO);
        assert!(approx_eq(ssd, 12.199282041547999, 1e-9), "ssd={ssd}");
    }

    #[test]
    fn test_rmssd() {
        let rmssd = calculate_rmssd(&OBS, &THEO);
        assert!(approx_eq(rmssd, 1.1642490207830205, 1e-9), "rmssd={rmssd}");
    }

    #[test]
    fn test_hellinger() {
        let h = calculate_dist_hellinger(&OBS, &THEO);
        assert!(approx_eq(h, 0.0024700738589394314, 1e-9), "h={h}");
    }

    #[test]
    fn test_kullback_leibler() {
        let kl = calculate_dist_k_and_l(&OBS, &THEO);
        assert!(approx_eq(kl, 0.002506787620872052, 1e-9), "kl={kl}");
    }

    #[test]
    fn test_length_mismatch_sentinel() {
        assert_eq!(calculate_ssd(&SHORT, &THEO), -1.0);
        assert_eq!(calculate_rmssd(&SHORT, &THEO), -1.0);
        assert_eq!(calculate_dist_hellinger(&SHORT, &THEO), -1.0);
        assert_eq!(calculate_dist_k_and_l(&SHORT, &THEO), -1.0);
    }

    #[test]
    fn test_identical_vectors() {
        assert_eq!(calculate_ssd(&THEO, &THEO), 0.0);
        assert_eq!(calculate_dist_hellinger(&THEO, &THEO), 0.0);
        assert!(calculate_dist_k_and_l(&THEO, &THEO).abs() < 1e-15);
    }

    #[test]
    fn test_kl_zero_observed_group() {
        let obs = [0.5, 0.5, 0.0];
        let theo = [0.4, 0.4, 0.2];
        let kl = calculate_dist_k_and_l(&obs, &theo);
        assert!(approx_eq(kl, (1.25_f64).log10(), 1e-12));
    }

    #[test]
    fn test_report() {
        let report = divergence_report(&OBS, &THEO).unwrap();
        assert!(approx_eq(report.ssd, 12.199282041547999, 1e-9));
        assert!(approx_eq(report.rmssd, 1.1642490207830205, 1e-9));
    }

    #[test]
    fn test_report_mismatch_is_error() {
        match divergence_report(&SHORT, &THEO) {
            Err(BenfordError::LengthMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 9);
                assert_eq!(actual, 8);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }
}
