//! One-call Benford's Law screening of a dataset.
//!
//! Runs digit extraction, the divergence metrics, chi-square and G tests,
//! magnitude diagnostics and an optional bootstrap, and wraps everything in
//! the standard [`ComputationOutput`] envelope.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::conformity::bootstrap::{
    bootstrap_rng, calculate_bootstrap_chi2, BootstrapConfig, BootstrapResult,
};
use crate::conformity::{chi2_test, g_test};
use crate::distribution::{
    extract_first_digits, get_theoretical_freq_benford, normalize_first_digit, BenfordValue,
};
use crate::error::BenfordError;
use crate::metrics::divergence::{divergence_report, DivergenceReport};
use crate::metrics::magnitude::{calculate_oom, calculate_pom};
use crate::types::{with_metadata, ComputationOutput, TestResult};
use crate::BenfordResult;

/// Largest digit group width accepted by [`analyze_benford`].
pub const MAX_NB_DIGIT: u32 = 6;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Input for a Benford's Law analysis.
///
/// Values default to `f64`, which covers subnormal and very large
/// magnitudes. Use `Decimal` only for exact decimal figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenfordAnalysisInput<T = f64> {
    pub data_points: Vec<T>,
    /// Number of leading significant digits to test.
    #[serde(default = "default_nb_digit")]
    pub nb_digit: u32,
    /// Chi-square p-values below this level reject conformity.
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
    /// Run the bootstrap procedure when present.
    #[serde(default)]
    pub bootstrap: Option<BootstrapSettings>,
}

/// Bootstrap parameters plus the generator seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapSettings {
    #[serde(flatten)]
    pub config: BootstrapConfig,
    /// `None` seeds from system entropy.
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        BootstrapSettings {
            config: BootstrapConfig::default(),
            seed: default_seed(),
        }
    }
}

fn default_nb_digit() -> u32 {
    1
}

fn default_significance_level() -> f64 {
    0.05
}

fn default_seed() -> Option<u64> {
    Some(2021)
}

/// Observed and expected share of one digit group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitFrequency {
    pub group: u64,
    pub observed_count: u32,
    pub observed: f64,
    pub expected: f64,
    /// `observed - expected`
    pub deviation: f64,
}

/// Output of a Benford's Law analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenfordAnalysisOutput {
    pub nb_digit: u32,
    pub data_points: usize,
    pub retained: usize,
    pub dropped: usize,
    pub digit_frequencies: Vec<DigitFrequency>,
    pub divergence: DivergenceReport,
    pub chi2: TestResult,
    pub g_test: TestResult,
    /// Chi-square p-value at or above the significance level.
    pub conforms: bool,
    pub pom: Option<f64>,
    pub oom: Option<f64>,
    pub bootstrap: Option<BootstrapResult>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

fn validate<T>(input: &BenfordAnalysisInput<T>) -> BenfordResult<()> {
    if input.data_points.is_empty() {
        return Err(BenfordError::InsufficientData(
            "At least one data point is required.".into(),
        ));
    }
    if input.nb_digit == 0 || input.nb_digit > MAX_NB_DIGIT {
        return Err(BenfordError::InvalidInput {
            field: "nb_digit".into(),
            reason: format!("Must be between 1 and {MAX_NB_DIGIT}."),
        });
    }
    if !(input.significance_level > 0.0 && input.significance_level < 1.0) {
        return Err(BenfordError::InvalidInput {
            field: "significance_level".into(),
            reason: "Must be between 0 and 1 exclusive.".into(),
        });
    }
    Ok(())
}

/// Screen a dataset for conformity to Benford's Law.
pub fn analyze_benford<T: BenfordValue>(
    input: &BenfordAnalysisInput<T>,
) -> BenfordResult<ComputationOutput<BenfordAnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    validate(input)?;

    let data = &input.data_points;
    let nb_digit = input.nb_digit;
    let f_theo = get_theoretical_freq_benford(nb_digit, 10);

    let extraction = extract_first_digits(data, nb_digit);
    if extraction.retained == 0 {
        return Err(BenfordError::InsufficientData(format!(
            "No value has {nb_digit} significant digit(s)."
        )));
    }
    if extraction.dropped > 0 {
        warn!(
            dropped = extraction.dropped,
            total = data.len(),
            "values without enough significant digits removed"
        );
        warnings.push(format!(
            "{:.2}% of numbers removed ({} of {}) for lack of {nb_digit} significant digit(s)",
            extraction.dropped_share() * 100.0,
            extraction.dropped,
            data.len()
        ));
    }

    let f_obs = normalize_first_digit(&extraction.counts);
    let divergence = divergence_report(&f_obs, &f_theo)?;
    let chi2 = chi2_test(data, &f_theo, nb_digit)?;
    let g = g_test(data, &f_theo, nb_digit)?;

    let min_expected = f_theo.iter().cloned().fold(f64::INFINITY, f64::min) * data.len() as f64;
    if min_expected < 5.0 {
        warnings.push(format!(
            "Smallest expected group count is {min_expected:.2}; the chi-square approximation may be unreliable below 5"
        ));
    }

    let (pom, oom) = if data.iter().all(|v| v.as_f64() > 0.0) {
        (Some(calculate_pom(data)), Some(calculate_oom(data)))
    } else {
        warnings.push("POM/OOM skipped: dataset contains zero or negative values".into());
        (None, None)
    };

    let bootstrap = match &input.bootstrap {
        Some(settings) => {
            let mut rng = bootstrap_rng(settings.seed);
            Some(calculate_bootstrap_chi2(
                data,
                &f_theo,
                nb_digit,
                &settings.config,
                &mut rng,
            )?)
        }
        None => None,
    };

    let lower = 10u64.pow(nb_digit - 1);
    let digit_frequencies = extraction
        .counts
        .iter()
        .zip(f_obs.iter().zip(&f_theo))
        .enumerate()
        .map(|(i, (&observed_count, (&observed, &expected)))| DigitFrequency {
            group: lower + i as u64,
            observed_count,
            observed,
            expected,
            deviation: observed - expected,
        })
        .collect();

    let output = BenfordAnalysisOutput {
        nb_digit,
        data_points: data.len(),
        retained: extraction.retained,
        dropped: extraction.dropped,
        digit_frequencies,
        divergence,
        chi2,
        g_test: g,
        conforms: chi2.p_value >= input.significance_level,
        pom,
        oom,
        bootstrap,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Benford's Law conformity analysis",
        &serde_json::json!({
            "nb_digit": nb_digit,
            "base": 10,
            "significance_level": input.significance_level,
            "bootstrap": input.bootstrap,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
