//! Cressie–Read power-divergence goodness-of-fit tests.
//!
//! `λ = 1` is Pearson's chi-square and `λ = 0` the log-likelihood G-test;
//! the other named members of the family are available through
//! [`TestType`]. P-values come from the chi-square survival function with
//! `k − 1` degrees of freedom, `k` being the number of digit groups.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::info;

use crate::distribution::{count_first_digit, BenfordValue};
use crate::error::BenfordError;
use crate::types::TestResult;
use crate::BenfordResult;

/// Member of the power-divergence family used as test statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestType {
    /// Pearson's chi-square, λ = 1.
    #[default]
    Pearson,
    /// G-test, λ = 0.
    LogLikelihood,
    /// λ = −1/2.
    FreemanTukey,
    /// λ = −1.
    ModLogLikelihood,
    /// λ = −2.
    Neyman,
    /// λ = 2/3, recommended by Cressie and Read (1984).
    CressieRead,
}

impl TestType {
    pub fn lambda(self) -> f64 {
        match self {
            TestType::Pearson => 1.0,
            TestType::LogLikelihood => 0.0,
            TestType::FreemanTukey => -0.5,
            TestType::ModLogLikelihood => -1.0,
            TestType::Neyman => -2.0,
            TestType::CressieRead => 2.0 / 3.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TestType::Pearson => "pearson",
            TestType::LogLikelihood => "log-likelihood",
            TestType::FreemanTukey => "freeman-tukey",
            TestType::ModLogLikelihood => "mod-log-likelihood",
            TestType::Neyman => "neyman",
            TestType::CressieRead => "cressie-read",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TestType {
    type Err = BenfordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pearson" | "chi2" | "1" => Ok(TestType::Pearson),
            "log-likelihood" | "g" | "g-test" | "0" => Ok(TestType::LogLikelihood),
            "freeman-tukey" => Ok(TestType::FreemanTukey),
            "mod-log-likelihood" => Ok(TestType::ModLogLikelihood),
            "neyman" => Ok(TestType::Neyman),
            "cressie-read" => Ok(TestType::CressieRead),
            other => Err(BenfordError::InvalidInput {
                field: "test_type".into(),
                reason: format!("Unknown test type '{other}'."),
            }),
        }
    }
}

/// Numeric selector: `1` is Pearson, `0` is log-likelihood.
impl TryFrom<i64> for TestType {
    type Error = BenfordError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(TestType::Pearson),
            0 => Ok(TestType::LogLikelihood),
            _ => Err(BenfordError::InvalidInput {
                field: "test_type".into(),
                reason: "Must be 1 (pearson) or 0 (log-likelihood).".into(),
            }),
        }
    }
}

fn check_lengths(context: &str, expected: usize, actual: usize) -> BenfordResult<()> {
    if expected != actual {
        return Err(BenfordError::LengthMismatch {
            context: context.into(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Cressie–Read power-divergence statistic between observed and expected counts.
///
/// `2 / (λ(λ+1)) · Σ o · ((o/e)^λ − 1)`, with the limiting forms
/// `2 · Σ o · ln(o/e)` at λ = 0 and `2 · Σ e · ln(e/o)` at λ = −1.
/// Empty observed groups contribute nothing to the λ = 0 sum.
pub fn power_divergence(f_obs: &[f64], f_exp: &[f64], lambda: f64) -> BenfordResult<f64> {
    check_lengths("power divergence", f_exp.len(), f_obs.len())?;
    let pairs = f_obs.iter().zip(f_exp);
    let stat: f64 = if lambda == 1.0 {
        pairs.map(|(o, e)| (o - e).powi(2) / e).sum::<f64>()
    } else if lambda == 0.0 {
        2.0 * pairs
            .map(|(&o, &e)| if o == 0.0 { 0.0 } else { o * (o / e).ln() })
            .sum::<f64>()
    } else if lambda == -1.0 {
        2.0 * pairs
            .map(|(&o, &e)| if e == 0.0 { 0.0 } else { e * (e / o).ln() })
            .sum::<f64>()
    } else {
        2.0 / (lambda * (lambda + 1.0))
            * pairs
                .map(|(o, e)| o * ((o / e).powf(lambda) - 1.0))
                .sum::<f64>()
    };
    Ok(stat)
}

/// Upper tail probability of the chi-square distribution.
pub fn chi2_sf(statistic: f64, degrees_of_freedom: u32) -> BenfordResult<f64> {
    let dist = ChiSquared::new(f64::from(degrees_of_freedom)).map_err(|e| {
        BenfordError::InvalidInput {
            field: "degrees_of_freedom".into(),
            reason: format!("Invalid chi-square parameters: {e}"),
        }
    })?;
    Ok(dist.sf(statistic))
}

/// Degrees of freedom for a theoretical vector of `k` groups.
pub(crate) fn degrees_of_freedom(f_theo: &[f64]) -> BenfordResult<u32> {
    if f_theo.len() < 2 {
        return Err(BenfordError::InsufficientData(
            "At least two digit groups are required for a goodness-of-fit test.".into(),
        ));
    }
    Ok(f_theo.len() as u32 - 1)
}

/// Theoretical proportions scaled to counts for a sample of `n` values.
pub fn expected_counts(f_theo: &[f64], n: usize) -> Vec<f64> {
    f_theo.iter().map(|p| p * n as f64).collect()
}

/// Run a power-divergence test of `data_obs` against `f_theo`.
///
/// Expected counts are `f_theo` scaled by the full dataset size, observed
/// counts come from [`count_first_digit`]. Values dropped by the digit
/// extraction still count towards the dataset size.
pub fn power_divergence_test<T: BenfordValue>(
    data_obs: &[T],
    f_theo: &[f64],
    nb_digit: u32,
    test_type: TestType,
) -> BenfordResult<TestResult> {
    let df = degrees_of_freedom(f_theo)?;
    let d_theo = expected_counts(f_theo, data_obs.len());
    let d_obs: Vec<f64> = count_first_digit(data_obs, nb_digit)
        .into_iter()
        .map(f64::from)
        .collect();
    check_lengths("theoretical frequencies", d_obs.len(), d_theo.len())?;

    let statistic = power_divergence(&d_obs, &d_theo, test_type.lambda())?;
    let p_value = chi2_sf(statistic, df)?;
    info!(%test_type, statistic, p_value, "goodness-of-fit test");
    Ok(TestResult {
        statistic,
        p_value,
        degrees_of_freedom: df,
    })
}

/// Pearson chi-square test of conformity to Benford's Law.
pub fn chi2_test<T: BenfordValue>(
    data_obs: &[T],
    f_theo: &[f64],
    nb_digit: u32,
) -> BenfordResult<TestResult> {
    power_divergence_test(data_obs, f_theo, nb_digit, TestType::Pearson)
}

/// Log-likelihood G-test of conformity to Benford's Law.
pub fn g_test<T: BenfordValue>(
    data_obs: &[T],
    f_theo: &[f64],
    nb_digit: u32,
) -> BenfordResult<TestResult> {
    power_divergence_test(data_obs, f_theo, nb_digit, TestType::LogLikelihood)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
