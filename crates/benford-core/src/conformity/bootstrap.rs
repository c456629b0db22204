//! Bootstrap averaging of a power-divergence statistic.
//!
//! Large datasets make every goodness-of-fit test significant. Averaging the
//! statistic over many subsamples of fixed size gives a figure that is
//! comparable across datasets of different sizes.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::power_divergence::{
    chi2_sf, degrees_of_freedom, expected_counts, power_divergence, TestType,
};
use crate::distribution::{extract_first_digits, BenfordValue};
use crate::error::BenfordError;
use crate::BenfordResult;

/// Sample size and trial count of a bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Values drawn (without replacement) in every trial.
    #[serde(default = "default_nb_val")]
    pub nb_val: usize,
    /// Number of trials.
    #[serde(default = "default_nb_loop")]
    pub nb_loop: usize,
    #[serde(default)]
    pub test_type: TestType,
}

fn default_nb_val() -> usize {
    1000
}

fn default_nb_loop() -> usize {
    1000
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        BootstrapConfig {
            nb_val: default_nb_val(),
            nb_loop: default_nb_loop(),
            test_type: TestType::default(),
        }
    }
}

/// Averaged statistic of a bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapResult {
    pub mean_statistic: f64,
    /// Chi-square survival function evaluated at `mean_statistic`.
    pub p_value: f64,
    /// Population standard deviation of the per-trial statistics.
    pub std_dev: f64,
    pub degrees_of_freedom: u32,
    pub nb_val: usize,
    pub nb_loop: usize,
    pub test_type: TestType,
}

/// Generator for a bootstrap run: seeded for reproducibility, or from
/// system entropy when `seed` is `None`.
pub fn bootstrap_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn validate(config: &BootstrapConfig, dataset_len: usize) -> BenfordResult<()> {
    if config.nb_loop == 0 {
        return Err(BenfordError::InvalidInput {
            field: "nb_loop".into(),
            reason: "Must be at least 1.".into(),
        });
    }
    if config.nb_val == 0 {
        return Err(BenfordError::InvalidInput {
            field: "nb_val".into(),
            reason: "Must be at least 1.".into(),
        });
    }
    if config.nb_val > dataset_len {
        return Err(BenfordError::InvalidInput {
            field: "nb_val".into(),
            reason: format!(
                "Cannot draw {} values without replacement from a dataset of {dataset_len}.",
                config.nb_val
            ),
        });
    }
    Ok(())
}

/// Mean power-divergence statistic over `nb_loop` subsamples and its p-value.
///
/// Each trial draws `config.nb_val` distinct values uniformly from the whole
/// dataset, counts their leading digits and compares them with `f_theo`
/// scaled by `nb_val`. The p-value is computed once, from the mean, after
/// every trial has completed.
pub fn calculate_bootstrap_chi2<T, R>(
    data_obs: &[T],
    f_theo: &[f64],
    nb_digit: u32,
    config: &BootstrapConfig,
    rng: &mut R,
) -> BenfordResult<BootstrapResult>
where
    T: BenfordValue,
    R: Rng + ?Sized,
{
    validate(config, data_obs.len())?;
    let df = degrees_of_freedom(f_theo)?;
    let d_theo = expected_counts(f_theo, config.nb_val);
    let lambda = config.test_type.lambda();

    let mut statistics = Vec::with_capacity(config.nb_loop);
    for _ in 0..config.nb_loop {
        let sample = index::sample(rng, data_obs.len(), config.nb_val);
        let d_obs: Vec<f64> = extract_first_digits(sample.iter().map(|i| &data_obs[i]), nb_digit)
            .counts
            .into_iter()
            .map(f64::from)
            .collect();
        statistics.push(power_divergence(&d_obs, &d_theo, lambda)?);
    }

    let n = statistics.len() as f64;
    let mean_statistic = statistics.iter().sum::<f64>() / n;
    let variance = statistics
        .iter()
        .map(|s| (s - mean_statistic).powi(2))
        .sum::<f64>()
        / n;
    let p_value = chi2_sf(mean_statistic, df)?;

    debug!(
        nb_val = config.nb_val,
        nb_loop = config.nb_loop,
        "bootstrap trials complete"
    );
    info!(
        test_type = %config.test_type,
        statistic = mean_statistic,
        p_value,
        "bootstrap goodness-of-fit test"
    );

    Ok(BootstrapResult {
        mean_statistic,
        p_value,
        std_dev: variance.sqrt(),
        degrees_of_freedom: df,
        nb_val: config.nb_val,
        nb_loop: config.nb_loop,
        test_type: config.test_type,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conformity::power_divergence::chi2_test;
    use crate::distribution::get_theoretical_freq_benford;

    const SEED: u64 = 2021;

    fn uniform_dataset(rng: &mut StdRng, n: usize) -> Vec<u32> {
        (0..n).map(|_| rng.gen_range(0..1_000_000)).collect()
    }

    fn config(nb_val: usize, nb_loop: usize, test_type: TestType) -> BootstrapConfig {
        BootstrapConfig {
            nb_val,
            nb_loop,
            test_type,
        }
    }

    #[test]
    fn test_defaults() {
        let c = BootstrapConfig::default();
        assert_eq!(c.nb_val, 1000);
        assert_eq!(c.nb_loop, 1000);
        assert_eq!(c.test_type, TestType::Pearson);
        let parsed: BootstrapConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, c);
    }

    #[test]
    fn test_same_seed_same_result() {
        let mut data_rng = StdRng::seed_from_u64(SEED);
        let data = uniform_dataset(&mut data_rng, 2_000);
        let f_theo = get_theoretical_freq_benford(1, 10);
        let cfg = config(500, 50, TestType::Pearson);
        let a = calculate_bootstrap_chi2(&data, &f_theo, 1, &cfg, &mut StdRng::seed_from_u64(7))
            .unwrap();
        let b = calculate_bootstrap_chi2(&data, &f_theo, 1, &cfg, &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_data_rejected() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let data = uniform_dataset(&mut rng, 2_000);
        for (nb_digit, test_type) in [
            (1, TestType::Pearson),
            (1, TestType::LogLikelihood),
            (2, TestType::Pearson),
            (2, TestType::LogLikelihood),
        ] {
            let f_theo = get_theoretical_freq_benford(nb_digit, 10);
            let res = calculate_bootstrap_chi2(
                &data,
                &f_theo,
                nb_digit,
                &config(1000, 100, test_type),
                &mut rng,
            )
            .unwrap();
            assert_eq!(res.degrees_of_freedom, f_theo.len() as u32 - 1);
            assert!(res.mean_statistic > 100.0, "{test_type}: {}", res.mean_statistic);
            assert!(res.p_value < 1e-6, "{test_type}: p={}", res.p_value);
        }
    }

    #[test]
    fn test_full_sample_matches_chi2_test() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let data = uniform_dataset(&mut rng, 300);
        let f_theo = get_theoretical_freq_benford(1, 10);
        let boot =
            calculate_bootstrap_chi2(&data, &f_theo, 1, &config(300, 5, TestType::Pearson), &mut rng)
                .unwrap();
        let direct = chi2_test(&data, &f_theo, 1).unwrap();
        assert!((boot.mean_statistic - direct.statistic).abs() < 1e-9);
        assert!(boot.std_dev < 1e-9);
    }

    #[test]
    fn test_statistic_converges_with_more_trials() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let data = uniform_dataset(&mut rng, 2_000);
        let f_theo = get_theoretical_freq_benford(1, 10);

        let spread = |nb_loop: usize, rng: &mut StdRng| -> f64 {
            let means: Vec<f64> = (0..20)
                .map(|_| {
                    calculate_bootstrap_chi2(
                        &data,
                        &f_theo,
                        1,
                        &config(200, nb_loop, TestType::Pearson),
                        rng,
                    )
                    .unwrap()
                    .mean_statistic
                })
                .collect();
            let m = means.iter().sum::<f64>() / means.len() as f64;
            means.iter().map(|x| (x - m).powi(2)).sum::<f64>() / means.len() as f64
        };

        let few = spread(5, &mut rng);
        let many = spread(200, &mut rng);
        assert!(many < few, "var(200 trials)={many} vs var(5 trials)={few}");
    }

    #[test]
    fn test_sample_larger_than_dataset() {
        let f_theo = get_theoretical_freq_benford(1, 10);
        let err = calculate_bootstrap_chi2(
            &[1.0_f64, 2.0, 3.0],
            &f_theo,
            1,
            &config(10, 1, TestType::Pearson),
            &mut StdRng::seed_from_u64(SEED),
        );
        assert!(matches!(err, Err(BenfordError::InvalidInput { .. })));
    }

    #[test]
    fn test_zero_trials_rejected() {
        let f_theo = get_theoretical_freq_benford(1, 10);
        let err = calculate_bootstrap_chi2(
            &[1.0_f64, 2.0, 3.0],
            &f_theo,
            1,
            &config(2, 0, TestType::Pearson),
            &mut StdRng::seed_from_u64(SEED),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_mismatched_theoretical_vector() {
        let f_theo = get_theoretical_freq_benford(2, 10);
        let err = calculate_bootstrap_chi2(
            &[11_u32, 22, 33],
            &f_theo,
            1,
            &config(2, 3, TestType::Pearson),
            &mut StdRng::seed_from_u64(SEED),
        );
        assert!(matches!(err, Err(BenfordError::LengthMismatch { .. })));
    }

    #[test]
    fn test_bootstrap_rng_is_seeded() {
        let a: u64 = bootstrap_rng(Some(SEED)).gen();
        let b: u64 = bootstrap_rng(Some(SEED)).gen();
        assert_eq!(a, b);
    }
}
