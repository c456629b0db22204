use std::time::Instant;

use clap::Args;
use serde_json::{json, Value};
use tracing::debug;

use benford_core::analysis::{self, BenfordAnalysisInput, BootstrapSettings, MAX_NB_DIGIT};
use benford_core::conformity::bootstrap::{self, BootstrapConfig};
use benford_core::conformity::TestType;
use benford_core::distribution::extract_first_digits;
use benford_core::histogram::{self, HistogramOptions};
use benford_core::{get_theoretical_freq_benford, normalize_first_digit, with_metadata};

use crate::input;

type CmdResult = Result<Value, Box<dyn std::error::Error>>;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// JSON file holding a full analysis input
    #[arg(long)]
    pub input: Option<String>,
    /// Dataset file (JSON array or delimited numbers)
    #[arg(long)]
    pub data: Option<String>,
    /// Number of leading digits to test
    #[arg(long, default_value = "1")]
    pub digits: u32,
    /// Significance level of the chi-square test
    #[arg(long, default_value = "0.05")]
    pub alpha: f64,
    /// Also run the bootstrap procedure
    #[arg(long)]
    pub bootstrap: bool,
    /// Values drawn per bootstrap trial
    #[arg(long, default_value = "1000")]
    pub nb_val: usize,
    /// Number of bootstrap trials
    #[arg(long, default_value = "1000")]
    pub nb_loop: usize,
    /// Statistic averaged by the bootstrap
    #[arg(long, default_value = "pearson")]
    pub test_type: TestType,
    /// Bootstrap seed
    #[arg(long, default_value = "2021")]
    pub seed: u64,
}

#[derive(Args)]
pub struct TheoreticalArgs {
    /// Number of leading digits
    #[arg(long, default_value = "1")]
    pub digits: u32,
    /// Numeral base
    #[arg(long, default_value = "10")]
    pub base: u32,
}

#[derive(Args)]
pub struct DigitsArgs {
    /// Dataset file (JSON array or delimited numbers)
    #[arg(long)]
    pub data: Option<String>,
    /// Number of leading digits
    #[arg(long, default_value = "1")]
    pub digits: u32,
}

#[derive(Args)]
pub struct BootstrapArgs {
    /// Dataset file (JSON array or delimited numbers)
    #[arg(long)]
    pub data: Option<String>,
    #[arg(long, default_value = "1")]
    pub digits: u32,
    #[arg(long, default_value = "1000")]
    pub nb_val: usize,
    #[arg(long, default_value = "1000")]
    pub nb_loop: usize,
    /// pearson, log-likelihood, freeman-tukey, mod-log-likelihood, neyman or cressie-read
    #[arg(long, default_value = "pearson")]
    pub test_type: TestType,
    #[arg(long, default_value = "2021")]
    pub seed: u64,
}

#[derive(Args)]
pub struct HistogramArgs {
    /// Dataset file (JSON array or delimited numbers)
    #[arg(long)]
    pub data: Option<String>,
    #[arg(long, default_value = "1")]
    pub digits: u32,
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "First digit")]
    pub xlab: String,
    #[arg(long, default_value = "Proportion")]
    pub ylab: String,
    /// Legend entry for the observed bars
    #[arg(long, default_value = "")]
    pub legend: String,
    /// Image name without extension
    #[arg(long, default_value = "")]
    pub save: String,
}

fn check_digits(digits: u32) -> Result<(), Box<dyn std::error::Error>> {
    if digits == 0 || digits > MAX_NB_DIGIT {
        return Err(format!("--digits must be between 1 and {MAX_NB_DIGIT}").into());
    }
    Ok(())
}

fn load(path: Option<&str>) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    let data = input::load_dataset(path)?;
    debug!(values = data.len(), "dataset loaded");
    Ok(data)
}

pub fn run_analyze(args: AnalyzeArgs) -> CmdResult {
    let input_data: BenfordAnalysisInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else {
        let data_points = if args.data.is_some() {
            load(args.data.as_deref())?
        } else {
            match input::stdin::read_stdin_text()? {
                // A JSON object on stdin is a full analysis input.
                Some(text) if text.starts_with('{') => {
                    let parsed: BenfordAnalysisInput = serde_json::from_str(&text)?;
                    return Ok(serde_json::to_value(analysis::analyze_benford(&parsed)?)?);
                }
                Some(text) => input::parse_dataset(&text)?,
                None => return Err("--input <file.json>, --data <file> or stdin required".into()),
            }
        };
        BenfordAnalysisInput {
            data_points,
            nb_digit: args.digits,
            significance_level: args.alpha,
            bootstrap: args.bootstrap.then_some(BootstrapSettings {
                config: BootstrapConfig {
                    nb_val: args.nb_val,
                    nb_loop: args.nb_loop,
                    test_type: args.test_type,
                },
                seed: Some(args.seed),
            }),
        }
    };
    let result = analysis::analyze_benford(&input_data)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_theoretical(args: TheoreticalArgs) -> CmdResult {
    let start = Instant::now();
    check_digits(args.digits)?;
    if !(2..=36).contains(&args.base) {
        return Err("--base must be between 2 and 36".into());
    }
    if u64::from(args.base).checked_pow(args.digits).is_none() {
        return Err("--base and --digits give too many digit groups".into());
    }

    let lower = u64::from(args.base).pow(args.digits - 1);
    let freq = get_theoretical_freq_benford(args.digits, args.base);
    let groups: Vec<Value> = freq
        .iter()
        .enumerate()
        .map(|(i, p)| json!({ "group": lower + i as u64, "proportion": p }))
        .collect();

    let result = json!({
        "nb_digit": args.digits,
        "base": args.base,
        "total": freq.iter().sum::<f64>(),
        "groups": groups,
    });
    Ok(serde_json::to_value(with_metadata(
        "Benford's Law: P(d) = log_b(1 + 1/d)",
        &json!({ "nb_digit": args.digits, "base": args.base }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    ))?)
}

pub fn run_digits(args: DigitsArgs) -> CmdResult {
    let start = Instant::now();
    check_digits(args.digits)?;
    let data = load(args.data.as_deref())?;

    let extraction = extract_first_digits(&data, args.digits);
    let proportions = normalize_first_digit(&extraction.counts);
    let lower = 10u64.pow(args.digits - 1);
    let groups: Vec<Value> = extraction
        .counts
        .iter()
        .zip(&proportions)
        .enumerate()
        .map(|(i, (count, p))| json!({ "group": lower + i as u64, "count": count, "proportion": p }))
        .collect();

    let mut warnings = Vec::new();
    if extraction.dropped > 0 {
        warnings.push(format!(
            "{:.2}% of numbers removed ({} of {})",
            extraction.dropped_share() * 100.0,
            extraction.dropped,
            data.len()
        ));
    }

    let result = json!({
        "nb_digit": args.digits,
        "retained": extraction.retained,
        "dropped": extraction.dropped,
        "groups": groups,
    });
    Ok(serde_json::to_value(with_metadata(
        "Leading significant digit counts",
        &json!({ "nb_digit": args.digits }),
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))?)
}

pub fn run_bootstrap(args: BootstrapArgs) -> CmdResult {
    let start = Instant::now();
    check_digits(args.digits)?;
    let data = load(args.data.as_deref())?;

    let config = BootstrapConfig {
        nb_val: args.nb_val,
        nb_loop: args.nb_loop,
        test_type: args.test_type,
    };
    let f_theo = get_theoretical_freq_benford(args.digits, 10);
    let mut rng = bootstrap::bootstrap_rng(Some(args.seed));
    let result = bootstrap::calculate_bootstrap_chi2(&data, &f_theo, args.digits, &config, &mut rng)?;

    Ok(serde_json::to_value(with_metadata(
        "Bootstrap mean of a power-divergence statistic",
        &json!({ "nb_digit": args.digits, "config": config, "seed": args.seed }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    ))?)
}

pub fn run_histogram(args: HistogramArgs) -> CmdResult {
    let start = Instant::now();
    check_digits(args.digits)?;
    let data = load(args.data.as_deref())?;

    let extraction = extract_first_digits(&data, args.digits);
    let freq_obs = normalize_first_digit(&extraction.counts);
    let freq_theo = get_theoretical_freq_benford(args.digits, 10);
    let options = HistogramOptions {
        title: args.title,
        xlab: args.xlab,
        ylab: args.ylab,
        legend: args.legend,
        name_save: args.save,
        ..HistogramOptions::default()
    };
    let series = histogram::build_hist_freq_ben(&freq_obs, &freq_theo, args.digits, &options)?;

    Ok(serde_json::to_value(with_metadata(
        "Observed versus Benford proportions per digit group",
        &options,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        series,
    ))?)
}
