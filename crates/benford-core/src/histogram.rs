//! Data series for an observed-vs-Benford histogram.
//!
//! Rendering is left to the consumer: this module only pairs each digit
//! group with its observed and theoretical proportion and carries the
//! display options along.

use serde::{Deserialize, Serialize};

use crate::error::BenfordError;
use crate::BenfordResult;

/// Display options for the histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramOptions {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_xlab")]
    pub xlab: String,
    #[serde(default = "default_ylab")]
    pub ylab: String,
    /// Legend entry for the observed bars.
    #[serde(default)]
    pub legend: String,
    /// Image name without extension. Empty means "do not save".
    #[serde(default)]
    pub name_save: String,
    /// Figure size in inches (width, height).
    #[serde(default = "default_size")]
    pub size: (f64, f64),
}

fn default_xlab() -> String {
    "First digit".into()
}

fn default_ylab() -> String {
    "Proportion".into()
}

fn default_size() -> (f64, f64) {
    (6.0, 4.0)
}

impl Default for HistogramOptions {
    fn default() -> Self {
        HistogramOptions {
            title: String::new(),
            xlab: default_xlab(),
            ylab: default_ylab(),
            legend: String::new(),
            name_save: String::new(),
            size: default_size(),
        }
    }
}

/// One bar of the histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBar {
    /// Digit group as printed on the x axis, e.g. `"1"` or `"47"`.
    pub label: String,
    pub observed: f64,
    pub theoretical: f64,
}

/// Everything a renderer needs to draw the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSeries {
    pub bars: Vec<HistogramBar>,
    pub title: String,
    pub xlab: String,
    pub ylab: String,
    /// Legend entries: the theoretical curve first, then the observed bars.
    pub legend: (String, String),
    /// Target file name with `.png` suffix, when saving was requested.
    pub save_path: Option<String>,
    pub size: (f64, f64),
}

/// Pair observed and theoretical proportions per digit group.
pub fn build_hist_freq_ben(
    freq_obs: &[f64],
    freq_theo: &[f64],
    nb_digit: u32,
    options: &HistogramOptions,
) -> BenfordResult<HistogramSeries> {
    if nb_digit == 0 {
        return Err(BenfordError::InvalidInput {
            field: "nb_digit".into(),
            reason: "Must be at least 1.".into(),
        });
    }
    if freq_obs.len() != freq_theo.len() {
        return Err(BenfordError::LengthMismatch {
            context: "histogram".into(),
            expected: freq_theo.len(),
            actual: freq_obs.len(),
        });
    }
    let lower = 10u64.pow(nb_digit - 1);
    let groups = (10u64.pow(nb_digit) - lower) as usize;
    if freq_theo.len() != groups {
        return Err(BenfordError::LengthMismatch {
            context: "histogram digit groups".into(),
            expected: groups,
            actual: freq_theo.len(),
        });
    }

    let bars = freq_obs
        .iter()
        .zip(freq_theo)
        .enumerate()
        .map(|(i, (&observed, &theoretical))| HistogramBar {
            label: (lower + i as u64).to_string(),
            observed,
            theoretical,
        })
        .collect();

    Ok(HistogramSeries {
        bars,
        title: options.title.clone(),
        xlab: options.xlab.clone(),
        ylab: options.ylab.clone(),
        legend: ("Benford's law".into(), options.legend.clone()),
        save_path: (!options.name_save.is_empty()).then(|| format!("{}.png", options.name_save)),
        size: options.size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::get_theoretical_freq_benford;

    #[test]
    fn test_first_digit_labels() {
        let theo = get_theoretical_freq_benford(1, 10);
        let series = build_hist_freq_ben(&theo, &theo, 1, &HistogramOptions::default()).unwrap();
        let labels: Vec<&str> = series.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
        assert_eq!(series.xlab, "First digit");
        assert_eq!(series.ylab, "Proportion");
        assert_eq!(series.size, (6.0, 4.0));
        assert_eq!(series.save_path, None);
    }

    #[test]
    fn test_two_digit_labels_and_save_path() {
        let theo = get_theoretical_freq_benford(2, 10);
        let options = HistogramOptions {
            name_save: "ledger".into(),
            legend: "Invoices".into(),
            ..HistogramOptions::default()
        };
        let series = build_hist_freq_ben(&theo, &theo, 2, &options).unwrap();
        assert_eq!(series.bars.len(), 90);
        assert_eq!(series.bars[0].label, "10");
        assert_eq!(series.bars[89].label, "99");
        assert_eq!(series.save_path.as_deref(), Some("ledger.png"));
        assert_eq!(series.legend.1, "Invoices");
    }

    #[test]
    fn test_wrong_digit_count() {
        let theo = get_theoretical_freq_benford(1, 10);
        assert!(build_hist_freq_ben(&theo, &theo, 2, &HistogramOptions::default()).is_err());
    }

    #[test]
    fn test_mismatched_vectors() {
        let theo = get_theoretical_freq_benford(1, 10);
        assert!(build_hist_freq_ben(&theo[..8], &theo, 1, &HistogramOptions::default()).is_err());
    }
}
