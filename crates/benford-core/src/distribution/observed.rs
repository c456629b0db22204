//! Observed distribution of the first significant digits (base 10).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::theoretical::group_bounds;
use super::value::BenfordValue;
use crate::types::{DigitCountVector, ProportionVector};

/// Leading-digit counts together with the values that could not be counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitExtraction {
    pub counts: DigitCountVector,
    /// Values that contributed to `counts`.
    pub retained: usize,
    /// Values with fewer than `nb_digit` significant digits.
    pub dropped: usize,
}

impl DigitExtraction {
    /// Share of the input that was dropped, in [0, 1].
    pub fn dropped_share(&self) -> f64 {
        let total = self.retained + self.dropped;
        if total == 0 {
            return 0.0;
        }
        self.dropped as f64 / total as f64
    }
}

/// Leading `nb_digit`-digit group of a value, e.g. `78` for `78.45` with two
/// digits. `None` when the value has fewer than `nb_digit` significant digits.
pub fn leading_group<T: BenfordValue + ?Sized>(value: &T, nb_digit: u32) -> Option<u64> {
    let digits = value.significant_digits()?;
    let width = nb_digit as usize;
    if digits.len() < width {
        return None;
    }
    digits[..width].parse().ok()
}

/// Tally leading-digit groups over any sequence of borrowed values.
pub fn extract_first_digits<'a, T, I>(numbers: I, nb_digit: u32) -> DigitExtraction
where
    T: BenfordValue + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let (lower, upper) = group_bounds(nb_digit, 10);
    let mut counts = vec![0u32; (upper - lower) as usize];
    let (mut retained, mut dropped) = (0usize, 0usize);

    for number in numbers {
        match leading_group(number, nb_digit) {
            Some(group) => {
                counts[(group - lower) as usize] += 1;
                retained += 1;
            }
            None => dropped += 1,
        }
    }

    let extraction = DigitExtraction {
        counts,
        retained,
        dropped,
    };
    if dropped > 0 {
        debug!(
            nb_digit,
            dropped,
            retained,
            dropped_pct = extraction.dropped_share() * 100.0,
            "removed values without enough significant digits"
        );
    }
    extraction
}

/// Distribution of the first `nb_digit` significant digits in base 10.
///
/// Index `i` counts values whose leading digits read `i + 10^(nb_digit - 1)`.
/// Signs are ignored. Values with fewer than `nb_digit` significant digits
/// (including zero and non-finite floats) are left out silently; use
/// [`extract_first_digits`] to see how many.
///
/// # Panics
///
/// Panics if `nb_digit` is zero.
pub fn count_first_digit<T: BenfordValue>(numbers: &[T], nb_digit: u32) -> DigitCountVector {
    extract_first_digits(numbers, nb_digit).counts
}

/// Divide each element by the sum of the vector.
///
/// A zero sum is not guarded: the result is NaN.
pub fn normalize_first_digit<T: Copy + Into<f64>>(array: &[T]) -> ProportionVector {
    let total: f64 = array.iter().map(|&x| x.into()).sum();
    array.iter().map(|&x| x.into() / total).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
