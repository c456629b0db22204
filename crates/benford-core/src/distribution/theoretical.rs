use crate::types::ProportionVector;

/// Smallest and one-past-largest `nb_digit`-digit group in `base`.
pub(crate) fn group_bounds(nb_digit: u32, base: u32) -> (u64, u64) {
    assert!(nb_digit >= 1, "nb_digit must be at least 1");
    let base = u64::from(base);
    (base.pow(nb_digit - 1), base.pow(nb_digit))
}

/// Theoretical Benford proportions of the first `nb_digit` significant digits.
///
/// Element `i` is `log_base(1 + 1 / (i + base^(nb_digit - 1)))`, the
/// probability that the leading digits read `i + base^(nb_digit - 1)`.
/// The vector has `base^nb_digit - base^(nb_digit - 1)` elements.
///
/// # Panics
///
/// Panics if `nb_digit` is zero.
pub fn get_theoretical_freq_benford(nb_digit: u32, base: u32) -> ProportionVector {
    let (lower, upper) = group_bounds(nb_digit, base);
    let base = f64::from(base);
    (lower..upper)
        .map(|group| (1.0 + 1.0 / group as f64).ln() / base.ln())
        .collect()
}

/// Classical first-digit distribution (`nb_digit = 1`, base 10).
pub fn first_digit_benford() -> ProportionVector {
    get_theoretical_freq_benford(1, 10)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64], eps: f64) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < eps, "index {i}: {a} vs {e}");
        }
    }

    #[test]
    fn test_first_digit_base_10() {
        assert_close(
            &first_digit_benford(),
            &[
                0.30103, 0.17609126, 0.12493874, 0.09691001, 0.07918125, 0.06694679, 0.05799195,
                0.05115252, 0.0457574,
            ],
            1e-5,
        );
    }

    #[test]
    fn test_first_two_digits_base_10() {
        let p = get_theoretical_freq_benford(2, 10);
        assert_eq!(p.len(), 90);
        assert!((p[0] - 0.04139269).abs() < 1e-5);
        assert!((p[1] - 0.03778856).abs() < 1e-5);
        assert!((p[45] - 0.00782534).abs() < 1e-5);
        assert!((p[89] - 0.0043648).abs() < 1e-5);
    }

    #[test]
    fn test_first_digit_base_5() {
        assert_close(
            &get_theoretical_freq_benford(1, 5),
            &[0.43067656, 0.25192964, 0.17874692, 0.13864688],
            1e-5,
        );
    }

    #[test]
    fn test_first_two_digits_base_5() {
        assert_close(
            &get_theoretical_freq_benford(2, 5),
            &[
                0.11328275, 0.0957792, 0.08296772, 0.07318271, 0.06546417, 0.05921954, 0.05406321,
                0.04973333, 0.04604587, 0.04286768, 0.04010004, 0.0376682, 0.03551452, 0.03359385,
                0.03187032, 0.03031503, 0.02890451, 0.02761943, 0.02644378, 0.02536413,
            ],
            1e-5,
        );
    }

    #[test]
    fn test_sums_to_one() {
        for base in [2, 5, 8, 10, 16] {
            for nb_digit in 1..=3 {
                let total: f64 = get_theoretical_freq_benford(nb_digit, base).iter().sum();
                assert!((total - 1.0).abs() < 1e-6, "base {base}, k {nb_digit}: {total}");
            }
        }
    }

    #[test]
    fn test_classical_rounded_values() {
        assert_close(
            &first_digit_benford(),
            &[0.301, 0.176, 0.125, 0.097, 0.079, 0.067, 0.058, 0.051, 0.046],
            1e-3,
        );
    }

    #[test]
    fn test_binary_single_digit() {
        assert_eq!(get_theoretical_freq_benford(1, 2), vec![1.0]);
    }

    #[test]
    #[should_panic(expected = "nb_digit must be at least 1")]
    fn test_zero_digits_panics() {
        get_theoretical_freq_benford(0, 10);
    }
}
