//! Significant-digit view over the numeric types a dataset may hold.
//!
//! Only the magnitude matters: signs are discarded, zeros and non-finite
//! floats have no significant digits at all.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// A dataset element whose leading significant digits can be read.
pub trait BenfordValue {
    /// Base-10 digit string of the magnitude with no leading zeros.
    ///
    /// Integral values keep their positional trailing zeros (`1200` gives
    /// `"1200"`). Fractional values keep only significant digits: the
    /// decimal separator and the zeros around it are dropped (`0.0708`
    /// gives `"708"`, `78.45` gives `"7845"`). Returns `None` when the
    /// value has no significant digit.
    fn significant_digits(&self) -> Option<String>;

    /// Lossy conversion used by the magnitude diagnostics.
    fn as_f64(&self) -> f64;
}

/// Digits of a float from its shortest round-trip scientific form.
///
/// The mantissa already holds every significant digit, so the exponent is
/// only consulted to restore positional zeros of integral magnitudes.
fn float_digits(scientific: &str, integral: bool) -> Option<String> {
    let (mantissa, exponent) = scientific.split_once('e')?;
    let mut digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    if integral {
        let width = exponent.parse::<usize>().ok()? + 1;
        while digits.len() < width {
            digits.push('0');
        }
    }
    Some(digits)
}

macro_rules! impl_float {
    ($($t:ty),*) => {$(
        impl BenfordValue for $t {
            fn significant_digits(&self) -> Option<String> {
                let magnitude = self.abs();
                if magnitude == 0.0 || !magnitude.is_finite() {
                    return None;
                }
                float_digits(&format!("{magnitude:e}"), magnitude.fract() == 0.0)
            }

            fn as_f64(&self) -> f64 {
                *self as f64
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl BenfordValue for $t {
            fn significant_digits(&self) -> Option<String> {
                let magnitude = self.unsigned_abs();
                (magnitude != 0).then(|| magnitude.to_string())
            }

            fn as_f64(&self) -> f64 {
                *self as f64
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl BenfordValue for $t {
            fn significant_digits(&self) -> Option<String> {
                (*self != 0).then(|| self.to_string())
            }

            fn as_f64(&self) -> f64 {
                *self as f64
            }
        }
    )*};
}

impl_float!(f32, f64);
impl_signed!(i8, i16, i32, i64, i128, isize);
impl_unsigned!(u8, u16, u32, u64, u128, usize);

impl BenfordValue for Decimal {
    fn significant_digits(&self) -> Option<String> {
        // normalize() strips fractional trailing zeros, and a positive
        // mantissa never has leading zeros.
        let normalized = self.abs().normalize();
        if normalized.is_zero() {
            return None;
        }
        Some(normalized.mantissa().to_string())
    }

    fn as_f64(&self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn digits<T: BenfordValue>(v: T) -> Option<String> {
        v.significant_digits()
    }

    #[test]
    fn test_integer_keeps_positional_zeros() {
        assert_eq!(digits(1200_i64).as_deref(), Some("1200"));
        assert_eq!(digits(708_u32).as_deref(), Some("708"));
    }

    #[test]
    fn test_negative_integer() {
        assert_eq!(digits(-7845_i32).as_deref(), Some("7845"));
        assert_eq!(digits(i64::MIN).as_deref(), Some("9223372036854775808"));
    }

    #[test]
    fn test_zero_has_no_digits() {
        assert_eq!(digits(0_i32), None);
        assert_eq!(digits(0.0_f64), None);
        assert_eq!(digits(-0.0_f64), None);
        assert_eq!(digits(dec!(0.000)), None);
    }

    #[test]
    fn test_non_finite_has_no_digits() {
        assert_eq!(digits(f64::NAN), None);
        assert_eq!(digits(f64::INFINITY), None);
        assert_eq!(digits(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_fractional_float() {
        assert_eq!(digits(78.45_f64).as_deref(), Some("7845"));
        assert_eq!(digits(0.0708_f64).as_deref(), Some("708"));
        assert_eq!(digits(2.01_f64).as_deref(), Some("201"));
        assert_eq!(digits(0.025_f64).as_deref(), Some("25"));
    }

    #[test]
    fn test_tiny_float_uses_mantissa() {
        assert_eq!(digits(0.0000012_f64).as_deref(), Some("12"));
        assert_eq!(digits(0.0000000000000035_f64).as_deref(), Some("35"));
        assert_eq!(digits(5e-324_f64).as_deref(), Some("5"));
    }

    #[test]
    fn test_integral_float() {
        assert_eq!(digits(100.0_f64).as_deref(), Some("100"));
        assert_eq!(digits(-12.0_f64).as_deref(), Some("12"));
        assert_eq!(digits(1e20_f64).as_deref(), Some("100000000000000000000"));
    }

    #[test]
    fn test_f32_uses_its_own_shortest_form() {
        assert_eq!(digits(0.1_f32).as_deref(), Some("1"));
        assert_eq!(digits(6.5_f32).as_deref(), Some("65"));
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(digits(dec!(78.450)).as_deref(), Some("7845"));
        assert_eq!(digits(dec!(-0.07080)).as_deref(), Some("708"));
        assert_eq!(digits(dec!(100.00)).as_deref(), Some("100"));
        assert_eq!(digits(dec!(0.0000012)).as_deref(), Some("12"));
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(dec!(12.5).as_f64(), 12.5);
        assert_eq!((-3_i16).as_f64(), -3.0);
    }
}
