pub mod observed;
pub mod theoretical;
pub mod value;

pub use observed::{
    count_first_digit, extract_first_digits, leading_group, normalize_first_digit,
    DigitExtraction,
};
pub use theoretical::{first_digit_benford, get_theoretical_freq_benford};
pub use value::BenfordValue;
