pub mod clock;
pub mod errors;
pub mod stopwatch;
pub mod units;

pub use clock::{ManualClock, MonotonicClock, SystemClock};
pub use errors::CommonError;
pub use stopwatch::Accumulator;
pub use units::TimeUnit;

use num_format::{Locale, ToFormattedString};

pub struct StringUtils {}

impl StringUtils {
    /// Format `value` for display: thousands separated, 3 decimal places,
    /// followed by the unit. e.g. "1,234.500 ms"
    pub fn format_reading(value: f64, unit: TimeUnit) -> String {
        let value = if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        };

        let fixed = format!("{:.3}", value);
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "000"));
        let grouped = match int_part.parse::<u64>() {
            Ok(num) => num.to_formatted_string(&Locale::en),
            // beyond u64, leave the digits as they are
            Err(_) => int_part.to_string(),
        };
        format!("{}.{} {}", grouped, frac_part, unit)
    }
}
