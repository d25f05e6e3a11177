use crate::CommonError;
use serde::Serialize;
use std::str::FromStr;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MIN: u64 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MIN;
const NANOS_PER_DAY: u64 = 24 * NANOS_PER_HOUR;

/// Units an elapsed time can be read in
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, clap::ValueEnum)]
pub enum TimeUnit {
    #[value(name = "ns")]
    #[serde(rename = "ns")]
    Nanoseconds,
    #[value(name = "us")]
    #[serde(rename = "us")]
    Microseconds,
    #[value(name = "ms")]
    #[serde(rename = "ms")]
    Milliseconds,
    #[default]
    #[value(name = "s")]
    #[serde(rename = "s")]
    Seconds,
    #[value(name = "min")]
    #[serde(rename = "min")]
    Minutes,
    #[value(name = "h")]
    #[serde(rename = "h")]
    Hours,
    #[value(name = "d")]
    #[serde(rename = "d")]
    Days,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::Nanoseconds,
        TimeUnit::Microseconds,
        TimeUnit::Milliseconds,
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
        TimeUnit::Days,
    ];

    /// The units offered by the interactive unit selector. Days are readable
    /// but not part of the selector
    pub const SELECTABLE: [TimeUnit; 6] = [
        TimeUnit::Nanoseconds,
        TimeUnit::Microseconds,
        TimeUnit::Milliseconds,
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
    ];

    /// Number of nanoseconds in one `self`
    pub const fn factor(&self) -> u64 {
        match self {
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Microseconds => NANOS_PER_MICRO,
            TimeUnit::Milliseconds => NANOS_PER_MILLI,
            TimeUnit::Seconds => NANOS_PER_SEC,
            TimeUnit::Minutes => NANOS_PER_MIN,
            TimeUnit::Hours => NANOS_PER_HOUR,
            TimeUnit::Days => NANOS_PER_DAY,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "us",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
        }
    }

    /// Convert `nanos` into this unit
    pub fn convert(&self, nanos: u64) -> f64 {
        nanos as f64 / self.factor() as f64
    }

    /// Return the selector entry following `self`, wrapping around. A unit
    /// outside of the selector moves to the first entry
    pub fn next_selectable(&self) -> TimeUnit {
        let Some(pos) = Self::SELECTABLE.iter().position(|u| u == self) else {
            return Self::SELECTABLE[0];
        };
        Self::SELECTABLE[(pos + 1) % Self::SELECTABLE.len()]
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .find(|unit| unit.as_str() == s)
            .copied()
            .ok_or_else(|| CommonError::UnknownUnit(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(TimeUnit::Nanoseconds, 1; "nanoseconds")]
    #[test_case(TimeUnit::Microseconds, 1_000; "microseconds")]
    #[test_case(TimeUnit::Milliseconds, 1_000_000; "milliseconds")]
    #[test_case(TimeUnit::Seconds, 1_000_000_000; "seconds")]
    #[test_case(TimeUnit::Minutes, 60_000_000_000; "minutes")]
    #[test_case(TimeUnit::Hours, 3_600_000_000_000; "hours")]
    #[test_case(TimeUnit::Days, 86_400_000_000_000; "days")]
    fn test_unit_factors(unit: TimeUnit, expected: u64) {
        assert_eq!(unit.factor(), expected);
    }

    #[test_case("ns", TimeUnit::Nanoseconds; "ns")]
    #[test_case("us", TimeUnit::Microseconds; "us")]
    #[test_case("ms", TimeUnit::Milliseconds; "ms")]
    #[test_case("s", TimeUnit::Seconds; "s")]
    #[test_case("min", TimeUnit::Minutes; "min")]
    #[test_case(" h ", TimeUnit::Hours; "h with spaces")]
    #[test_case("d", TimeUnit::Days; "d")]
    fn test_parse_unit(input: &str, expected: TimeUnit) {
        assert_eq!(input.parse::<TimeUnit>().unwrap(), expected);
        assert_eq!(expected.to_string(), input.trim());
    }

    #[test_case("sec"; "long name")]
    #[test_case("MS"; "wrong case")]
    #[test_case("µs"; "micro sign")]
    #[test_case(""; "empty")]
    fn test_parse_unknown_unit(input: &str) {
        let err = input.parse::<TimeUnit>().unwrap_err();
        assert!(err.is_unknown_unit(input));
    }

    #[test]
    fn test_selector_cycle() {
        let mut unit = TimeUnit::Seconds;
        let mut seen = Vec::new();
        for _ in 0..TimeUnit::SELECTABLE.len() {
            unit = unit.next_selectable();
            seen.push(unit);
        }
        assert_eq!(unit, TimeUnit::Seconds);
        assert!(!seen.contains(&TimeUnit::Days));
        assert_eq!(TimeUnit::Days.next_selectable(), TimeUnit::Nanoseconds);
        assert_eq!(TimeUnit::Hours.next_selectable(), TimeUnit::Nanoseconds);
    }

    #[test]
    fn test_convert() {
        assert_eq!(TimeUnit::Minutes.convert(90_000_000_000), 1.5);
        assert_eq!(TimeUnit::Nanoseconds.convert(0), 0.0);
    }
}
