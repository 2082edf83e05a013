use crate::error::IntervalError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token written for a retired task
pub const INACTIVE_TOKEN: &str = "-1";

/// Time to wait after the last review before a task is due again.
///
/// Each active variant keeps the unit it was written with. Counts are
/// written back without leading zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    /// `<n>m`
    Minutes(u32),
    /// `<n>h`
    Hours(u32),
    /// Bare `<n>`
    Days(u32),
    /// `<n>w`
    Weeks(u32),
    /// `-1`: retired, never scheduled again until reset
    Inactive,
}

impl Interval {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Inactive)
    }

    /// Length of the interval, `None` when inactive
    pub fn duration(&self) -> Option<Duration> {
        match *self {
            Self::Minutes(n) => Some(Duration::minutes(i64::from(n))),
            Self::Hours(n) => Some(Duration::hours(i64::from(n))),
            Self::Days(n) => Some(Duration::days(i64::from(n))),
            Self::Weeks(n) => Some(Duration::weeks(i64::from(n))),
            Self::Inactive => None,
        }
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == INACTIVE_TOKEN {
            return Ok(Self::Inactive);
        }

        let parsed = if let Some(digits) = s.strip_suffix('m') {
            parse_count(digits).map(Self::Minutes)
        } else if let Some(digits) = s.strip_suffix('h') {
            parse_count(digits).map(Self::Hours)
        } else if let Some(digits) = s.strip_suffix('w') {
            parse_count(digits).map(Self::Weeks)
        } else {
            parse_count(s).map(Self::Days)
        };

        parsed.ok_or_else(|| IntervalError(s.to_string()))
    }
}

/// Parse an unsigned count of ASCII digits (no sign)
fn parse_count(digits: &str) -> Option<u32> {
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minutes(n) => write!(f, "{}m", n),
            Self::Hours(n) => write!(f, "{}h", n),
            Self::Days(n) => write!(f, "{}", n),
            Self::Weeks(n) => write!(f, "{}w", n),
            Self::Inactive => f.write_str(INACTIVE_TOKEN),
        }
    }
}

impl TryFrom<String> for Interval {
    type Error = IntervalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!("7".parse::<Interval>().unwrap(), Interval::Days(7));
        assert_eq!("0".parse::<Interval>().unwrap(), Interval::Days(0));
        assert_eq!("12h".parse::<Interval>().unwrap(), Interval::Hours(12));
        assert_eq!("90m".parse::<Interval>().unwrap(), Interval::Minutes(90));
        assert_eq!("2w".parse::<Interval>().unwrap(), Interval::Weeks(2));
        assert_eq!("-1".parse::<Interval>().unwrap(), Interval::Inactive);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for bad in ["", "-2", "+7", "h", "1.5h", "12 h", "3d", "abc", "-1h"] {
            assert!(bad.parse::<Interval>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_parse_leading_zeros() {
        assert_eq!("07".parse::<Interval>().unwrap(), Interval::Days(7));
        assert_eq!("00".parse::<Interval>().unwrap(), Interval::Days(0));
        assert_eq!("012h".parse::<Interval>().unwrap(), Interval::Hours(12));
        assert_eq!(Interval::Days(7).to_string(), "7");
    }

    #[test]
    fn test_display_matches_input() {
        for token in ["0", "7", "60", "12h", "45m", "3w", "-1"] {
            let interval: Interval = token.parse().unwrap();
            assert_eq!(interval.to_string(), token);
        }
    }

    #[test]
    fn test_duration() {
        assert_eq!(Interval::Hours(12).duration(), Some(Duration::hours(12)));
        assert_eq!(Interval::Days(3).duration(), Some(Duration::days(3)));
        assert_eq!(Interval::Weeks(1).duration(), Some(Duration::days(7)));
        assert_eq!(Interval::Inactive.duration(), None);
        assert!(!Interval::Inactive.is_active());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&vec![Interval::Hours(12), Interval::Days(1)]).unwrap();
        assert_eq!(json, r#"["12h","1"]"#);

        let parsed: Vec<Interval> = serde_json::from_str(r#"["30m","2w"]"#).unwrap();
        assert_eq!(parsed, vec![Interval::Minutes(30), Interval::Weeks(2)]);

        assert!(serde_json::from_str::<Interval>(r#""soon""#).is_err());
    }
}
