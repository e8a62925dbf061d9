//! ISO-8601 durations as used for delays.
//!
//! InfoPlus reports delays as durations such as `PT1M4S` or `-PT30S`. Only
//! the day and time designators are accepted; years and months have no fixed
//! length and never appear in delay fields.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid ISO-8601 duration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration: {reason}")]
pub struct DurationError {
    reason: &'static str,
}

impl DurationError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A signed duration with whole-second precision.
///
/// # Examples
///
/// ```
/// use infoplus::domain::IsoDuration;
///
/// let delay = IsoDuration::parse("PT1M4S").unwrap();
/// assert_eq!(delay.as_duration().num_seconds(), 64);
/// assert_eq!(delay.to_string(), "PT1M4S");
///
/// // Rendering is canonical
/// assert_eq!(IsoDuration::parse("PT64S").unwrap().to_string(), "PT1M4S");
/// assert_eq!(IsoDuration::parse("PT0M").unwrap().to_string(), "PT0S");
///
/// // Calendar units are rejected
/// assert!(IsoDuration::parse("P1M").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct IsoDuration(Duration);

impl IsoDuration {
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn zero() -> Self {
        Self(Duration::zero())
    }

    /// Returns `None` when `seconds` is outside the range of [`Duration`].
    pub fn from_seconds(seconds: i64) -> Option<Self> {
        Duration::try_seconds(seconds).map(Self)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Parse `[-]P[nW][nD][T[nH][nM][nS]]`.
    pub fn parse(s: &str) -> Result<Self, DurationError> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let rest = rest
            .strip_prefix('P')
            .ok_or_else(|| DurationError::new("must start with P"))?;
        let (date_part, time_part) = match rest.split_once('T') {
            Some((date, time)) => {
                if time.is_empty() {
                    return Err(DurationError::new("time designator without components"));
                }
                (date, Some(time))
            }
            None => (rest, None),
        };
        if date_part.is_empty() && time_part.is_none() {
            return Err(DurationError::new("no components"));
        }

        let mut seconds: i64 = 0;
        let mut last_rank = 0;
        for (value, unit) in components(date_part)? {
            let (rank, scale) = match unit {
                'W' => (1, 7 * 86_400),
                'D' => (2, 86_400),
                'Y' | 'M' => return Err(DurationError::new("calendar units are not supported")),
                _ => return Err(DurationError::new("unknown date unit")),
            };
            if rank <= last_rank {
                return Err(DurationError::new("date units out of order"));
            }
            last_rank = rank;
            seconds = add(seconds, value, scale)?;
        }
        let mut last_rank = 0;
        for (value, unit) in components(time_part.unwrap_or(""))? {
            let (rank, scale) = match unit {
                'H' => (1, 3_600),
                'M' => (2, 60),
                'S' => (3, 1),
                _ => return Err(DurationError::new("unknown time unit")),
            };
            if rank <= last_rank {
                return Err(DurationError::new("time units out of order"));
            }
            last_rank = rank;
            seconds = add(seconds, value, scale)?;
        }

        if negative {
            seconds = -seconds;
        }
        Self::from_seconds(seconds).ok_or_else(|| DurationError::new("value out of range"))
    }
}

/// Split `12H3M` into `[(12, 'H'), (3, 'M')]`.
fn components(s: &str) -> Result<Vec<(i64, char)>, DurationError> {
    let mut out = Vec::new();
    let mut number = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            number.push(c);
        } else {
            if number.is_empty() {
                return Err(DurationError::new("unit without value"));
            }
            let value = number
                .parse()
                .map_err(|_| DurationError::new("value out of range"))?;
            out.push((value, c));
            number.clear();
        }
    }
    if !number.is_empty() {
        return Err(DurationError::new("value without unit"));
    }
    Ok(out)
}

fn add(total: i64, value: i64, scale: i64) -> Result<i64, DurationError> {
    value
        .checked_mul(scale)
        .and_then(|v| total.checked_add(v))
        .ok_or_else(|| DurationError::new("value out of range"))
}

impl FromStr for IsoDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.num_seconds();
        if total < 0 {
            f.write_str("-")?;
        }
        let mut rest = total.unsigned_abs();
        let days = rest / 86_400;
        rest %= 86_400;
        let hours = rest / 3_600;
        rest %= 3_600;
        let minutes = rest / 60;
        let seconds = rest % 60;

        f.write_str("P")?;
        if days > 0 {
            write!(f, "{days}D")?;
        }
        if hours == 0 && minutes == 0 && seconds == 0 {
            if days == 0 {
                f.write_str("T0S")?;
            }
            return Ok(());
        }
        f.write_str("T")?;
        if hours > 0 {
            write!(f, "{hours}H")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}M")?;
        }
        if seconds > 0 {
            write!(f, "{seconds}S")?;
        }
        Ok(())
    }
}

impl Serialize for IsoDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
