use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The `trip` column, exactly as it appeared in the input.
///
/// Trip IDs are usually integers. Those sort numerically and come before anything else, which
/// sorts lexicographically.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripID(String);

impl TripID {
    pub fn new<S: Into<String>>(raw: S) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// None if the ID isn't integer-like
    pub fn as_number(&self) -> Option<i64> {
        self.0.parse::<i64>().ok()
    }

    /// The integer the ID starts with, ignoring whatever follows. "1.5" and "3rd" count as 1 and
    /// 3; "bike" has none.
    pub fn leading_integer(&self) -> Option<i64> {
        let sign = if self.0.starts_with(|c| c == '-' || c == '+') {
            1
        } else {
            0
        };
        let digits = self.0[sign..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return None;
        }
        self.0[..sign + digits].parse().ok()
    }
}

impl Ord for TripID {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for TripID {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TripID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
