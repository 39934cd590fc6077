//! Component cardinality expressions
//!
//! The grammar is closed:
//!
//! ```text
//! cardinality := "ALL" | N | N "+" | N "-" M      (N <= M)
//! N, M        := decimal digits
//! ```

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Allowed instance count of a component across a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Cardinality {
    /// One instance on every host of the cluster
    All,

    /// Exactly `n` instances
    Exactly(u32),

    /// At least `n` instances, no upper bound
    AtLeast(u32),

    /// Between `min` and `max` instances, inclusive
    Range { min: u32, max: u32 },
}

impl Cardinality {
    /// Lower bound on the instance count, given the cluster size
    pub fn min_instances(&self, host_count: u32) -> u32 {
        match *self {
            Cardinality::All => host_count,
            Cardinality::Exactly(n) | Cardinality::AtLeast(n) => n,
            Cardinality::Range { min, .. } => min,
        }
    }

    /// Upper bound on the instance count, `None` when unbounded
    pub fn max_instances(&self, host_count: u32) -> Option<u32> {
        match *self {
            Cardinality::All => Some(host_count),
            Cardinality::Exactly(n) => Some(n),
            Cardinality::AtLeast(_) => None,
            Cardinality::Range { max, .. } => Some(max),
        }
    }

    /// Whether `count` instances satisfy this cardinality on a cluster of `host_count` hosts
    pub fn allows(&self, count: u32, host_count: u32) -> bool {
        let min = self.min_instances(host_count);
        match self.max_instances(host_count) {
            Some(max) => (min..=max).contains(&count),
            None => count >= min,
        }
    }

    /// True when the component may be absent from the cluster
    pub fn is_optional(&self) -> bool {
        match *self {
            Cardinality::All => false,
            Cardinality::Exactly(n) | Cardinality::AtLeast(n) => n == 0,
            Cardinality::Range { min, .. } => min == 0,
        }
    }
}

fn parse_count(raw: &str, whole: &str) -> Result<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModelError::InvalidCardinality(whole.to_string()));
    }
    raw.parse()
        .map_err(|_| ModelError::InvalidCardinality(whole.to_string()))
}

impl FromStr for Cardinality {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "ALL" {
            return Ok(Cardinality::All);
        }

        if let Some(lower) = s.strip_suffix('+') {
            return Ok(Cardinality::AtLeast(parse_count(lower, s)?));
        }

        if let Some((lower, upper)) = s.split_once('-') {
            let min = parse_count(lower, s)?;
            let max = parse_count(upper, s)?;
            if min > max {
                return Err(ModelError::InvertedCardinality(s.to_string()));
            }
            return Ok(Cardinality::Range { min, max });
        }

        Ok(Cardinality::Exactly(parse_count(s, s)?))
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::All => write!(f, "ALL"),
            Cardinality::Exactly(n) => write!(f, "{}", n),
            Cardinality::AtLeast(n) => write!(f, "{}+", n),
            Cardinality::Range { min, max } => write!(f, "{}-{}", min, max),
        }
    }
}

impl TryFrom<String> for Cardinality {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Cardinality> for String {
    fn from(value: Cardinality) -> Self {
        value.to_string()
    }
}
