//! Transformation directions and coordinate spaces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CigarcoError;

/// Direction of a coordinate transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Query coordinate to target coordinate.
    #[default]
    #[serde(rename = "QT")]
    QueryToTarget,
    /// Target coordinate to query coordinate.
    #[serde(rename = "TQ")]
    TargetToQuery,
}

impl Direction {
    /// Coordinate space the input coordinate lives in.
    pub fn source(&self) -> Space {
        match self {
            Direction::QueryToTarget => Space::Query,
            Direction::TargetToQuery => Space::Target,
        }
    }

    /// Coordinate space of the result.
    pub fn destination(&self) -> Space {
        self.source().other()
    }

    /// The short token, `QT` or `TQ`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::QueryToTarget => "QT",
            Direction::TargetToQuery => "TQ",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CigarcoError;

    /// Parse a direction token.
    ///
    /// ```
    /// use cigarco::mapping::Direction;
    ///
    /// assert_eq!("QT".parse::<Direction>().unwrap(), Direction::QueryToTarget);
    /// assert_eq!("tq".parse::<Direction>().unwrap(), Direction::TargetToQuery);
    /// assert!("QQ".parse::<Direction>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "QT" => Ok(Direction::QueryToTarget),
            "TQ" => Ok(Direction::TargetToQuery),
            _ => Err(CigarcoError::UnsupportedDirection {
                token: s.to_string(),
            }),
        }
    }
}

/// One of the two coordinate spaces related by an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Space {
    Query,
    Target,
}

impl Space {
    /// The opposite space.
    pub fn other(&self) -> Space {
        match self {
            Space::Query => Space::Target,
            Space::Target => Space::Query,
        }
    }
}
