//! Static data types exposed by the lookup endpoint

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Kind of static transit entity a lookup request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Trips,
    Routes,
    Stops,
    Feeds,
    StopTimes,
}

impl DataType {
    pub const ALL: [Self; 5] = [
        Self::Trips,
        Self::Routes,
        Self::Stops,
        Self::Feeds,
        Self::StopTimes,
    ];

    /// Path segment naming this data type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trips => "trips",
            Self::Routes => "routes",
            Self::Stops => "stops",
            Self::Feeds => "feeds",
            Self::StopTimes => "stoptimes",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = DomainError;

    /// Matching is exact: `Trips` or `stop_times` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|data_type| data_type.as_str() == s)
            .ok_or_else(|| DomainError::UnknownDataType(s.to_string()))
    }
}
