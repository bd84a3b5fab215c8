//! Date window used for point sighting searches

use chrono::{Days, NaiveDate, NaiveTime, SecondsFormat};
use serde::Serialize;

use crate::errors::DomainError;

/// A closed interval of calendar dates, `first_date <= last_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    #[serde(with = "midnight_utc")]
    first_date: NaiveDate,
    #[serde(with = "midnight_utc")]
    last_date: NaiveDate,
}

impl DateWindow {
    /// Forward-looking window starting at `reference` and spanning
    /// `preview_day_count` additional days.
    ///
    /// A count of zero yields a single-day window.
    pub fn forward(preview_day_count: u32, reference: NaiveDate) -> Result<Self, DomainError> {
        let last_date = reference
            .checked_add_days(Days::new(u64::from(preview_day_count)))
            .ok_or_else(|| {
                DomainError::InvalidDateTime(format!(
                    "{reference} + {preview_day_count} days is out of range"
                ))
            })?;

        Ok(Self {
            first_date: reference,
            last_date,
        })
    }

    #[must_use]
    pub const fn first_date(&self) -> NaiveDate {
        self.first_date
    }

    #[must_use]
    pub const fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    /// Number of days between the two ends
    #[must_use]
    pub fn span_days(&self) -> i64 {
        (self.last_date - self.first_date).num_days()
    }
}

/// Serializes a calendar date as the RFC 3339 timestamp of its UTC midnight
///
/// `2024-06-01` becomes `"2024-06-01T00:00:00Z"`.
pub mod midnight_utc {
    use super::{NaiveDate, NaiveTime, SecondsFormat};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        let stamp = date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        serializer.serialize_str(&stamp)
    }
}
