//! Path parameter decoding
//!
//! Turns the raw strings captured by the router into typed queries. Nothing
//! here talks to the resolver; a decoding failure means the resolver is
//! never called.

use chrono::{Local, NaiveDate, TimeDelta};
use domain::{DataType, DomainError, GeoPoint};
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A "what passes near this point" request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointQuery {
    pub point: GeoPoint,
    /// First day of the search window
    pub reference_date: NaiveDate,
}

/// A "what can be seen from this trip" request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboardQuery {
    pub feed_id: String,
    pub trip_id: String,
    pub date: NaiveDate,
    /// Delay applied to the trip's schedule, negative when early
    pub lateness: TimeDelta,
}

/// A static data lookup
///
/// The meaning of the keys depends on the data type: `(feed_id, trip_id)`
/// for trips, `(feed_id, stop_id)` for stops and stop times, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    pub data_type: DataType,
    pub first_key: String,
    pub second_key: String,
}

/// Today's date on the server's wall clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Decode `/api/sights/{lat}/{lon}/{date?}`
pub fn decode_point_query(
    lat: &str,
    lon: &str,
    date: Option<&str>,
    today: NaiveDate,
) -> Result<PointQuery, DomainError> {
    let lat = parse_coordinate("latitude", lat)?;
    let lon = parse_coordinate("longitude", lon)?;
    let reference_date = parse_date_or(date, today)?;

    Ok(PointQuery {
        point: GeoPoint::new(lat, lon),
        reference_date,
    })
}

/// Decode `/api/aboard/{feed_id}/{trip_id}/{date?}/{late_seconds?}`
///
/// Missing lateness means an on-time trip.
pub fn decode_aboard_query(
    feed_id: &str,
    trip_id: &str,
    date: Option<&str>,
    late_seconds: Option<&str>,
    today: NaiveDate,
) -> Result<AboardQuery, DomainError> {
    let feed_id = parse_key("feed_id", feed_id)?;
    let trip_id = parse_key("trip_id", trip_id)?;
    let lateness = parse_lateness(non_empty(late_seconds).unwrap_or("0"))?;
    let date = parse_date_or(date, today)?;

    Ok(AboardQuery {
        feed_id,
        trip_id,
        date,
        lateness,
    })
}

/// Decode `/api/data/{data_type}/{first_key?}/{second_key?}`
///
/// Absent keys become empty strings; for feeds an empty first key means
/// "list every feed".
pub fn decode_lookup_key(
    data_type: &str,
    first_key: Option<&str>,
    second_key: Option<&str>,
) -> Result<LookupKey, DomainError> {
    Ok(LookupKey {
        data_type: data_type.parse()?,
        first_key: parse_key("first_key", first_key.unwrap_or_default())?,
        second_key: parse_key("second_key", second_key.unwrap_or_default())?,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Keys are forwarded verbatim, except `.` and `..`, which cannot be sent
/// as a URL path segment
fn parse_key(name: &str, raw: &str) -> Result<String, DomainError> {
    if matches!(raw, "." | "..") {
        return Err(DomainError::invalid_parameter(
            name,
            raw,
            "not a valid identifier",
        ));
    }
    Ok(raw.to_string())
}

fn parse_coordinate(name: &str, raw: &str) -> Result<f64, DomainError> {
    let value = raw
        .parse::<f64>()
        .map_err(|e| DomainError::invalid_parameter(name, raw, e))?;

    // NaN and infinities parse but have no JSON representation
    if !value.is_finite() {
        return Err(DomainError::invalid_parameter(name, raw, "must be finite"));
    }
    Ok(value)
}

fn parse_date_or(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, DomainError> {
    let Some(raw) = non_empty(raw) else {
        debug!(%today, "No date given, using today");
        return Ok(today);
    };

    // chrono accepts unpadded months and days; the API does not
    if raw.len() != 10 {
        return Err(DomainError::invalid_parameter(
            "date",
            raw,
            "expected YYYY-MM-DD",
        ));
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| DomainError::invalid_parameter("date", raw, e))
}

fn parse_lateness(raw: &str) -> Result<TimeDelta, DomainError> {
    let seconds = raw
        .parse::<i64>()
        .map_err(|e| DomainError::invalid_parameter("lateness", raw, e))?;

    TimeDelta::try_seconds(seconds)
        .ok_or_else(|| DomainError::invalid_parameter("lateness", raw, "out of range"))
}
