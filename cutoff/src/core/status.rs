//! Cutoff status classification and localized clock strings.
//!
//! All functions take the current instant as a parameter; nothing here
//! reads the ambient clock. Zone lookups go through the bundled IANA
//! database rather than whatever the host platform happens to provide.

use std::str::FromStr;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minutes before the cutoff at which a cutoff stops being comfortable.
const WARNING_WINDOW_MINUTES: i64 = 60;

/// How close the current wall clock is to a cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutoffStatus {
    /// More than an hour remaining.
    Ok,
    /// An hour or less remaining (inclusive at exactly one hour).
    Warning,
    /// The cutoff has passed (inclusive at exactly the cutoff instant).
    Expired,
}

impl CutoffStatus {
    /// Background color hosts use when rendering this status.
    pub fn css_color(self) -> &'static str {
        match self {
            Self::Ok => "#52c41a",
            Self::Warning => "#faad14",
            Self::Expired => "#ff4d4f",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Expired => "expired",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("unknown time zone '{0}'")]
    UnknownZone(String),
    #[error("malformed cutoff time '{0}' (expected 24-hour HH:MM)")]
    MalformedCutoff(String),
}

/// A 24-hour wall-clock time of day, parsed from `"HH:MM"` or `"H:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutoffTime(NaiveTime);

impl FromStr for CutoffTime {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || StatusError::MalformedCutoff(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(malformed)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(hour) || hour.len() > 2 || minute.len() != 2 || !digits(minute) {
            return Err(malformed());
        }
        let hour: u32 = hour.parse().map_err(|_| malformed())?;
        let minute: u32 = minute.parse().map_err(|_| malformed())?;
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(malformed)
    }
}

/// Look up an IANA zone name in the bundled database.
pub fn parse_zone(zone: &str) -> Result<Tz, StatusError> {
    zone.parse()
        .map_err(|_| StatusError::UnknownZone(zone.to_string()))
}

/// Classify `now` against today's cutoff in `zone`.
///
/// The cutoff is anchored to the current date in the zone's wall clock.
/// There is no next-day rollover: at 1 AM a 13:45 cutoff still targets
/// today's 13:45, since the warehouses do not operate across midnight.
pub fn status_for(
    cutoff_time_of_day: &str,
    zone: &str,
    now: DateTime<Utc>,
) -> Result<CutoffStatus, StatusError> {
    let cutoff: CutoffTime = cutoff_time_of_day.parse()?;
    let tz = parse_zone(zone)?;
    Ok(classify(cutoff, tz, now))
}

/// Classification core, for callers that already parsed their inputs.
pub fn classify(cutoff: CutoffTime, tz: Tz, now: DateTime<Utc>) -> CutoffStatus {
    let local = now.with_timezone(&tz).naive_local();
    let target = local.date().and_time(cutoff.0);
    let remaining = target - local;
    if remaining <= TimeDelta::zero() {
        CutoffStatus::Expired
    } else if remaining <= TimeDelta::minutes(WARNING_WINDOW_MINUTES) {
        CutoffStatus::Warning
    } else {
        CutoffStatus::Ok
    }
}

/// Render `now` as the zone's 12-hour wall clock, e.g. `"2:05 PM"`.
pub fn local_clock(zone: &str, now: DateTime<Utc>) -> Result<String, StatusError> {
    let tz = parse_zone(zone)?;
    Ok(now.with_timezone(&tz).format("%-I:%M %p").to_string())
}
