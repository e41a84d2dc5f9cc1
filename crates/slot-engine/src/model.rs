//! Booking records read from the store, and the interval/slot values the
//! engine computes with.
//!
//! All times are local wall-clock values (`NaiveDate`, `NaiveTime`,
//! `NaiveDateTime`). The engine never converts between timezones.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SlotError;

/// A bookable service. Only the duration matters to availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Length of one appointment of this service, in whole minutes.
    pub duration_minutes: u32,
}

/// A professional who can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professional {
    pub id: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Link between a professional and a service they offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalServiceLink {
    pub professional_id: String,
    pub service_id: String,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
}

/// A weekly working-hours row for one professional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingSchedule {
    pub professional_id: String,
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// An ad-hoc unavailability window for one professional on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Break {
    pub professional_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Cancelled and no-show appointments no longer represent work the
    /// professional is doing.
    pub fn is_released(self) -> bool {
        matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::NoShow)
    }
}

/// A stored appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    /// `None` for "any professional" requests that were never assigned.
    #[serde(default)]
    pub professional_id: Option<String>,
    pub client_id: String,
    pub service_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub status: AppointmentStatus,
}

fn default_true() -> bool {
    true
}

/// Schedule and break times are hour:minute values; seconds are dropped.
fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// A half-open `[start, end)` interval of wall-clock timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Anchor two times of day onto `date` at whole-minute precision.
    pub fn on_date(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self::new(
            date.and_time(truncate_to_minute(start)),
            date.and_time(truncate_to_minute(end)),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open intersection test. Intervals that merely touch do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// A bookable start time, rendered as zero-padded 24-hour `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(NaiveTime);

impl Slot {
    /// Build a slot from a timestamp, dropping the date and any seconds.
    pub fn from_datetime(at: NaiveDateTime) -> Self {
        Slot(truncate_to_minute(at.time()))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// The concrete `[start, start + duration)` window this slot occupies on `date`.
    pub fn window(&self, date: NaiveDate, duration_minutes: u32) -> Interval {
        let start = date.and_time(self.0);
        Interval::new(start, start + Duration::minutes(i64::from(duration_minutes)))
    }
}

impl From<NaiveTime> for Slot {
    fn from(time: NaiveTime) -> Self {
        Slot(time)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for Slot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Slot)
            .map_err(|e| SlotError::InvalidSlot(format!("'{}': {}", s, e)))
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A concrete booking proposal for an "any professional" request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAssignment {
    pub professional_id: String,
    pub slot: Slot,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}
