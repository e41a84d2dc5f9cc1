//! Collect the intervals a candidate slot must not overlap.

use chrono::NaiveDate;

use crate::model::{Appointment, Break, Interval};

/// Break and appointment intervals for one professional on one date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockingIntervals {
    pub breaks: Vec<Interval>,
    pub appointments: Vec<Interval>,
}

impl BlockingIntervals {
    /// All blocking intervals, breaks first.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.breaks.iter().chain(self.appointments.iter())
    }

    pub fn to_vec(&self) -> Vec<Interval> {
        self.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty() && self.appointments.is_empty()
    }
}

/// Project breaks and appointments onto `date`.
///
/// Breaks dated on `date` are anchored to it. Appointments starting on `date`
/// are taken verbatim. With `include_cancelled` set, every appointment blocks
/// regardless of status; otherwise cancelled and no-show ones are dropped.
pub fn collect_blocking_intervals(
    breaks: &[Break],
    appointments: &[Appointment],
    date: NaiveDate,
    include_cancelled: bool,
) -> BlockingIntervals {
    let breaks = breaks
        .iter()
        .filter(|b| b.date == date)
        .map(|b| Interval::on_date(date, b.start_time, b.end_time))
        .collect();

    let appointments = appointments
        .iter()
        .filter(|a| a.start_time.date() == date)
        .filter(|a| include_cancelled || !a.status.is_released())
        .map(|a| Interval::new(a.start_time, a.end_time))
        .collect();

    BlockingIntervals {
        breaks,
        appointments,
    }
}
