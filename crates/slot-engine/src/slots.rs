//! Walk a working interval in fixed steps and keep the starts that fit.
//!
//! The step is the granularity at which any service may start, not a function
//! of the service's duration. A long service simply has fewer valid starts
//! near closing time.

use chrono::Duration;
use serde::Serialize;

use crate::model::{Interval, Slot};

/// Generate the valid start times inside `working`, in chronological order.
///
/// A candidate `[cursor, cursor + duration)` is kept when it ends no later
/// than `working.end` and overlaps none of `blocking` (half-open: touching
/// is not overlapping). The cursor advances by `step_minutes` whether or not
/// the candidate was kept. A zero step yields no slots.
pub fn generate_slots(
    working: &Interval,
    duration_minutes: u32,
    step_minutes: u32,
    blocking: &[Interval],
) -> Vec<Slot> {
    if step_minutes == 0 || working.is_empty() {
        return Vec::new();
    }

    let duration = Duration::minutes(i64::from(duration_minutes));
    let step = Duration::minutes(i64::from(step_minutes));

    let mut slots = Vec::new();
    let mut cursor = working.start;

    while cursor < working.end {
        let candidate = Interval::new(cursor, cursor + duration);

        let fits = candidate.end <= working.end;
        if fits && !blocking.iter().any(|b| candidate.overlaps(b)) {
            slots.push(Slot::from_datetime(cursor));
        }

        cursor += step;
    }

    slots
}

/// Slots split at noon, the way booking screens present them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayPeriods {
    pub morning: Vec<Slot>,
    pub afternoon: Vec<Slot>,
}

/// Partition slots into morning (hour < 12) and afternoon, preserving order.
pub fn split_by_period(slots: &[Slot]) -> DayPeriods {
    let (morning, afternoon): (Vec<Slot>, Vec<Slot>) = slots.iter().partition(|s| s.hour() < 12);
    DayPeriods { morning, afternoon }
}
