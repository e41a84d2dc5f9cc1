//! Resolve weekly schedule rows into concrete working intervals for a date.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::model::{Interval, WorkingSchedule};

/// Day-of-week index used by schedule rows: 0 = Sunday through 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Return the working intervals that apply on `date`, in schedule order.
///
/// Every active row matching the date's day-of-week contributes its own
/// interval. Rows with `start_time >= end_time` are skipped.
pub fn resolve_working_intervals(schedules: &[WorkingSchedule], date: NaiveDate) -> Vec<Interval> {
    let dow = day_of_week(date);

    schedules
        .iter()
        .filter(|s| s.is_active && s.day_of_week == dow)
        .filter_map(|s| {
            let interval = Interval::on_date(date, s.start_time, s.end_time);
            if interval.is_empty() {
                debug!(
                    professional_id = %s.professional_id,
                    start = %s.start_time,
                    end = %s.end_time,
                    "skipping malformed schedule row"
                );
                None
            } else {
                Some(interval)
            }
        })
        .collect()
}
