//! Schedule expression builder
//!
//! Pure translation of user-supplied date/time/frequency into a one-shot
//! instant or recurrence rule. Everything here is UTC.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};

use super::model::Frequency;
use crate::core::ChimeError;

/// Longest accepted custom cadence: one year of minutes. Keeps interval
/// arithmetic well inside [`chrono::Duration`]'s representable range.
pub const MAX_CUSTOM_INTERVAL_MINUTES: i64 = 525_600;

/// A normalized recurrence rule or single future instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleExpression {
    /// Fires exactly once at the given instant.
    Once { at: DateTime<Utc> },
    /// Fires every day at the given wall-clock time.
    Daily { time: NaiveTime },
    /// Fires every Sunday at the given wall-clock time.
    ///
    /// The anchor weekday is fixed: the weekday of the user-supplied date is
    /// intentionally not honored, and callers are told so in the creation
    /// confirmation.
    Weekly { time: NaiveTime },
    /// Fires every `minutes` minutes, starting immediately.
    Every { minutes: i64 },
}

impl ScheduleExpression {
    /// The next firing instant strictly after `after`.
    ///
    /// Returns `None` only for a one-shot whose instant has already passed.
    pub fn next_occurrence(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Once { at } => (*at > after).then_some(*at),
            Self::Daily { time } => {
                let today = utc(after.date_naive(), *time);
                Some(if today > after {
                    today
                } else {
                    today + Duration::days(1)
                })
            }
            Self::Weekly { time } => {
                let mut date = after.date_naive();
                // A qualifying Sunday always exists within the next 8 days.
                for _ in 0..=7 {
                    let candidate = utc(date, *time);
                    if date.weekday() == Weekday::Sun && candidate > after {
                        return Some(candidate);
                    }
                    date += Duration::days(1);
                }
                None
            }
            Self::Every { minutes } => Some(after + Duration::minutes(*minutes)),
        }
    }

    /// Whether the schedule fires at most once.
    pub fn is_one_shot(&self) -> bool {
        matches!(self, Self::Once { .. })
    }
}

fn utc(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(date.and_time(time), Utc)
}

/// Builds the schedule for the given user input. Pure and deterministic.
///
/// Fails with [`ChimeError::Validation`] when `date` or `time` do not parse,
/// or when `frequency` is `custom` and `interval` is absent or not positive.
pub fn build_schedule(
    date: &str,
    time: &str,
    frequency: Frequency,
    interval: Option<i64>,
) -> Result<ScheduleExpression, ChimeError> {
    let time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| {
        ChimeError::validation(format!("time must be in HH:MM format (UTC), got `{time}`"))
    })?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        ChimeError::validation(format!("date must be in YYYY-MM-DD format (UTC), got `{date}`"))
    })?;

    match frequency {
        Frequency::Daily => Ok(ScheduleExpression::Daily { time }),
        Frequency::Weekly => Ok(ScheduleExpression::Weekly { time }),
        Frequency::Custom => match interval {
            Some(minutes) if minutes > 0 && minutes <= MAX_CUSTOM_INTERVAL_MINUTES => {
                Ok(ScheduleExpression::Every { minutes })
            }
            Some(minutes) if minutes > MAX_CUSTOM_INTERVAL_MINUTES => {
                Err(ChimeError::validation(format!(
                    "custom interval must be at most {MAX_CUSTOM_INTERVAL_MINUTES} minutes (one year)"
                )))
            }
            _ => Err(ChimeError::validation(
                "custom frequency requires an interval greater than 0 minutes",
            )),
        },
        Frequency::Once => Ok(ScheduleExpression::Once {
            at: utc(date, time),
        }),
    }
}
