//! Booking rule machine
//!
//! Turns raw slot-picker state into either a canonical
//! [`ReservationRequest`] or a tagged [`Rejection`]. Checks run in a fixed
//! order so user-facing messages stay stable; the first failing rule wins.
//! A rejection is resolved entirely client-side and never reaches the
//! network.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::client::ReservationRequest;
use crate::models::RestaurantTable;
use crate::schedule::{self, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, TimeWindow};

/// Raw slot-picker state, before any rule has run.
#[derive(Debug, Clone, Default)]
pub struct BookingInput {
    /// Start value as typed or picked; `None` while untouched.
    pub start: Option<String>,
    /// Requested duration in minutes.
    pub duration_minutes: i64,
    /// Selected table number; `None` while nothing is selected.
    pub table_number: Option<i32>,
}

/// Why a booking request was refused locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("start time is missing or not a valid date-time")]
    MissingStart,

    #[error("start time lies in the past")]
    PastStart,

    #[error("duration must be between 30 and 300 minutes")]
    DurationOutOfBounds,

    #[error("no bookable slot remains before closing on that day")]
    PastClosing,

    #[error("slot would run past closing; at most {max_minutes} minutes fit")]
    ExceedsClosingCutoff { max_minutes: i64 },

    #[error("no table selected")]
    TableNotSelected,

    #[error("selected table is no longer available")]
    TableNoLongerAvailable,
}

/// Evaluate every booking rule against the latest availability result.
///
/// Deterministic and idempotent: identical inputs and an identical `tables`
/// slice yield identical outcomes. On success the request carries
/// `end = start + duration` exactly.
pub fn validate(
    input: &BookingInput,
    tables: &[RestaurantTable],
    now: NaiveDateTime,
) -> Result<ReservationRequest, Rejection> {
    let raw = input
        .start
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(Rejection::MissingStart)?;
    let start = schedule::parse_local(raw).map_err(|_| Rejection::MissingStart)?;

    if schedule::is_past(start, now) {
        return Err(Rejection::PastStart);
    }

    let minutes = input.duration_minutes;
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        return Err(Rejection::DurationOutOfBounds);
    }

    let max_minutes = schedule::max_duration_from(start);
    if max_minutes < MIN_DURATION_MINUTES {
        return Err(Rejection::PastClosing);
    }
    if minutes > max_minutes {
        return Err(Rejection::ExceedsClosingCutoff { max_minutes });
    }

    let table_number = input.table_number.ok_or(Rejection::TableNotSelected)?;
    if !tables.iter().any(|t| t.table_number == table_number) {
        return Err(Rejection::TableNoLongerAvailable);
    }

    let window =
        TimeWindow::from_duration(start, minutes).map_err(|_| Rejection::DurationOutOfBounds)?;
    debug_assert!(window.within_closing());

    Ok(ReservationRequest {
        table_number,
        start_time: window.start(),
        end_time: window.end(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::parse_local;

    fn dt(value: &str) -> NaiveDateTime {
        parse_local(value).expect("test timestamp must parse")
    }

    fn table(number: i32) -> RestaurantTable {
        RestaurantTable {
            id: number as i64,
            table_number: number,
            number_of_seats: 4,
        }
    }

    fn input(start: &str, minutes: i64, table_number: Option<i32>) -> BookingInput {
        BookingInput {
            start: Some(start.to_string()),
            duration_minutes: minutes,
            table_number,
        }
    }

    const NOW: &str = "2025-10-30T12:00:00";

    #[test]
    fn test_accepts_valid_booking() {
        let tables = [table(1), table(3)];
        let request = validate(&input("2025-10-30T18:00:00", 120, Some(3)), &tables, dt(NOW))
            .expect("all rules pass");
        assert_eq!(request.table_number, 3);
        assert_eq!(request.start_time, dt("2025-10-30T18:00:00"));
        assert_eq!(request.end_time, dt("2025-10-30T20:00:00"));
    }

    #[test]
    fn test_missing_start_wins_over_everything() {
        let empty = BookingInput {
            start: None,
            duration_minutes: 0,
            table_number: None,
        };
        assert_eq!(validate(&empty, &[], dt(NOW)), Err(Rejection::MissingStart));

        let blank = input("   ", 120, Some(3));
        assert_eq!(validate(&blank, &[], dt(NOW)), Err(Rejection::MissingStart));

        let garbage = input("next friday", 120, Some(3));
        assert_eq!(validate(&garbage, &[], dt(NOW)), Err(Rejection::MissingStart));
    }

    #[test]
    fn test_past_start() {
        let tables = [table(3)];
        assert_eq!(
            validate(&input("2025-10-30T11:00:00", 120, Some(3)), &tables, dt(NOW)),
            Err(Rejection::PastStart)
        );
    }

    #[test]
    fn test_duration_bounds_checked_before_closing_rules() {
        let tables = [table(3)];
        assert_eq!(
            validate(&input("2025-10-30T21:45:00", 20, Some(3)), &tables, dt(NOW)),
            Err(Rejection::DurationOutOfBounds)
        );
        assert_eq!(
            validate(&input("2025-10-30T18:00:00", 301, Some(3)), &tables, dt(NOW)),
            Err(Rejection::DurationOutOfBounds)
        );
    }

    #[test]
    fn test_past_closing_when_no_valid_duration_remains() {
        // 21:45 leaves 15 minutes until 22:00, below the 30-minute floor.
        let tables = [table(3)];
        assert_eq!(
            validate(&input("2025-10-30T21:45:00", 30, Some(3)), &tables, dt(NOW)),
            Err(Rejection::PastClosing)
        );
    }

    #[test]
    fn test_cutoff_carries_the_computed_cap() {
        // 20:00 leaves 120 minutes; asking for 180 names the cap.
        let tables = [table(3)];
        assert_eq!(
            validate(&input("2025-10-30T20:00:00", 180, Some(3)), &tables, dt(NOW)),
            Err(Rejection::ExceedsClosingCutoff { max_minutes: 120 })
        );
    }

    #[test]
    fn test_table_rules_run_last() {
        let tables = [table(1)];
        assert_eq!(
            validate(&input("2025-10-30T18:00:00", 120, None), &tables, dt(NOW)),
            Err(Rejection::TableNotSelected)
        );
        assert_eq!(
            validate(&input("2025-10-30T18:00:00", 120, Some(3)), &tables, dt(NOW)),
            Err(Rejection::TableNoLongerAvailable)
        );
    }

    #[test]
    fn test_validate_is_idempotent() {
        let tables = [table(3)];
        let picked = input("2025-10-30T18:00:00", 90, Some(3));
        let first = validate(&picked, &tables, dt(NOW));
        let second = validate(&picked, &tables, dt(NOW));
        assert_eq!(first, second);
    }

    #[test]
    fn test_slot_ending_exactly_at_closing_is_accepted() {
        let tables = [table(3)];
        let request = validate(&input("2025-10-30T20:00:00", 120, Some(3)), &tables, dt(NOW))
            .expect("ends exactly at 22:00");
        assert_eq!(request.end_time, dt("2025-10-30T22:00:00"));
    }
}
