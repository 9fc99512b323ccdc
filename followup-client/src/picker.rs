use chrono::{Duration, NaiveDate};
use thiserror::Error;

/// How far ahead a service visit may be booked.
pub const BOOKING_WINDOW_DAYS: i64 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    FollowUp,
    Booking,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("{date} is before the earliest allowed date {min}")]
    BeforeMin { date: NaiveDate, min: NaiveDate },

    #[error("{date} is after the latest allowed date {max}")]
    AfterMax { date: NaiveDate, max: NaiveDate },

    #[error("No date picker is open")]
    NotOpen,
}

/// An open date picker and the bounds it enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePicker {
    pub field: DateField,
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DatePicker {
    /// Follow-ups cannot be in the past; bookings cannot be more than
    /// [`BOOKING_WINDOW_DAYS`] out.
    pub fn open(field: DateField, today: NaiveDate) -> Self {
        match field {
            DateField::FollowUp => DatePicker {
                field,
                min: Some(today),
                max: None,
            },
            DateField::Booking => DatePicker {
                field,
                min: None,
                max: Some(today + Duration::days(BOOKING_WINDOW_DAYS)),
            },
        }
    }

    pub fn check(&self, date: NaiveDate) -> Result<NaiveDate, PickerError> {
        if let Some(min) = self.min {
            if date < min {
                return Err(PickerError::BeforeMin { date, min });
            }
        }
        if let Some(max) = self.max {
            if date > max {
                return Err(PickerError::AfterMax { date, max });
            }
        }
        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn follow_up_rejects_past_dates() {
        let today = day(2024, 5, 30);
        let picker = DatePicker::open(DateField::FollowUp, today);
        assert_eq!(picker.check(today), Ok(today));
        assert_eq!(picker.check(day(2025, 1, 1)), Ok(day(2025, 1, 1)));
        assert_eq!(
            picker.check(day(2024, 5, 29)),
            Err(PickerError::BeforeMin {
                date: day(2024, 5, 29),
                min: today
            })
        );
    }

    #[test]
    fn booking_allows_up_to_nine_days_ahead() {
        let today = day(2024, 5, 30);
        let picker = DatePicker::open(DateField::Booking, today);
        assert_eq!(picker.check(day(2024, 6, 8)), Ok(day(2024, 6, 8)));
        assert!(matches!(
            picker.check(day(2024, 6, 9)),
            Err(PickerError::AfterMax { .. })
        ));
        assert!(picker.check(day(2024, 5, 1)).is_ok());
    }
}
