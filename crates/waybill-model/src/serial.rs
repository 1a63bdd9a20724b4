//! Excel serial date conversions.
//!
//! Workbooks store timestamps as fractional days since 1899-12-30. Excel also
//! counts the non-existent 1900-02-29 (serial 60), so serials below 60 sit one
//! day later than the plain epoch arithmetic gives.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const PHANTOM_LEAP_DAY: f64 = 60.0;

fn epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30).map(|date| date.and_time(NaiveTime::MIN))
}

/// Convert a serial to a timestamp, rounded to the millisecond.
///
/// Returns `None` for negative, non-finite or out-of-range serials.
pub fn datetime_from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let adjusted = if serial < PHANTOM_LEAP_DAY {
        serial + 1.0
    } else {
        serial
    };
    let millis = (adjusted * MILLIS_PER_DAY).round();
    if millis > i64::MAX as f64 {
        return None;
    }
    epoch()?.checked_add_signed(TimeDelta::try_milliseconds(millis as i64)?)
}

/// Time of day for the fractional part of a serial (duration-formatted cells).
pub fn time_from_serial(serial: f64) -> Option<NaiveTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let millis = (serial.fract() * MILLIS_PER_DAY).round() as i64;
    let (time, _) = NaiveTime::MIN.overflowing_add_signed(TimeDelta::try_milliseconds(millis)?);
    Some(time)
}

/// Convert a timestamp to its serial.
pub fn serial_from_datetime(value: NaiveDateTime) -> Option<f64> {
    let millis = value.signed_duration_since(epoch()?).num_milliseconds() as f64;
    let serial = millis / MILLIS_PER_DAY;
    if serial < PHANTOM_LEAP_DAY + 1.0 && serial >= 1.0 {
        Some(serial - 1.0)
    } else {
        Some(serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    #[test]
    fn converts_modern_serials() {
        // 2024-01-15 08:30 is serial 45306.354166...
        let serial = 45306.0 + (8.0 * 60.0 + 30.0) / 1440.0;
        assert_eq!(datetime_from_serial(serial), Some(at(2024, 1, 15, 8, 30)));
        let back = serial_from_datetime(at(2024, 1, 15, 8, 30)).unwrap();
        assert!((back - serial).abs() < 1e-9);
    }

    #[test]
    fn honours_the_1900_leap_year_quirk() {
        assert_eq!(datetime_from_serial(1.0), Some(at(1900, 1, 1, 0, 0)));
        assert_eq!(datetime_from_serial(59.0), Some(at(1900, 2, 28, 0, 0)));
        assert_eq!(datetime_from_serial(61.0), Some(at(1900, 3, 1, 0, 0)));
        assert_eq!(serial_from_datetime(at(1900, 1, 1, 0, 0)), Some(1.0));
        assert_eq!(serial_from_datetime(at(1900, 3, 1, 0, 0)), Some(61.0));
    }

    #[test]
    fn rejects_unusable_serials() {
        assert_eq!(datetime_from_serial(-1.0), None);
        assert_eq!(datetime_from_serial(f64::INFINITY), None);
        assert_eq!(datetime_from_serial(f64::MAX), None);
    }

    #[test]
    fn time_of_day_from_fraction() {
        let half_past_six = (18.0 * 60.0 + 30.0) / 1440.0;
        assert_eq!(
            time_from_serial(half_past_six),
            NaiveTime::from_hms_opt(18, 30, 0)
        );
    }
}
