//! Spreadsheet serial dates.
//!
//! A serial is the (fractional) number of days elapsed since 1899-12-30, the
//! epoch every mainstream spreadsheet uses for its 1900 date system.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// 1899-12-30 as days from 0001-01-01 (CE day 1).
const EPOCH_DAYS_FROM_CE: i64 = 693_594;
const MS_PER_DAY: i64 = 86_400_000;

/// Encodes a calendar day as a serial, reading the day at noon so that a
/// whole day always lands on `N + 0.5` and never straddles a day boundary.
pub fn to_serial(date: NaiveDate) -> f64 {
    let days = i64::from(date.num_days_from_ce()) - EPOCH_DAYS_FROM_CE;
    days as f64 + 0.5
}

/// Parses a `YYYY-MM-DD` form value and encodes it. Empty or invalid input
/// yields `None`, which is stored as an empty cell.
pub fn parse_to_serial(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().map(to_serial)
}

/// Decodes a serial into the wall-clock datetime a spreadsheet viewer shows.
pub fn from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }

    let total_ms = (serial * MS_PER_DAY as f64).round();
    // Anything past this is far outside chrono's supported range anyway.
    if total_ms.abs() > 1.0e17 {
        return None;
    }
    let total_ms = total_ms as i64;

    let days = total_ms.div_euclid(MS_PER_DAY);
    let ms_of_day = total_ms.rem_euclid(MS_PER_DAY);

    let ce_day = i32::try_from(EPOCH_DAYS_FROM_CE + days).ok()?;
    let date = NaiveDate::from_num_days_from_ce_opt(ce_day)?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(
        (ms_of_day / 1000) as u32,
        ((ms_of_day % 1000) * 1_000_000) as u32,
    )?;

    Some(date.and_time(time))
}

pub fn from_serial_date(serial: f64) -> Option<NaiveDate> {
    from_serial(serial).map(|dt| dt.date())
}
