//! Text formatting shared by the page and the CLI.

use chrono::NaiveDateTime;

use crate::error::{invalid_input_error, Error};

pub const PATH_SEPARATOR: &str = " → ";

/// Accepted shapes of a `datetime-local` input value.
const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

const PAYLOAD_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"Xh Ym"` when there is at least one whole hour, `"Ym"` otherwise.
pub fn format_time(total_hours: f64) -> String {
    let total_hours = if total_hours.is_finite() {
        total_hours.max(0.0)
    } else {
        0.0
    };

    let mut hours = total_hours.floor() as u64;
    let mut minutes = ((total_hours - hours as f64) * 60.0).round() as u64;
    if minutes == 60 {
        hours += 1;
        minutes = 0;
    }

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

pub fn format_distance(distance_km: f64) -> String {
    format!("{} km", distance_km)
}

pub fn format_fuel(fuel_lkr: f64) -> String {
    format!("LKR {}", fuel_lkr)
}

pub fn format_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|p| capitalize(p.as_ref()))
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

pub fn parse_datetime_input(input: &str) -> Result<NaiveDateTime, Error> {
    let input = input.trim();

    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| invalid_input_error(format!("Invalid date/time: {}", input)))
}

pub fn format_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(PAYLOAD_FORMAT).to_string()
}

/// Turns a `datetime-local` value into the `YYYY-MM-DD HH:MM` payload string.
pub fn payload_datetime(input: &str) -> Result<String, Error> {
    Ok(format_datetime(&parse_datetime_input(input)?))
}

#[test]
fn capitalize_first_letter_only() {
    assert_eq!(capitalize("colombo"), "Colombo");
    assert_eq!(capitalize("nuwara eliya"), "Nuwara eliya");
    assert_eq!(capitalize(""), "");
}

#[test]
fn time_with_hours_and_minutes() {
    assert_eq!(format_time(1.5), "1h 30m");
    assert_eq!(format_time(2.0), "2h 0m");
}

#[test]
fn time_below_one_hour() {
    assert_eq!(format_time(0.25), "15m");
    assert_eq!(format_time(0.0), "0m");
}

#[test]
fn rounded_minutes_carry_into_hours() {
    assert_eq!(format_time(1.999), "2h 0m");
    assert_eq!(format_time(0.9999), "1h 0m");
}

#[test]
fn costs_print_in_shortest_form() {
    assert_eq!(format_distance(115.0), "115 km");
    assert_eq!(format_distance(96.25), "96.25 km");
    assert_eq!(format_fuel(3593.75), "LKR 3593.75");
}

#[test]
fn path_is_capitalized_and_arrow_joined() {
    assert_eq!(
        format_path(&["colombo", "kegalle", "kandy"]),
        "Colombo → Kegalle → Kandy"
    );
    assert_eq!(format_path::<&str>(&[]), "");
}

#[test]
fn payload_datetime_is_zero_padded() {
    assert_eq!(payload_datetime("2025-04-14T09:05").unwrap(), "2025-04-14 09:05");
    assert_eq!(payload_datetime("2025-01-02 03:04:59").unwrap(), "2025-01-02 03:04");
}

#[test]
fn payload_datetime_always_matches_pattern() {
    let inputs = [
        "2024-12-31T23:59",
        "2025-01-01T00:00",
        "2025-07-04T07:03",
        "2030-02-28T12:30:15",
    ];

    for input in inputs {
        let formatted = payload_datetime(input).unwrap();
        let bytes = formatted.as_bytes();

        assert_eq!(formatted.len(), 16, "{}", formatted);
        for (i, b) in bytes.iter().enumerate() {
            match i {
                4 | 7 => assert_eq!(*b, b'-'),
                10 => assert_eq!(*b, b' '),
                13 => assert_eq!(*b, b':'),
                _ => assert!(b.is_ascii_digit(), "{}", formatted),
            }
        }
    }
}

#[test]
fn unparsable_datetime_is_invalid_input() {
    let err = payload_datetime("next tuesday").unwrap_err();

    assert!(err.is_user_facing());
    assert_eq!(err.message, "Invalid date/time: next tuesday");
}
