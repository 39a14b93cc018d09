/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

/// Format a timestamp as "HH:MM" in its own time zone
/// Example: 2024-03-15T14:02:26Z -> "14:02"
pub fn format_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%H:%M").to_string()
}

/// Message bubble time in the browser's local zone
pub fn format_local_time(at: &DateTime<Utc>) -> String {
    format_time(&at.with_timezone(&Local))
}
