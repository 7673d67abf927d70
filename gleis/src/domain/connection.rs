//! A single upcoming departure.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};

/// An upcoming departure from the board station.
///
/// `departure_time` always carries the offset reported by the upstream
/// API, so comparisons against "now" are unambiguous regardless of the
/// local time zone of the machine running the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Final stop of the service (e.g. "Luzern").
    pub destination: String,
    /// Scheduled departure from the board station.
    pub departure_time: DateTime<FixedOffset>,
    /// Category and line number (e.g. "IR 15", "B 10").
    pub line: String,
    /// Departure platform or stand.
    pub platform: Option<String>,
    /// Delay in minutes, if the operator published one.
    pub delay: Option<i32>,
}

impl Connection {
    /// Departure time as `HH:MM` in the machine's local time zone.
    pub fn formatted_time(&self) -> String {
        self.formatted_time_in(&Local)
    }

    /// Departure time as `HH:MM` in the given time zone.
    pub fn formatted_time_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.departure_time
            .with_timezone(tz)
            .format("%H:%M")
            .to_string()
    }

    /// `"-"` when there is no delay, otherwise `"+<minutes>"`.
    ///
    /// ```
    /// # use chrono::DateTime;
    /// # use gleis::domain::Connection;
    /// let mut conn = Connection {
    ///     destination: "Thun".into(),
    ///     departure_time: DateTime::parse_from_rfc3339("2024-03-15T14:05:00+01:00").unwrap(),
    ///     line: "S 1".into(),
    ///     platform: None,
    ///     delay: Some(0),
    /// };
    /// assert_eq!(conn.formatted_delay(), "-");
    /// conn.delay = Some(3);
    /// assert_eq!(conn.formatted_delay(), "+3");
    /// ```
    pub fn formatted_delay(&self) -> String {
        match self.delay {
            None | Some(0) => "-".to_string(),
            Some(minutes) => format!("+{minutes}"),
        }
    }

    /// Whether the service is running late.
    pub fn is_delayed(&self) -> bool {
        self.delay.is_some_and(|minutes| minutes > 0)
    }

    /// Whether the service leaves strictly after `now`.
    pub fn departs_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.departure_time.with_timezone(&Utc) > now.with_timezone(&Utc)
    }
}
