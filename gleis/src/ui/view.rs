//! Display-ready projection of the buffer.
//!
//! Everything here is plain data; the terminal renderer only lays it out.

use chrono::{DateTime, Local};

use crate::buffer::ConnectionBuffer;
use crate::domain::Connection;

/// Shown in the platform column when no platform is known.
pub const PLATFORM_PLACEHOLDER: &str = "-";

/// One row of the departures table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureRow {
    pub line: String,
    pub destination: String,
    /// `HH:MM`, local time.
    pub time: String,
    /// `-` or `+<minutes>`.
    pub delay: String,
    /// Highlight the delay column.
    pub delay_is_positive: bool,
    pub platform: String,
}

impl From<&Connection> for DepartureRow {
    fn from(connection: &Connection) -> Self {
        Self {
            line: connection.line.clone(),
            destination: connection.destination.clone(),
            time: connection.formatted_time(),
            delay: connection.formatted_delay(),
            delay_is_positive: connection.is_delayed(),
            platform: connection
                .platform
                .clone()
                .unwrap_or_else(|| PLATFORM_PLACEHOLDER.to_string()),
        }
    }
}

/// Everything one frame of the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Wall clock, `HH:MM:SS`.
    pub clock: String,
    /// Location name or the "locating" placeholder.
    pub location: String,
    pub rows: Vec<DepartureRow>,
}

impl BoardView {
    /// Build a view from already-filtered connections.
    pub fn new(now: DateTime<Local>, location: impl Into<String>, connections: &[Connection]) -> Self {
        Self {
            clock: now.format("%H:%M:%S").to_string(),
            location: location.into(),
            rows: connections.iter().map(DepartureRow::from).collect(),
        }
    }

    /// Read the buffer as it is right now.
    pub fn capture<T, L>(buffer: &ConnectionBuffer<T, L>, limit: usize) -> Self {
        let now = Local::now();
        Self::new(now, buffer.location_label(), &buffer.displayable_at(&now, limit))
    }

    /// Whether there is anything to show yet.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn connection(platform: Option<&str>, delay: Option<i32>) -> Connection {
        let departure = Local.with_ymd_and_hms(2024, 3, 15, 14, 5, 0).unwrap();
        Connection {
            destination: "Luzern".to_string(),
            departure_time: departure.fixed_offset(),
            line: "IR 15".to_string(),
            platform: platform.map(str::to_string),
            delay,
        }
    }

    #[test]
    fn row_projection() {
        let row = DepartureRow::from(&connection(Some("7"), Some(3)));
        assert_eq!(
            row,
            DepartureRow {
                line: "IR 15".to_string(),
                destination: "Luzern".to_string(),
                time: "14:05".to_string(),
                delay: "+3".to_string(),
                delay_is_positive: true,
                platform: "7".to_string(),
            }
        );
    }

    #[test]
    fn row_placeholders() {
        let row = DepartureRow::from(&connection(None, None));
        assert_eq!(row.delay, "-");
        assert!(!row.delay_is_positive);
        assert_eq!(row.platform, "-");

        let row = DepartureRow::from(&connection(None, Some(0)));
        assert_eq!(row.delay, "-");
        assert!(!row.delay_is_positive);
    }

    #[test]
    fn view_clock_and_rows() {
        let now = Local.with_ymd_and_hms(2024, 3, 15, 13, 59, 7).unwrap();
        let view = BoardView::new(now, "Bern", &[connection(Some("7"), None)]);

        assert_eq!(view.clock, "13:59:07");
        assert_eq!(view.location, "Bern");
        assert_eq!(view.rows.len(), 1);
        assert!(!view.is_empty());
    }

    #[test]
    fn empty_view() {
        let now = Local.with_ymd_and_hms(2024, 3, 15, 13, 59, 7).unwrap();
        assert!(BoardView::new(now, "Locating...", &[]).is_empty());
    }
}
