//! Dashboard utility functions
//!
//! Colors and text helpers shared by the components

use super::state::Panel;
use crate::consts::cli_consts::messages;
use crate::events::Source;
use crate::lookups::AttendanceBand;
use crate::workers::view::StatusColor;
use ratatui::prelude::{Color, Style};
use ratatui::text::Line;

/// Terminal color for the live status field.
pub fn status_color(color: StatusColor) -> Color {
    match color {
        StatusColor::Affirmative => Color::Rgb(34, 197, 94),
        StatusColor::Alert => Color::Rgb(239, 68, 68),
    }
}

pub fn band_color(band: AttendanceBand) -> Color {
    match band {
        AttendanceBand::Healthy => Color::Rgb(34, 197, 94),
        AttendanceBand::Warning => Color::Rgb(234, 179, 8),
        AttendanceBand::Critical => Color::Rgb(239, 68, 68),
    }
}

/// Get a ratatui color for the source of a log line
pub fn source_color(source: Source) -> Color {
    match source {
        Source::DashboardPoller => Color::Cyan,
        Source::ClassLookup | Source::AttendanceLookup => Color::LightBlue,
        Source::TeacherLookup => Color::Yellow,
        Source::Chat => Color::Magenta,
    }
}

/// Text for a lookup panel that holds no result; `None` once it is ready.
pub fn panel_placeholder<T>(
    panel: &Panel<T>,
    loading: &'static str,
    hint: &'static str,
) -> Option<Line<'static>> {
    match panel {
        Panel::Empty => Some(Line::styled(hint, Style::default().fg(Color::DarkGray))),
        Panel::Loading => Some(Line::styled(loading, Style::default().fg(Color::LightBlue))),
        Panel::Failed => Some(Line::styled(
            messages::FETCH_ERROR,
            Style::default().fg(status_color(StatusColor::Alert)),
        )),
        Panel::Ready(_) => None,
    }
}

/// "MM-DD HH:MM" out of "YYYY-MM-DD HH:MM:SS"; anything else is returned as is.
pub fn format_compact_timestamp(timestamp: &str) -> String {
    let Some((date, time)) = timestamp.split_once(' ') else {
        return timestamp.to_string();
    };
    match (date.get(5..10), time.get(0..5)) {
        (Some(month_day), Some(hour_min)) => format!("{} {}", month_day, hour_min),
        _ => timestamp.to_string(),
    }
}
