//! Admin section
//!
//! Live dashboard fields on top, chat with the backend bot below.

use super::super::state::{ChatRole, DashboardState};
use super::super::utils::{format_compact_timestamp, status_color};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

const PLACEHOLDER: &str = "--";

pub fn render_admin(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Fill(1), Constraint::Length(3)])
        .split(area);

    render_live_panel(f, chunks[0], state);
    render_chat_history(f, chunks[1], state);
    render_chat_input(f, chunks[2], state);
}

fn field_line<'a>(label: &'a str, value: &'a str, value_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<20}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, value_style),
    ])
}

fn render_live_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let bold = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let lines = match &state.live {
        Some(fields) => vec![
            field_line("Current class", &fields.current_class, bold),
            field_line(
                "Status",
                &fields.status,
                Style::default()
                    .fg(status_color(fields.status_color))
                    .add_modifier(Modifier::BOLD),
            ),
            field_line("Students present", &fields.students_present, bold),
            field_line("Overall attendance", &fields.attendance_pct, bold),
        ],
        None => ["Current class", "Status", "Students present", "Overall attendance"]
            .into_iter()
            .map(|label| field_line(label, PLACEHOLDER, Style::default().fg(Color::DarkGray)))
            .collect(),
    };

    let refreshed = state
        .last_refresh
        .as_deref()
        .map(format_compact_timestamp)
        .unwrap_or_else(|| "waiting".to_string());
    let title = format!(
        "LIVE DASHBOARD (every {:.1}s, last: {})",
        state.poll_interval.as_secs_f64(),
        refreshed
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chat_history(f: &mut Frame, area: Rect, state: &DashboardState) {
    let visible = area.height.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = state
        .chat_history
        .iter()
        .map(|message| {
            let (who, color) = match message.role {
                ChatRole::User => ("You", Color::LightYellow),
                ChatRole::Bot => ("Bot", Color::LightGreen),
            };
            Line::from(vec![
                Span::styled(format!("{}: ", who), Style::default().fg(color)),
                Span::raw(message.text.as_str()),
            ])
        })
        .collect();
    if state.chat_pending {
        lines.push(Line::styled("Bot is typing...", Style::default().fg(Color::DarkGray)));
    }
    let skip = lines.len().saturating_sub(visible);

    let block = Block::default()
        .title("ASK THE CAMPUS BOT")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let history = Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(history, area);
}

fn render_chat_input(f: &mut Frame, area: Rect, state: &DashboardState) {
    let input = Paragraph::new(format!("> {}", state.chat_input)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(input, area);
}
