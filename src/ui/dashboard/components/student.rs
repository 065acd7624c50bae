//! Student section
//!
//! Roster picker, "where is my class" and the attendance card.

use super::super::state::{DashboardState, Panel};
use super::super::utils::{band_color, panel_placeholder, status_color};
use crate::consts::cli_consts::messages;
use crate::lookups::ClassLocation;
use crate::workers::view::StatusColor;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap};

pub fn render_student(f: &mut Frame, area: Rect, state: &DashboardState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Fill(1)])
        .split(area);
    let cards = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Fill(1)])
        .split(columns[1]);

    render_roster(f, columns[0], state);
    render_class_location(f, cards[0], state);
    render_attendance(f, cards[1], state);
}

fn card(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
}

fn render_roster(f: &mut Frame, area: Rect, state: &DashboardState) {
    let items: Vec<ListItem> = state
        .students
        .items()
        .iter()
        .map(|id| ListItem::new(id.as_str()))
        .collect();
    let list = List::new(items)
        .block(card("STUDENT"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.students.index()));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_class_location(f: &mut Frame, area: Rect, state: &DashboardState) {
    let lines = match &state.class_location {
        Panel::Ready(ClassLocation::InSession {
            class,
            room,
            teacher,
        }) => vec![
            Line::styled(
                class.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::from(format!("Room: {}", room)),
            Line::from(format!("Teacher: {}", teacher)),
        ],
        Panel::Ready(ClassLocation::Cancelled) => vec![Line::styled(
            messages::CLASS_CANCELLED,
            Style::default()
                .fg(status_color(StatusColor::Alert))
                .add_modifier(Modifier::BOLD),
        )],
        other => panel_placeholder(other, messages::LOCATING, "Press [C] to find your class")
            .into_iter()
            .collect(),
    };
    f.render_widget(
        Paragraph::new(lines)
            .block(card("WHERE IS MY CLASS"))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_attendance(f: &mut Frame, area: Rect, state: &DashboardState) {
    let title = match &state.attendance_for {
        Some(student_id) => format!("ATTENDANCE ({})", student_id),
        None => "ATTENDANCE".to_string(),
    };
    let lines = match &state.attendance {
        Panel::Ready(summary) => vec![
            Line::from(Span::styled(
                summary.pct_label(),
                Style::default()
                    .fg(band_color(summary.band))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(summary.attended_label()),
        ],
        other => panel_placeholder(other, messages::LOADING, "Press [A] to check attendance")
            .into_iter()
            .collect(),
    };
    f.render_widget(
        Paragraph::new(lines)
            .block(card(&title))
            .wrap(Wrap { trim: true }),
        area,
    );
}
