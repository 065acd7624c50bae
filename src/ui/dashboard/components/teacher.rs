//! Teacher section

use super::super::state::{DashboardState, Panel};
use super::super::utils::panel_placeholder;
use crate::consts::cli_consts::messages;
use crate::lookups::TeacherLocation;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap};

pub fn render_teacher(f: &mut Frame, area: Rect, state: &DashboardState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Fill(1)])
        .split(area);

    let items: Vec<ListItem> = state
        .teachers
        .items()
        .iter()
        .map(|name| ListItem::new(name.as_str()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title("TEACHER")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.teachers.index()));
    f.render_stateful_widget(list, columns[0], &mut list_state);

    let lines = match &state.teacher_location {
        Panel::Ready(TeacherLocation::Teaching { room, class }) => vec![
            Line::styled(
                room.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::from(format!("Teaching: {}", class)),
        ],
        Panel::Ready(TeacherLocation::FreePeriod) => vec![Line::styled(
            messages::FREE_PERIOD,
            Style::default().fg(Color::LightYellow),
        )],
        other => panel_placeholder(other, messages::LOCATING, "Press [Enter] to locate")
            .into_iter()
            .collect(),
    };
    let title = match &state.teacher_for {
        Some(teacher) => format!("LOCATION ({})", teacher),
        None => "LOCATION".to_string(),
    };
    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true }),
        columns[1],
    );
}
