//! Dashboard footer component
//!
//! Renders the key hints of the visible section

use super::super::state::DashboardState;
use crate::workers::view::Section;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn footer_text(section: Section) -> &'static str {
    match section {
        Section::Student => "[Up/Down] Student | [A] Attendance | [C] My class | [Tab] Switch | [Q] Quit",
        Section::Teacher => "[Up/Down] Teacher | [Enter] Locate | [Tab] Switch | [Q] Quit",
        Section::Admin => "[Enter] Send | [Tab] Switch | [Esc] Quit",
    }
}

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer = Paragraph::new(footer_text(state.section))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
