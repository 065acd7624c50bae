//! Dashboard state management
//!
//! Contains the dashboard state struct and the small types it is built from

use crate::consts::cli_consts::{MAX_ACTIVITY_LOGS, MAX_CHAT_HISTORY, campus};
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::lookups::{self, AttendanceSummary, ClassLocation, TeacherLocation};
use crate::ui::app::UIConfig;
use crate::workers::view::{DashboardFields, Section};
use std::collections::VecDeque;
use std::time::Duration;
use strum::IntoEnumIterator;

/// Result slot of a one-shot lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    /// Nothing requested yet
    Empty,
    Loading,
    Ready(T),
    Failed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Cursor over a static list; wraps at both ends.
#[derive(Debug, Clone)]
pub struct Picker {
    items: Vec<String>,
    selected: usize,
}

impl Picker {
    pub fn new(items: Vec<String>) -> Self {
        Self { items, selected: 0 }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &str {
        self.items
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }
}

/// Everything the UI shows. Mutated only by the UI loop.
#[derive(Debug)]
pub struct DashboardState {
    /// Backend this session talks to.
    pub environment: Environment,
    pub poll_interval: Duration,
    pub with_background_color: bool,
    /// Visible section
    pub section: Section,

    /// Last rendered dashboard fields, `None` until the first snapshot arrives.
    pub live: Option<DashboardFields>,
    /// Timestamp of the snapshot in `live`.
    pub last_refresh: Option<String>,

    pub class_location: Panel<ClassLocation>,
    pub students: Picker,
    pub attendance: Panel<AttendanceSummary>,
    /// Student the attendance panel belongs to.
    pub attendance_for: Option<String>,

    pub teachers: Picker,
    pub teacher_location: Panel<TeacherLocation>,
    /// Teacher the location panel belongs to.
    pub teacher_for: Option<String>,

    pub chat_history: VecDeque<ChatMessage>,
    pub chat_input: String,
    /// A chat request is waiting for its reply.
    pub chat_pending: bool,

    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Redraw counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(environment: Environment, ui_config: UIConfig) -> Self {
        Self {
            environment,
            poll_interval: ui_config.poll_interval,
            with_background_color: ui_config.with_background_color,
            section: Section::default(),
            live: None,
            last_refresh: None,
            class_location: Panel::Empty,
            students: Picker::new(campus::student_ids()),
            attendance: Panel::Empty,
            attendance_for: None,
            teachers: Picker::new(campus::TEACHERS.iter().map(|t| t.to_string()).collect()),
            teacher_location: Panel::Empty,
            teacher_for: None,
            chat_history: VecDeque::new(),
            chat_input: String::new(),
            chat_pending: false,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    pub fn push_chat(&mut self, role: ChatRole, text: String) {
        if self.chat_history.len() >= MAX_CHAT_HISTORY {
            self.chat_history.pop_front();
        }
        self.chat_history.push_back(ChatMessage { role, text });
    }

    /// The section after (or before) the visible one, wrapping around.
    pub fn neighbour_section(&self, forward: bool) -> Section {
        let sections: Vec<Section> = Section::iter().collect();
        let current = sections
            .iter()
            .position(|s| *s == self.section)
            .unwrap_or_default();
        let len = sections.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        sections[next]
    }

    pub fn begin_class_lookup(&mut self) {
        self.class_location = Panel::Loading;
    }

    /// Marks the attendance panel as loading for the selected student.
    pub fn begin_attendance_lookup(&mut self) -> String {
        let student_id = self.students.selected().to_string();
        self.attendance = Panel::Loading;
        self.attendance_for = Some(student_id.clone());
        student_id
    }

    /// Marks the locator panel as loading for the selected teacher.
    pub fn begin_teacher_lookup(&mut self) -> String {
        let teacher = self.teachers.selected().to_string();
        self.teacher_location = Panel::Loading;
        self.teacher_for = Some(teacher.clone());
        teacher
    }

    /// Moves the typed message into the history.
    ///
    /// Returns the trimmed message to send, or `None` when the input is blank.
    pub fn begin_chat(&mut self) -> Option<String> {
        let message = lookups::prepare_chat_message(&self.chat_input)?.to_string();
        self.chat_input.clear();
        self.push_chat(ChatRole::User, message.clone());
        self.chat_pending = true;
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::dashboard::test_support::state;

    #[test]
    fn test_initial_state() {
        let state = state();
        assert_eq!(state.section, Section::Student);
        assert!(state.live.is_none());
        assert_eq!(state.students.items().len(), 30);
        assert_eq!(state.students.selected(), "S01");
        assert_eq!(state.teachers.items(), ["Prof. Smith", "Dr. Rao"]);
    }

    #[test]
    fn test_picker_wraps() {
        let mut picker = Picker::new(vec!["a".to_string(), "b".to_string()]);
        picker.previous();
        assert_eq!(picker.selected(), "b");
        picker.next();
        assert_eq!(picker.selected(), "a");

        let mut empty = Picker::new(Vec::new());
        empty.next();
        assert_eq!(empty.selected(), "");
    }

    #[test]
    fn test_neighbour_section_wraps() {
        let mut state = state();
        assert_eq!(state.neighbour_section(true), Section::Teacher);
        assert_eq!(state.neighbour_section(false), Section::Admin);
        state.section = Section::Admin;
        assert_eq!(state.neighbour_section(true), Section::Student);
    }

    #[test]
    fn test_begin_chat_trims_and_ignores_blank() {
        let mut state = state();
        state.chat_input = "   ".to_string();
        assert_eq!(state.begin_chat(), None);
        assert!(state.chat_history.is_empty());
        assert!(!state.chat_pending);

        state.chat_input = "  who is absent? ".to_string();
        assert_eq!(state.begin_chat(), Some("who is absent?".to_string()));
        assert!(state.chat_input.is_empty());
        assert!(state.chat_pending);
        assert_eq!(
            state.chat_history.back(),
            Some(&ChatMessage {
                role: ChatRole::User,
                text: "who is absent?".to_string()
            })
        );
    }

    #[test]
    fn test_chat_history_is_capped() {
        let mut state = state();
        for i in 0..(MAX_CHAT_HISTORY + 5) {
            state.push_chat(ChatRole::Bot, i.to_string());
        }
        assert_eq!(state.chat_history.len(), MAX_CHAT_HISTORY);
        assert_eq!(state.chat_history.front().unwrap().text, "5");
    }

    #[test]
    fn test_attendance_lookup_tracks_selected_student() {
        let mut state = state();
        state.students.next();
        state.students.next();
        assert_eq!(state.begin_attendance_lookup(), "S03");
        assert_eq!(state.attendance, Panel::Loading);
        assert_eq!(state.attendance_for.as_deref(), Some("S03"));
    }
}
