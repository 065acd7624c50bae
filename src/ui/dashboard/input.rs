//! Key handling
//!
//! Maps key presses to state changes and to the commands the app loop runs.

use super::state::DashboardState;
use crate::workers::lookup::LookupRequest;
use crate::workers::view::Section;
use crossterm::event::{KeyCode, KeyEvent};

/// Work the app loop has to do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Show(Section),
    Lookup(LookupRequest),
}

impl DashboardState {
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc => return Some(Command::Quit),
            KeyCode::Tab => return Some(self.show(self.neighbour_section(true))),
            KeyCode::BackTab => return Some(self.show(self.neighbour_section(false))),
            _ => {}
        }

        // The admin section owns the keyboard for the chat input
        if self.section == Section::Admin {
            return self.handle_chat_key(key.code);
        }

        match key.code {
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('1') => Some(self.show(Section::Student)),
            KeyCode::Char('2') => Some(self.show(Section::Teacher)),
            KeyCode::Char('3') => Some(self.show(Section::Admin)),
            _ if self.section == Section::Student => self.handle_student_key(key.code),
            _ => self.handle_teacher_key(key.code),
        }
    }

    fn show(&mut self, section: Section) -> Command {
        self.section = section;
        Command::Show(section)
    }

    fn handle_student_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Up => self.students.previous(),
            KeyCode::Down => self.students.next(),
            KeyCode::Char('c') => {
                self.begin_class_lookup();
                return Some(Command::Lookup(LookupRequest::ClassLocation));
            }
            KeyCode::Char('a') | KeyCode::Enter => {
                let student_id = self.begin_attendance_lookup();
                return Some(Command::Lookup(LookupRequest::Attendance { student_id }));
            }
            _ => {}
        }
        None
    }

    fn handle_teacher_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Up => self.teachers.previous(),
            KeyCode::Down => self.teachers.next(),
            KeyCode::Char('l') | KeyCode::Enter => {
                let teacher = self.begin_teacher_lookup();
                return Some(Command::Lookup(LookupRequest::TeacherLocation { teacher }));
            }
            _ => {}
        }
        None
    }

    fn handle_chat_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Char(c) => self.chat_input.push(c),
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Enter => {
                return self
                    .begin_chat()
                    .map(|message| Command::Lookup(LookupRequest::Chat { message }));
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::dashboard::state::Panel;
    use crate::ui::dashboard::test_support::state;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut DashboardState, text: &str) {
        for c in text.chars() {
            assert_eq!(state.handle_key(press(KeyCode::Char(c))), None);
        }
    }

    #[test]
    fn test_section_switching() {
        let mut state = state();
        assert_eq!(
            state.handle_key(press(KeyCode::Char('3'))),
            Some(Command::Show(Section::Admin))
        );
        assert_eq!(state.section, Section::Admin);

        // Digits are chat input inside the admin section
        assert_eq!(state.handle_key(press(KeyCode::Char('1'))), None);
        assert_eq!(state.chat_input, "1");

        assert_eq!(
            state.handle_key(press(KeyCode::Tab)),
            Some(Command::Show(Section::Student))
        );
        assert_eq!(
            state.handle_key(press(KeyCode::BackTab)),
            Some(Command::Show(Section::Admin))
        );
    }

    #[test]
    fn test_quit_keys() {
        let mut state = state();
        assert_eq!(state.handle_key(press(KeyCode::Char('q'))), Some(Command::Quit));
        state.section = Section::Admin;
        assert_eq!(state.handle_key(press(KeyCode::Char('q'))), None);
        assert_eq!(state.handle_key(press(KeyCode::Esc)), Some(Command::Quit));
    }

    #[test]
    fn test_student_lookups() {
        let mut state = state();
        state.handle_key(press(KeyCode::Down));
        state.handle_key(press(KeyCode::Down));
        state.handle_key(press(KeyCode::Up));
        assert_eq!(
            state.handle_key(press(KeyCode::Enter)),
            Some(Command::Lookup(LookupRequest::Attendance {
                student_id: "S02".to_string()
            }))
        );
        assert_eq!(state.attendance, Panel::Loading);

        assert_eq!(
            state.handle_key(press(KeyCode::Char('c'))),
            Some(Command::Lookup(LookupRequest::ClassLocation))
        );
        assert_eq!(state.class_location, Panel::Loading);
    }

    #[test]
    fn test_teacher_lookup() {
        let mut state = state();
        state.handle_key(press(KeyCode::Char('2')));
        state.handle_key(press(KeyCode::Up));
        assert_eq!(
            state.handle_key(press(KeyCode::Char('l'))),
            Some(Command::Lookup(LookupRequest::TeacherLocation {
                teacher: "Dr. Rao".to_string()
            }))
        );
        assert_eq!(state.teacher_location, Panel::Loading);
    }

    #[test]
    fn test_chat_typing_and_send() {
        let mut state = state();
        state.section = Section::Admin;
        assert_eq!(state.handle_key(press(KeyCode::Enter)), None, "blank input");

        type_text(&mut state, " hi bott");
        state.handle_key(press(KeyCode::Backspace));
        assert_eq!(
            state.handle_key(press(KeyCode::Enter)),
            Some(Command::Lookup(LookupRequest::Chat {
                message: "hi bot".to_string()
            }))
        );
        assert!(state.chat_input.is_empty());
    }
}
