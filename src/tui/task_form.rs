//! Add-task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` structure holding the five creation
//! fields, field ordering for keyboard navigation, and submission parsing.

use chrono::NaiveDate;

use crate::fields::Priority;
use crate::store::parse_deadline_input;
use crate::tui::input::InputField;

/// Order constants for the form fields.
pub const TITLE_FIELD: usize = 0;
pub const SUBJECT_FIELD: usize = 1;
pub const PRIORITY_FIELD: usize = 2;
pub const DEADLINE_FIELD: usize = 3;
pub const DURATION_FIELD: usize = 4;
pub const FIELD_COUNT: usize = 5;

/// Form state for creating a task.
pub struct TaskForm {
    pub title: InputField,
    pub subject: InputField,
    pub deadline: InputField,
    pub duration: InputField,
    pub priority: usize,
    pub priorities: Vec<Priority>,
    pub current_field: usize,
}

impl TaskForm {
    pub fn new() -> Self {
        TaskForm {
            title: InputField::new(),
            subject: InputField::new(),
            deadline: InputField::new(),
            duration: InputField::new(),
            priority: 0,
            priorities: vec![Priority::High, Priority::Medium, Priority::Low],
            current_field: TITLE_FIELD,
        }
    }

    pub fn selected_priority(&self) -> Priority {
        self.priorities[self.priority % self.priorities.len()]
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    pub fn cycle_priority(&mut self, forward: bool) {
        let len = self.priorities.len();
        self.priority = if forward {
            (self.priority + 1) % len
        } else {
            (self.priority + len - 1) % len
        };
    }

    /// Route a typed character to the active text field. The priority field
    /// is a selector and ignores typing.
    pub fn handle_char(&mut self, c: char) {
        match self.current_field {
            TITLE_FIELD => self.title.push_char(c),
            SUBJECT_FIELD => self.subject.push_char(c),
            DEADLINE_FIELD => self.deadline.push_char(c),
            DURATION_FIELD => self.duration.push_char(c),
            _ => {}
        }
    }

    pub fn handle_backspace(&mut self) {
        match self.current_field {
            TITLE_FIELD => self.title.pop_char(),
            SUBJECT_FIELD => self.subject.pop_char(),
            DEADLINE_FIELD => self.deadline.pop_char(),
            DURATION_FIELD => self.duration.pop_char(),
            _ => {}
        }
    }

    /// Parse the deadline field.
    pub fn parsed_deadline(&self) -> Option<NaiveDate> {
        parse_deadline_input(self.deadline.value())
    }

    /// Reset all fields for the next task.
    pub fn clear(&mut self) {
        self.title.clear();
        self.subject.clear();
        self.deadline.clear();
        self.duration.clear();
        self.priority = 0;
        self.current_field = TITLE_FIELD;
    }
}
