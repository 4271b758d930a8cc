//! Enumerations for TUI state management.

/// Top-level sections of the interface, one visible at a time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Section {
    Home,
    Tasks,
    Focus,
    Dashboard,
}

impl Section {
    /// All sections in navigation order.
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::Tasks,
        Section::Focus,
        Section::Dashboard,
    ];

    /// Tab label for the section header.
    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Tasks => "Tasks",
            Section::Focus => "Focus",
            Section::Dashboard => "Dashboard",
        }
    }

    /// Next section in navigation order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Section::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Section::ALL[(idx + 1) % Section::ALL.len()]
    }

    /// Previous section in navigation order, wrapping around.
    pub fn prev(self) -> Self {
        let idx = Section::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Section::ALL[(idx + Section::ALL.len() - 1) % Section::ALL.len()]
    }
}

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq)]
pub enum AppState {
    Browsing,
    AddTask,
    ConfirmDelete,
}
