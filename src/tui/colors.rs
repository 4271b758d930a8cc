//! Color constants for the terminal user interface.

use ratatui::style::Color;

// Priority accents used on task rows and the dashboard.

/// Used for High priority
pub const HIGH_RED: Color = Color::Rgb(231, 76, 60);
/// Used for Medium priority
pub const MEDIUM_AMBER: Color = Color::Rgb(243, 156, 18);
/// Used for Low priority
pub const LOW_GREEN: Color = Color::Rgb(39, 174, 96);
/// Used for the focus timer display
pub const TIMER_TEAL: Color = Color::Rgb(26, 188, 156);
