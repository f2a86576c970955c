use crate::mutation::Severity;
use crate::snapshot::{Flag, FlagSet};
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub bar: Color,
    pub comparing: Color,
    pub swapping: Color,
    pub sorted: Color,
    pub pivot: Color,
    pub searching: Color,
    pub found: Color,
    pub highlighted: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    bar: Color::Rgb(137, 180, 250),
    comparing: Color::Rgb(249, 226, 175),   // Yellow
    swapping: Color::Rgb(243, 139, 168),    // Red
    sorted: Color::Rgb(166, 227, 161),      // Green
    pivot: Color::Rgb(203, 166, 247),       // Mauve
    searching: Color::Rgb(250, 179, 135),   // Orange
    found: Color::Rgb(148, 226, 213),       // Teal
    highlighted: Color::Rgb(245, 194, 231), // Pink
};

impl Theme {
    /// Bar color for an element, transient flags win over persistent ones
    pub fn flag_color(&self, flags: FlagSet) -> Color {
        const PRIORITY: [Flag; 7] = [
            Flag::Swapping,
            Flag::Comparing,
            Flag::Found,
            Flag::Searching,
            Flag::Pivot,
            Flag::Highlighted,
            Flag::Sorted,
        ];
        PRIORITY
            .iter()
            .find(|&&flag| flags.contains(flag))
            .map_or(self.bar, |&flag| self.color_of(flag))
    }

    pub fn color_of(&self, flag: Flag) -> Color {
        match flag {
            Flag::Comparing => self.comparing,
            Flag::Swapping => self.swapping,
            Flag::Sorted => self.sorted,
            Flag::Pivot => self.pivot,
            Flag::Searching => self.searching,
            Flag::Found => self.found,
            Flag::Highlighted => self.highlighted,
        }
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Success => self.success,
            Severity::Info => self.fg,
            Severity::Error => self.error,
        }
    }
}
