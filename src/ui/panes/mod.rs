//! TUI pane rendering modules
//!
//! Every pane is a stateless render function over borrowed data.
//!
//! # Pane Modules
//!
//! - [`array`]: bar chart of the current snapshot, colored by element flags
//! - [`info`]: algorithm description, complexity, step label and counters
//! - [`structure`]: drawing of the live data structure
//! - [`history`]: undo/redo tape with the current entry marked
//! - [`status`]: status bar with keybindings and playback state

pub mod array;
pub mod history;
pub mod info;
pub mod status;
pub mod structure;

pub use array::render_array_pane;
pub use history::{render_history_pane, HistoryRow};
pub use info::{render_info_pane, InfoRenderData};
pub use status::{render_status_bar, Badge, StatusRenderData};
pub use structure::render_structure_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus-dependent border color
fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp `offset` so a list of `total` rows fills `visible` rows
fn clamp_scroll(offset: &mut usize, total: usize, visible: usize) {
    if total > visible {
        *offset = (*offset).min(total - visible);
    } else {
        *offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut offset = 50;
        clamp_scroll(&mut offset, 20, 5);
        assert_eq!(offset, 15);

        clamp_scroll(&mut offset, 3, 5);
        assert_eq!(offset, 0);
    }
}
