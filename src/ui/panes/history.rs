//! History pane: the undo/redo tape, oldest entry first

use super::{clamp_scroll, pane_block};
use crate::history::History;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding},
    Frame,
};
use std::time::Duration;

/// One tape entry as shown on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub label: String,
    /// Time since the first entry of the session
    pub elapsed: Duration,
}

impl HistoryRow {
    pub fn from_history<S: Clone>(history: &History<S>) -> Vec<HistoryRow> {
        let start = history.entries().first().map(|e| e.timestamp);
        history
            .entries()
            .iter()
            .map(|entry| HistoryRow {
                label: entry.label.clone(),
                elapsed: start
                    .and_then(|start| entry.timestamp.duration_since(start).ok())
                    .unwrap_or_default(),
            })
            .collect()
    }
}

pub fn render_history_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[HistoryRow],
    cursor: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" History ", is_focused).padding(Padding::new(1, 0, 0, 0));

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let (marker, style) = if i == cursor {
                (
                    "▶ ",
                    Style::default()
                        .fg(DEFAULT_THEME.border_focused)
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else if i > cursor {
                // redo future
                ("  ", Style::default().fg(DEFAULT_THEME.comment))
            } else {
                ("  ", Style::default().fg(DEFAULT_THEME.fg))
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(
                    format!("{:>3} ", i),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(row.label.clone(), style),
                Span::styled(
                    format!("  +{:.1}s", row.elapsed.as_secs_f32()),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]))
        })
        .collect();

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, items.len(), visible_height);

    let visible_items: Vec<ListItem> = items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_the_tape() {
        let mut history = History::new(0, "Initial");
        history.commit("Pushed 5", 1);
        let rows = HistoryRow::from_history(&history);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Initial", "Pushed 5"]);
        assert_eq!(rows[0].elapsed, Duration::ZERO);
    }
}
