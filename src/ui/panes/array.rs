//! Array pane: one bar per element of the current snapshot

use super::pane_block;
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};

const MAX_BAR_WIDTH: u16 = 7;
const BAR_GAP: u16 = 1;

pub fn render_array_pane(frame: &mut Frame, area: Rect, snapshot: Option<&Snapshot>, title: &str) {
    let block = pane_block(title, true);

    let Some(snapshot) = snapshot.filter(|s| !s.elements.is_empty()) else {
        let paragraph = Paragraph::new("(empty array)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let bars: Vec<Bar> = snapshot
        .elements
        .iter()
        .enumerate()
        .map(|(i, element)| {
            let color = DEFAULT_THEME.flag_color(element.flags);
            Bar::default()
                .value(element.value.max(0) as u64)
                .text_value(element.value.to_string())
                .label(Line::from(i.to_string()))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .bg(color)
                        .fg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let max = snapshot
        .elements
        .iter()
        .map(|e| e.value.max(0) as u64)
        .max()
        .unwrap_or(0)
        .max(1);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area.width.saturating_sub(2), bars.len()))
        .bar_gap(BAR_GAP)
        .max(max);
    frame.render_widget(chart, area);
}

/// Widest bar that still fits `count` bars into `width` columns
fn bar_width(width: u16, count: usize) -> u16 {
    let count = u16::try_from(count.max(1)).unwrap_or(u16::MAX);
    let gaps = BAR_GAP.saturating_mul(count - 1);
    (width.saturating_sub(gaps) / count).clamp(1, MAX_BAR_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_width_fits_and_caps() {
        assert_eq!(bar_width(100, 4), MAX_BAR_WIDTH);
        assert_eq!(bar_width(39, 10), 3);
        assert_eq!(bar_width(5, 20), 1);
    }
}
