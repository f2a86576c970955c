//! Info pane: what is running and what the current step did

use super::pane_block;
use crate::playback::Mode;
use crate::snapshot::{Flag, Metrics, TraceOutcome};
use crate::trace::AlgorithmId;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use std::time::Duration;
use strum::IntoEnumIterator;

/// Data needed to render the info pane
pub struct InfoRenderData<'a> {
    pub algorithm: AlgorithmId,
    pub step_label: &'a str,
    pub position: usize,
    pub total_steps: usize,
    pub metrics: Metrics,
    pub mode: Mode,
    pub speed: Duration,
    pub target: Option<i32>,
    pub outcome: Option<TraceOutcome>,
}

pub fn render_info_pane(frame: &mut Frame, area: Rect, data: InfoRenderData) {
    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default().fg(DEFAULT_THEME.fg);
    let algorithm = data.algorithm;
    let complexity = algorithm.complexity();

    let mut title = vec![Span::styled(
        algorithm.title(),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    )];
    if !algorithm.is_search() {
        let stability = if algorithm.is_stable() {
            " (stable)"
        } else {
            " (unstable)"
        };
        title.push(Span::styled(stability, label));
    }

    let mut lines = vec![
        Line::from(title),
        Line::from(Span::styled(algorithm.description(), label)),
        Line::default(),
        Line::from(vec![
            Span::styled("Best ", label),
            Span::styled(complexity.best, value),
            Span::styled("  Avg ", label),
            Span::styled(complexity.average, value),
            Span::styled("  Worst ", label),
            Span::styled(complexity.worst, value),
            Span::styled("  Space ", label),
            Span::styled(complexity.space, value),
        ]),
        Line::default(),
        Line::from(vec![
            Span::styled(
                format!("Step {}/{}  ", data.position, data.total_steps),
                label,
            ),
            Span::styled(
                data.step_label,
                Style::default()
                    .fg(DEFAULT_THEME.border_focused)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Comparisons ", label),
            Span::styled(data.metrics.comparisons.to_string(), value),
            Span::styled("  Swaps ", label),
            Span::styled(data.metrics.swaps.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Speed ", label),
            Span::styled(format!("{} ms/step", data.speed.as_millis()), value),
            Span::styled("  State ", label),
            Span::styled(format!("{:?}", data.mode), value),
        ]),
    ];

    if let Some(target) = data.target {
        lines.push(Line::from(vec![
            Span::styled("Target ", label),
            Span::styled(target.to_string(), value),
        ]));
    }

    // the outcome is only revealed once playback reaches the last step
    if let Some(outcome) = data.outcome.filter(|_| data.position >= data.total_steps) {
        let (text, color) = match outcome {
            TraceOutcome::Sorted => ("Sorted".to_string(), DEFAULT_THEME.sorted),
            TraceOutcome::Found { index } => {
                (format!("Found at index {}", index), DEFAULT_THEME.found)
            }
            TraceOutcome::NotFound => ("Not found".to_string(), DEFAULT_THEME.error),
        };
        lines.push(Line::from(vec![
            Span::styled("Result ", label),
            Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    lines.push(Line::default());
    lines.push(legend());

    let paragraph = Paragraph::new(lines)
        .block(pane_block(" Info ", false))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn legend() -> Line<'static> {
    let spans = Flag::iter().flat_map(|flag| {
        [
            Span::styled("■ ", Style::default().fg(DEFAULT_THEME.color_of(flag))),
            Span::styled(
                format!("{}  ", flag),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ]
    });
    Line::from(spans.collect::<Vec<_>>())
}
