//! Status bar rendering with keybindings and state indicators

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// State indicator at the right end of the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Playing,
    End,
    Start,
    Input,
}

impl Badge {
    fn text_and_color(self) -> (&'static str, Color) {
        match self {
            Badge::Playing => (" ▶ PLAYING ", DEFAULT_THEME.secondary),
            Badge::End => (" END ", DEFAULT_THEME.error),
            Badge::Start => (" START ", DEFAULT_THEME.success),
            Badge::Input => (" ⌨ INPUT ", DEFAULT_THEME.secondary),
        }
    }
}

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub message_color: Color,
    /// Left-hand tag, e.g. "Step 3/12" or "Stack 4/10"
    pub tag: String,
    pub badge: Option<Badge>,
    pub hints: &'a [(&'a str, &'a str)],
}

/// Black text on a solid background
fn chip(text: String, bg: Color, bold: bool) -> Span<'static> {
    let mut style = Style::default().bg(bg).fg(Color::Black);
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(text, style)
}

/// Text on the bar's own background
fn plain(text: String, fg: Color) -> Span<'static> {
    Span::styled(
        text,
        Style::default().bg(DEFAULT_THEME.current_line_bg).fg(fg),
    )
}

fn hint_spans(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 4);
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(plain("│ ".into(), DEFAULT_THEME.comment));
        }
        spans.push(chip(format!(" {} ", key), DEFAULT_THEME.comment, false));
        spans.push(plain(format!(" {} ", desc), DEFAULT_THEME.fg));
    }
    spans
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let [left, right] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .areas(area);
    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);

    let left_line = Line::from(vec![
        chip(format!(" {} ", data.tag), DEFAULT_THEME.primary, true),
        plain(" | ".into(), DEFAULT_THEME.comment),
        plain(format!(" {} ", data.message), data.message_color),
    ]);
    frame.render_widget(
        Paragraph::new(left_line)
            .style(bar)
            .alignment(Alignment::Left),
        left,
    );

    let mut right_spans = hint_spans(data.hints);
    if let Some(badge) = data.badge {
        let (text, color) = badge.text_and_color();
        right_spans.push(plain("│".into(), DEFAULT_THEME.comment));
        right_spans.push(chip(text.into(), color, true));
    }
    frame.render_widget(
        Paragraph::new(Line::from(right_spans))
            .style(bar)
            .alignment(Alignment::Right),
        right,
    );
}
