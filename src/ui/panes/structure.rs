//! Structure pane: text drawing of the live structure
//!
//! Nodes on the path of the last operation are highlighted, the final node
//! of the path (the match, or the insertion point) in a stronger color.

use super::pane_block;
use crate::structures::bst::Bst;
use crate::structures::graph::Graph;
use crate::structures::linked_list::LinkedList;
use crate::structures::queue::Queue;
use crate::structures::stack::Stack;
use crate::structures::{NodeId, Structure};
use crate::ui::live::LiveStructure;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Padding, Paragraph},
    Frame,
};

pub fn render_structure_pane(
    frame: &mut Frame,
    area: Rect,
    live: &LiveStructure,
    is_focused: bool,
) {
    let path = live.last_path();
    let lines = match live {
        LiveStructure::Stack(ctl) => stack_lines(ctl.live_state()),
        LiveStructure::Queue(ctl) => queue_lines(ctl.live_state()),
        LiveStructure::List(ctl) => list_lines(ctl.live_state(), path),
        LiveStructure::Bst(ctl) => bst_lines(ctl.live_state(), path),
        LiveStructure::Graph(ctl) => graph_lines(ctl.live_state(), path),
    };

    let (len, capacity) = live.len_and_capacity();
    let title = format!(" {} ({}/{}) ", live.kind().title(), len, capacity);
    let block = pane_block(&title, is_focused).padding(Padding::new(1, 1, 1, 0));

    let paragraph = if lines.is_empty() {
        Paragraph::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment))
    } else {
        Paragraph::new(lines)
    };
    frame.render_widget(paragraph.block(block), area);
}

fn node_style(id: NodeId, path: &[NodeId]) -> Style {
    if path.last() == Some(&id) {
        Style::default()
            .fg(DEFAULT_THEME.found)
            .add_modifier(Modifier::BOLD)
    } else if path.contains(&id) {
        Style::default().fg(DEFAULT_THEME.highlighted)
    } else {
        value_style()
    }
}

fn edge_style() -> Style {
    Style::default().fg(DEFAULT_THEME.comment)
}

fn value_style() -> Style {
    Style::default().fg(DEFAULT_THEME.fg)
}

fn marker_style() -> Style {
    Style::default().fg(DEFAULT_THEME.secondary)
}

/// Top of the stack first
fn stack_lines(stack: &Stack) -> Vec<Line<'static>> {
    let items = stack.items();
    if items.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![Line::from(Span::styled("┌───────┐", edge_style()))];
    for (depth, value) in items.iter().rev().enumerate() {
        if depth > 0 {
            lines.push(Line::from(Span::styled("├───────┤", edge_style())));
        }
        let mut spans = vec![
            Span::styled("│", edge_style()),
            Span::styled(format!("{:^7}", value), value_style()),
            Span::styled("│", edge_style()),
        ];
        if depth == 0 {
            spans.push(Span::styled(" ← top", marker_style()));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled("└───────┘", edge_style())));
    lines
}

fn queue_lines(queue: &Queue) -> Vec<Line<'static>> {
    if queue.is_empty() {
        return Vec::new();
    }
    let mut spans = vec![Span::styled("front → ", marker_style())];
    for value in queue.items() {
        spans.push(Span::styled(format!("[{}] ", value), value_style()));
    }
    spans.push(Span::styled("← rear", marker_style()));
    vec![Line::from(spans)]
}

fn list_lines(list: &LinkedList, path: &[NodeId]) -> Vec<Line<'static>> {
    if list.head().is_none() {
        return Vec::new();
    }
    let arrow = if list.is_doubly() { " ⇄ " } else { " → " };
    let mut spans = vec![Span::styled("head", marker_style())];
    for node in list.iter() {
        let label = format!("[{}]", node.value);
        spans.push(Span::styled(arrow, edge_style()));
        spans.push(Span::styled(label, node_style(node.id, path)));
    }
    spans.push(Span::styled(arrow, edge_style()));
    spans.push(Span::styled("null", edge_style()));
    vec![Line::from(spans)]
}

fn bst_lines(tree: &Bst, path: &[NodeId]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(root) = tree.root() {
        lines.push(Line::from(Span::styled(
            root.value.to_string(),
            node_style(root.id, path),
        )));
        bst_children(tree, root.id, String::new(), path, &mut lines);
    }
    lines
}

fn bst_children(
    tree: &Bst,
    id: NodeId,
    prefix: String,
    path: &[NodeId],
    out: &mut Vec<Line<'static>>,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let children: Vec<(&str, NodeId)> = [("L", node.left), ("R", node.right)]
        .into_iter()
        .filter_map(|(side, child)| child.map(|c| (side, c)))
        .collect();
    for (i, (side, child_id)) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let Some(child) = tree.node(*child_id) else {
            continue;
        };
        out.push(Line::from(vec![
            Span::styled(
                format!("{}{}{} ", prefix, if last { "└── " } else { "├── " }, side),
                edge_style(),
            ),
            Span::styled(child.value.to_string(), node_style(child.id, path)),
        ]));
        let next = format!("{}{}", prefix, if last { "    " } else { "│   " });
        bst_children(tree, child.id, next, path, out);
    }
}

fn graph_lines(graph: &Graph, path: &[NodeId]) -> Vec<Line<'static>> {
    graph
        .vertices()
        .map(|(id, value)| {
            let neighbours: Vec<String> = graph.neighbours(id).map(|n| n.to_string()).collect();
            Line::from(vec![
                Span::styled(format!("{:>2}", id), node_style(id, path)),
                Span::styled(format!(" ({:>3})", value), value_style()),
                Span::styled(" ─ ", edge_style()),
                Span::styled(
                    if neighbours.is_empty() {
                        "no edges".to_string()
                    } else {
                        neighbours.join(", ")
                    },
                    edge_style(),
                ),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn stack_is_drawn_top_first() {
        let mut stack = Stack::new(5);
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        let lines = text(&stack_lines(&stack));
        assert!(lines[1].contains('2') && lines[1].ends_with("← top"));
        assert!(lines[3].contains('1'));
    }

    #[test]
    fn bst_draws_sides_with_branches() {
        let mut tree = Bst::new(5);
        for v in [2, 1, 3] {
            tree.insert(v).unwrap();
        }
        let lines = text(&bst_lines(&tree, &[]));
        assert_eq!(lines, vec!["2", "├── L 1", "└── R 3"]);
    }

    #[test]
    fn list_shows_null_terminator() {
        let mut list = LinkedList::singly(5);
        list.insert_tail(7).unwrap();
        let lines = text(&list_lines(&list, &[]));
        assert_eq!(lines, vec!["head → [7] → null"]);
    }
}
