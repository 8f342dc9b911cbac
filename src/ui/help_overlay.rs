//! Key binding help, drawn as a modal over the table

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Sections of the help modal: heading, then (keys, action) pairs
const SECTIONS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Date",
        &[
            ("←/h  →/l", "Previous / next day"),
            ("t", "Jump to today"),
            ("r", "Refetch current date"),
        ],
    ),
    (
        "Table",
        &[
            ("1", "Sort by size"),
            ("2", "Sort by closest approach"),
            ("3", "Sort by relative velocity"),
            ("", "Same key again reverses"),
            ("↑/k  ↓/j", "Move row cursor"),
        ],
    ),
    ("App", &[("?", "Toggle this help"), ("q  Esc", "Quit")]),
];

const MODAL_WIDTH: u16 = 46;

fn help_lines() -> Vec<Line<'static>> {
    let key_style = Style::default().fg(Color::Yellow);
    let heading_style = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for (heading, bindings) in SECTIONS {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(heading, heading_style)));
        lines.extend(bindings.iter().map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!(" {:<10}", keys), key_style),
                Span::raw(*action),
            ])
        }));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Esc or ? closes",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn modal_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [modal] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    modal
}

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame) {
    let lines = help_lines();
    // Two rows for the border
    let height = lines.len() as u16 + 2;
    let area = modal_area(frame.area(), MODAL_WIDTH, height);

    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
