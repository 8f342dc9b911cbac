//! Near-Earth-object table screen
//!
//! Renders the selected date, the sortable object table (or its loading,
//! error, and empty states) and a status line with data freshness.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{NeoItem, SortKey};

/// Sortable columns in display order, with their header labels
const SORT_COLUMNS: [(SortKey, &str); 3] = [
    (SortKey::SizeMeters, "Size (m)"),
    (SortKey::MissDistanceKm, "Closest Approach (km)"),
    (SortKey::RelativeVelocityKps, "Relative Velocity (km/s)"),
];

/// Formats a number with thousands separators and at most `max_decimals`
/// fraction digits, trimming trailing zeros
///
/// Infinity renders as `∞`.
pub fn format_number(value: f64, max_decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // Ties round away from zero; `{:.*}` alone would round them to even
    let scale = 10f64.powi(max_decimals as i32);
    let rounded = (value.abs() * scale).round() / scale;
    let fixed = format!("{:.*}", max_decimals, rounded);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Renders the dashboard screen
///
/// # Arguments
/// * `frame` - The ratatui Frame to render to
/// * `app` - The application state containing objects and sort settings
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title and date
            Constraint::Min(3),    // Table or state message
            Constraint::Length(1), // Status line
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    if app.loading {
        render_message(frame, chunks[1], &["Loading near-Earth objects..."], Color::Cyan);
    } else if let Some(error) = &app.error {
        render_error(frame, chunks[1], error);
    } else {
        match &app.items {
            Some(items) if !items.is_empty() => render_table(frame, app, chunks[1]),
            Some(_) => render_message(
                frame,
                chunks[1],
                &[
                    "No Near Earth Objects found for this date",
                    "Try selecting a different date",
                ],
                Color::Gray,
            ),
            None => render_message(frame, chunks[1], &["Loading near-Earth objects..."], Color::Cyan),
        }
    }

    render_status(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "NASA Near Earth Objects",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Date: ", Style::default().fg(Color::Gray)),
            Span::styled(
                app.date_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (←/→ change, t today)", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(format!("Error: {}", message))
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );

    frame.render_widget(banner, area);
}

fn render_message(frame: &mut Frame, area: Rect, lines: &[&str], color: Color) {
    let text: Vec<Line> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let style = if i == 0 {
                Style::default().fg(color)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(line.to_string(), style))
        })
        .collect();

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn header_label(app: &App, key: SortKey, label: &str) -> String {
    if app.sort_by == key {
        format!("{} {}", label, app.sort_dir.arrow())
    } else {
        label.to_string()
    }
}

fn numeric_cell(text: String) -> Cell<'static> {
    Cell::from(Line::from(text).alignment(Alignment::Right))
}

fn item_row(item: &NeoItem) -> Row<'static> {
    Row::new(vec![
        Cell::from(item.name.clone()),
        numeric_cell(format_number(item.size_meters, 0)),
        numeric_cell(format_number(item.miss_distance_km, 0)),
        numeric_cell(format_number(item.relative_velocity_kps, 2)),
    ])
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let header_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut header_cells = vec![Cell::from("Object Name")];
    header_cells.extend(SORT_COLUMNS.iter().enumerate().map(|(i, (key, label))| {
        let style = if app.sort_by == *key {
            header_style.fg(Color::Yellow)
        } else {
            header_style
        };
        Cell::from(Line::from(format!("[{}] {}", i + 1, header_label(app, *key, label))).alignment(Alignment::Right))
            .style(style)
    }));
    let header = Row::new(header_cells).style(header_style).bottom_margin(1);

    let rows: Vec<Row> = app.sorted_items().into_iter().map(item_row).collect();

    let widths = [
        Constraint::Min(24),
        Constraint::Length(14),
        Constraint::Length(28),
        Constraint::Length(30),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} objects ", app.item_count())),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = TableState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let freshness = match app.last_refresh {
        Some(at) => format!("Updated {}", at.format("%H:%M:%S")),
        None => "Not loaded yet".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(freshness, Style::default().fg(Color::DarkGray)),
        Span::styled(
            "  1-3 sort  r refresh  ? help  q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
