use crate::application::{App, AppMode};
use crate::domain::{CellPos, PaintState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::str::FromStr;

struct UiAreas {
    header: Rect,
    grid: Rect,
    palette: Rect,
    status: Rect,
}

fn layout_areas(area: Rect) -> UiAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    UiAreas {
        header: chunks[0],
        grid: chunks[1],
        palette: chunks[2],
        status: chunks[3],
    }
}

fn grid_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title("Kleurplaat")
}

/// Screen area the grid cells are drawn into for a terminal of size `area`.
///
/// Resize handling and hit-testing use the same rectangle the renderer
/// draws into.
pub fn grid_container(area: Rect) -> Rect {
    grid_block().inner(layout_areas(area).grid)
}

pub fn render_ui(f: &mut Frame, app: &App) {
    let areas = layout_areas(f.area());

    render_header(f, app, areas.header);
    render_grid(f, app, areas.grid);
    render_palette(f, app, areas.palette);
    render_status_bar(f, app, areas.status);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

/// Parses any CSS-ish color string ratatui understands (`#rrggbb`, names,
/// indices). Strings it does not understand yield `None`.
pub fn parse_color(color: &str) -> Option<Color> {
    Color::from_str(color.trim()).ok()
}

/// One cell's worth of a single terminal line.
fn cell_span(color: &str, width: usize) -> Span<'static> {
    match parse_color(color) {
        Some(bg) => Span::styled(" ".repeat(width), Style::default().bg(bg)),
        None => Span::styled("?".repeat(width), Style::default().fg(Color::Red)),
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let state = match app.grid.paint_state() {
        PaintState::Idle => "idle",
        PaintState::Painting => "painting",
    };
    let color = app.grid.current_color();

    let header = Line::from(vec![
        Span::styled(
            format!("kleurplaat - Terminal Coloring Grid | {}x{} | Color: ", app.grid.rows(), app.grid.cols()),
            Style::default().fg(Color::Cyan),
        ),
        cell_span(color, 2),
        Span::styled(format!(" {} | {}", color, state), Style::default().fg(Color::Cyan)),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn render_grid(f: &mut Frame, app: &App, area: Rect) {
    let block = grid_block();
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cell_size = app.grid.cell_size();
    let cell_width = cell_size.width as usize;
    let visible_cols = app.grid.cols().min(inner.width as usize / cell_width);
    let visible_rows = app.grid.rows().min(inner.height as usize / cell_size.height as usize);

    let mut lines = Vec::with_capacity(visible_rows * cell_size.height as usize);
    for row in 0..visible_rows {
        let spans: Vec<Span> = (0..visible_cols)
            .map(|col| cell_span(app.grid.color_at(CellPos::new(row, col)), cell_width))
            .collect();
        for _ in 0..cell_size.height {
            lines.push(Line::from(spans.clone()));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_palette(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for (index, color) in app.palette.iter().take(9).enumerate() {
        let label_style = if color == app.grid.current_color() {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().fg(Color::Yellow)
        };
        spans.push(Span::styled(format!(" {}:", index + 1), label_style));
        spans.push(cell_span(color, 2));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                let filename = app.filename.as_deref().unwrap_or("unsaved");
                format!("File: {} | drag: paint | 1-9/c: color | r: reset | e: export | i: import | ?: help | q: quit", filename)
            }
        }
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::ColorInput => format!("Color: {} (Enter to apply, Esc to cancel)", app.input),
        AppMode::ExportAs => format!("Export as: {} (Enter to export, Esc to cancel)", app.input),
        AppMode::ImportFile => format!("Import from: {} (Enter to import, Esc to cancel)", app.input),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::ColorInput => Style::default().fg(Color::Green),
            AppMode::ExportAs => Style::default().fg(Color::Magenta),
            AppMode::ImportFile => Style::default().fg(Color::Yellow),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("kleurplaat Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"KLEURPLAAT - TERMINAL COLORING GRID

=== PAINTING ===
Left click      Paint the cell under the pointer
Left drag       Paint every cell the pointer passes over
Release         Ends the stroke, also outside the grid
Other buttons   Ignored

=== COLORS ===
1-9             Pick a palette color
c               Type any color: #rrggbb, a name (red, blue) or an index
                Unknown colors are stored as typed and drawn as ?

=== GRID ===
r               Reset: every cell back to white
Resize          The grid follows the terminal size and keeps painted
                cells that still fit

=== FILES ===
e / Ctrl+E      Export the grid to JSON (default kleurplaat.json)
i / Ctrl+O      Import a JSON color map
                Format: {"row,col": "color", ...}
                Import replaces the grid but keeps its current size

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

q               Quit application"#
}
