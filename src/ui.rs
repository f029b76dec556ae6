//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - The wrapped alignment grid, top sequence above bottom sequence
//! - Selection highlight while dragging
//! - Status bar with the copy hint, copied notice and scroll position

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::grid::GridLine;
use crate::model::AppState;
use crate::selection::GridPos;

/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;
/// Minimum height for the alignment panel (borders included).
const MIN_PANEL_HEIGHT: u16 = 3;

pub const COPY_HINT: &str = "Select part of the sequence to copy it";
pub const COPIED_NOTICE: &str = "Sequence copied!";

/// Splits the screen into the alignment block and the status bar.
fn split_screen(area: Rect) -> (Rect, Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MIN_PANEL_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    (layout[0], layout[1])
}

/// The area residues are drawn in, inside the alignment block borders.
///
/// Its width is the measurement the row capacity is derived from.
pub fn alignment_panel(area: Rect) -> Rect {
    let (block_area, _) = split_screen(area);
    Block::default().borders(Borders::ALL).inner(block_area)
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState) {
    let (block_area, status_area) = split_screen(frame.area());

    render_alignment_panel(frame, state, block_area);
    render_status_bar(frame, state, status_area, Instant::now());
}

fn cell_style(color: Color, selected: bool) -> Style {
    let style = Style::default().fg(Color::Black).bg(color);
    if selected {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

/// Renders the visible display lines of the grid.
fn render_alignment_panel(frame: &mut Frame, state: &AppState, area: Rect) {
    let title = format!(
        " {} / {} [Length: {} | Mismatches: {} | Rows: {}] ",
        state.pair.top.id,
        state.pair.bottom.id,
        state.pair.shared_len(),
        state.mismatches,
        state.view.row_count()
    );
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    // No rows until the panel has been measured
    let mut lines: Vec<Line> = Vec::new();
    if state.view.capacity.is_some() {
        let visible = state
            .grid
            .lines()
            .iter()
            .enumerate()
            .skip(state.scroll)
            .take(usize::from(inner.height));

        for (line_idx, grid_line) in visible {
            let spans: Vec<Span> = match grid_line {
                GridLine::Spacer => Vec::new(),
                GridLine::Top { cells, .. } | GridLine::Bottom { cells, .. } => cells
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| {
                        let selected = state
                            .selection
                            .is_some_and(|s| s.contains(GridPos::new(line_idx, col)));
                        Span::styled(cell.residue.symbol.to_string(), cell_style(cell.color, selected))
                    })
                    .collect(),
            };
            lines.push(Line::from(spans));
        }
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect, now: Instant) {
    let message = if state.copy_notice_visible(now) {
        COPIED_NOTICE
    } else if let Some(status) = state.status_message.as_deref() {
        status
    } else {
        COPY_HINT
    };

    let total = state.grid.line_count();
    let position_info = if total == 0 {
        String::from(" q: quit ")
    } else {
        let first = state.scroll + 1;
        let last = (state.scroll + state.panel_height).min(total);
        format!(" Lines {}-{}/{} | q: quit ", first, last, total)
    };

    let left_content = format!(" {} ", message);
    let left_len = left_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(
            left_content,
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + position_info.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            position_info,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}
