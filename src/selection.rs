//! Text selection over the rendered grid.
//!
//! A selection is a linear range of display lines between an anchor (mouse
//! press) and a focus (drag or release), both ends inclusive. The selected
//! text is read back exactly as laid out on screen: partial first and last
//! lines, whole lines in between, joined with newlines.
//!
//! A press released without moving to another cell is a plain click and
//! selects nothing.

use ratatui::layout::Rect;

/// A cell position in grid coordinates (display line, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridPos {
    pub line: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// An in-progress or finished selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: GridPos,
    pub focus: GridPos,
    /// Set once the focus has left the anchor cell
    pub dragged: bool,
}

impl Selection {
    /// Starts an empty selection at the pressed cell.
    pub fn new(at: GridPos) -> Self {
        Self {
            anchor: at,
            focus: at,
            dragged: false,
        }
    }

    pub fn extend_to(&mut self, pos: GridPos) {
        if pos != self.anchor {
            self.dragged = true;
        }
        self.focus = pos;
    }

    /// True for a plain click that never moved off the anchor cell.
    pub fn is_empty(&self) -> bool {
        !self.dragged
    }

    /// Returns (start, end) in reading order.
    pub fn ordered(&self) -> (GridPos, GridPos) {
        if self.anchor <= self.focus {
            (self.anchor, self.focus)
        } else {
            (self.focus, self.anchor)
        }
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        if self.is_empty() {
            return false;
        }
        let (start, end) = self.ordered();
        start <= pos && pos <= end
    }

    /// Extracts the selected text from the display lines.
    pub fn text(&self, lines: &[String]) -> String {
        let (start, end) = self.ordered();
        if self.is_empty() || lines.is_empty() || start.line >= lines.len() {
            return String::new();
        }
        let last_line = end.line.min(lines.len() - 1);

        let mut parts: Vec<String> = Vec::with_capacity(last_line - start.line + 1);
        for (line_idx, line) in lines.iter().enumerate().take(last_line + 1).skip(start.line) {
            let chars: Vec<char> = line.chars().collect();
            let from = if line_idx == start.line { start.col } else { 0 };
            let to = if line_idx == end.line {
                end.col.saturating_add(1)
            } else {
                chars.len()
            };
            let from = from.min(chars.len());
            let to = to.min(chars.len()).max(from);
            parts.push(chars[from..to].iter().collect());
        }

        let text = parts.join("\n");
        if text.trim().is_empty() {
            String::new()
        } else {
            text
        }
    }
}

/// Maps a screen cell inside `panel` to a grid position.
///
/// Returns `None` when the cell is outside the panel.
pub fn grid_pos_at(panel: Rect, scroll: usize, column: u16, row: u16) -> Option<GridPos> {
    let inside_x = column >= panel.x && column < panel.x.saturating_add(panel.width);
    let inside_y = row >= panel.y && row < panel.y.saturating_add(panel.height);
    if !inside_x || !inside_y {
        return None;
    }
    Some(GridPos::new(
        scroll + usize::from(row - panel.y),
        usize::from(column - panel.x),
    ))
}

/// Maps a screen cell to a grid position, clamping it into `panel` first.
///
/// Used while dragging, where the pointer may leave the panel.
pub fn clamped_grid_pos(panel: Rect, scroll: usize, column: u16, row: u16) -> Option<GridPos> {
    if panel.width == 0 || panel.height == 0 {
        return None;
    }
    let column = column.clamp(panel.x, panel.x + panel.width - 1);
    let row = row.clamp(panel.y, panel.y + panel.height - 1);
    grid_pos_at(panel, scroll, column, row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<String> {
        ["ARNDCQ", "ARNECQ", "", "EGHI", "EGHV"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn select(from: (usize, usize), to: (usize, usize)) -> Selection {
        let mut selection = Selection::new(GridPos::new(from.0, from.1));
        selection.extend_to(GridPos::new(to.0, to.1));
        selection
    }

    #[test]
    fn test_span_within_one_line() {
        assert_eq!(select((0, 1), (0, 3)).text(&lines()), "RND");
    }

    #[test]
    fn test_single_cell_after_drag_back() {
        let mut selection = select((1, 3), (1, 4));
        selection.extend_to(GridPos::new(1, 3));
        assert_eq!(selection.text(&lines()), "E");
    }

    #[test]
    fn test_click_without_drag_is_empty() {
        let selection = select((1, 3), (1, 3));
        assert!(selection.is_empty());
        assert_eq!(selection.text(&lines()), "");
        assert!(!selection.contains(GridPos::new(1, 3)));
    }

    #[test]
    fn test_backwards_drag() {
        assert_eq!(select((0, 3), (0, 1)).text(&lines()), "RND");
    }

    #[test]
    fn test_both_sequences() {
        assert_eq!(select((0, 4), (1, 1)).text(&lines()), "CQ\nAR");
    }

    #[test]
    fn test_across_rows_keeps_spacer() {
        assert_eq!(select((1, 4), (3, 1)).text(&lines()), "CQ\n\nEG");
    }

    #[test]
    fn test_columns_clamped_to_line() {
        assert_eq!(select((3, 2), (3, 20)).text(&lines()), "HI");
        assert_eq!(select((4, 10), (4, 20)).text(&lines()), "");
    }

    #[test]
    fn test_past_last_line() {
        assert_eq!(select((4, 2), (9, 0)).text(&lines()), "HV");
        assert_eq!(select((7, 0), (9, 0)).text(&lines()), "");
        assert_eq!(select((0, 0), (0, 0)).text(&[]), "");
    }

    #[test]
    fn test_spacer_only_is_empty() {
        assert_eq!(select((2, 0), (2, 5)).text(&lines()), "");
    }

    #[test]
    fn test_contains() {
        let selection = select((1, 4), (3, 1));
        assert!(selection.contains(GridPos::new(1, 4)));
        assert!(selection.contains(GridPos::new(2, 0)));
        assert!(selection.contains(GridPos::new(3, 1)));
        assert!(!selection.contains(GridPos::new(1, 3)));
        assert!(!selection.contains(GridPos::new(3, 2)));
    }

    #[test]
    fn test_grid_pos_mapping() {
        let panel = Rect::new(1, 1, 10, 5);
        assert_eq!(grid_pos_at(panel, 0, 1, 1), Some(GridPos::new(0, 0)));
        assert_eq!(grid_pos_at(panel, 3, 4, 2), Some(GridPos::new(4, 3)));
        assert_eq!(grid_pos_at(panel, 0, 0, 1), None);
        assert_eq!(grid_pos_at(panel, 0, 11, 1), None);
        assert_eq!(grid_pos_at(panel, 0, 5, 6), None);
    }

    #[test]
    fn test_clamped_mapping() {
        let panel = Rect::new(1, 1, 10, 5);
        assert_eq!(clamped_grid_pos(panel, 0, 0, 0), Some(GridPos::new(0, 0)));
        assert_eq!(clamped_grid_pos(panel, 2, 50, 50), Some(GridPos::new(6, 9)));
        assert_eq!(clamped_grid_pos(Rect::new(0, 0, 0, 0), 0, 0, 0), None);
    }
}
