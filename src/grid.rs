//! Alignment grid composition.
//!
//! Turns an [`AlignmentView`] into colored display lines. Each row chunk
//! becomes a top line, a bottom line and a blank spacer before the next row.
//! The top (reference) sequence is always colored; a bottom residue is only
//! colored where it differs from the residue above it.

use std::io::{self, Write};

use ratatui::style::Color;

use crate::colors::ColorScheme;
use crate::model::{AlignmentView, Residue};

/// One rendered residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub residue: Residue,
    pub color: Color,
    pub mismatch: bool,
}

/// A display line of the grid, in top-to-bottom order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridLine {
    /// Reference residues of row `row`
    Top { row: usize, cells: Vec<GridCell> },
    /// Compared residues of row `row`
    Bottom { row: usize, cells: Vec<GridCell> },
    /// Blank line between two rows
    Spacer,
}

impl GridLine {
    pub fn cells(&self) -> &[GridCell] {
        match self {
            GridLine::Top { cells, .. } | GridLine::Bottom { cells, .. } => cells,
            GridLine::Spacer => &[],
        }
    }

    /// The plain text of the line, as it appears on screen.
    pub fn text(&self) -> String {
        self.cells().iter().map(|cell| cell.residue.symbol).collect()
    }
}

/// All display lines for an alignment view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentGrid {
    lines: Vec<GridLine>,
}

impl AlignmentGrid {
    /// Colors every residue of the view.
    pub fn build(view: &AlignmentView, scheme: &impl ColorScheme) -> Self {
        let mut lines = Vec::with_capacity(view.rows.len() * 3);

        for (row_idx, row) in view.rows.iter().enumerate() {
            if row_idx > 0 {
                lines.push(GridLine::Spacer);
            }

            let mut top = Vec::with_capacity(row.len());
            let mut bottom = Vec::with_capacity(row.len());
            for (top_residue, bottom_residue) in row.columns() {
                let mismatch = top_residue.symbol != bottom_residue.symbol;
                top.push(GridCell {
                    residue: top_residue,
                    color: scheme.get_color(top_residue.symbol),
                    mismatch,
                });
                bottom.push(GridCell {
                    residue: bottom_residue,
                    color: if mismatch {
                        scheme.get_color(bottom_residue.symbol)
                    } else {
                        scheme.default_color()
                    },
                    mismatch,
                });
            }

            lines.push(GridLine::Top { row: row_idx, cells: top });
            lines.push(GridLine::Bottom { row: row_idx, cells: bottom });
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[GridLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Plain text of every display line.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines.iter().map(GridLine::text).collect()
    }

    /// Writes the grid as plain text, one display line per output line.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(out, "{}", line.text())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{color_of, AminoAcidColorScheme, DEFAULT_COLOR};
    use crate::layout::RowCapacity;
    use crate::model::{AlignedPair, Sequence};

    fn grid(top: &str, bottom: &str, capacity: usize) -> AlignmentGrid {
        let pair = AlignedPair::new(Sequence::new("a", top), Sequence::new("b", bottom));
        let view = AlignmentView::build(&pair, RowCapacity::new(capacity));
        AlignmentGrid::build(&view, &AminoAcidColorScheme)
    }

    fn colors(line: &GridLine) -> Vec<Color> {
        line.cells().iter().map(|c| c.color).collect()
    }

    #[test]
    fn test_single_mismatch() {
        let grid = grid("ARND", "ARNE", 4);
        assert_eq!(grid.line_count(), 2);

        let top = &grid.lines()[0];
        let bottom = &grid.lines()[1];
        assert!(matches!(top, GridLine::Top { row: 0, .. }));
        assert!(matches!(bottom, GridLine::Bottom { row: 0, .. }));

        assert_eq!(
            colors(top),
            vec![color_of('A'), color_of('R'), color_of('N'), color_of('D')]
        );
        assert_eq!(
            colors(bottom),
            vec![DEFAULT_COLOR, DEFAULT_COLOR, DEFAULT_COLOR, color_of('E')]
        );
        assert!(bottom.cells()[3].mismatch);
        assert!(!bottom.cells()[0].mismatch);
    }

    #[test]
    fn test_full_match_two_rows() {
        let grid = grid("AAAAAA", "AAAAAA", 3);
        assert_eq!(grid.text_lines(), vec!["AAA", "AAA", "", "AAA", "AAA"]);

        for line in grid.lines() {
            match line {
                GridLine::Top { .. } => assert!(colors(line).iter().all(|c| *c == color_of('A'))),
                GridLine::Bottom { .. } => assert!(colors(line).iter().all(|c| *c == DEFAULT_COLOR)),
                GridLine::Spacer => {}
            }
        }
    }

    #[test]
    fn test_case_insensitive_comparison() {
        let grid = grid("arNd", "ARnE", 4);
        assert_eq!(grid.text_lines(), vec!["ARND", "ARNE"]);
        assert_eq!(colors(&grid.lines()[1])[..3], [DEFAULT_COLOR; 3]);
        assert_eq!(colors(&grid.lines()[1])[3], color_of('E'));
    }

    #[test]
    fn test_gap_mismatch_uses_default() {
        let gap_bottom = grid("AR", "A-", 2);
        let bottom = &gap_bottom.lines()[1];
        assert!(bottom.cells()[1].mismatch);
        assert_eq!(bottom.cells()[1].color, DEFAULT_COLOR);

        let gap_top = grid("A-", "AR", 2);
        assert_eq!(gap_top.lines()[0].cells()[1].color, DEFAULT_COLOR);
        assert_eq!(gap_top.lines()[1].cells()[1].color, color_of('R'));
    }

    #[test]
    fn test_positions_follow_offsets() {
        let wrapped = grid("ACDEFG", "ACDEFW", 4);
        let second_top = &wrapped.lines()[3];
        assert!(matches!(second_top, GridLine::Top { row: 1, .. }));
        let positions: Vec<usize> = second_top.cells().iter().map(|c| c.residue.position).collect();
        assert_eq!(positions, vec![4, 5]);
    }

    #[test]
    fn test_no_capacity_no_lines() {
        let pair = AlignedPair::new(Sequence::new("a", "A"), Sequence::new("b", "R"));
        let view = AlignmentView::build(&pair, None);
        assert_eq!(AlignmentGrid::build(&view, &AminoAcidColorScheme).line_count(), 0);
    }

    #[test]
    fn test_write_text() {
        let grid = grid("MKTAY", "MKSAY", 3);
        let mut out = Vec::new();
        grid.write_text(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "MKT\nMKS\n\nAY\nAY\n");
    }
}
