//! Data model for the pairwise alignment viewer.
//!
//! This module contains all data structures for representing:
//! - The two aligned sequences
//! - Row chunks and the derived alignment view
//! - Application state (scrolling, selection, copy notice)

use std::time::{Duration, Instant};

use crate::colors::AminoAcidColorScheme;
use crate::grid::AlignmentGrid;
use crate::layout::RowCapacity;
use crate::partition::partition;
use crate::selection::{GridPos, Selection};

/// How long the "copied" notice stays visible.
pub const COPY_NOTICE_DURATION: Duration = Duration::from_millis(1000);

/// Represents a single sequence with its identifier and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier (FASTA header or a default label)
    pub id: String,
    /// The residues, gaps written as '-'
    pub data: String,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }

    /// Returns the number of residues.
    pub fn len(&self) -> usize {
        self.data.chars().count()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the residues uppercased, one symbol per entry.
    pub fn upper_symbols(&self) -> Vec<char> {
        self.data.chars().map(|c| c.to_ascii_uppercase()).collect()
    }
}

/// A single residue placed at its position in a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Residue {
    pub symbol: char,
    pub position: usize,
}

/// Two sequences of equal length, already aligned.
///
/// The first one is the reference shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedPair {
    pub top: Sequence,
    pub bottom: Sequence,
}

impl AlignedPair {
    pub fn new(top: Sequence, bottom: Sequence) -> Self {
        Self { top, bottom }
    }

    /// Length shared by both sequences.
    pub fn shared_len(&self) -> usize {
        self.top.len().min(self.bottom.len())
    }

    /// Number of positions where the uppercased residues differ.
    pub fn mismatch_count(&self) -> usize {
        self.top
            .upper_symbols()
            .iter()
            .zip(self.bottom.upper_symbols().iter())
            .filter(|(a, b)| a != b)
            .count()
    }
}

/// One visual row: equal-length slices of both sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowChunk {
    /// Position of the first residue of this row in the full sequences
    pub offset: usize,
    pub top: Vec<char>,
    pub bottom: Vec<char>,
}

impl RowChunk {
    pub fn new(offset: usize, top: Vec<char>, bottom: Vec<char>) -> Self {
        Self { offset, top, bottom }
    }

    /// Number of columns in this row.
    pub fn len(&self) -> usize {
        self.top.len().min(self.bottom.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top and bottom residues paired by column.
    pub fn columns(&self) -> impl Iterator<Item = (Residue, Residue)> + '_ {
        self.top
            .iter()
            .zip(self.bottom.iter())
            .enumerate()
            .map(move |(i, (&top, &bottom))| {
                let position = self.offset + i;
                (
                    Residue { symbol: top, position },
                    Residue { symbol: bottom, position },
                )
            })
    }
}

/// The rows of an alignment for a given row capacity.
///
/// Derived data: rebuilt from scratch whenever the pair or the capacity
/// changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentView {
    pub capacity: Option<RowCapacity>,
    pub rows: Vec<RowChunk>,
}

impl AlignmentView {
    /// Builds the view. With no capacity yet there are no rows.
    pub fn build(pair: &AlignedPair, capacity: Option<RowCapacity>) -> Self {
        let rows = match capacity {
            Some(capacity) => partition(
                &pair.top.upper_symbols(),
                &pair.bottom.upper_symbols(),
                capacity.get(),
            ),
            None => Vec::new(),
        };
        Self { capacity, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// The complete application state.
#[derive(Debug)]
pub struct AppState {
    /// The sequences being shown
    pub pair: AlignedPair,
    /// Mismatching positions in `pair`, counted once at load
    pub mismatches: usize,
    /// Rows for the current capacity
    pub view: AlignmentView,
    /// Colored display lines derived from `view`
    pub grid: AlignmentGrid,
    /// Index of the first visible display line
    pub scroll: usize,
    /// Number of display lines that fit in the panel
    pub panel_height: usize,
    /// Current mouse selection over the grid
    pub selection: Option<Selection>,
    /// When the last successful copy was reported
    pub copied_at: Option<Instant>,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
}

impl AppState {
    /// Creates a new application state. Nothing is laid out until the first
    /// capacity arrives.
    pub fn new(pair: AlignedPair) -> Self {
        let status_message = (pair.top.len() != pair.bottom.len()).then(|| {
            format!(
                "Warning: sequence lengths differ ({} vs {}), showing the first {} positions",
                pair.top.len(),
                pair.bottom.len(),
                pair.shared_len()
            )
        });

        Self {
            mismatches: pair.mismatch_count(),
            pair,
            view: AlignmentView::default(),
            grid: AlignmentGrid::default(),
            scroll: 0,
            panel_height: 0,
            selection: None,
            copied_at: None,
            should_quit: false,
            status_message,
        }
    }

    /// Re-lays out the alignment for a new row capacity.
    ///
    /// Any selection refers to the old layout and is dropped.
    pub fn apply_capacity(&mut self, capacity: RowCapacity) {
        self.view = AlignmentView::build(&self.pair, Some(capacity));
        self.grid = AlignmentGrid::build(&self.view, &AminoAcidColorScheme);
        self.selection = None;
        self.clamp_scroll();
    }

    /// Updates the number of visible display lines.
    pub fn set_panel_height(&mut self, height: usize) {
        self.panel_height = height;
        self.clamp_scroll();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
        self.clamp_scroll();
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.panel_height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.panel_height.max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn max_scroll(&self) -> usize {
        self.grid.line_count().saturating_sub(self.panel_height)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Starts a new selection at a grid position.
    pub fn begin_selection(&mut self, pos: GridPos) {
        self.selection = Some(Selection::new(pos));
    }

    /// Moves the selection focus while dragging.
    pub fn extend_selection(&mut self, pos: GridPos) {
        if let Some(selection) = self.selection.as_mut() {
            selection.extend_to(pos);
        }
    }

    /// Ends the selection gesture and returns the selected text.
    ///
    /// The selection stays highlighted. Returns `None` when no gesture was
    /// in progress or nothing was selected, e.g. after a plain click.
    pub fn finish_selection(&mut self, pos: GridPos) -> Option<String> {
        let selection = self.selection.as_mut()?;
        selection.extend_to(pos);
        let text = selection.text(&self.grid.text_lines());
        (!text.is_empty()).then_some(text)
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Records a successful copy so the notice is shown.
    pub fn notify_copied(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    /// Whether the "copied" notice should still be visible at `now`.
    pub fn copy_notice_visible(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPY_NOTICE_DURATION)
    }
}
