//! Layout observation.
//!
//! Tracks the width of the alignment panel and derives how many residues fit
//! in one row. The capacity stays unset until the first measurement; after
//! that every width change publishes a fresh capacity that supersedes the
//! previous one.

use std::fmt;
use std::num::NonZeroUsize;

use tracing::debug;

/// Terminal columns taken by one rendered residue.
pub const CELL_WIDTH: u16 = 1;

/// Number of residue columns that fit in one visual row. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowCapacity(NonZeroUsize);

impl RowCapacity {
    /// Derives the capacity for a measured width, floored to 1.
    pub fn from_width(width: u16, cell_width: u16) -> Self {
        let columns = usize::from(width) / usize::from(cell_width.max(1));
        Self(NonZeroUsize::new(columns).unwrap_or(NonZeroUsize::MIN))
    }

    /// Creates a capacity from a column count, rejecting 0.
    pub fn new(columns: usize) -> Option<Self> {
        NonZeroUsize::new(columns).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for RowCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Watches the rendering surface width and recomputes the row capacity.
#[derive(Debug, Clone)]
pub struct LayoutObserver {
    cell_width: u16,
    last_width: Option<u16>,
    capacity: Option<RowCapacity>,
}

impl Default for LayoutObserver {
    fn default() -> Self {
        Self::new(CELL_WIDTH)
    }
}

impl LayoutObserver {
    /// Creates an observer with no measurement yet.
    pub fn new(cell_width: u16) -> Self {
        Self {
            cell_width: cell_width.max(1),
            last_width: None,
            capacity: None,
        }
    }

    /// The current capacity, or `None` before the first measurement.
    pub fn capacity(&self) -> Option<RowCapacity> {
        self.capacity
    }

    /// Records a width measurement.
    ///
    /// Returns the recomputed capacity on the first measurement and on every
    /// width change; returns `None` when the width is unchanged.
    pub fn observe(&mut self, width: u16) -> Option<RowCapacity> {
        if self.last_width == Some(width) {
            return None;
        }

        let capacity = RowCapacity::from_width(width, self.cell_width);
        debug!(
            width,
            previous = ?self.capacity.map(RowCapacity::get),
            capacity = capacity.get(),
            "row capacity recomputed"
        );
        self.last_width = Some(width);
        self.capacity = Some(capacity);
        Some(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_from_width() {
        assert_eq!(RowCapacity::from_width(80, 1).get(), 80);
        assert_eq!(RowCapacity::from_width(520, 26).get(), 20);
        assert_eq!(RowCapacity::from_width(545, 26).get(), 20);
    }

    #[test]
    fn test_capacity_never_zero() {
        assert_eq!(RowCapacity::from_width(0, 1).get(), 1);
        assert_eq!(RowCapacity::from_width(10, 26).get(), 1);
        assert_eq!(RowCapacity::from_width(10, 0).get(), 10);
        assert!(RowCapacity::new(0).is_none());
    }

    #[test]
    fn test_unset_before_first_measurement() {
        let observer = LayoutObserver::default();
        assert_eq!(observer.capacity(), None);
    }

    #[test]
    fn test_observe_publishes_changes() {
        let mut observer = LayoutObserver::new(2);

        assert_eq!(observer.observe(40).map(RowCapacity::get), Some(20));
        assert_eq!(observer.capacity().map(RowCapacity::get), Some(20));

        // Same width: nothing new to publish
        assert_eq!(observer.observe(40), None);

        // Resize supersedes the previous value
        assert_eq!(observer.observe(11).map(RowCapacity::get), Some(5));
        assert_eq!(observer.capacity().map(RowCapacity::get), Some(5));

        assert_eq!(observer.observe(0).map(RowCapacity::get), Some(1));
    }
}
