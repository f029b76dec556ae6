//! Row partitioning.
//!
//! Splits two aligned sequences into synchronized row chunks of at most
//! `capacity` residues. Chunks tile the shared length in order with no gaps
//! or overlaps; only the last one may be shorter.

use crate::model::RowChunk;

/// Partitions two aligned symbol sequences into rows of `capacity` columns.
///
/// A capacity of 0 (no layout measurement yet) produces no rows, as does an
/// empty input. If the sequences differ in length, rows stop at the end of
/// the shorter one.
pub fn partition(top: &[char], bottom: &[char], capacity: usize) -> Vec<RowChunk> {
    if capacity == 0 {
        return Vec::new();
    }

    let shared_len = top.len().min(bottom.len());
    let top = &top[..shared_len];
    let bottom = &bottom[..shared_len];

    top.chunks(capacity)
        .zip(bottom.chunks(capacity))
        .enumerate()
        .map(|(row, (top_part, bottom_part))| {
            RowChunk::new(row * capacity, top_part.to_vec(), bottom_part.to_vec())
        })
        .collect()
}
