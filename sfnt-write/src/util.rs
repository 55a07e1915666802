//! Misc utility functions

/// The binary search helpers stored alongside sorted arrays.
///
/// Both the table directory and cmap format 4 carry these fields; they are
/// redundant, but readers expect them to be correct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SearchRange {
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl SearchRange {
    /// Compute the assists for `count` items, each `item_size` bytes.
    pub fn compute(count: usize, item_size: usize) -> Self {
        if count == 0 {
            return SearchRange {
                search_range: 0,
                entry_selector: 0,
                range_shift: 0,
            };
        }
        let entry_selector = count.ilog2();
        let search_range = (1usize << entry_selector) * item_size;
        let range_shift = count * item_size - search_range;
        SearchRange {
            search_range: search_range as u16,
            entry_selector: entry_selector as u16,
            range_shift: range_shift as u16,
        }
    }
}

/// Read next or previous, wrapping if we go out of bounds.
///
/// Contours are closed loops, so neighbors of the first and last points
/// wrap around.
pub trait WrappingGet<T> {
    fn wrapping_next(&self, idx: usize) -> &T;
    fn wrapping_prev(&self, idx: usize) -> &T;
}

impl<T> WrappingGet<T> for [T] {
    fn wrapping_next(&self, idx: usize) -> &T {
        &self[if idx + 1 == self.len() { 0 } else { idx + 1 }]
    }

    fn wrapping_prev(&self, idx: usize) -> &T {
        &self[if idx == 0 { self.len() - 1 } else { idx - 1 }]
    }
}

/// Round `len` up to the next multiple of four.
pub(crate) fn round4(len: usize) -> usize {
    (len + 3) & !3
}
