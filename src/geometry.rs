//! Compile-time partitioning of `count` elements of `size` bytes into aligned
//! blocks of `target` bytes.
//!
//! Everything here is a `const fn`; the results feed the associated constants
//! of [`crate::Packed`] and [`crate::RegisterPolicy`] and never run at run time
//! for the built-in types.

/// Returns `value`, or `1` if it is zero.
#[inline(always)]
pub const fn not_zero(value: usize) -> usize {
    if value == 0 {
        1
    } else {
        value
    }
}

/// The number of elements held by one aligned block.
///
/// If the whole payload fits inside `target` it forms a single block.
/// Otherwise the block is shrunk one element at a time until it evenly
/// divides the payload. The result is never zero: degenerate targets
/// collapse to one element per block.
pub const fn chunk_length(size: usize, count: usize, target: usize) -> usize {
    let total = size * count;
    if total <= target {
        return not_zero(count);
    }

    let mut block = target;
    while block != 0 && total % block != 0 {
        block = block.saturating_sub(size);
    }
    not_zero(block / size)
}

/// The number of blocks needed for `count` elements, never zero.
pub const fn chunk_count(size: usize, count: usize, target: usize) -> usize {
    not_zero(count.div_ceil(chunk_length(size, count, target)))
}

/// Maps a flat logical index to its physical slot.
///
/// Blocks holding more than one element are laid out `target / size` slots
/// apart, so padding sits between consecutive blocks. Single-element blocks
/// and single-block payloads map one to one.
pub const fn chunk_index(size: usize, count: usize, target: usize, index: usize) -> usize {
    Geometry::new(size, count, target).index(index)
}

/// The full partition of one `(size, count, target)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    /// Elements per block.
    pub length: usize,
    /// Number of blocks.
    pub count: usize,
    /// Physical slots between the starts of two consecutive blocks.
    pub stride: usize,
}

impl Geometry {
    /// Computes the partition.
    pub const fn new(size: usize, count: usize, target: usize) -> Self {
        let length = chunk_length(size, count, target);
        let count = chunk_count(size, count, target);
        let slots = if size == 0 { 0 } else { target / size };
        Self {
            length,
            count,
            stride: if slots > length { slots } else { length },
        }
    }

    /// `length * count`, the element capacity of the partition.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.length * self.count
    }

    /// Physical slot of the logical `index`.
    #[inline(always)]
    pub const fn index(&self, index: usize) -> usize {
        if self.length == 1 || self.count == 1 {
            index
        } else {
            (index / self.length) * self.stride + index % self.length
        }
    }
}

/// Column-major placement of a `rows` x `columns` value.
///
/// Rows are partitioned inside each column by `column`; whole padded columns
/// are then partitioned into the type's alignment blocks by `block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Logical rows per column.
    pub rows: usize,
    /// Partition of one column's rows.
    pub column: Geometry,
    /// Partition of the padded columns.
    pub block: Geometry,
    /// Physical slots spanned by one padded column.
    pub column_slots: usize,
}

impl Layout {
    /// Computes the layout of `columns` columns of `rows` elements of `size`
    /// bytes, each column aligned to `column_alignment` and the whole value to
    /// `alignment`.
    pub const fn new(
        size: usize,
        rows: usize,
        columns: usize,
        column_alignment: usize,
        alignment: usize,
    ) -> Self {
        let column = Geometry::new(size, rows, column_alignment);
        let column_slots = column.count * column.stride;
        Self {
            rows: not_zero(rows),
            column,
            block: Geometry::new(column_slots * size, columns, alignment),
            column_slots,
        }
    }

    /// Physical slot of the logical (column-major) `index`.
    #[inline(always)]
    pub const fn index(&self, index: usize) -> usize {
        let (col, row) = (index / self.rows, index % self.rows);
        self.block.index(col) * self.column_slots + self.column.index(row)
    }
}

const F32: usize = core::mem::size_of::<f32>();

// single block: payload fits the target
const _: () = {
    let g = Geometry::new(F32, 3, 16);
    assert!(g.length == 3 && g.count == 1);
    assert!(g.index(2) == 2);

    let g = Geometry::new(F32, 2, 8);
    assert!(g.length == 2 && g.count == 1);

    let g = Geometry::new(F32, 4, 16);
    assert!(g.length == 4 && g.count == 1 && g.stride == 4);
};

// exact multiples
const _: () = {
    let g = Geometry::new(F32, 16, 16);
    assert!(g.length == 4 && g.count == 4 && g.stride == 4);
    assert!(g.index(13) == 13);

    let g = Geometry::new(16, 4, 32);
    assert!(g.length == 2 && g.count == 2);

    let g = Geometry::new(F32, 8, 8);
    assert!(g.length == 2 && g.count == 4 && g.index(7) == 7);
};

// non-multiples shrink the block and pad between blocks
const _: () = {
    let g = Geometry::new(F32, 6, 16);
    assert!(g.length == 3 && g.count == 2 && g.stride == 4);
    assert!(g.index(2) == 2 && g.index(3) == 4 && g.index(5) == 6);

    let g = Geometry::new(F32, 9, 16);
    assert!(g.length == 3 && g.count == 3);
    assert!(g.index(8) == 10);

    let g = Geometry::new(F32, 5, 8);
    assert!(g.length == 1 && g.count == 5 && g.index(4) == 4);
};

// two-level layouts: padding after every column that does not fill its block
const _: () = {
    let l = Layout::new(F32, 3, 3, 16, 16);
    assert!(l.column_slots == 4);
    assert!(l.index(2) == 2 && l.index(3) == 4 && l.index(8) == 10);

    let l = Layout::new(F32, 2, 2, 16, 16);
    assert!(l.column_slots == 4 && l.index(1) == 1 && l.index(2) == 4 && l.index(3) == 5);

    let l = Layout::new(F32, 4, 4, 16, 32);
    assert!(l.index(13) == 13);

    let l = Layout::new(F32, 3, 1, 16, 4);
    assert!(l.index(2) == 2);
};

// degenerate targets collapse to one element per block
const _: () = {
    let g = Geometry::new(F32, 4, 0);
    assert!(g.length == 1 && g.count == 4);

    let g = Geometry::new(16, 1, 4);
    assert!(g.length == 1 && g.count == 1);

    let g = Geometry::new(16, 3, 4);
    assert!(g.length == 1 && g.count == 3);

    assert!(chunk_count(F32, 0, 16) == 1);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_covers_count() {
        for size in [1, 2, 4, 8, 12, 16] {
            for count in 1..=32 {
                for target in [0, 4, 8, 12, 16, 32, 64] {
                    let g = Geometry::new(size, count, target);
                    assert!(g.length >= 1 && g.count >= 1);
                    assert!(
                        g.capacity() >= count,
                        "size {size} count {count} target {target}: {g:?}"
                    );
                    assert!(g.stride >= g.length);
                }
            }
        }
    }

    #[test]
    fn index_is_strictly_increasing() {
        for count in 1..=24 {
            for target in [8, 12, 16, 32] {
                let g = Geometry::new(F32, count, target);
                for i in 1..count {
                    assert!(g.index(i) > g.index(i - 1));
                }
            }
        }
    }

    #[test]
    fn padded_columns_land_on_block_boundaries() {
        // three rows per 16-byte column: a padding slot after every column
        let g = Geometry::new(F32, 9, 16);
        let slots: [usize; 9] = core::array::from_fn(|i| g.index(i));
        assert_eq!(slots, [0, 1, 2, 4, 5, 6, 8, 9, 10]);
        assert_eq!(chunk_index(F32, 9, 16, 4), 5);
    }

    #[test]
    fn short_columns_start_on_column_boundaries() {
        // two rows per 16-byte column: the second column starts at slot 4
        let l = Layout::new(F32, 2, 3, 16, 16);
        let slots: [usize; 6] = core::array::from_fn(|i| l.index(i));
        assert_eq!(slots, [0, 1, 4, 5, 8, 9]);

        // tall columns split into two blocks of their own
        let l = Layout::new(F32, 6, 2, 16, 16);
        assert_eq!(l.column_slots, 8);
        let slots: [usize; 12] = core::array::from_fn(|i| l.index(i));
        assert_eq!(slots, [0, 1, 2, 4, 5, 6, 8, 9, 10, 12, 13, 14]);
    }

    #[test]
    fn layout_matches_flat_geometry_for_full_columns() {
        for (rows, columns, align) in [(4, 4, 32), (4, 4, 4), (3, 3, 16), (4, 1, 16), (1, 1, 4)] {
            let l = Layout::new(F32, rows, columns, 16, align);
            let flat = Geometry::new(F32, rows * columns, 16);
            for i in 0..rows * columns {
                assert_eq!(l.index(i), flat.index(i), "{rows}x{columns} align {align}");
            }
        }
    }
}
