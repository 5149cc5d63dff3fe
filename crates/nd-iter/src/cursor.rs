use log::debug;
use nd_core::{Error, Index, OffsetTable, Region};

/// Where a walk stands relative to its region.
///
/// Index comparison alone cannot tell the end sentinel apart from a valid
/// end-of-line position (with the active direction equal to the highest
/// dimension, the first line ends exactly on the sentinel index), so the
/// bound is tracked explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkBound {
    Inside,
    PastEnd,
    BeforeBegin,
}

/// Position bookkeeping shared by every region iterator.
///
/// Owns no pixel data: it pairs the current index with its cached linear
/// offset, the walked region and a copy of the buffer's stride table. Line
/// operations take the active direction as a parameter so that the raster
/// iterator (direction 0, implicit line changes) and the linear iterator
/// (explicit line changes) share one carry implementation.
///
/// Only construction is checked. Stepping is plain arithmetic; callers poll
/// the boundary predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<const N: usize> {
    table: OffsetTable<N>,
    region: Region<N>,
    end: Index<N>,
    index: Index<N>,
    offset: isize,
    bound: WalkBound,
}

impl<const N: usize> Cursor<N> {
    /// Binds a cursor to `region` and positions it at the region's begin.
    pub fn new(table: OffsetTable<N>, region: Region<N>) -> Result<Self, Error> {
        let buffered = table.buffered_region();
        if !buffered.contains_region(&region) {
            return Err(Error::region_outside(&region, &buffered));
        }
        debug!("Cursor::new region=({region}) buffered=({buffered})");

        let mut cursor = Self {
            table,
            region,
            end: region.end_index(),
            index: region.origin,
            offset: 0,
            bound: WalkBound::Inside,
        };
        cursor.go_to_begin();
        Ok(cursor)
    }

    #[inline]
    pub fn index(&self) -> Index<N> {
        self.index
    }

    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    #[inline]
    pub fn region(&self) -> Region<N> {
        self.region
    }

    #[inline]
    pub fn offset_table(&self) -> &OffsetTable<N> {
        &self.table
    }

    #[inline]
    pub fn bound(&self) -> WalkBound {
        self.bound
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.bound == WalkBound::PastEnd
    }

    #[inline]
    pub fn is_at_reverse_end(&self) -> bool {
        self.bound == WalkBound::BeforeBegin
    }

    /// Region origin; an empty region begins at its end.
    pub fn go_to_begin(&mut self) {
        if self.region.is_empty() {
            self.go_to_end();
            return;
        }
        self.index = self.region.origin;
        self.offset = self.table.offset(&self.index);
        self.bound = WalkBound::Inside;
    }

    /// Canonical end sentinel: region origin everywhere except the highest
    /// dimension, which sits one past its last coordinate. Never
    /// dereferenced.
    pub fn go_to_end(&mut self) {
        self.index = self.region.origin;
        if N > 0 {
            self.index[N - 1] = self.end[N - 1];
        }
        self.offset = self.table.offset(&self.index);
        self.bound = WalkBound::PastEnd;
    }

    /// Last index of the region.
    pub fn go_to_reverse_begin(&mut self) {
        if self.region.is_empty() {
            self.go_to_reverse_end();
            return;
        }
        self.index = self.region.last_index();
        self.offset = self.table.offset(&self.index);
        self.bound = WalkBound::Inside;
    }

    /// Mirror of the end sentinel: one before the origin along the highest
    /// dimension.
    pub fn go_to_reverse_end(&mut self) {
        self.index = self.region.origin;
        if N > 0 {
            self.index[N - 1] -= 1;
        }
        self.offset = self.table.offset(&self.index);
        self.bound = WalkBound::BeforeBegin;
    }

    pub fn set_index(&mut self, index: Index<N>) {
        debug_assert!(
            self.region.is_inside(&index),
            "index {index} outside walked region ({})",
            self.region
        );
        self.index = index;
        self.offset = self.table.offset(&index);
        self.bound = WalkBound::Inside;
    }

    /// One step forward along `dir`. Unchecked.
    #[inline]
    pub fn inc(&mut self, dir: usize, jump: isize) {
        self.index[dir] += 1;
        self.offset += jump;
    }

    /// One step backward along `dir`. Unchecked.
    #[inline]
    pub fn dec(&mut self, dir: usize, jump: isize) {
        self.index[dir] -= 1;
        self.offset -= jump;
    }

    #[inline]
    pub fn is_at_end_of_line(&self, dir: usize) -> bool {
        self.index[dir] == self.end[dir]
    }

    #[inline]
    pub fn is_at_begin_of_line(&self, dir: usize) -> bool {
        self.index[dir] == self.region.origin[dir]
    }

    #[inline]
    pub fn is_at_reverse_end_of_line(&self, dir: usize) -> bool {
        self.index[dir] == self.region.origin[dir] - 1
    }

    /// Rewinds `dir` to the region origin and advances the remaining
    /// dimensions like a mixed-radix counter, lowest dimension first.
    ///
    /// From the reverse end this moves to the first line; at the end it
    /// stays put.
    pub fn next_line(&mut self, dir: usize) {
        match self.bound {
            WalkBound::PastEnd => return,
            WalkBound::BeforeBegin => {
                self.go_to_begin();
                return;
            }
            WalkBound::Inside => {}
        }

        let jump = self.stride(dir);
        self.offset -= (self.index[dir] - self.region.origin[dir]) * jump;
        self.index[dir] = self.region.origin[dir];

        for d in 0..N {
            if d == dir {
                continue;
            }
            let stride = self.stride(d);
            self.index[d] += 1;
            if self.index[d] < self.end[d] {
                self.offset += stride;
                self.bound = WalkBound::Inside;
                return;
            }
            // carry
            self.offset -= (self.index[d] - 1 - self.region.origin[d]) * stride;
            self.index[d] = self.region.origin[d];
        }

        self.go_to_end();
    }

    /// Moves `dir` to the last coordinate of the region and steps the
    /// remaining dimensions back with borrow, lowest dimension first.
    ///
    /// From the end this moves to the last line; at the reverse end it stays
    /// put.
    pub fn previous_line(&mut self, dir: usize) {
        match self.bound {
            WalkBound::BeforeBegin => return,
            WalkBound::PastEnd => {
                self.go_to_reverse_begin();
                return;
            }
            WalkBound::Inside => {}
        }

        let jump = self.stride(dir);
        let last = self.end[dir] - 1;
        self.offset += (last - self.index[dir]) * jump;
        self.index[dir] = last;

        for d in 0..N {
            if d == dir {
                continue;
            }
            let stride = self.stride(d);
            self.index[d] -= 1;
            if self.index[d] >= self.region.origin[d] {
                self.offset -= stride;
                self.bound = WalkBound::Inside;
                return;
            }
            // borrow
            let last = self.end[d] - 1;
            self.offset += (last - self.region.origin[d]) * stride;
            self.index[d] = last;
        }

        self.go_to_reverse_end();
    }

    #[inline]
    pub fn stride(&self, dir: usize) -> isize {
        self.table.stride(dir) as isize
    }

    /// Offset for dereferencing. Release builds only rely on slice indexing
    /// to catch a cursor left outside the storage.
    #[inline]
    pub(crate) fn pixel_offset(&self) -> usize {
        debug_assert!(
            self.region.is_inside(&self.index),
            "dereferenced iterator at {} outside its region ({})",
            self.index,
            self.region
        );
        self.offset as usize
    }
}
