use nd_core::{Index, Region};

use crate::cursor::Cursor;

/// Position and termination queries common to every region iterator.
pub trait RegionWalk<const N: usize> {
    fn cursor(&self) -> &Cursor<N>;

    fn cursor_mut(&mut self) -> &mut Cursor<N>;

    /// Current logical position. O(1), no recomputation.
    #[inline]
    fn index(&self) -> Index<N> {
        self.cursor().index()
    }

    /// Cached linear offset of [`RegionWalk::index`] in the backing storage.
    #[inline]
    fn offset(&self) -> isize {
        self.cursor().offset()
    }

    fn region(&self) -> Region<N> {
        self.cursor().region()
    }

    fn go_to_begin(&mut self) {
        self.cursor_mut().go_to_begin();
    }

    fn go_to_end(&mut self) {
        self.cursor_mut().go_to_end();
    }

    fn go_to_reverse_begin(&mut self) {
        self.cursor_mut().go_to_reverse_begin();
    }

    fn go_to_reverse_end(&mut self) {
        self.cursor_mut().go_to_reverse_end();
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor().is_at_end()
    }

    #[inline]
    fn is_at_reverse_end(&self) -> bool {
        self.cursor().is_at_reverse_end()
    }

    fn set_index(&mut self, index: Index<N>) {
        self.cursor_mut().set_index(index);
    }
}

/// Line-oriented navigation along one active direction.
///
/// `inc`/`dec` are unchecked: test [`LineWalk::is_at_end_of_line`] before
/// trusting the new position, then call [`LineWalk::next_line`].
pub trait LineWalk<const N: usize>: RegionWalk<N> {
    fn direction(&self) -> usize;

    /// Linear distance of one step along the active direction.
    fn jump(&self) -> isize;

    /// Selects the active direction. Does not reposition the iterator.
    fn set_direction(&mut self, direction: usize);

    #[inline]
    fn inc(&mut self) {
        let (dir, jump) = (self.direction(), self.jump());
        self.cursor_mut().inc(dir, jump);
    }

    #[inline]
    fn dec(&mut self) {
        let (dir, jump) = (self.direction(), self.jump());
        self.cursor_mut().dec(dir, jump);
    }

    #[inline]
    fn is_at_end_of_line(&self) -> bool {
        self.cursor().is_at_end_of_line(self.direction())
    }

    #[inline]
    fn is_at_begin_of_line(&self) -> bool {
        self.cursor().is_at_begin_of_line(self.direction())
    }

    /// One step before the first coordinate of the line; the stop condition
    /// for walking a line backwards.
    #[inline]
    fn is_at_reverse_end_of_line(&self) -> bool {
        self.cursor().is_at_reverse_end_of_line(self.direction())
    }

    fn next_line(&mut self) {
        let dir = self.direction();
        self.cursor_mut().next_line(dir);
    }

    fn previous_line(&mut self) {
        let dir = self.direction();
        self.cursor_mut().previous_line(dir);
    }

    /// First index of every line in the region for the active direction, in
    /// carry order. Independent of the iterator's current position.
    fn line_starts(&self) -> LineStarts<N> {
        let mut cursor = *self.cursor();
        cursor.go_to_begin();
        LineStarts {
            cursor,
            dir: self.direction(),
        }
    }
}

/// Read access to the pixel under the cursor.
pub trait PixelRead {
    type Pixel;

    fn value(&self) -> &Self::Pixel;

    #[inline]
    fn get(&self) -> Self::Pixel
    where
        Self::Pixel: Copy,
    {
        *self.value()
    }
}

/// Write access to the pixel under the cursor, only on mutable iterators.
pub trait PixelWrite: PixelRead {
    fn value_mut(&mut self) -> &mut Self::Pixel;

    #[inline]
    fn set(&mut self, value: Self::Pixel) {
        *self.value_mut() = value;
    }
}

/// See [`LineWalk::line_starts`].
#[derive(Debug, Clone)]
pub struct LineStarts<const N: usize> {
    cursor: Cursor<N>,
    dir: usize,
}

impl<const N: usize> Iterator for LineStarts<N> {
    type Item = Index<N>;

    fn next(&mut self) -> Option<Index<N>> {
        if self.cursor.is_at_end() {
            return None;
        }
        let start = self.cursor.index();
        self.cursor.next_line(self.dir);
        Some(start)
    }
}
