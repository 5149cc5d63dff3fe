use nd_core::{Error, ImageBuffer, ImageBufferMut, Index, Region};

use crate::cursor::{Cursor, WalkBound};
use crate::walk::{PixelRead, PixelWrite, RegionWalk};

/// Read-only iterator over a region in raster order (dimension 0 fastest).
///
/// Line changes happen implicitly inside [`RegionConstIterator::advance`].
/// Convert into a [`crate::LinearConstIterator`] to control lines explicitly.
#[derive(Debug, Clone)]
pub struct RegionConstIterator<'a, T, const N: usize> {
    pub(crate) data: &'a [T],
    pub(crate) cursor: Cursor<N>,
}

impl<'a, T, const N: usize> RegionConstIterator<'a, T, N> {
    pub fn new<B>(buffer: &'a B, region: Region<N>) -> Result<Self, Error>
    where
        B: ImageBuffer<N, Pixel = T> + ?Sized,
    {
        let cursor = Cursor::new(*buffer.offset_table(), region)?;
        Ok(Self {
            data: buffer.data(),
            cursor,
        })
    }

    /// Walks the buffer's requested region.
    pub fn over_requested<B>(buffer: &'a B) -> Result<Self, Error>
    where
        B: ImageBuffer<N, Pixel = T> + ?Sized,
    {
        Self::new(buffer, buffer.requested_region())
    }

    /// Steps to the next index in raster order, moving to the end sentinel
    /// after the last one. From the reverse end it moves to the begin.
    #[inline]
    pub fn advance(&mut self) {
        advance(&mut self.cursor);
    }

    /// Steps to the previous index in raster order, moving to the reverse
    /// end after the first one. From the end it moves to the last index.
    #[inline]
    pub fn retreat(&mut self) {
        retreat(&mut self.cursor);
    }

    /// Pixel reference without the debug region assertion or slice bounds
    /// check.
    ///
    /// # Safety
    /// Caller must guarantee the iterator is positioned inside its region.
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &'a T {
        // SAFETY: Caller guarantees the position is inside the region, and
        // the region is inside the buffered region validated at
        // construction, so the offset is in bounds of `data`.
        unsafe { self.data.get_unchecked(self.cursor.offset() as usize) }
    }

    /// Remaining pixels, from the current position, as a standard iterator.
    pub fn pixels(self) -> Pixels<'a, T, N> {
        Pixels { it: self }
    }
}

impl<T, const N: usize> RegionWalk<N> for RegionConstIterator<'_, T, N> {
    #[inline]
    fn cursor(&self) -> &Cursor<N> {
        &self.cursor
    }

    #[inline]
    fn cursor_mut(&mut self) -> &mut Cursor<N> {
        &mut self.cursor
    }
}

impl<T, const N: usize> PixelRead for RegionConstIterator<'_, T, N> {
    type Pixel = T;

    #[inline]
    fn value(&self) -> &T {
        &self.data[self.cursor.pixel_offset()]
    }
}

/// Mutable counterpart of [`RegionConstIterator`].
///
/// Holds the buffer's storage exclusively for its lifetime; parallel writers
/// must split the buffer into disjoint views first.
#[derive(Debug)]
pub struct RegionIterator<'a, T, const N: usize> {
    pub(crate) data: &'a mut [T],
    pub(crate) cursor: Cursor<N>,
}

impl<'a, T, const N: usize> RegionIterator<'a, T, N> {
    pub fn new<B>(buffer: &'a mut B, region: Region<N>) -> Result<Self, Error>
    where
        B: ImageBufferMut<N, Pixel = T> + ?Sized,
    {
        let cursor = Cursor::new(*buffer.offset_table(), region)?;
        Ok(Self {
            data: buffer.data_mut(),
            cursor,
        })
    }

    pub fn over_requested<B>(buffer: &'a mut B) -> Result<Self, Error>
    where
        B: ImageBufferMut<N, Pixel = T> + ?Sized,
    {
        let region = buffer.requested_region();
        Self::new(buffer, region)
    }

    #[inline]
    pub fn advance(&mut self) {
        advance(&mut self.cursor);
    }

    #[inline]
    pub fn retreat(&mut self) {
        retreat(&mut self.cursor);
    }

    /// Rewinds and visits every pixel of the region in raster order.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(Index<N>, &mut T)) {
        self.cursor.go_to_begin();
        while !self.cursor.is_at_end() {
            let offset = self.cursor.pixel_offset();
            f(self.cursor.index(), &mut self.data[offset]);
            advance(&mut self.cursor);
        }
    }

    /// Read-only iterator over the same region, positioned at its begin.
    pub fn as_const(&self) -> RegionConstIterator<'_, T, N> {
        let mut cursor = self.cursor;
        cursor.go_to_begin();
        RegionConstIterator {
            data: self.data,
            cursor,
        }
    }
}

impl<T, const N: usize> RegionWalk<N> for RegionIterator<'_, T, N> {
    #[inline]
    fn cursor(&self) -> &Cursor<N> {
        &self.cursor
    }

    #[inline]
    fn cursor_mut(&mut self) -> &mut Cursor<N> {
        &mut self.cursor
    }
}

impl<T, const N: usize> PixelRead for RegionIterator<'_, T, N> {
    type Pixel = T;

    #[inline]
    fn value(&self) -> &T {
        &self.data[self.cursor.pixel_offset()]
    }
}

impl<T, const N: usize> PixelWrite for RegionIterator<'_, T, N> {
    #[inline]
    fn value_mut(&mut self) -> &mut T {
        let offset = self.cursor.pixel_offset();
        &mut self.data[offset]
    }
}

/// See [`RegionConstIterator::pixels`].
#[derive(Debug, Clone)]
pub struct Pixels<'a, T, const N: usize> {
    it: RegionConstIterator<'a, T, N>,
}

impl<'a, T, const N: usize> Iterator for Pixels<'a, T, N> {
    type Item = (Index<N>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.it.cursor.is_at_end() {
            return None;
        }
        let data = self.it.data;
        let item = (self.it.cursor.index(), &data[self.it.cursor.pixel_offset()]);
        advance(&mut self.it.cursor);
        Some(item)
    }
}

#[inline]
fn advance<const N: usize>(cursor: &mut Cursor<N>) {
    if cursor.bound() != WalkBound::Inside {
        cursor.next_line(0);
        return;
    }
    cursor.inc(0, cursor.stride(0));
    if cursor.is_at_end_of_line(0) {
        cursor.next_line(0);
    }
}

#[inline]
fn retreat<const N: usize>(cursor: &mut Cursor<N>) {
    if cursor.bound() != WalkBound::Inside {
        cursor.previous_line(0);
        return;
    }
    cursor.dec(0, cursor.stride(0));
    if cursor.is_at_reverse_end_of_line(0) {
        cursor.previous_line(0);
    }
}
