use log::debug;
use nd_core::{Error, ImageBuffer, ImageBufferMut, Region};

use crate::cursor::Cursor;
use crate::region::{RegionConstIterator, RegionIterator};
use crate::walk::{LineWalk, PixelRead, PixelWrite, RegionWalk};

/// Read-only iterator that walks a region one line at a time along a
/// selectable direction.
///
/// ```
/// use nd_core::{Image, Index, Region, Size};
/// use nd_iter::{LineWalk, LinearConstIterator, PixelRead, RegionWalk};
///
/// let region = Region::new(Index::new([0, 0, 0]), Size::new([2, 3, 4]));
/// let img = Image::new_fill(region, 1u16).unwrap();
///
/// let mut it = LinearConstIterator::new(&img, region).unwrap();
/// it.set_direction(2);
/// it.go_to_begin();
/// let mut sum = 0;
/// while !it.is_at_end() {
///     while !it.is_at_end_of_line() {
///         sum += it.get();
///         it.inc();
///     }
///     it.next_line();
/// }
/// assert_eq!(sum, 24);
/// ```
#[derive(Debug, Clone)]
pub struct LinearConstIterator<'a, T, const N: usize> {
    data: &'a [T],
    cursor: Cursor<N>,
    direction: usize,
    jump: isize,
}

impl<'a, T, const N: usize> LinearConstIterator<'a, T, N> {
    /// Binds to `region` of `buffer`, direction 0, positioned at the begin.
    pub fn new<B>(buffer: &'a B, region: Region<N>) -> Result<Self, Error>
    where
        B: ImageBuffer<N, Pixel = T> + ?Sized,
    {
        let cursor = Cursor::new(*buffer.offset_table(), region)?;
        Ok(Self::from_parts(buffer.data(), cursor))
    }

    /// Like [`LinearConstIterator::new`] with a validated initial direction.
    pub fn with_direction<B>(
        buffer: &'a B,
        region: Region<N>,
        direction: usize,
    ) -> Result<Self, Error>
    where
        B: ImageBuffer<N, Pixel = T> + ?Sized,
    {
        check_direction::<N>(direction)?;
        let mut it = Self::new(buffer, region)?;
        it.set_direction(direction);
        debug!("LinearConstIterator::with_direction direction={direction}");
        Ok(it)
    }

    fn from_parts(data: &'a [T], cursor: Cursor<N>) -> Self {
        Self {
            data,
            cursor,
            direction: 0,
            jump: cursor.stride(0),
        }
    }

    /// Pixel reference without the debug region assertion or slice bounds
    /// check.
    ///
    /// # Safety
    /// Caller must guarantee the iterator is positioned inside its region,
    /// i.e. not at a line end, the end sentinel or the reverse end.
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &'a T {
        // SAFETY: Caller guarantees the position is inside the region, which
        // was validated against the buffered region at construction.
        unsafe { self.data.get_unchecked(self.cursor.offset() as usize) }
    }
}

/// Narrowing cast: keeps position and region, resets the direction to 0.
impl<'a, T, const N: usize> From<RegionConstIterator<'a, T, N>> for LinearConstIterator<'a, T, N> {
    fn from(it: RegionConstIterator<'a, T, N>) -> Self {
        Self::from_parts(it.data, it.cursor)
    }
}

impl<T, const N: usize> RegionWalk<N> for LinearConstIterator<'_, T, N> {
    #[inline]
    fn cursor(&self) -> &Cursor<N> {
        &self.cursor
    }

    #[inline]
    fn cursor_mut(&mut self) -> &mut Cursor<N> {
        &mut self.cursor
    }
}

impl<T, const N: usize> LineWalk<N> for LinearConstIterator<'_, T, N> {
    #[inline]
    fn direction(&self) -> usize {
        self.direction
    }

    #[inline]
    fn jump(&self) -> isize {
        self.jump
    }

    fn set_direction(&mut self, direction: usize) {
        debug_assert!(direction < N, "direction {direction} out of range for {N} dimensions");
        self.direction = direction;
        self.jump = self.cursor.stride(direction);
    }
}

impl<T, const N: usize> PixelRead for LinearConstIterator<'_, T, N> {
    type Pixel = T;

    #[inline]
    fn value(&self) -> &T {
        &self.data[self.cursor.pixel_offset()]
    }
}

/// Mutable counterpart of [`LinearConstIterator`].
#[derive(Debug)]
pub struct LinearIterator<'a, T, const N: usize> {
    data: &'a mut [T],
    cursor: Cursor<N>,
    direction: usize,
    jump: isize,
}

impl<'a, T, const N: usize> LinearIterator<'a, T, N> {
    pub fn new<B>(buffer: &'a mut B, region: Region<N>) -> Result<Self, Error>
    where
        B: ImageBufferMut<N, Pixel = T> + ?Sized,
    {
        let cursor = Cursor::new(*buffer.offset_table(), region)?;
        Ok(Self::from_parts(buffer.data_mut(), cursor))
    }

    pub fn with_direction<B>(
        buffer: &'a mut B,
        region: Region<N>,
        direction: usize,
    ) -> Result<Self, Error>
    where
        B: ImageBufferMut<N, Pixel = T> + ?Sized,
    {
        check_direction::<N>(direction)?;
        let mut it = Self::new(buffer, region)?;
        it.set_direction(direction);
        debug!("LinearIterator::with_direction direction={direction}");
        Ok(it)
    }

    fn from_parts(data: &'a mut [T], cursor: Cursor<N>) -> Self {
        let jump = cursor.stride(0);
        Self {
            data,
            cursor,
            direction: 0,
            jump,
        }
    }

    /// Read-only iterator over the same region and direction, positioned at
    /// the region's begin.
    pub fn as_const(&self) -> LinearConstIterator<'_, T, N> {
        let mut cursor = self.cursor;
        cursor.go_to_begin();
        LinearConstIterator {
            data: self.data,
            cursor,
            direction: self.direction,
            jump: self.jump,
        }
    }
}

impl<'a, T, const N: usize> From<RegionIterator<'a, T, N>> for LinearIterator<'a, T, N> {
    fn from(it: RegionIterator<'a, T, N>) -> Self {
        Self::from_parts(it.data, it.cursor)
    }
}

impl<T, const N: usize> RegionWalk<N> for LinearIterator<'_, T, N> {
    #[inline]
    fn cursor(&self) -> &Cursor<N> {
        &self.cursor
    }

    #[inline]
    fn cursor_mut(&mut self) -> &mut Cursor<N> {
        &mut self.cursor
    }
}

impl<T, const N: usize> LineWalk<N> for LinearIterator<'_, T, N> {
    #[inline]
    fn direction(&self) -> usize {
        self.direction
    }

    #[inline]
    fn jump(&self) -> isize {
        self.jump
    }

    fn set_direction(&mut self, direction: usize) {
        debug_assert!(direction < N, "direction {direction} out of range for {N} dimensions");
        self.direction = direction;
        self.jump = self.cursor.stride(direction);
    }
}

impl<T, const N: usize> PixelRead for LinearIterator<'_, T, N> {
    type Pixel = T;

    #[inline]
    fn value(&self) -> &T {
        &self.data[self.cursor.pixel_offset()]
    }
}

impl<T, const N: usize> PixelWrite for LinearIterator<'_, T, N> {
    #[inline]
    fn value_mut(&mut self) -> &mut T {
        let offset = self.cursor.pixel_offset();
        &mut self.data[offset]
    }
}

fn check_direction<const N: usize>(direction: usize) -> Result<(), Error> {
    if direction >= N {
        return Err(Error::InvalidDirection {
            direction,
            dims: N,
        });
    }
    Ok(())
}
