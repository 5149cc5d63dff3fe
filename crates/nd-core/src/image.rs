use log::debug;

use crate::error::Error;
use crate::index::Index;
use crate::offset::OffsetTable;
use crate::region::Region;
use crate::traits::{ImageBuffer, ImageBufferMut};

/// Owned, packed N-dimensional image.
///
/// Keeps the three regions a pipeline negotiates: the largest possible
/// region, the buffered region backed by `data`, and the requested region
/// an algorithm is allowed to walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T, const N: usize> {
    largest: Region<N>,
    requested: Region<N>,
    table: OffsetTable<N>,
    data: Vec<T>,
}

impl<T, const N: usize> Image<T, N> {
    pub fn from_vec(region: Region<N>, data: Vec<T>) -> Result<Self, Error> {
        let table = OffsetTable::packed(&region)?;
        if data.len() != table.required_len() {
            return Err(Error::SizeMismatch {
                expected: table.required_len(),
                actual: data.len(),
            });
        }

        Ok(Self {
            largest: region,
            requested: region,
            table,
            data,
        })
    }

    pub fn largest_possible_region(&self) -> Region<N> {
        self.largest
    }

    /// Widens the largest possible region. The buffered region must stay
    /// inside it.
    pub fn set_largest_possible_region(&mut self, region: Region<N>) -> Result<(), Error> {
        let buffered = self.table.buffered_region();
        if !region.contains_region(&buffered) {
            return Err(Error::region_outside(&buffered, &region));
        }
        self.largest = region;
        Ok(())
    }

    pub fn set_requested_region(&mut self, region: Region<N>) -> Result<(), Error> {
        let buffered = self.table.buffered_region();
        if !buffered.contains_region(&region) {
            return Err(Error::region_outside(&region, &buffered));
        }
        debug!("Image::set_requested_region {region}");
        self.requested = region;
        Ok(())
    }

    pub fn get(&self, index: &Index<N>) -> Option<&T> {
        if !self.table.buffered_region().is_inside(index) {
            return None;
        }
        self.data.get(self.table.offset(index) as usize)
    }

    pub fn get_mut(&mut self, index: &Index<N>) -> Option<&mut T> {
        if !self.table.buffered_region().is_inside(index) {
            return None;
        }
        self.data.get_mut(self.table.offset(index) as usize)
    }

    pub fn as_view(&self) -> ImageView<'_, T, N> {
        ImageView {
            table: self.table,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> ImageViewMut<'_, T, N> {
        ImageViewMut {
            table: self.table,
            data: &mut self.data,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone, const N: usize> Image<T, N> {
    pub fn new_fill(region: Region<N>, value: T) -> Result<Self, Error> {
        let len = region.num_elements().ok_or(Error::Overflow)?;
        Self::from_vec(region, vec![value; len])
    }
}

impl<T, const N: usize> ImageBuffer<N> for Image<T, N> {
    type Pixel = T;

    fn offset_table(&self) -> &OffsetTable<N> {
        &self.table
    }

    fn data(&self) -> &[T] {
        &self.data
    }

    fn requested_region(&self) -> Region<N> {
        self.requested
    }
}

impl<T, const N: usize> ImageBufferMut<N> for Image<T, N> {
    fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

/// Borrowed, possibly padded, read-only image buffer.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T, const N: usize> {
    table: OffsetTable<N>,
    data: &'a [T],
}

impl<'a, T, const N: usize> ImageView<'a, T, N> {
    pub fn from_slice(buffered: Region<N>, data: &'a [T]) -> Result<Self, Error> {
        Self::with_table(OffsetTable::packed(&buffered)?, data)
    }

    pub fn from_slice_with_strides(
        buffered: Region<N>,
        strides: [usize; N],
        data: &'a [T],
    ) -> Result<Self, Error> {
        Self::with_table(OffsetTable::with_strides(&buffered, strides)?, data)
    }

    fn with_table(table: OffsetTable<N>, data: &'a [T]) -> Result<Self, Error> {
        if data.len() < table.required_len() {
            return Err(Error::SizeMismatch {
                expected: table.required_len(),
                actual: data.len(),
            });
        }
        Ok(Self { table, data })
    }

    pub fn get(&self, index: &Index<N>) -> Option<&'a T> {
        if !self.table.buffered_region().is_inside(index) {
            return None;
        }
        self.data.get(self.table.offset(index) as usize)
    }

    /// Narrows the view to `region` without copying. The result keeps the
    /// parent's strides, so it is non-contiguous whenever `region` is
    /// narrower than the parent along any but the highest dimension.
    pub fn subview(&self, region: Region<N>) -> Result<ImageView<'a, T, N>, Error> {
        let (table, start) = narrow(&self.table, region)?;
        let tail = self.data.get(start..).ok_or(Error::Overflow)?;
        Self::with_table(table, tail)
    }
}

impl<T, const N: usize> ImageBuffer<N> for ImageView<'_, T, N> {
    type Pixel = T;

    fn offset_table(&self) -> &OffsetTable<N> {
        &self.table
    }

    fn data(&self) -> &[T] {
        self.data
    }
}

/// Borrowed, possibly padded, mutable image buffer.
#[derive(Debug)]
pub struct ImageViewMut<'a, T, const N: usize> {
    table: OffsetTable<N>,
    data: &'a mut [T],
}

impl<'a, T, const N: usize> ImageViewMut<'a, T, N> {
    pub fn from_slice_mut(buffered: Region<N>, data: &'a mut [T]) -> Result<Self, Error> {
        Self::with_table(OffsetTable::packed(&buffered)?, data)
    }

    pub fn from_slice_with_strides_mut(
        buffered: Region<N>,
        strides: [usize; N],
        data: &'a mut [T],
    ) -> Result<Self, Error> {
        Self::with_table(OffsetTable::with_strides(&buffered, strides)?, data)
    }

    fn with_table(table: OffsetTable<N>, data: &'a mut [T]) -> Result<Self, Error> {
        if data.len() < table.required_len() {
            return Err(Error::SizeMismatch {
                expected: table.required_len(),
                actual: data.len(),
            });
        }
        Ok(Self { table, data })
    }

    pub fn get(&self, index: &Index<N>) -> Option<&T> {
        if !self.table.buffered_region().is_inside(index) {
            return None;
        }
        self.data.get(self.table.offset(index) as usize)
    }

    pub fn get_mut(&mut self, index: &Index<N>) -> Option<&mut T> {
        if !self.table.buffered_region().is_inside(index) {
            return None;
        }
        self.data.get_mut(self.table.offset(index) as usize)
    }

    pub fn as_view(&self) -> ImageView<'_, T, N> {
        ImageView {
            table: self.table,
            data: self.data,
        }
    }

    pub fn subview(&self, region: Region<N>) -> Result<ImageView<'_, T, N>, Error> {
        self.as_view().subview(region)
    }

    pub fn subview_mut(&mut self, region: Region<N>) -> Result<ImageViewMut<'_, T, N>, Error> {
        let (table, start) = narrow(&self.table, region)?;
        if start > self.data.len() {
            return Err(Error::Overflow);
        }
        let (_, tail) = self.data.split_at_mut(start);
        ImageViewMut::with_table(table, tail)
    }
}

impl<T, const N: usize> ImageBuffer<N> for ImageViewMut<'_, T, N> {
    type Pixel = T;

    fn offset_table(&self) -> &OffsetTable<N> {
        &self.table
    }

    fn data(&self) -> &[T] {
        self.data
    }
}

impl<T, const N: usize> ImageBufferMut<N> for ImageViewMut<'_, T, N> {
    fn data_mut(&mut self) -> &mut [T] {
        self.data
    }
}

/// Re-anchors `parent` at `region` and returns the element offset of the
/// region origin within the parent storage.
fn narrow<const N: usize>(
    parent: &OffsetTable<N>,
    region: Region<N>,
) -> Result<(OffsetTable<N>, usize), Error> {
    let buffered = parent.buffered_region();
    if !buffered.contains_region(&region) {
        return Err(Error::region_outside(&region, &buffered));
    }
    let table = OffsetTable::with_strides(&region, *parent.strides())?;
    let start = if region.is_empty() {
        0
    } else {
        parent.offset(&region.origin) as usize
    };
    Ok((table, start))
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView, ImageViewMut};
    use crate::error::Error;
    use crate::index::{Index, Size};
    use crate::region::Region;
    use crate::traits::ImageBuffer;

    fn region2(x: isize, y: isize, w: usize, h: usize) -> Region<2> {
        Region::new(Index::new([x, y]), Size::new([w, h]))
    }

    #[test]
    fn from_vec_checks_length() {
        let err = Image::from_vec(region2(0, 0, 3, 2), vec![0u8; 5]).unwrap_err();
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn get_uses_buffered_origin() {
        let img = Image::from_vec(region2(10, 20, 3, 2), vec![1u8, 2, 3, 4, 5, 6])
            .expect("valid image");

        assert_eq!(img.get(&Index::new([10, 20])), Some(&1));
        assert_eq!(img.get(&Index::new([12, 21])), Some(&6));
        assert_eq!(img.get(&Index::new([13, 21])), None);
        assert_eq!(img.get(&Index::new([0, 0])), None);
    }

    #[test]
    fn requested_region_must_fit_buffer() {
        let mut img = Image::new_fill(region2(0, 0, 8, 12), 0i16).expect("valid image");
        assert_eq!(img.requested_region(), region2(0, 0, 8, 12));

        img.set_requested_region(region2(2, 3, 4, 5))
            .expect("inside buffer");
        assert_eq!(img.requested_region(), region2(2, 3, 4, 5));

        let err = img.set_requested_region(region2(6, 0, 4, 1)).unwrap_err();
        assert!(matches!(err, Error::RegionOutsideBuffer { .. }));
        assert_eq!(img.requested_region(), region2(2, 3, 4, 5));
    }

    #[test]
    fn largest_region_must_cover_buffer() {
        let mut img = Image::new_fill(region2(0, 0, 4, 4), 0u8).expect("valid image");

        img.set_largest_possible_region(region2(-4, -4, 16, 16))
            .expect("covers buffer");
        assert_eq!(img.largest_possible_region(), region2(-4, -4, 16, 16));
        assert!(img.set_largest_possible_region(region2(1, 0, 4, 4)).is_err());
    }

    #[test]
    fn padded_view_indexing() {
        let data = vec![1u8, 2, 3, 99, 4, 5, 6, 88];
        let view = ImageView::from_slice_with_strides(region2(0, 0, 3, 2), [1, 4], &data)
            .expect("valid view");

        assert_eq!(view.get(&Index::new([0, 1])), Some(&4));
        assert_eq!(view.get(&Index::new([2, 1])), Some(&6));
        assert_eq!(view.get(&Index::new([3, 1])), None);
    }

    #[test]
    fn subview_keeps_parent_strides_and_coordinates() {
        let data = vec![
            10u8, 11, 12, 13, 99, // row 0
            20, 21, 22, 23, 98, // row 1
            30, 31, 32, 33, 97, // row 2
        ];
        let parent = ImageView::from_slice_with_strides(region2(0, 0, 4, 3), [1, 5], &data)
            .expect("valid parent");
        let sub = parent.subview(region2(1, 1, 3, 2)).expect("valid subview");

        assert_eq!(sub.buffered_region(), region2(1, 1, 3, 2));
        assert_eq!(sub.offset_table().strides(), &[1, 5]);
        assert_eq!(sub.get(&Index::new([1, 1])), Some(&21));
        assert_eq!(sub.get(&Index::new([3, 2])), Some(&33));
        assert_eq!(sub.get(&Index::new([0, 1])), None);
        assert!(parent.subview(region2(2, 2, 3, 1)).is_err());
    }

    #[test]
    fn subview_mut_writes_through() {
        let mut data = vec![
            1u8, 2, 3, 4, // row 0
            5, 6, 7, 8, // row 1
            9, 10, 11, 12, // row 2
        ];
        let mut parent =
            ImageViewMut::from_slice_mut(region2(0, 0, 4, 3), &mut data).expect("valid parent");
        let mut sub = parent.subview_mut(region2(1, 0, 2, 3)).expect("valid subview");
        *sub.get_mut(&Index::new([1, 2])).expect("in bounds") = 42;

        assert_eq!(sub.get(&Index::new([2, 0])), Some(&3));
        assert_eq!(data[9], 42);
    }
}
