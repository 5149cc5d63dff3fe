use crate::offset::OffsetTable;
use crate::region::Region;

/// Read access to a buffer addressable by linear offset.
///
/// This is the whole contract the iterators rely on: a stride table anchored
/// at the buffered region, and element storage behind it.
pub trait ImageBuffer<const N: usize> {
    type Pixel;

    fn offset_table(&self) -> &OffsetTable<N>;

    fn data(&self) -> &[Self::Pixel];

    fn buffered_region(&self) -> Region<N> {
        self.offset_table().buffered_region()
    }

    /// Portion of the buffer an algorithm is permitted to touch.
    fn requested_region(&self) -> Region<N> {
        self.buffered_region()
    }
}

pub trait ImageBufferMut<const N: usize>: ImageBuffer<N> {
    fn data_mut(&mut self) -> &mut [Self::Pixel];
}
