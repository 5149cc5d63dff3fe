//! Example: fill an 8x12 image row by row, then read it back column by
//! column through a padded sub-view.
//!
//! Run from the workspace root:
//!   cargo run -p nd-imaging --example line_walk

use nd_imaging::{
    ImageView, ImageViewMut, Index, LineWalk, LinearConstIterator, LinearIterator, PixelRead,
    PixelWrite, Region, RegionWalk, Size,
};

fn main() -> Result<(), nd_imaging::Error> {
    let buffered = Region::from_size(Size::new([8, 12]));
    // Row pitch of 10 elements: two padding elements after each row.
    let mut data = vec![0i16; 10 * 12];

    let mut view = ImageViewMut::from_slice_with_strides_mut(buffered, [1, 10], &mut data)?;
    let mut writer = LinearIterator::new(&mut view, buffered)?;
    while !writer.is_at_end() {
        while !writer.is_at_end_of_line() {
            let idx = writer.index();
            writer.set((idx[0] + 8 * idx[1]) as i16);
            writer.inc();
        }
        writer.next_line();
    }

    let view = ImageView::from_slice_with_strides(buffered, [1, 10], &data)?;
    let window = Region::new(Index::new([2, 3]), Size::new([3, 4]));
    let inner = view.subview(window)?;
    let mut reader = LinearConstIterator::with_direction(&inner, window, 1)?;
    while !reader.is_at_end() {
        let start = reader.index();
        let mut column = Vec::new();
        while !reader.is_at_end_of_line() {
            column.push(reader.get());
            reader.inc();
        }
        println!("column from {start}: {column:?}");
        reader.next_line();
    }
    Ok(())
}
