//! Foundational primitives for N-dimensional image traversal.
//!
//! ## Index Model
//! An [`Index`] is a signed logical position, a [`Size`] an unsigned extent,
//! and a [`Region`] the half-open box `[origin, origin + size)`. Dimension 0
//! varies fastest in memory: index `[col, row, slice, ...]`.
//!
//! ## Buffered and Requested Regions
//! Storage backs the *buffered* region. Algorithms walk a *requested* region
//! that must be contained in it. Containment is validated once, when a view
//! or iterator is constructed, never per pixel.
//!
//! ## Stride Table
//! [`OffsetTable`] is the only sanctioned path from an index to backing
//! storage. Strides are in elements (not bytes) and may exceed the packed
//! strides, which allows borrowed views over padded buffers and subviews.

mod error;
mod image;
mod index;
mod offset;
mod region;
mod traits;

pub use error::Error;
pub use image::{Image, ImageView, ImageViewMut};
pub use index::{Index, Size};
pub use offset::OffsetTable;
pub use region::Region;
pub use traits::{ImageBuffer, ImageBufferMut};
