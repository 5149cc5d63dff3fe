//! Region-constrained strided iterators over N-dimensional images.
//!
//! Every iterator here is a cursor into storage it does not own: it borrows
//! the buffer for its lifetime, walks a region validated against the buffered
//! region once at construction, and reaches pixels only through the buffer's
//! stride table.
//!
//! Two walking styles share one position model ([`Cursor`]):
//! - [`RegionConstIterator`] / [`RegionIterator`] step in raster order
//!   (dimension 0 fastest) and change lines implicitly.
//! - [`LinearConstIterator`] / [`LinearIterator`] step along a selectable
//!   active direction and leave line changes to the caller:
//!   `inc` until `is_at_end_of_line`, then `next_line`, until `is_at_end`.
//!
//! `next_line` rewinds the active coordinate and advances the remaining
//! dimensions like a mixed-radix counter (lowest dimension first, each with
//! the radix of its region extent). `previous_line` is the matching borrow.
//!
//! Stepping is unchecked arithmetic. Positional preconditions are
//! `debug_assert!`s; in release builds a cursor left outside its region is
//! only caught by slice indexing when dereferenced.

mod cursor;
mod linear;
mod region;
mod walk;

pub use cursor::{Cursor, WalkBound};
pub use linear::{LinearConstIterator, LinearIterator};
pub use region::{Pixels, RegionConstIterator, RegionIterator};
pub use walk::{LineStarts, LineWalk, PixelRead, PixelWrite, RegionWalk};
