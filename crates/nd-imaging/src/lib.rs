//! Umbrella crate for the `nd-imaging` workspace.
//!
//! Re-exports the index/region/stride primitives and the region iterators
//! built on them.

pub use nd_core::*;
pub use nd_iter::*;
