//! Walk configurations and traversal reports for the `nd_walk` tool.
//!
//! The dimension count of a walk is only known at run time (it comes from a
//! JSON file or CLI flags), so [`run_walk`] dispatches to the const-generic
//! iterators for 1 to 4 dimensions.

mod config;
mod report;

pub use config::{MAX_BUFFER_ELEMENTS, WalkConfig, load_config};
pub use report::{MAX_ORDER_ENTRIES, WalkReport, run_walk};
