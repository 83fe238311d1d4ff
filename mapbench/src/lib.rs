//! # mapbench
//!
//! Measurement lab for the `vecmap-rs` containers: standard-map baselines,
//! a bump-pointer arena, random string generation, and the criterion
//! benches that drive them. Nothing here is part of the core API; it exists
//! to answer "is the sorted-vector map faster than the standard one, and
//! when?".

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arena;
pub mod simple;
pub mod small;
pub mod strings;

pub use arena::Arena;
pub use simple::SimpleMap;
pub use small::SmallSortedMap;
