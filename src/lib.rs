//! Rangeindex - Static-Size Range Query Indexes
//!
//! A [`RangeIndex`] answers aggregate queries - "what is the sum of
//! elements 3 through 9?", "what is the largest element between 0 and
//! 40?" - over a fixed-length array of integers, in logarithmic time.
//! It is an array-backed [segment tree](https://en.wikipedia.org/wiki/Segment_tree):
//! a complete binary tree stored in one contiguous buffer where every
//! node caches the aggregate of a contiguous sub-range, leaves cover
//! single positions, and a point update recombines only the nodes on
//! one root-to-leaf path.
//!
//! The aggregate itself is an injected policy. [`Aggregate`] supplies
//! the combining operator and its identity element, and one tree walk
//! serves every policy. Two instantiations are provided:
//!
//! * [`SumIndex`] - range sums, identity `0`.
//! * [`MaxIndex`] - range maximums, identity `i64::MIN`.
//!
//! The index is static in size: the number of positions is fixed at
//! construction and the backing storage is never resized. There is no
//! lazy propagation or range update - writes are per-position only.
//!
//! # Examples
//! ```
//! use rangeindex::SumIndex;
//!
//! let mut index = SumIndex::from_slice(&[2, 3, -1, 5, -2, 4, 8, 10])?;
//! assert_eq!(index.query(0, 7)?, 29);
//!
//! index.update(3, 4)?;
//! assert_eq!(index.query(0, 7)?, 28);
//! assert_eq!(index.query(3, 3)?, 4);
//! # Ok::<(), rangeindex::RangeIndexError>(())
//! ```
//!
//! All operations are synchronous and run to completion in one call
//! frame. The index provides no internal synchronisation - if it must
//! be shared between threads, wrap it in a lock.

#![deny(warnings)]
#![warn(unused_extern_crates)]
#![warn(missing_docs)]

pub mod aggregate;
pub mod index;

pub use aggregate::{Aggregate, Max, Sum};
pub use index::{MaxIndex, RangeIndex, RangeIndexError, SumIndex};
