#![warn(rust_2018_idioms)]

//! A growable, index-addressable array stored as a singly linked chain
//! of nodes rather than one contiguous buffer.
//!
//! [ChainVec] keeps the classic linked layout of the structure: a
//! permanent anchor node ahead of every element, a tail reference for
//! O(1) appends, and an element count that bounds index resolution.
//! The nodes themselves live in an append-only arena, so resolving an
//! index to its node is a direct slot lookup instead of an O(index)
//! walk, while the forward links still give the chain its order.

mod array;
mod chain;
mod diagnostics;
mod value;

pub use array::ChainVec;
pub use diagnostics::ChainVecError;
pub use value::Value;
