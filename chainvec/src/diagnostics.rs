use std::collections::TryReserveError;

use miette::Diagnostic;
use thiserror::Error;

/// Every way a [ChainVec](crate::ChainVec) operation can fail.
///
/// Invalid indices are non-fatal and leave the structure untouched;
/// allocation failure only arises through the fallible append path.
#[derive(Debug, Error, Diagnostic)]
pub enum ChainVecError {
  #[error("index {index} out of bounds for array of length {count}")]
  IndexOutOfBounds { index: usize, count: usize },
  #[error("failed to reserve storage for a new node")]
  NodeAlloc(#[from] TryReserveError),
}
