use serde::{ser::SerializeSeq, Serialize};

use crate::chain::{Chain, NodeId};
use crate::diagnostics::ChainVecError;
use crate::value::Value;

/// [ChainVec] is a growable, index-addressable array of [Value]s laid
/// out as a singly linked chain of nodes instead of one contiguous
/// buffer.
///
/// The chain always begins at a permanent anchor node that stores no
/// element, so every real element has a predecessor and appending
/// never branches on emptiness. `last` tracks the true tail, which
/// keeps appends O(1); `count` bounds index resolution. Because the
/// nodes live in an append-only arena, resolving an index is a direct
/// slot lookup rather than the O(index) walk the link layout would
/// otherwise force, while the `next` links still carry the chain's
/// order.
///
/// There is no removal, middle insertion, shrinking, or public
/// iteration; the structure only ever grows at the tail.
#[derive(Debug)]
pub struct ChainVec {
  chain: Chain,
  /// The permanent anchor node. Never removed, never addressed by any
  /// index.
  first: NodeId,
  /// The true tail; equals `first` while the array is empty.
  last: NodeId,
  /// Number of real (non-anchor) elements.
  count: usize,
}

impl Default for ChainVec {
  fn default() -> Self {
    Self::new()
  }
}

impl ChainVec {
  /// Creates an empty array: just the anchor, with `first` and `last`
  /// both pointing at it.
  pub fn new() -> ChainVec {
    let chain = Chain::new();
    let anchor = chain.anchor();
    ChainVec {
      chain,
      first: anchor,
      last: anchor,
      count: 0,
    }
  }

  /// Appends `value` as the new last element.
  pub fn push(&mut self, value: Value) {
    let id = self.chain.alloc(value);
    self.link_tail(id);
  }

  /// Appends `value` like [ChainVec::push], but surfaces storage
  /// exhaustion as [ChainVecError::NodeAlloc] instead of aborting.
  pub fn try_push(&mut self, value: Value) -> Result<(), ChainVecError> {
    let id = self.chain.try_alloc(value)?;
    self.link_tail(id);
    Ok(())
  }

  /// Links a freshly allocated node after the current tail.
  fn link_tail(&mut self, id: NodeId) {
    self.chain.node_mut(self.last).next = Some(id);
    self.last = id;
    self.count += 1;
  }

  /// Returns the element at `index`, or `None` when `index` does not
  /// address a real element. Out-of-range reads never panic and are
  /// never conflated with a stored value.
  pub fn get(&self, index: usize) -> Option<&Value> {
    let id = self.resolve(index)?;
    Some(&self.chain.node(id).value)
  }

  /// Overwrites the element at `index` with `value`. On an invalid
  /// index the write is discarded, the structure is untouched, and the
  /// failure is reported. Never changes `count` or the chain shape.
  pub fn set(&mut self, index: usize, value: Value) -> Result<(), ChainVecError> {
    match self.resolve(index) {
      Some(id) => {
        self.chain.node_mut(id).value = value;
        Ok(())
      }
      None => Err(ChainVecError::IndexOutOfBounds {
        index,
        count: self.count,
      }),
    }
  }

  /// Number of elements, the anchor excluded.
  pub fn len(&self) -> usize {
    self.count
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Resolves `index` to its node. Only `index < count` addresses a
  /// real element; element `index` sits `index + 1` hops past the
  /// anchor, which in arena terms is exactly slot `index + 1`.
  fn resolve(&self, index: usize) -> Option<NodeId> {
    if index < self.count {
      Some(NodeId::from_slot(index + 1))
    } else {
      None
    }
  }

  /// Resolves `index` by the definitional rule: start at the anchor
  /// and follow `next` exactly `index + 1` times. The direct lookup in
  /// [ChainVec::resolve] must agree with this walk everywhere.
  #[cfg(test)]
  fn walk(&self, index: usize) -> Option<NodeId> {
    let mut node = Some(self.first);
    for _ in 0..=index {
      node = self.chain.node(node?).next;
    }
    node
  }
}

impl std::fmt::Display for ChainVec {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "[")?;
    let mut link = self.chain.node(self.first).next;
    let mut trailing = false;
    while let Some(id) = link {
      let node = self.chain.node(id);
      if trailing {
        write!(f, ", ")?;
      }
      write!(f, "{}", node.value)?;
      trailing = true;
      link = node.next;
    }
    write!(f, "]")
  }
}

impl Serialize for ChainVec {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    let mut seq = serializer.serialize_seq(Some(self.count))?;
    let mut link = self.chain.node(self.first).next;
    while let Some(id) = link {
      let node = self.chain.node(id);
      seq.serialize_element(&node.value)?;
      link = node.next;
    }
    seq.end()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn squares(n: i64) -> ChainVec {
    let mut array = ChainVec::new();
    for i in 0..n {
      array.push(Value::Int(i * i));
    }
    array
  }

  #[test]
  fn append_then_read_identity() {
    let array = squares(10);
    assert_eq!(10, array.len());
    for i in 0..10i64 {
      assert_eq!(Some(&Value::Int(i * i)), array.get(i as usize));
    }
  }

  #[test]
  fn get_out_of_bounds_is_none() {
    let array = squares(10);
    assert_eq!(None, array.get(10));
    assert_eq!(None, array.get(100));
    assert_eq!(None, ChainVec::new().get(0));
  }

  #[test]
  fn set_overwrites_only_its_slot() {
    let mut array = squares(3);
    array.set(0, Value::Float(3.141593)).unwrap();
    assert_eq!(Some(&Value::Float(3.141593)), array.get(0));
    assert_eq!(Some(&Value::Int(1)), array.get(1));
    assert_eq!(Some(&Value::Int(4)), array.get(2));
    assert_eq!(3, array.len());
  }

  #[test]
  fn set_out_of_bounds_changes_nothing() {
    let mut array = squares(3);

    let err = array.set(3, Value::Int(7)).unwrap_err();
    assert!(matches!(
      err,
      ChainVecError::IndexOutOfBounds { index: 3, count: 3 }
    ));
    let err = array.set(1000, Value::Int(7)).unwrap_err();
    assert!(matches!(
      err,
      ChainVecError::IndexOutOfBounds {
        index: 1000,
        count: 3
      }
    ));

    for i in 0..3i64 {
      assert_eq!(Some(&Value::Int(i * i)), array.get(i as usize));
    }
    assert_eq!(3, array.len());
  }

  #[test]
  fn growth_is_monotonic() {
    let mut array = ChainVec::new();
    assert!(array.is_empty());
    for k in 1..=32i64 {
      array.push(Value::Int(k));
      assert_eq!(k as usize, array.len());
    }
    assert!(!array.is_empty());
  }

  #[test]
  fn try_push_appends_like_push() {
    let mut array = ChainVec::new();
    array.try_push(Value::Int(1)).unwrap();
    array.try_push(Value::from("two")).unwrap();
    assert_eq!(2, array.len());
    assert_eq!(Some(&Value::Int(1)), array.get(0));
    assert_eq!(Some(&Value::from("two")), array.get(1));
  }

  #[test]
  fn mixed_type_round_trip() {
    let mut array = ChainVec::new();
    for i in 0..3i64 {
      array.push(Value::Int(i * i));
    }
    assert_eq!(Some(&Value::Int(0)), array.get(0));
    assert_eq!(Some(&Value::Int(1)), array.get(1));
    assert_eq!(Some(&Value::Int(4)), array.get(2));

    array.set(0, Value::Float(3.141593)).unwrap();
    assert_eq!(Some(&Value::Float(3.141593)), array.get(0));
    assert_eq!(Some(&Value::Int(1)), array.get(1));
    assert_eq!(Some(&Value::Int(4)), array.get(2));
  }

  #[test]
  fn rebuild_reads_back_the_same_texts() {
    let texts = [
      "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
      "tenth",
    ];

    let mut array = ChainVec::new();
    for text in texts {
      array.push(Value::from(text));
    }
    drop(array);

    let mut array = ChainVec::new();
    for text in texts {
      array.push(Value::from(text));
    }
    for (i, text) in texts.iter().enumerate() {
      assert_eq!(Some(&Value::from(*text)), array.get(i));
    }
  }

  #[test]
  fn empty_array_is_just_the_anchor() {
    let array = ChainVec::new();
    assert_eq!(0, array.len());
    assert_eq!(1, array.chain.node_count());
    assert_eq!(array.first, array.last);
  }

  #[test]
  fn traversal_agrees_with_direct_resolution() {
    let array = squares(16);
    for i in 0..16 {
      assert_eq!(array.walk(i), array.resolve(i));
      assert!(array.resolve(i).is_some());
    }
    assert_eq!(None, array.walk(16));
    assert_eq!(None, array.resolve(16));
  }

  #[test]
  fn tail_is_count_hops_from_the_anchor() {
    let mut array = ChainVec::new();
    for k in 0..8i64 {
      array.push(Value::Int(k));
      assert_eq!(Some(array.last), array.walk(array.count - 1));
      assert_eq!(array.count + 1, array.chain.node_count());
    }
  }

  #[test]
  fn display_lists_elements_in_chain_order() {
    let mut array = ChainVec::new();
    array.push(Value::Int(1));
    array.push(Value::Float(2.5));
    array.push(Value::from("two and a half"));
    assert_eq!("[1, 2.5, two and a half]", array.to_string());
    assert_eq!("[]", ChainVec::new().to_string());
  }
}
