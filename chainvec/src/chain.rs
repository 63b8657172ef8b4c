use std::collections::TryReserveError;
use std::num::NonZeroUsize;

use crate::value::Value;

/// Identity of one node in a [Chain]. Ids are handed out in append
/// order and never reused; the `NonZeroUsize` niche keeps
/// `Option<NodeId>` pointer-sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(NonZeroUsize);

impl NodeId {
  /// Maps an id to the arena slot it names.
  pub(crate) fn to_slot(self) -> usize {
    usize::from(self.0) - 1
  }

  pub(crate) fn from_slot(slot: usize) -> NodeId {
    // A `Vec` arena is capped well below `usize::MAX` slots, so
    // `slot + 1` neither wraps nor hits zero.
    match NonZeroUsize::new(slot + 1) {
      Some(id) => NodeId(id),
      None => unreachable!(),
    }
  }
}

/// One storage cell: a value and the forward link to the next cell.
/// Links only ever point at later slots, so the chain stays acyclic.
#[derive(Debug)]
pub(crate) struct Node {
  pub(crate) value: Value,
  pub(crate) next: Option<NodeId>,
}

/// Append-only arena holding every node of one array, the permanent
/// anchor node included.
///
/// Slot 0 is always the anchor. Real elements occupy slots `1..` in
/// append order, which is what turns index resolution into a direct
/// lookup: the node `index + 1` hops past the anchor is exactly the
/// node in slot `index + 1`.
#[derive(Debug)]
pub(crate) struct Chain {
  nodes: Vec<Node>,
}

impl Chain {
  /// Creates a chain holding only the anchor node. The anchor's value
  /// is an inert filler that no index ever resolves to.
  pub(crate) fn new() -> Chain {
    let anchor = Node {
      value: Value::Int(0),
      next: None,
    };
    Chain {
      nodes: vec![anchor],
    }
  }

  pub(crate) fn anchor(&self) -> NodeId {
    NodeId::from_slot(0)
  }

  /// Appends a freshly allocated node with no outgoing link and
  /// returns its id.
  pub(crate) fn alloc(&mut self, value: Value) -> NodeId {
    self.nodes.push(Node { value, next: None });
    NodeId::from_slot(self.nodes.len() - 1)
  }

  /// Fallible form of [Chain::alloc]: reserves the slot up front so
  /// exhaustion surfaces as an error instead of an abort.
  pub(crate) fn try_alloc(&mut self, value: Value) -> Result<NodeId, TryReserveError> {
    self.nodes.try_reserve(1)?;
    Ok(self.alloc(value))
  }

  pub(crate) fn node(&self, id: NodeId) -> &Node {
    &self.nodes[id.to_slot()]
  }

  pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
    &mut self.nodes[id.to_slot()]
  }

  /// Total number of nodes, anchor included.
  #[cfg(test)]
  pub(crate) fn node_count(&self) -> usize {
    self.nodes.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn anchor_occupies_the_first_slot() {
    let chain = Chain::new();
    assert_eq!(1, chain.node_count());
    assert_eq!(0, chain.anchor().to_slot());
    assert_eq!(None, chain.node(chain.anchor()).next);
  }

  #[test]
  fn ids_are_dense_and_stable() {
    let mut chain = Chain::new();
    let a = chain.alloc(Value::Int(1));
    let b = chain.alloc(Value::Int(2));
    assert_ne!(a, b);
    assert_eq!(3, chain.node_count());
    assert_eq!(Value::Int(1), chain.node(a).value);
    assert_eq!(Value::Int(2), chain.node(b).value);

    chain.node_mut(a).value = Value::Int(9);
    assert_eq!(Value::Int(9), chain.node(a).value);
  }

  #[test]
  fn try_alloc_hands_out_the_next_slot() {
    let mut chain = Chain::new();
    let id = chain.try_alloc(Value::from("stored")).unwrap();
    assert_eq!(1, id.to_slot());
    assert_eq!(Value::from("stored"), chain.node(id).value);
  }

  #[test]
  fn slot_mapping_round_trips() {
    for slot in [0usize, 1, 2, 1000] {
      assert_eq!(slot, NodeId::from_slot(slot).to_slot());
    }
  }
}
