//! Value nodes and the arena that owns them.
//!
//! Each stored cell lives in exactly one [`ValueNode`] slot of a
//! [`NodeArena`]. The row chain and the column chain both thread through
//! that slot via [`NodeId`] links, so the arena is the single owner and a
//! node can only be freed once, when the arena itself is dropped.

use crate::axis::Axis;
use crate::error::{Result, StorageError};

/// Stable handle to a node in a [`NodeArena`].
///
/// Nodes are never removed individually, so a handle stays valid for the
/// lifetime of the arena that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Position of the node inside its arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single non-zero cell with its two cross-links.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNode {
    row: usize,
    column: usize,
    value: f64,
    next_in_row: Option<NodeId>,
    next_in_column: Option<NodeId>,
}

impl ValueNode {
    pub(crate) fn new(row: usize, column: usize, value: f64) -> Self {
        Self {
            row,
            column,
            value,
            next_in_row: None,
            next_in_column: None,
        }
    }

    /// 1-based row coordinate.
    pub fn row(&self) -> usize {
        self.row
    }

    /// 1-based column coordinate.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Stored value (never zero).
    pub fn value(&self) -> f64 {
        self.value
    }

    pub(crate) fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Coordinate of the anchor this node hangs from on `axis`.
    pub(crate) fn anchor(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.row,
            Axis::Column => self.column,
        }
    }

    /// Coordinate that orders the chain on `axis` (the orthogonal one).
    pub(crate) fn key(&self, axis: Axis) -> usize {
        self.anchor(axis.other())
    }

    /// Next node along the chain on `axis`.
    pub(crate) fn link(&self, axis: Axis) -> Option<NodeId> {
        match axis {
            Axis::Row => self.next_in_row,
            Axis::Column => self.next_in_column,
        }
    }

    pub(crate) fn set_link(&mut self, axis: Axis, next: Option<NodeId>) {
        match axis {
            Axis::Row => self.next_in_row = next,
            Axis::Column => self.next_in_column = next,
        }
    }

    /// Swap coordinates and links together; chain order is preserved.
    pub(crate) fn transpose(&mut self) {
        std::mem::swap(&mut self.row, &mut self.column);
        std::mem::swap(&mut self.next_in_row, &mut self.next_in_column);
    }
}

/// Append-only storage for value nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<ValueNode>,
}

impl NodeArena {
    /// Number of stored nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Make room for one more node so a following [`NodeArena::push`]
    /// cannot fail.
    pub(crate) fn reserve_one(&mut self) -> Result<()> {
        let requested = self.nodes.len() + 1;
        if requested > u32::MAX as usize {
            return Err(StorageError::AllocationFailure {
                storage: "value nodes",
                requested,
            });
        }
        self.nodes
            .try_reserve(1)
            .map_err(|_| StorageError::AllocationFailure {
                storage: "value nodes",
                requested,
            })
    }

    /// Store a node and return its handle. Call [`NodeArena::reserve_one`] first.
    pub(crate) fn push(&mut self, node: ValueNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Node behind `id`.
    ///
    /// Panics if `id` was issued by a different arena.
    pub fn get(&self, id: NodeId) -> &ValueNode {
        &self.nodes[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut ValueNode {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, ValueNode> {
        self.nodes.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_views() {
        let node = ValueNode::new(2, 5, 1.5);
        assert_eq!(node.anchor(Axis::Row), 2);
        assert_eq!(node.key(Axis::Row), 5);
        assert_eq!(node.anchor(Axis::Column), 5);
        assert_eq!(node.key(Axis::Column), 2);
    }

    #[test]
    fn test_transpose_swaps_coordinates_and_links() {
        let mut arena = NodeArena::default();
        arena.reserve_one().unwrap();
        let a = arena.push(ValueNode::new(1, 1, 1.0));
        arena.reserve_one().unwrap();
        let b = arena.push(ValueNode::new(1, 3, 2.0));

        arena.get_mut(a).set_link(Axis::Row, Some(b));
        arena.get_mut(a).transpose();

        let node = arena.get(a);
        assert_eq!((node.row(), node.column()), (1, 1));
        assert_eq!(node.link(Axis::Row), None);
        assert_eq!(node.link(Axis::Column), Some(b));
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut arena = NodeArena::default();
        for i in 0..4 {
            arena.reserve_one().unwrap();
            let id = arena.push(ValueNode::new(1, i + 1, 1.0));
            assert_eq!(id.index(), i);
        }
        assert_eq!(arena.len(), 4);
    }
}
