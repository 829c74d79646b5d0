//! Anchor arrays for the row and column axes.

use std::fmt;

use crate::error::{Result, StorageError};
use crate::node::NodeId;

/// One of the two axes of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// The orthogonal axis.
    pub fn other(self) -> Axis {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }

    pub(crate) fn anchor_label(self) -> &'static str {
        match self {
            Axis::Row => "row anchors",
            Axis::Column => "column anchors",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// Ordered anchors for one axis.
///
/// Anchor `k` (1-based) holds the head of the chain for row or column `k`.
/// Growth only appends empty anchors; an existing anchor never moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisIndex {
    anchors: Vec<Option<NodeId>>,
}

impl AxisIndex {
    /// Allocate `len` empty anchors.
    pub fn with_len(len: usize, axis: Axis) -> Result<Self> {
        let mut anchors = Vec::new();
        anchors
            .try_reserve_exact(len)
            .map_err(|_| StorageError::AllocationFailure {
                storage: axis.anchor_label(),
                requested: len,
            })?;
        anchors.resize(len, None);
        Ok(Self { anchors })
    }

    /// Addressable extent on this axis.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Chain head for 1-based coordinate `k`, `None` when empty or out of range.
    pub fn head(&self, k: usize) -> Option<NodeId> {
        k.checked_sub(1)
            .and_then(|i| self.anchors.get(i))
            .copied()
            .flatten()
    }

    /// Panics if `k` is outside the index; callers check extents first.
    pub(crate) fn set_head(&mut self, k: usize, head: Option<NodeId>) {
        self.anchors[k - 1] = head;
    }

    /// Reserve room for `len` anchors without changing the extent.
    ///
    /// Uses amortized reservation, so repeated growth by one anchor is
    /// O(1) per step.
    pub(crate) fn reserve_to(&mut self, len: usize, axis: Axis) -> Result<()> {
        let additional = len.saturating_sub(self.anchors.len());
        self.anchors
            .try_reserve(additional)
            .map_err(|_| StorageError::AllocationFailure {
                storage: axis.anchor_label(),
                requested: len,
            })
    }

    /// Append empty anchors up to `len`. Pair with [`AxisIndex::reserve_to`].
    pub(crate) fn extend_to(&mut self, len: usize) {
        if len > self.anchors.len() {
            self.anchors.resize(len, None);
        }
    }

    /// Fresh backing storage of `len` anchors carrying over every existing
    /// head at the same position. `self` is not modified.
    pub(crate) fn reallocated(&self, len: usize, axis: Axis) -> Result<Self> {
        let mut grown = Self::with_len(len.max(self.anchors.len()), axis)?;
        grown.anchors[..self.anchors.len()].copy_from_slice(&self.anchors);
        Ok(grown)
    }

    /// `(coordinate, head)` for every anchor, in ascending order.
    pub fn heads(&self) -> impl Iterator<Item = (usize, Option<NodeId>)> + '_ {
        self.anchors
            .iter()
            .enumerate()
            .map(|(i, head)| (i + 1, *head))
    }
}
