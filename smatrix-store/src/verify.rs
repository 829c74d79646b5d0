//! Structural invariant checks.
//!
//! A well-formed matrix satisfies:
//! - each axis index has exactly as many anchors as the extent on that axis;
//! - every node hangs from the anchor matching its own coordinate;
//! - keys strictly increase along every chain;
//! - no node stores zero or NaN;
//! - the row chains and the column chains each visit every node exactly once.

use crate::axis::Axis;
use crate::error::{Result, StorageError};
use crate::matrix::SparseMatrix;

impl SparseMatrix {
    /// Walk both axes and check every structural invariant.
    ///
    /// Returns [`StorageError::StorageCorruption`] describing the first
    /// violation found.
    pub fn verify(&self) -> Result<()> {
        for axis in [Axis::Row, Axis::Column] {
            self.verify_axis(axis)?;
        }
        Ok(())
    }

    fn verify_axis(&self, axis: Axis) -> Result<()> {
        let index = self.index(axis);
        if index.len() != self.extent(axis) {
            return Err(StorageError::corruption(format!(
                "{} index has {} anchors for extent {}",
                axis,
                index.len(),
                self.extent(axis)
            )));
        }

        let stored = self.nnz();
        let mut seen = vec![false; stored];
        let mut visited = 0usize;

        for (anchor, head) in index.heads() {
            let mut last_key = 0usize;
            let mut cursor = head;
            while let Some(id) = cursor {
                if id.index() >= stored {
                    return Err(StorageError::corruption(format!(
                        "{} chain {} links to unknown node {}",
                        axis,
                        anchor,
                        id.index()
                    )));
                }
                if seen[id.index()] {
                    return Err(StorageError::corruption(format!(
                        "node {} reached twice through {} chains (at {} chain {})",
                        id.index(),
                        axis,
                        axis,
                        anchor
                    )));
                }
                seen[id.index()] = true;
                visited += 1;

                let node = self.nodes.get(id);
                if node.anchor(axis) != anchor {
                    return Err(StorageError::corruption(format!(
                        "node ({}, {}) found in {} chain {}",
                        node.row(),
                        node.column(),
                        axis,
                        anchor
                    )));
                }
                if node.key(axis) <= last_key {
                    return Err(StorageError::corruption(format!(
                        "{} chain {} is not strictly increasing at {}",
                        axis,
                        anchor,
                        node.key(axis)
                    )));
                }
                if node.value() == 0.0 || node.value().is_nan() {
                    return Err(StorageError::corruption(format!(
                        "node ({}, {}) stores {}",
                        node.row(),
                        node.column(),
                        node.value()
                    )));
                }
                last_key = node.key(axis);
                cursor = node.link(axis);
            }
        }

        if visited != stored {
            return Err(StorageError::corruption(format!(
                "{} chains reach {} of {} stored nodes",
                axis, visited, stored
            )));
        }
        Ok(())
    }
}
