//! Insert-or-update.
//!
//! A new cell must be spliced into its row chain (ordered by column) and
//! its column chain (ordered by row). Both chains are probed independently
//! before anything is written; the two answers must agree on whether the
//! cell already exists, otherwise the structure is corrupt and the insert
//! aborts without touching it.

use tracing::{debug, error, trace};

use crate::axis::Axis;
use crate::config::GrowthPolicy;
use crate::error::{Result, StorageError};
use crate::matrix::SparseMatrix;
use crate::node::{NodeId, ValueNode};

/// What a successful [`SparseMatrix::insert`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InsertOutcome {
    /// A new node was linked into both chains.
    Inserted,
    /// The cell already existed; its value was overwritten in place.
    Updated { previous: f64 },
}

/// Position of a cell along one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// A node with the probed key is already in the chain.
    Existing(NodeId),
    /// Not present; splice after `after`, or at the head when `None`.
    Vacant { after: Option<NodeId> },
}

impl SparseMatrix {
    /// Store `value` at 1-based `(row, column)`.
    ///
    /// Zero and NaN are rejected with [`StorageError::InvalidValue`].
    /// Coordinates beyond the extent are rejected with
    /// [`StorageError::OutOfBounds`] under [`GrowthPolicy::Fixed`], and grow
    /// the matrix under [`GrowthPolicy::Grow`]. On any error the matrix is
    /// unchanged.
    pub fn insert(&mut self, row: usize, column: usize, value: f64) -> Result<InsertOutcome> {
        if value == 0.0 || value.is_nan() {
            return Err(StorageError::InvalidValue { value });
        }
        let out_of_bounds = StorageError::OutOfBounds {
            row,
            column,
            rows: self.rows,
            columns: self.columns,
        };
        if row == 0 || column == 0 {
            return Err(out_of_bounds);
        }
        if row > self.rows || column > self.columns {
            match self.config.growth {
                GrowthPolicy::Fixed => return Err(out_of_bounds),
                GrowthPolicy::Grow => {}
            }
        }

        let by_row = self.probe(Axis::Row, row, column);
        let by_column = self.probe(Axis::Column, column, row);

        match (by_row, by_column) {
            (Probe::Existing(a), Probe::Existing(b)) if a == b => {
                let node = self.nodes.get_mut(a);
                let previous = node.value();
                node.set_value(value);
                trace!("Updated ({}, {}): {} -> {}", row, column, previous, value);
                Ok(InsertOutcome::Updated { previous })
            }
            (Probe::Vacant { after: row_after }, Probe::Vacant { after: column_after }) => {
                // Reserve everything before the first write so a failed
                // allocation leaves the matrix untouched.
                self.nodes.reserve_one()?;
                self.reserve_extent(row, column)?;
                self.extend_extent(row, column);

                let id = self.nodes.push(ValueNode::new(row, column, value));
                self.splice(Axis::Row, row, row_after, id);
                self.splice(Axis::Column, column, column_after, id);
                trace!("Inserted ({}, {}) = {}", row, column, value);
                Ok(InsertOutcome::Inserted)
            }
            (by_row, by_column) => {
                let detail = format!(
                    "cell ({}, {}): row chain reports {:?}, column chain reports {:?}",
                    row, column, by_row, by_column
                );
                error!("Storage corruption on insert: {}", detail);
                Err(StorageError::corruption(detail))
            }
        }
    }

    /// Find where `key` belongs in the chain hanging from `anchor` on `axis`.
    ///
    /// Anchors beyond the current index are treated as empty chains.
    fn probe(&self, axis: Axis, anchor: usize, key: usize) -> Probe {
        let mut after = None;
        let mut cursor = self.index(axis).head(anchor);
        while let Some(id) = cursor {
            let node = self.nodes.get(id);
            match node.key(axis).cmp(&key) {
                std::cmp::Ordering::Less => {
                    after = Some(id);
                    cursor = node.link(axis);
                }
                std::cmp::Ordering::Equal => return Probe::Existing(id),
                std::cmp::Ordering::Greater => break,
            }
        }
        Probe::Vacant { after }
    }

    /// Link `id` into the chain on `axis` right after `after` (or as head).
    fn splice(&mut self, axis: Axis, anchor: usize, after: Option<NodeId>, id: NodeId) {
        match after {
            None => {
                let old_head = self.index(axis).head(anchor);
                self.nodes.get_mut(id).set_link(axis, old_head);
                self.index_mut(axis).set_head(anchor, Some(id));
            }
            Some(prev) => {
                let next = self.nodes.get(prev).link(axis);
                self.nodes.get_mut(id).set_link(axis, next);
                self.nodes.get_mut(prev).set_link(axis, Some(id));
            }
        }
    }

    fn reserve_extent(&mut self, row: usize, column: usize) -> Result<()> {
        if row > self.rows {
            self.row_index.reserve_to(row, Axis::Row)?;
        }
        if column > self.columns {
            self.column_index.reserve_to(column, Axis::Column)?;
        }
        Ok(())
    }

    fn extend_extent(&mut self, row: usize, column: usize) {
        for (axis, wanted) in [(Axis::Row, row), (Axis::Column, column)] {
            if wanted > self.extent(axis) {
                self.index_mut(axis).extend_to(wanted);
                debug!(
                    "Grew {} extent {} -> {}",
                    axis,
                    self.extent(axis),
                    wanted
                );
                match axis {
                    Axis::Row => self.rows = wanted,
                    Axis::Column => self.columns = wanted,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_insert_into_empty_chains() {
        let mut m = SparseMatrix::new(3, 3).unwrap();
        assert_eq!(m.insert(2, 3, 5.0).unwrap(), InsertOutcome::Inserted);
        assert_eq!(m.get(2, 3), 5.0);
        assert_eq!(m.nnz(), 1);
        m.verify().unwrap();
    }

    #[test]
    fn test_insert_before_head_between_and_tail() {
        let mut m = SparseMatrix::new(5, 5).unwrap();
        m.insert(3, 3, 1.0).unwrap();
        m.insert(3, 1, 2.0).unwrap(); // new row head
        m.insert(3, 5, 3.0).unwrap(); // row tail
        m.insert(3, 2, 4.0).unwrap(); // between
        m.insert(1, 3, 5.0).unwrap(); // new column head
        m.insert(4, 3, 6.0).unwrap(); // between in column

        let row: Vec<usize> = m.row_entries(3).map(ValueNode::column).collect();
        assert_eq!(row, vec![1, 2, 3, 5]);
        let column: Vec<usize> = m.column_entries(3).map(ValueNode::row).collect();
        assert_eq!(column, vec![1, 3, 4]);
        m.verify().unwrap();
    }

    #[test]
    fn test_update_in_place() {
        let mut m = SparseMatrix::new(3, 3).unwrap();
        m.insert(1, 2, 1.0).unwrap();
        m.insert(1, 3, 2.0).unwrap();
        m.insert(2, 2, 3.0).unwrap();

        let outcome = m.insert(1, 2, 7.5).unwrap();
        assert_eq!(outcome, InsertOutcome::Updated { previous: 1.0 });
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.get(1, 2), 7.5);
        assert!(!m.contains(1.0));

        // Update a node that is not a chain head on either axis.
        let outcome = m.insert(2, 2, -3.0).unwrap();
        assert_eq!(outcome, InsertOutcome::Updated { previous: 3.0 });
        assert_eq!(m.nnz(), 3);
        m.verify().unwrap();
    }

    #[test]
    fn test_rejects_zero_and_nan() {
        let mut m = SparseMatrix::new(2, 2).unwrap();
        assert_eq!(
            m.insert(1, 1, 0.0).unwrap_err(),
            StorageError::InvalidValue { value: 0.0 }
        );
        assert!(m.insert(1, 1, -0.0).is_err());
        assert!(m.insert(1, 1, f64::NAN).is_err());
        assert_eq!(m.nnz(), 0);
    }

    #[test]
    fn test_fixed_policy_bounds() {
        let mut m = SparseMatrix::new(2, 2).unwrap();
        for (row, column) in [(0, 1), (1, 0), (3, 1), (1, 3)] {
            let err = m.insert(row, column, 1.0).unwrap_err();
            assert!(matches!(err, StorageError::OutOfBounds { .. }));
        }
        assert_eq!((m.rows(), m.columns()), (2, 2));
        assert_eq!(m.nnz(), 0);
    }

    #[test]
    fn test_grow_policy_extends_axes() {
        let mut m = SparseMatrix::with_config(2, 2, EngineConfig::growable()).unwrap();
        m.insert(1, 1, 1.0).unwrap();
        m.insert(5, 3, 2.0).unwrap();
        assert_eq!((m.rows(), m.columns()), (5, 3));
        assert_eq!(m.get(5, 3), 2.0);

        m.insert(2, 7, 3.0).unwrap();
        assert_eq!((m.rows(), m.columns()), (5, 7));
        assert!(matches!(
            m.insert(0, 7, 3.0).unwrap_err(),
            StorageError::OutOfBounds { .. }
        ));
        m.verify().unwrap();
    }

    #[test]
    fn test_grow_policy_update_does_not_grow() {
        let mut m = SparseMatrix::with_config(2, 2, EngineConfig::growable()).unwrap();
        m.insert(2, 2, 1.0).unwrap();
        m.insert(2, 2, 2.0).unwrap();
        assert_eq!((m.rows(), m.columns()), (2, 2));
    }

    #[test]
    fn test_disagreeing_chains_are_corruption() {
        let mut m = SparseMatrix::new(3, 3).unwrap();
        m.insert(2, 2, 1.0).unwrap();

        // Detach the node from its column chain only.
        m.column_index.set_head(2, None);
        let before = m.nnz();

        let err = m.insert(2, 2, 9.0).unwrap_err();
        assert!(matches!(err, StorageError::StorageCorruption { .. }));
        assert!(!err.is_recoverable());
        assert_eq!(m.nnz(), before);
        assert_eq!(m.get(2, 2), 1.0);
    }
}
