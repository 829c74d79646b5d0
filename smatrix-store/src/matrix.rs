//! The sparse matrix record: two anchor indices over one node arena.
//!
//! Every stored cell is a [`ValueNode`] owned by the arena. The row index
//! holds, per row, the head of a chain ordered by column; the column index
//! holds, per column, the head of a chain ordered by row. Both chains pass
//! through the same nodes, so each cell is reachable from its row and from
//! its column without duplicating storage.

use tracing::{debug, error};

use crate::axis::{Axis, AxisIndex};
use crate::config::EngineConfig;
use crate::error::{Result, StorageError};
use crate::node::{NodeArena, NodeId, ValueNode};

/// Orthogonal-list sparse matrix with 1-based coordinates.
#[derive(Debug, Clone)]
pub struct SparseMatrix {
    pub(crate) rows: usize,
    pub(crate) columns: usize,
    pub(crate) row_index: AxisIndex,
    pub(crate) column_index: AxisIndex,
    pub(crate) nodes: NodeArena,
    pub(crate) config: EngineConfig,
}

impl SparseMatrix {
    /// Create an empty `rows x columns` matrix with the default configuration.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        Self::with_config(rows, columns, EngineConfig::default())
    }

    /// Create an empty `rows x columns` matrix.
    ///
    /// Both extents must be positive. Anchors for every row and column are
    /// allocated up front and start empty.
    pub fn with_config(rows: usize, columns: usize, config: EngineConfig) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(StorageError::InvalidExtent { rows, columns });
        }
        let row_index = AxisIndex::with_len(rows, Axis::Row)?;
        let column_index = AxisIndex::with_len(columns, Axis::Column)?;
        debug!("Created {}x{} sparse matrix ({:?})", rows, columns, config.growth);
        Ok(Self {
            rows,
            columns,
            row_index,
            column_index,
            nodes: NodeArena::default(),
            config,
        })
    }

    /// Build a matrix from 1-based `(row, column, value)` triplets.
    ///
    /// Zero values are skipped; later triplets overwrite earlier ones at the
    /// same cell.
    pub fn from_triplets(
        rows: usize,
        columns: usize,
        triplets: &[(usize, usize, f64)],
    ) -> Result<Self> {
        let mut matrix = Self::new(rows, columns)?;
        for &(row, column, value) in triplets {
            if value == 0.0 {
                continue;
            }
            matrix.insert(row, column, value)?;
        }
        Ok(matrix)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Value at `(row, column)`; 0.0 when nothing is stored there.
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.row_entries(row)
            .take_while(|node| node.column() <= column)
            .find(|node| node.column() == column)
            .map_or(0.0, ValueNode::value)
    }

    /// Whether any stored entry equals `value` exactly.
    ///
    /// Walks every row chain, so the cost is linear in the number of
    /// stored entries rather than in `rows * columns`.
    pub fn contains(&self, value: f64) -> bool {
        if value == 0.0 {
            return false;
        }
        self.row_index
            .heads()
            .any(|(_, head)| self.chain(Axis::Row, head).any(|node| node.value() == value))
    }

    /// Entries of `row` in ascending column order.
    pub fn row_entries(&self, row: usize) -> ChainIter<'_> {
        self.chain(Axis::Row, self.row_index.head(row))
    }

    /// Entries of `column` in ascending row order.
    pub fn column_entries(&self, column: usize) -> ChainIter<'_> {
        self.chain(Axis::Column, self.column_index.head(column))
    }

    /// All entries as `(row, column, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.row_index.heads().flat_map(move |(_, head)| {
            self.chain(Axis::Row, head)
                .map(|node| (node.row(), node.column(), node.value()))
        })
    }

    /// Release every node and both anchor arrays; returns the number of
    /// nodes freed.
    ///
    /// Reachability is counted through the row chains only, since each node
    /// also sits in exactly one column chain.
    pub fn destroy(self) -> usize {
        let stored = self.nodes.len();
        let reachable: usize = self
            .row_index
            .heads()
            .map(|(_, head)| self.chain(Axis::Row, head).take(stored + 1).count())
            .sum();
        if reachable != stored {
            error!(
                "Row chains reach {} of {} stored nodes at teardown",
                reachable, stored
            );
        }
        debug!(
            "Destroying {}x{} sparse matrix, {} nodes",
            self.rows, self.columns, stored
        );
        stored
    }

    pub(crate) fn index(&self, axis: Axis) -> &AxisIndex {
        match axis {
            Axis::Row => &self.row_index,
            Axis::Column => &self.column_index,
        }
    }

    pub(crate) fn index_mut(&mut self, axis: Axis) -> &mut AxisIndex {
        match axis {
            Axis::Row => &mut self.row_index,
            Axis::Column => &mut self.column_index,
        }
    }

    pub(crate) fn extent(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.rows,
            Axis::Column => self.columns,
        }
    }

    pub(crate) fn chain(&self, axis: Axis, head: Option<NodeId>) -> ChainIter<'_> {
        ChainIter {
            nodes: &self.nodes,
            axis,
            next: head,
        }
    }
}

/// Matrices are equal when they have the same extents and the same stored
/// entries; arena layout and configuration are not compared.
impl PartialEq for SparseMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self.nnz() == other.nnz()
            && self.iter().eq(other.iter())
    }
}

/// Walks one axis chain from an anchor.
pub struct ChainIter<'a> {
    nodes: &'a NodeArena,
    axis: Axis,
    next: Option<NodeId>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a ValueNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?);
        self.next = node.link(self.axis);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let m = SparseMatrix::new(3, 4).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.columns(), 4);
        assert_eq!(m.nnz(), 0);
        assert!(m.is_empty());
        assert_eq!(m.get(1, 1), 0.0);
        assert_eq!(m.iter().count(), 0);
    }

    #[test]
    fn test_zero_extent_rejected() {
        assert_eq!(
            SparseMatrix::new(0, 3).unwrap_err(),
            StorageError::InvalidExtent {
                rows: 0,
                columns: 3
            }
        );
        assert!(SparseMatrix::new(2, 0).is_err());
    }

    #[test]
    fn test_get_and_chains() {
        let m = SparseMatrix::from_triplets(
            3,
            3,
            &[(1, 3, 2.0), (1, 1, 1.0), (3, 1, 4.0), (2, 2, 0.0)],
        )
        .unwrap();
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.get(1, 1), 1.0);
        assert_eq!(m.get(1, 3), 2.0);
        assert_eq!(m.get(2, 2), 0.0);
        assert_eq!(m.get(9, 9), 0.0);

        let row: Vec<usize> = m.row_entries(1).map(ValueNode::column).collect();
        assert_eq!(row, vec![1, 3]);
        let column: Vec<usize> = m.column_entries(1).map(ValueNode::row).collect();
        assert_eq!(column, vec![1, 3]);
    }

    #[test]
    fn test_contains() {
        let m = SparseMatrix::from_triplets(2, 2, &[(1, 2, -1.5), (2, 1, 3.0)]).unwrap();
        assert!(m.contains(-1.5));
        assert!(m.contains(3.0));
        assert!(!m.contains(1.5));
        assert!(!m.contains(0.0));
    }

    #[test]
    fn test_iter_is_row_major() {
        let m = SparseMatrix::from_triplets(
            3,
            3,
            &[(3, 3, 9.0), (1, 2, 2.0), (2, 1, 4.0), (1, 1, 1.0)],
        )
        .unwrap();
        let entries: Vec<_> = m.iter().collect();
        assert_eq!(
            entries,
            vec![(1, 1, 1.0), (1, 2, 2.0), (2, 1, 4.0), (3, 3, 9.0)]
        );
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = SparseMatrix::from_triplets(2, 2, &[(1, 1, 1.0), (2, 2, 2.0)]).unwrap();
        let b = SparseMatrix::from_triplets(2, 2, &[(2, 2, 2.0), (1, 1, 1.0)]).unwrap();
        let c = SparseMatrix::from_triplets(2, 3, &[(2, 2, 2.0), (1, 1, 1.0)]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_destroy_counts_nodes() {
        let empty = SparseMatrix::new(4, 4).unwrap();
        assert_eq!(empty.destroy(), 0);

        let m = SparseMatrix::from_triplets(2, 2, &[(1, 1, 1.0), (1, 2, 2.0), (2, 2, 3.0)])
            .unwrap();
        assert_eq!(m.destroy(), 3);
    }
}
