//! Resize and transpose.

use tracing::debug;

use crate::axis::Axis;
use crate::error::{Result, StorageError};
use crate::matrix::SparseMatrix;

impl SparseMatrix {
    /// Double both extents.
    ///
    /// New anchor arrays are allocated for both axes before anything is
    /// replaced, so on failure the matrix keeps its old extents and anchors.
    /// Every node keeps its anchor; chains and links are not touched.
    pub fn resize(&mut self) -> Result<()> {
        let rows = doubled(self.rows, Axis::Row)?;
        let columns = doubled(self.columns, Axis::Column)?;

        let row_index = self.row_index.reallocated(rows, Axis::Row)?;
        let column_index = self.column_index.reallocated(columns, Axis::Column)?;

        self.row_index = row_index;
        self.column_index = column_index;
        debug!(
            "Resized {}x{} -> {}x{}",
            self.rows, self.columns, rows, columns
        );
        self.rows = rows;
        self.columns = columns;
        Ok(())
    }

    /// Transpose in place.
    ///
    /// The two anchor indices and the two extents trade places, then every
    /// node swaps its coordinates together with its links. The chain that
    /// was ordered by row is now ordered by the new column, which is the
    /// same number, so no chain needs re-sorting and nothing is allocated.
    /// Never fails on a well-formed matrix.
    pub fn transpose(&mut self) -> Result<()> {
        std::mem::swap(&mut self.row_index, &mut self.column_index);
        std::mem::swap(&mut self.rows, &mut self.columns);
        for node in self.nodes.iter_mut() {
            node.transpose();
        }
        debug!(
            "Transposed to {}x{} ({} nodes relabelled)",
            self.rows,
            self.columns,
            self.nodes.len()
        );
        Ok(())
    }
}

fn doubled(extent: usize, axis: Axis) -> Result<usize> {
    extent
        .checked_mul(2)
        .ok_or(StorageError::AllocationFailure {
            storage: axis.anchor_label(),
            requested: extent,
        })
}
