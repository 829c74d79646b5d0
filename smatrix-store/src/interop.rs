//! Conversion to sprs compressed formats.

use sprs::{CsMat, TriMat};

use crate::matrix::SparseMatrix;

impl SparseMatrix {
    /// Export as a 0-based CSR matrix with the same extents.
    pub fn to_csr(&self) -> CsMat<f64> {
        let mut tri = TriMat::with_capacity((self.rows, self.columns), self.nnz());
        for (row, column, value) in self.iter() {
            tri.add_triplet(row - 1, column - 1, value);
        }
        tri.to_csr()
    }
}
