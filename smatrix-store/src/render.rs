//! Dense text rendering.

use std::fmt;

use crate::matrix::SparseMatrix;

impl SparseMatrix {
    /// Render the full `rows x columns` grid, one line per row.
    ///
    /// Cells use the configured width and precision (`{:5.1}` by default);
    /// unrecorded cells and rows without entries print as zeros.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.config.render_width;
        let precision = self.config.render_precision;
        for row in 1..=self.rows {
            let mut entries = self.row_entries(row).peekable();
            for column in 1..=self.columns {
                let value = match entries.next_if(|node| node.column() == column) {
                    Some(node) => node.value(),
                    None => 0.0,
                };
                write!(f, "{:>width$.precision$}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_render_single_entry() {
        let m = SparseMatrix::from_triplets(3, 3, &[(2, 3, 5.0)]).unwrap();
        assert_eq!(
            m.render(),
            "  0.0  0.0  0.0\n  0.0  0.0  5.0\n  0.0  0.0  0.0\n"
        );
    }

    #[test]
    fn test_render_empty_rows_and_negatives() {
        let m = SparseMatrix::from_triplets(3, 2, &[(1, 1, -2.5), (3, 2, 10.0)]).unwrap();
        assert_eq!(m.render(), " -2.5  0.0\n  0.0  0.0\n  0.0 10.0\n");
    }

    #[test]
    fn test_render_custom_format() {
        let config = EngineConfig {
            render_width: 7,
            render_precision: 2,
            ..EngineConfig::default()
        };
        let mut m = SparseMatrix::with_config(1, 2, config).unwrap();
        m.insert(1, 2, 1.5).unwrap();
        assert_eq!(m.render(), "   0.00   1.50\n");
    }
}
