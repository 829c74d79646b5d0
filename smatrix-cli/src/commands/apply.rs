//! Apply a list of operations without prompting.
//!
//! smatrix apply --rows 3 --columns 3 --op insert:2:3:5 --op transpose --op contains:5

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use smatrix_store::{EngineConfig, InsertOutcome, SparseMatrix};

use super::user_message;

#[derive(Args)]
pub struct ApplyArgs {
    /// Number of rows
    #[arg(long)]
    rows: usize,

    /// Number of columns
    #[arg(long)]
    columns: usize,

    /// Operation, applied in order: insert:ROW:COL:VALUE, contains:VALUE, resize, transpose
    #[arg(long = "op", value_name = "OP")]
    ops: Vec<Op>,
}

/// One scripted operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Insert { row: usize, column: usize, value: f64 },
    Contains(f64),
    Resize,
    Transpose,
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let number = |field: &str, what: &str| -> std::result::Result<f64, String> {
            field
                .trim()
                .parse()
                .map_err(|_| format!("invalid {} '{}' in '{}'", what, field, s))
        };
        let index = |field: &str, what: &str| -> std::result::Result<usize, String> {
            field
                .trim()
                .parse()
                .map_err(|_| format!("invalid {} '{}' in '{}'", what, field, s))
        };

        match parts.as_slice() {
            ["insert", row, column, value] => Ok(Op::Insert {
                row: index(*row, "row")?,
                column: index(*column, "column")?,
                value: number(*value, "value")?,
            }),
            ["contains", value] => Ok(Op::Contains(number(*value, "value")?)),
            ["resize"] => Ok(Op::Resize),
            ["transpose"] => Ok(Op::Transpose),
            _ => Err(format!(
                "unknown operation '{}' (expected insert:ROW:COL:VALUE, contains:VALUE, resize or transpose)",
                s
            )),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Insert { row, column, value } => write!(f, "insert:{}:{}:{}", row, column, value),
            Op::Contains(value) => write!(f, "contains:{}", value),
            Op::Resize => f.write_str("resize"),
            Op::Transpose => f.write_str("transpose"),
        }
    }
}

pub fn run(args: ApplyArgs, config: &EngineConfig) -> Result<()> {
    info!("=== Apply {} operations ===", args.ops.len());

    let mut matrix = SparseMatrix::with_config(args.rows, args.columns, config.clone())
        .with_context(|| format!("Failed to create {}x{} matrix", args.rows, args.columns))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for op in &args.ops {
        if let Some(line) = apply_op(&mut matrix, op)? {
            writeln!(out, "{}", line)?;
        }
    }
    write!(out, "{}", matrix)?;

    info!(
        "Final matrix {}x{}, {} stored entries",
        matrix.rows(),
        matrix.columns(),
        matrix.nnz()
    );
    matrix.destroy();
    Ok(())
}

/// Apply one operation; returns the line to print, if any.
pub fn apply_op(matrix: &mut SparseMatrix, op: &Op) -> Result<Option<String>> {
    let line = match *op {
        Op::Insert { row, column, value } => match matrix.insert(row, column, value) {
            Ok(InsertOutcome::Inserted) => None,
            Ok(InsertOutcome::Updated { previous }) => Some(format!(
                "Updated ({}, {}): {:.1} -> {:.1}",
                row, column, previous, value
            )),
            Err(e) => {
                let message = user_message(&e)?;
                warn!("{} rejected: {}", op, e);
                Some(message)
            }
        },
        Op::Contains(value) => {
            let presence = if matrix.contains(value) {
                "present"
            } else {
                "not present"
            };
            Some(format!("Value {:.1} {} in Sparse Matrix", value, presence))
        }
        Op::Resize => match matrix.resize() {
            Ok(()) => Some("Matrix is resized".to_string()),
            Err(e) => Some(format!("Matrix is not resized: {}", user_message(&e)?)),
        },
        Op::Transpose => match matrix.transpose() {
            Ok(()) => Some("Matrix converted to transposed version".to_string()),
            Err(e) => Some(format!(
                "Matrix not converted to transposed version: {}",
                user_message(&e)?
            )),
        },
    };
    Ok(line)
}
