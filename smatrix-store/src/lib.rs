//! smatrix-store: Orthogonal-list sparse matrix storage for SMATRIX-RS
//!
//! Stores only the non-zero cells of a 2-D grid. Every cell is a single
//! node threaded onto two sorted chains, one per row and one per column,
//! so it can be reached from either axis. Supports insert-or-update,
//! value lookup, in-place transpose, extent doubling and dense rendering.

pub mod axis;
pub mod config;
pub mod error;
pub mod insert;
pub mod interop;
pub mod matrix;
pub mod node;
pub mod render;
pub mod reshape;
pub mod verify;

pub use axis::{Axis, AxisIndex};
pub use config::{EngineConfig, GrowthPolicy};
pub use error::{Result, StorageError};
pub use insert::InsertOutcome;
pub use matrix::{ChainIter, SparseMatrix};
pub use node::{NodeArena, NodeId, ValueNode};
