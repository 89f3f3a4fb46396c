//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the renkei
//! crate. Import this module to get access to the core functionality without having
//! to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use renkei::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let graph = load_graph("path/to/transaction-builder.json")?;
//! let transactions = build_transactions(&graph)?;
//!
//! for tx in &transactions {
//!     println!("{:?} <- {} bytes", tx.to, tx.data.len());
//! }
//! # Ok(())
//! # }
//! ```

// ABI resolution
pub use crate::abi::{
    AbiType, FunctionDescriptor, ParamDescriptor, compute_signature, parse_abi, resolve_function,
    selectable_functions,
};

// Encoding
pub use crate::encoder::{CallEncoder, NATIVE_DECIMALS, TransactionDescriptor, encode_call};

// Graph model and persistence
pub use crate::graph::{
    CallNode, CallUpdate, Edge, Graph, GraphFile, IntoGraph, Position, load_graph, order,
    save_graph,
};

// Pipeline and submission
pub use crate::pipeline::{BatchEntry, Pipeline, TransactionBatch, build_transactions};
pub use crate::submit::{DryRunSubmitter, Submitter, submit_all};

// Error types
pub use crate::error::{
    BatchError, BuildError, CycleError, EncodingError, GraphError, GraphFileError, NodeFailure,
    NotFoundError, ParseError, SubmissionError, SubmitAllError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
