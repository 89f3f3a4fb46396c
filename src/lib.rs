//! # Renkei - Call Graph to Transaction Batch Compiler
//!
//! **Renkei** turns node-based smart-contract call flows into ordered, ready-to-sign
//! transaction batches. Each node in a flow names a target contract, its ABI, the
//! function to call and the argument values; edges between nodes say which call has
//! to happen before which.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Graph**: Read a saved editor file with [`graph::load_graph`], or
//!     implement [`graph::IntoGraph`] for your own format.
//! 2.  **Edit (optional)**: Use the [`graph::Graph`] editing operations to add nodes,
//!     select functions and wire dependencies.
//! 3.  **Build**: Run a [`pipeline::Pipeline`] over the graph. Nodes are ordered so every
//!     dependency comes first, each function is resolved from its ABI, and the
//!     arguments are ABI-encoded into calldata.
//! 4.  **Submit**: Hand the ordered batch to a [`submit::Submitter`]. Submission stops
//!     at the first failure.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use renkei::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut graph = Graph::new();
//!
//!     let abi = parse_abi(
//!         r#"[{"type":"function","name":"transfer","inputs":[
//!             {"name":"to","type":"address"},{"name":"amount","type":"uint256"}]}]"#,
//!     )?;
//!
//!     let id = graph.new_node_id();
//!     graph.add_node(CallNode::new(id.clone()))?;
//!     graph.update_call(
//!         &id,
//!         CallUpdate {
//!             contract_address: "0x6b175474e89094c44da98b954eedeac495271d0f".to_string(),
//!             abi,
//!             function_name: "transfer".to_string(),
//!             args: vec![
//!                 "0x000000000000000000000000000000000000dEaD".to_string(),
//!                 "1000".to_string(),
//!             ],
//!             value: None,
//!         },
//!     )?;
//!
//!     let batch = Pipeline::builder().build().build_batch(&graph)?;
//!     println!("{}", serde_json::to_string_pretty(&batch.to_json_view())?);
//!
//!     let mut submitter = DryRunSubmitter::new();
//!     let references = batch.submit(&mut submitter)?;
//!     println!("Submitted {} transaction(s)", references.len());
//!     Ok(())
//! }
//! ```

pub mod abi;
pub mod encoder;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod prelude;
pub mod submit;
