//! Composes ordering, resolution and encoding into a transaction batch.

use crate::abi::resolve_function;
use crate::encoder::{CallEncoder, NATIVE_DECIMALS, TransactionDescriptor};
use crate::error::{BuildError, NodeFailure};
use crate::graph::{CallNode, Graph};

mod batch;

pub use batch::{BatchEntry, TransactionBatch};

/// Builds ordered transaction batches from call graph snapshots.
///
/// A pipeline holds configuration only; every build works on the snapshot it is
/// given and returns a new batch.
#[derive(Debug, Clone)]
pub struct Pipeline {
    encoder: CallEncoder,
    require_nodes: bool,
}

pub struct PipelineBuilder {
    value_decimals: u8,
    require_nodes: bool,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            value_decimals: NATIVE_DECIMALS,
            require_nodes: false,
        }
    }
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    /// Decimals used to scale node values into the smallest currency unit.
    pub fn with_value_decimals(mut self, decimals: u8) -> Self {
        self.value_decimals = decimals;
        self
    }
    /// Treat a graph without nodes as an error instead of an empty batch.
    pub fn require_nodes(mut self, require: bool) -> Self {
        self.require_nodes = require;
        self
    }
    pub fn build(self) -> Pipeline {
        Pipeline {
            encoder: CallEncoder::new(self.value_decimals),
            require_nodes: self.require_nodes,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        PipelineBuilder::default().build()
    }
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Orders the graph and encodes every node, keeping node ids alongside.
    ///
    /// The first node that fails to resolve or encode aborts the build; no
    /// partial batch is returned.
    pub fn build_batch(&self, graph: &Graph) -> Result<TransactionBatch, BuildError> {
        if self.require_nodes && graph.nodes.is_empty() {
            return Err(BuildError::EmptyGraph);
        }

        let ordered = graph.ordered()?;
        let mut entries = Vec::with_capacity(ordered.len());
        for node in ordered {
            let transaction = self
                .build_node(node)
                .map_err(|cause| BuildError::Node {
                    node_id: node.id.clone(),
                    cause,
                })?;
            log::debug!(
                "Built transaction {} for node '{}' ({})",
                entries.len(),
                node.id,
                node.function_name
            );
            entries.push(BatchEntry {
                node_id: node.id.clone(),
                transaction,
            });
        }

        log::info!(
            "Built batch of {} transaction(s) from {} edge(s)",
            entries.len(),
            graph.edges.len()
        );
        Ok(TransactionBatch { entries })
    }

    /// Like [`Pipeline::build_batch`], returning only the ordered descriptors.
    pub fn build_transactions(&self, graph: &Graph) -> Result<Vec<TransactionDescriptor>, BuildError> {
        self.build_batch(graph).map(TransactionBatch::into_transactions)
    }

    fn build_node(&self, node: &CallNode) -> Result<TransactionDescriptor, NodeFailure> {
        let function = resolve_function(&node.abi, &node.function_name)?;
        let transaction = self.encoder.encode_call(
            &node.contract_address,
            function,
            &node.args,
            node.value.as_deref(),
        )?;
        Ok(transaction)
    }
}

/// Builds the ordered transactions for a graph with the default configuration.
pub fn build_transactions(graph: &Graph) -> Result<Vec<TransactionDescriptor>, BuildError> {
    Pipeline::default().build_transactions(graph)
}
