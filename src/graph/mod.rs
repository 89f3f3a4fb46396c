//! The call graph: contract-call nodes wired together by ordering edges.

use crate::abi::{FunctionDescriptor, resolve_function};
use crate::error::{CycleError, GraphError};
use serde::{Deserialize, Serialize};

pub mod file;
mod orderer;

pub use file::{GraphFile, IntoGraph, load_graph, save_graph};
pub use orderer::order;

/// Canvas coordinates of a node. Only carried so saved files keep their layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A single contract call in the graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallNode {
    pub id: String,
    pub position: Position,
    /// Target contract, expected `0x`-prefixed.
    pub contract_address: String,
    pub abi: Vec<FunctionDescriptor>,
    pub function_name: String,
    /// Derived from `abi` and `function_name`; may be stale after ABI edits.
    pub function_signature: String,
    /// Positionally aligned to the selected function's inputs.
    pub args: Vec<String>,
    /// Decimal amount of native currency to attach.
    pub value: Option<String>,
}

/// "`source` must execute before `target`."
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// The fields an editor submits when a node's call is edited.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallUpdate {
    pub contract_address: String,
    pub abi: Vec<FunctionDescriptor>,
    pub function_name: String,
    pub args: Vec<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graph {
    pub nodes: Vec<CallNode>,
    pub edges: Vec<Edge>,
}

impl CallNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }

    /// Recomputes `function_signature` from the current ABI.
    ///
    /// An unknown function name clears the signature.
    pub fn refresh_signature(&mut self) {
        self.function_signature = resolve_function(&self.abi, &self.function_name)
            .map(FunctionDescriptor::signature)
            .unwrap_or_default();
    }

    /// Aligns `args` to the selected function's inputs.
    ///
    /// Missing entries become empty-string placeholders; entries past the last
    /// input are discarded. Does nothing when the function does not resolve.
    pub fn align_args(&mut self) {
        if let Ok(function) = resolve_function(&self.abi, &self.function_name) {
            self.args.resize(function.inputs.len(), String::new());
        }
    }

    /// Applies an editor update, keeping the args and signature invariants.
    pub fn apply(&mut self, update: CallUpdate) {
        self.contract_address = update.contract_address;
        self.abi = update.abi;
        self.function_name = update.function_name;
        self.args = update.args;
        self.value = update.value.filter(|v| !v.trim().is_empty());
        self.align_args();
        self.refresh_signature();
    }
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: Self::default_id(&source, &target),
            source,
            target,
        }
    }

    pub fn default_id(source: &str, target: &str) -> String {
        format!("edge-{}-{}", source, target)
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&CallNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// An id of the form `node-<n>` not yet used in this graph.
    pub fn new_node_id(&self) -> String {
        let mut n = self.nodes.len() + 1;
        loop {
            let id = format!("node-{}", n);
            if !self.contains(&id) {
                return id;
            }
            n += 1;
        }
    }

    pub fn add_node(&mut self, node: CallNode) -> Result<(), GraphError> {
        if self.contains(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Removes a node together with every edge that touches it.
    pub fn remove_node(&mut self, id: &str) -> Result<CallNode, GraphError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        self.edges.retain(|e| e.source != id && e.target != id);
        Ok(self.nodes.remove(index))
    }

    pub fn update_call(&mut self, id: &str, update: CallUpdate) -> Result<&CallNode, GraphError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        node.apply(update);
        Ok(&*node)
    }

    /// Adds an ordering edge. Connecting an already connected pair returns the existing edge.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<&Edge, GraphError> {
        for id in [source, target] {
            if !self.contains(id) {
                return Err(GraphError::UnknownNode(id.to_string()));
            }
        }
        if source == target {
            return Err(GraphError::SelfLoop(source.to_string()));
        }

        let index = match self
            .edges
            .iter()
            .position(|e| e.source == source && e.target == target)
        {
            Some(existing) => existing,
            None => {
                self.edges.push(Edge::new(source, target));
                self.edges.len() - 1
            }
        };
        Ok(&self.edges[index])
    }

    pub fn disconnect(&mut self, edge_id: &str) -> Result<Edge, GraphError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == edge_id)
            .ok_or_else(|| GraphError::UnknownEdge(edge_id.to_string()))?;
        Ok(self.edges.remove(index))
    }

    /// The nodes in execution order. See [`order`].
    pub fn ordered(&self) -> Result<Vec<&CallNode>, CycleError> {
        order(&self.nodes, &self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn erc20_abi() -> Vec<FunctionDescriptor> {
        vec![
            FunctionDescriptor::function("transfer", &[("to", "address"), ("amount", "uint256")]),
            FunctionDescriptor::function("totalSupply", &[]),
        ]
    }

    #[test]
    fn test_new_node_id_skips_taken_ids() {
        let mut graph = Graph::new();
        graph.add_node(CallNode::new("node-1")).unwrap();
        graph.add_node(CallNode::new("node-2")).unwrap();
        assert_eq!(graph.new_node_id(), "node-3");
        graph.remove_node("node-1").unwrap();
        assert_eq!(graph.new_node_id(), "node-3");
    }

    #[test]
    fn test_apply_pads_and_truncates_args() {
        let mut node = CallNode::new("n1");
        node.apply(CallUpdate {
            contract_address: "0x01".to_string(),
            abi: erc20_abi(),
            function_name: "transfer".to_string(),
            args: vec!["0xabc".to_string()],
            value: Some("  ".to_string()),
        });
        assert_eq!(node.args, vec!["0xabc".to_string(), String::new()]);
        assert_eq!(node.function_signature, "transfer(address,uint256)");
        assert_eq!(node.value, None);

        node.apply(CallUpdate {
            function_name: "totalSupply".to_string(),
            abi: erc20_abi(),
            args: vec!["stale".to_string()],
            ..Default::default()
        });
        assert!(node.args.is_empty());
    }

    #[test]
    fn test_apply_with_unknown_function_keeps_args() {
        let mut node = CallNode::new("n1");
        node.apply(CallUpdate {
            abi: erc20_abi(),
            function_name: "mint".to_string(),
            args: vec!["1".to_string()],
            ..Default::default()
        });
        assert_eq!(node.args, vec!["1".to_string()]);
        assert_eq!(node.function_signature, "");
    }
}
