use super::{CallNode, Edge, Graph, Position};
use crate::abi::FunctionDescriptor;
use crate::error::GraphFileError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// The JSON document an editor saves and loads.
///
/// ```json
/// { "nodes": [{ "id": "...", "position": {"x": 0, "y": 0},
///               "data": { "contractAddress": "0x...", "functionName": "...",
///                         "functionSignature": "...", "args": [], "abi": [], "value": "" } }],
///   "edges": [{ "id": "...", "source": "...", "target": "..." }] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphFile {
    pub nodes: Vec<FileNode>,
    #[serde(default)]
    pub edges: Vec<FileEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: FileNodeData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNodeData {
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub function_name: String,
    #[serde(default)]
    pub function_signature: String,
    /// Editors may store numbers or booleans here; they load as their text.
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default, deserialize_with = "crate::abi::lenient_abi")]
    pub abi: Option<Vec<FunctionDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEdge {
    /// Editors may omit it; a missing id is derived from the endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
}

/// Conversion of a persisted or foreign format into a [`Graph`].
///
/// Implement this on your own structs to feed graphs from other editors into
/// the pipeline.
pub trait IntoGraph {
    fn into_graph(self) -> Result<Graph, GraphFileError>;
}

impl GraphFile {
    /// Parses a saved graph, reporting (never panicking on) malformed input.
    pub fn from_json(json: &str) -> Result<Self, GraphFileError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| GraphFileError::JsonParseError(e.to_string()))?;

        if !matches!(value.get("nodes"), Some(Value::Array(_))) {
            return Err(GraphFileError::NodesNotSequence);
        }

        serde_json::from_value(value).map_err(|e| GraphFileError::InvalidFormat(e.to_string()))
    }

    /// Snapshots the full graph.
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| FileNode {
                id: node.id.clone(),
                position: node.position,
                data: FileNodeData {
                    contract_address: node.contract_address.clone(),
                    function_name: node.function_name.clone(),
                    function_signature: node.function_signature.clone(),
                    args: node.args.iter().cloned().map(Value::String).collect(),
                    abi: Some(node.abi.clone()),
                    value: node.value.clone(),
                },
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|edge| FileEdge {
                id: Some(edge.id.clone()),
                source: edge.source.clone(),
                target: edge.target.clone(),
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn to_json_pretty(&self) -> Result<String, GraphFileError> {
        serde_json::to_string_pretty(self).map_err(|e| GraphFileError::InvalidFormat(e.to_string()))
    }
}

impl IntoGraph for GraphFile {
    fn into_graph(self) -> Result<Graph, GraphFileError> {
        let mut seen = AHashSet::with_capacity(self.nodes.len());
        let mut nodes = Vec::with_capacity(self.nodes.len());

        for file_node in self.nodes {
            if !seen.insert(file_node.id.clone()) {
                return Err(GraphFileError::InvalidFormat(format!(
                    "duplicate node id '{}'",
                    file_node.id
                )));
            }
            let data = file_node.data;
            nodes.push(CallNode {
                id: file_node.id,
                position: file_node.position,
                contract_address: data.contract_address,
                abi: data.abi.unwrap_or_default(),
                function_name: data.function_name,
                function_signature: data.function_signature,
                args: data.args.iter().map(arg_text).collect(),
                value: data.value,
            });
        }

        let edges = self
            .edges
            .into_iter()
            .map(|file_edge| Edge {
                id: file_edge
                    .id
                    .unwrap_or_else(|| Edge::default_id(&file_edge.source, &file_edge.target)),
                source: file_edge.source,
                target: file_edge.target,
            })
            .collect();

        Ok(Graph { nodes, edges })
    }
}

fn arg_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Reads and converts a saved graph file.
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph, GraphFileError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| GraphFileError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let graph = GraphFile::from_json(&json)?.into_graph()?;
    log::info!(
        "Loaded graph '{}' with {} node(s) and {} edge(s)",
        path.display(),
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(graph)
}

/// Writes a pretty-printed snapshot of the whole graph.
pub fn save_graph(path: impl AsRef<Path>, graph: &Graph) -> Result<(), GraphFileError> {
    let path = path.as_ref();
    let json = GraphFile::from_graph(graph).to_json_pretty()?;
    fs::write(path, json).map_err(|e| GraphFileError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
