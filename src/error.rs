use thiserror::Error;

/// Raw ABI text could not be read as a JSON array of entries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Failed to parse ABI JSON: {0}")]
    InvalidJson(String),

    #[error("ABI must be a JSON array of entries, found {0}")]
    NotAnArray(String),
}

/// No call-eligible entry in the ABI carries the requested name.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Function '{function_name}' not found in ABI")]
pub struct NotFoundError {
    pub function_name: String,
}

/// Errors raised while turning a resolved function and its argument strings into calldata.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    #[error("Function '{function}' expects {expected} arguments, but received {found}")]
    ArgumentCount {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("Input {index} declares unsupported type '{type_name}': {reason}")]
    UnsupportedType {
        index: usize,
        type_name: String,
        reason: String,
    },

    #[error("Argument {index} ('{value}') is not a valid {expected}: {reason}")]
    InvalidArgument {
        index: usize,
        expected: String,
        value: String,
        reason: String,
    },

    #[error("Target address '{address}' is not a 20-byte hex address")]
    InvalidTarget { address: String },

    #[error("Value '{value}' is not a valid native amount: {reason}")]
    InvalidValue { value: String, reason: String },
}

/// A dependency cycle was found while ordering the call graph.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Dependency cycle between nodes: {}", .node_ids.join(" -> "))]
pub struct CycleError {
    /// Node ids on the cycle, in traversal order.
    pub node_ids: Vec<String>,
}

/// The per-node failure wrapped by [`BuildError::Node`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeFailure {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Errors that abort a whole transaction batch build.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Node '{node_id}' could not be built: {cause}")]
    Node { node_id: String, cause: NodeFailure },

    #[error(transparent)]
    Cycle(#[from] CycleError),

    #[error("The call graph contains no nodes")]
    EmptyGraph,
}

/// Errors from graph editing operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("A node with id '{0}' already exists")]
    DuplicateNode(String),

    #[error("Node '{0}' does not exist in the graph")]
    UnknownNode(String),

    #[error("Node '{0}' cannot depend on itself")]
    SelfLoop(String),

    #[error("Edge '{0}' does not exist in the graph")]
    UnknownEdge(String),
}

/// Errors while reading or writing the persisted graph file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphFileError {
    #[error("Failed to parse graph JSON: {0}")]
    JsonParseError(String),

    #[error("Graph file field 'nodes' must be a sequence")]
    NodesNotSequence,

    #[error("Graph file is malformed: {0}")]
    InvalidFormat(String),

    #[error("Could not access graph file '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors while saving or loading a compiled transaction batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BatchError {
    #[error("{0}")]
    Generic(String),
}

/// A single submission rejected by the signing/broadcast facility.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Submission rejected: {0}")]
pub struct SubmissionError(pub String);

/// Fail-fast report from [`crate::submit::submit_all`].
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Transaction {index} failed after {} confirmed submission(s): {cause}", .completed.len())]
pub struct SubmitAllError {
    pub index: usize,
    /// References of the transactions submitted before the failure.
    pub completed: Vec<String>,
    pub cause: SubmissionError,
}
