use super::{CallNode, Edge};
use crate::error::CycleError;
use ahash::AHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnStack,
    Done,
}

/// Orders nodes so that every edge's source comes before its target.
///
/// Nodes are visited depth-first in declaration order, each one after all of its
/// dependencies, so unrelated nodes keep their relative order. Edges naming a node
/// outside `nodes`, and edges from a node to itself, are skipped. Reaching a node
/// that is still on the traversal stack is a cycle and fails the whole ordering.
pub fn order<'a>(nodes: &'a [CallNode], edges: &[Edge]) -> Result<Vec<&'a CallNode>, CycleError> {
    let mut orderer = Orderer::new(nodes, edges);
    for index in 0..nodes.len() {
        orderer.visit(index)?;
    }

    log::debug!(
        "Ordered {} node(s): {}",
        orderer.output.len(),
        orderer
            .output
            .iter()
            .map(|&i| nodes[i].id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(orderer.output.into_iter().map(|i| &nodes[i]).collect())
}

struct Orderer<'a> {
    nodes: &'a [CallNode],
    /// For each node index, the indices of the nodes that must run before it.
    dependencies: Vec<Vec<usize>>,
    state: Vec<VisitState>,
    /// Open frames: a node on the stack and the next dependency to visit.
    stack: Vec<(usize, usize)>,
    output: Vec<usize>,
}

impl<'a> Orderer<'a> {
    fn new(nodes: &'a [CallNode], edges: &[Edge]) -> Self {
        let mut index: AHashMap<&str, usize> = AHashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.id.as_str()).or_insert(i);
        }

        let mut dependencies = vec![Vec::new(); nodes.len()];
        for edge in edges {
            match (index.get(edge.source.as_str()), index.get(edge.target.as_str())) {
                (Some(&source), Some(&target)) if source != target => {
                    dependencies[target].push(source);
                }
                (Some(_), Some(_)) => {
                    log::debug!("Ignoring self-loop edge '{}' on '{}'", edge.id, edge.source);
                }
                _ => {
                    log::warn!(
                        "Ignoring edge '{}' ({} -> {}): endpoint not in graph",
                        edge.id,
                        edge.source,
                        edge.target
                    );
                }
            }
        }

        Self {
            nodes,
            dependencies,
            state: vec![VisitState::Unvisited; nodes.len()],
            stack: Vec::new(),
            output: Vec::with_capacity(nodes.len()),
        }
    }

    /// Depth-first walk from `root` over an explicit frame stack.
    fn visit(&mut self, root: usize) -> Result<(), CycleError> {
        match self.state[root] {
            VisitState::Done => return Ok(()),
            VisitState::OnStack => return Err(self.cycle_from(root)),
            VisitState::Unvisited => {}
        }
        self.enter(root);

        while let Some(frame) = self.stack.last_mut() {
            let (index, cursor) = *frame;
            match self.dependencies[index].get(cursor).copied() {
                Some(dependency) => {
                    frame.1 += 1;
                    match self.state[dependency] {
                        VisitState::Done => {}
                        VisitState::OnStack => return Err(self.cycle_from(dependency)),
                        VisitState::Unvisited => self.enter(dependency),
                    }
                }
                None => {
                    self.stack.pop();
                    self.state[index] = VisitState::Done;
                    self.output.push(index);
                }
            }
        }
        Ok(())
    }

    fn enter(&mut self, index: usize) {
        self.state[index] = VisitState::OnStack;
        self.stack.push((index, 0));
    }

    /// Collects the stack segment from the first occurrence of `index` to the top.
    fn cycle_from(&self, index: usize) -> CycleError {
        let start = self
            .stack
            .iter()
            .position(|&(i, _)| i == index)
            .unwrap_or(0);
        CycleError {
            node_ids: self.stack[start..]
                .iter()
                .map(|&(i, _)| self.nodes[i].id.clone())
                .collect(),
        }
    }
}
