//! Ancestor graph walker
//!
//! Collects every commit reachable from a starting commit through parent
//! links, together with the `(child, parent)` edges between them. Merge commits
//! contribute both parent edges and both parents are explored.
//!
//! The walk uses an explicit worklist and a visited set, so shared ancestors
//! are expanded once no matter how many merge paths reach them, and duplicate
//! or cyclic parent links cannot make it loop.

use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::Result;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

pub type Edge = (CommitId, CommitId);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitGraph {
    pub nodes: BTreeSet<CommitId>,
    /// `(child, parent)` pairs
    pub edges: BTreeSet<Edge>,
}

/// Walks commit ancestry through a parent loader
///
/// The loader returns the parent ids of a commit (empty for root commits), which
/// keeps the walker independent of where commits are stored.
pub struct GraphWalker<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&CommitId) -> Result<Vec<CommitId>>,
{
    parents_loader: ParentsLoaderFn,
}

impl<ParentsLoaderFn> GraphWalker<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&CommitId) -> Result<Vec<CommitId>>,
{
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self { parents_loader }
    }

    /// Collect the nodes and edges reachable from `start`
    pub fn ancestors(&self, start: &CommitId) -> Result<CommitGraph> {
        let mut graph = CommitGraph::default();
        let mut visited = HashSet::<CommitId>::new();
        let mut worklist = vec![start.clone()];

        while let Some(commit_id) = worklist.pop() {
            if !visited.insert(commit_id.clone()) {
                continue;
            }

            let parents = (self.parents_loader)(&commit_id)?;
            for parent in parents {
                graph.edges.insert((commit_id.clone(), parent.clone()));
                if !visited.contains(&parent) {
                    worklist.push(parent);
                }
            }

            graph.nodes.insert(commit_id);
        }

        debug!(
            start = %start,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "ancestor graph collected"
        );

        Ok(graph)
    }
}
