use crate::areas::repository::Repository;
use crate::artifacts::graph::render::GraphRenderer;
use crate::artifacts::graph::walker::{CommitGraph, GraphWalker};
use crate::errors::Result;
use std::io::Write;

impl Repository {
    /// Print the ancestor graph of `HEAD` as Graphviz DOT
    pub fn graph(&self, short_ids: bool) -> Result<CommitGraph> {
        self.ensure_initialized()?;

        let references = self.refs().load_required()?;
        let graph = GraphWalker::new(|commit_id| self.database().parents(commit_id))
            .ancestors(references.head())?;

        let renderer = GraphRenderer::new(&graph, references.entries(), short_ids);
        write!(self.writer(), "{}", renderer.to_dot())?;

        Ok(graph)
    }
}
