//! Graph rendering for the external visualisation collaborator
//!
//! The collaborator only needs the ancestor node/edge set plus reference
//! names pointing at the commits they name. Output is Graphviz DOT, so it can
//! be piped straight into `dot -Tpng` or any DOT viewer.

use crate::artifacts::graph::walker::CommitGraph;
use crate::artifacts::objects::commit_id::CommitId;
use derive_new::new;
use std::fmt::Write;

#[derive(Debug, new)]
pub struct GraphRenderer<'g> {
    graph: &'g CommitGraph,
    /// `(reference name, commit)` pairs, `HEAD` included
    references: Vec<(String, CommitId)>,
    short_ids: bool,
}

impl GraphRenderer<'_> {
    /// References that point into the graph, as `(name, commit)` edges
    pub fn reference_edges(&self) -> Vec<(&str, &CommitId)> {
        self.references
            .iter()
            .filter(|(_, commit_id)| self.graph.nodes.contains(commit_id))
            .map(|(name, commit_id)| (name.as_str(), commit_id))
            .collect()
    }

    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph wit {\n    rankdir=RL;\n");

        for node in &self.graph.nodes {
            let _ = writeln!(dot, "    \"{}\" [shape=ellipse];", self.label(node));
        }

        for (name, commit_id) in self.reference_edges() {
            let name = escape(name);
            let _ = writeln!(dot, "    \"{}\" [shape=box];", name);
            let _ = writeln!(dot, "    \"{}\" -> \"{}\";", name, self.label(commit_id));
        }

        for (child, parent) in &self.graph.edges {
            let _ = writeln!(
                dot,
                "    \"{}\" -> \"{}\";",
                self.label(child),
                self.label(parent)
            );
        }

        dot.push_str("}\n");
        dot
    }

    fn label(&self, commit_id: &CommitId) -> String {
        if self.short_ids {
            commit_id.to_short_id()
        } else {
            commit_id.to_string()
        }
    }
}

/// Escape a name for use inside a quoted DOT identifier
fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
