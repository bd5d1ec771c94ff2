use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct ConflictMessage {
    pub header: &'static str,
    pub footer: &'static str,
}

impl From<&ConflictType> for ConflictMessage {
    fn from(value: &ConflictType) -> Self {
        match value {
            ConflictType::StagedChange => Self {
                header: "Your staged changes to the following files are not committed:",
                footer: "Please commit your changes before you switch branches.",
            },
            ConflictType::UnstagedChange => Self {
                header: "Your local changes to the following files would be overwritten by checkout:",
                footer: "Please add and commit your changes before you switch branches.",
            },
            ConflictType::UntrackedOverwritten => Self {
                header: "The following untracked working tree files would be overwritten by checkout:",
                footer: "Please move or remove them before you switch branches.",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConflictType {
    /// Staging area differs from the current commit's snapshot
    StagedChange,
    /// Working tree differs from the staging area for a tracked path
    UnstagedChange,
    /// An untracked working tree file sits where the target has a file
    UntrackedOverwritten,
}

/// Everything that blocks a checkout, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChanges {
    conflicts: BTreeMap<ConflictType, BTreeSet<PathBuf>>,
}

impl PendingChanges {
    pub fn record(&mut self, conflict_type: ConflictType, path: impl Into<PathBuf>) {
        self.conflicts
            .entry(conflict_type)
            .or_default()
            .insert(path.into());
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.values().all(BTreeSet::is_empty)
    }

    pub fn get(&self, conflict_type: ConflictType) -> impl Iterator<Item = &Path> {
        self.conflicts
            .get(&conflict_type)
            .into_iter()
            .flatten()
            .map(PathBuf::as_path)
    }

    /// All blocking paths, deduplicated and sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.conflicts
            .values()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// One message block per non-empty conflict kind
    pub fn messages(&self) -> Vec<String> {
        self.conflicts
            .iter()
            .filter(|(_, paths)| !paths.is_empty())
            .map(|(conflict_type, paths)| {
                let paths = paths
                    .iter()
                    .map(|p| format!("\t{}", p.display()))
                    .collect::<Vec<String>>();

                let ConflictMessage { header, footer } = conflict_type.into();
                format!("{}\n{}\n{}", header, paths.join("\n"), footer)
            })
            .collect()
    }
}
