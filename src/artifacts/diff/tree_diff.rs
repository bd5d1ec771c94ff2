//! Recursive comparison of two directory trees
//!
//! `TreeDiff::compare(a, b)` walks both trees level by level and classifies
//! every differing path as:
//!
//! - `Modified`: a file on both sides with different content (or a file on
//!   one side and a directory on the other)
//! - `OnlyInA` / `OnlyInB`: present on one side only. A directory present on
//!   one side only is reported once, as the directory, with a trailing
//!   separator, rather than file by file.
//!
//! Reserved entries are skipped at every depth. A missing root compares as an
//! empty tree. Path comparison is case-sensitive.
//!
//! The result is a finite, ordered set of change records; `filter` selects the
//! sides a particular report cares about.

use crate::artifacts::core::fs_tree::is_reserved;
use crate::errors::Result;
use bitflags::bitflags;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffSides: u8 {
        const MODIFIED = 0b001;
        const ONLY_IN_A = 0b010;
        const ONLY_IN_B = 0b100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TreeChangeType {
    Modified,
    OnlyInA,
    OnlyInB,
}

impl TreeChangeType {
    pub fn matches_filter(&self, filter: DiffSides) -> bool {
        match self {
            TreeChangeType::Modified => filter.contains(DiffSides::MODIFIED),
            TreeChangeType::OnlyInA => filter.contains(DiffSides::ONLY_IN_A),
            TreeChangeType::OnlyInB => filter.contains(DiffSides::ONLY_IN_B),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Directory,
}

pub type ChangeSet = BTreeMap<PathBuf, TreeChangeType>;
type TreeEntryMap = BTreeMap<OsString, EntryKind>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDiff {
    change_set: ChangeSet,
}

impl TreeDiff {
    /// Compare tree `a` against tree `b`
    pub fn compare(a: &Path, b: &Path) -> Result<Self> {
        let mut tree_diff = TreeDiff::default();
        tree_diff.compare_dirs(Some(a), Some(b), Path::new(""))?;
        Ok(tree_diff)
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.change_set
    }

    pub fn is_empty(&self) -> bool {
        self.change_set.is_empty()
    }

    /// Keep only the change records on the requested sides
    pub fn filter(self, sides: DiffSides) -> Self {
        TreeDiff {
            change_set: self
                .change_set
                .into_iter()
                .filter(|(_, change)| change.matches_filter(sides))
                .collect(),
        }
    }

    pub fn modified(&self) -> BTreeSet<PathBuf> {
        self.paths_of(TreeChangeType::Modified)
    }

    pub fn only_in_a(&self) -> BTreeSet<PathBuf> {
        self.paths_of(TreeChangeType::OnlyInA)
    }

    pub fn only_in_b(&self) -> BTreeSet<PathBuf> {
        self.paths_of(TreeChangeType::OnlyInB)
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.change_set.keys().cloned().collect()
    }

    fn paths_of(&self, change_type: TreeChangeType) -> BTreeSet<PathBuf> {
        self.change_set
            .iter()
            .filter(|(_, change)| **change == change_type)
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn compare_dirs(&mut self, a: Option<&Path>, b: Option<&Path>, prefix: &Path) -> Result<()> {
        let a_entries = Self::read_entries(a)?;
        let b_entries = Self::read_entries(b)?;

        for (name, a_kind) in &a_entries {
            let path = prefix.join(name);

            match (a_kind, b_entries.get(name)) {
                (EntryKind::Directory, Some(EntryKind::Directory)) => {
                    let a_dir = a.map(|a| a.join(name));
                    let b_dir = b.map(|b| b.join(name));
                    self.compare_dirs(a_dir.as_deref(), b_dir.as_deref(), &path)?;
                }
                (EntryKind::File, Some(EntryKind::File)) => {
                    if let (Some(a), Some(b)) = (a, b)
                        && !Self::same_content(&a.join(name), &b.join(name))?
                    {
                        self.change_set.insert(path, TreeChangeType::Modified);
                    }
                }
                (_, Some(_)) => {
                    self.change_set.insert(path, TreeChangeType::Modified);
                }
                (kind, None) => {
                    self.change_set
                        .insert(Self::display_path(path, *kind), TreeChangeType::OnlyInA);
                }
            }
        }

        for (name, b_kind) in &b_entries {
            if a_entries.contains_key(name) {
                continue;
            }

            let path = prefix.join(name);
            self.change_set
                .insert(Self::display_path(path, *b_kind), TreeChangeType::OnlyInB);
        }

        Ok(())
    }

    fn read_entries(dir: Option<&Path>) -> Result<TreeEntryMap> {
        let Some(dir) = dir.filter(|dir| dir.is_dir()) else {
            return Ok(BTreeMap::new());
        };

        let mut entries = BTreeMap::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();

            if is_reserved(&name) {
                continue;
            }

            let kind = if std::fs::metadata(entry.path())?.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.insert(name, kind);
        }

        Ok(entries)
    }

    fn same_content(a: &Path, b: &Path) -> Result<bool> {
        if std::fs::metadata(a)?.len() != std::fs::metadata(b)?.len() {
            return Ok(false);
        }

        Ok(std::fs::read(a)? == std::fs::read(b)?)
    }

    // add the trailing separator if it's a directory
    fn display_path(mut path: PathBuf, kind: EntryKind) -> PathBuf {
        if kind == EntryKind::Directory {
            path.push("");
        }
        path
    }
}
