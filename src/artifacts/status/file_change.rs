use colored::Colorize;

const LABEL_WIDTH: usize = 8;

/// Change between the current commit's snapshot and the staging area
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StagedChangeType {
    Added,
    Modified,
    Deleted,
}

/// Change between the staging area and the working tree for a tracked path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkingChangeType {
    Modified,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChangeType {
    Staged(StagedChangeType),
    Working(WorkingChangeType),
}

impl From<&FileChangeType> for &str {
    fn from(change: &FileChangeType) -> Self {
        match change {
            FileChangeType::Staged(staged_change) => match staged_change {
                StagedChangeType::Added => "new file:   ",
                StagedChangeType::Modified => "modified:   ",
                StagedChangeType::Deleted => "deleted:    ",
            },
            FileChangeType::Working(working_change) => match working_change {
                WorkingChangeType::Modified => "modified:   ",
                WorkingChangeType::Deleted => "deleted:    ",
            },
        }
    }
}

impl std::fmt::Display for FileChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = self.into();
        let colored_str = match self {
            FileChangeType::Staged(_) => label.green(),
            FileChangeType::Working(_) => label.red(),
        };
        write!(f, "{:>width$}{}", "", colored_str, width = LABEL_WIDTH)
    }
}
