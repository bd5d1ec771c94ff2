//! Commit metadata record
//!
//! Each snapshot directory `images/<id>/` has a sibling metadata file
//! `images/<id>.txt` with three `key=value` lines:
//!
//! ```text
//! parent=<id|id,id|None>
//! date=<ctime-style timestamp>
//! message=<text>
//! ```
//!
//! The message runs to the end of the file, so it may span several lines.

use crate::artifacts::objects::commit_id::CommitId;
use chrono::NaiveDateTime;

/// Sentinel written in place of a parent list for root commits
pub const NO_PARENT: &str = "None";

/// Timestamp layout, mirroring C `ctime()`
pub const DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Environment variable overriding the commit timestamp
pub const COMMIT_DATE_ENV: &str = "WIT_COMMIT_DATE";

const PARENT_KEY: &str = "parent=";
const DATE_KEY: &str = "date=";
const MESSAGE_KEY: &str = "message=";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMetadata {
    /// Empty for root commits, one parent for ordinary commits, two for merges
    parents: Vec<CommitId>,
    date: NaiveDateTime,
    message: String,
}

impl CommitMetadata {
    pub fn new(parents: Vec<CommitId>, date: NaiveDateTime, message: String) -> Self {
        CommitMetadata {
            parents,
            date,
            message,
        }
    }

    /// Build metadata stamped with the current commit date
    pub fn now(parents: Vec<CommitId>, message: String) -> Self {
        Self::new(parents, load_commit_date(), message)
    }

    pub fn parents(&self) -> &[CommitId] {
        &self.parents
    }

    pub fn readable_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    pub fn serialize(&self) -> String {
        let parents = if self.parents.is_empty() {
            NO_PARENT.to_string()
        } else {
            self.parents
                .iter()
                .map(|parent| parent.as_ref())
                .collect::<Vec<_>>()
                .join(",")
        };

        format!(
            "{PARENT_KEY}{parents}\n{DATE_KEY}{}\n{MESSAGE_KEY}{}",
            self.readable_date(),
            self.message
        )
    }

    /// Parse a metadata record, reporting the first malformed field
    pub fn parse(content: &str) -> Result<Self, String> {
        let mut sections = content.splitn(3, '\n');

        let parent_line = sections.next().unwrap_or_default();
        let date_line = sections.next().ok_or("missing date line")?;
        let message_line = sections.next().ok_or("missing message line")?;

        let parents = parent_line
            .strip_prefix(PARENT_KEY)
            .ok_or_else(|| format!("expected '{PARENT_KEY}', found '{parent_line}'"))?
            .trim();
        let parents = if parents == NO_PARENT {
            Vec::new()
        } else {
            parents
                .split(',')
                .map(|parent| {
                    CommitId::try_parse(parent)
                        .ok_or_else(|| format!("invalid parent id '{parent}'"))
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let date = date_line
            .strip_prefix(DATE_KEY)
            .ok_or_else(|| format!("expected '{DATE_KEY}', found '{date_line}'"))?
            .trim();
        let date = NaiveDateTime::parse_from_str(date, DATE_FORMAT)
            .map_err(|e| format!("invalid date '{date}': {e}"))?;

        let message = message_line
            .strip_prefix(MESSAGE_KEY)
            .ok_or_else(|| format!("expected '{MESSAGE_KEY}', found '{message_line}'"))?;

        Ok(CommitMetadata::new(parents, date, message.to_string()))
    }
}

/// Read the commit date from `WIT_COMMIT_DATE`, or fall back to the local clock
///
/// Accepts RFC 2822 or `%Y-%m-%d %H:%M:%S %z`. Unparseable values are ignored.
pub fn load_commit_date() -> NaiveDateTime {
    std::env::var(COMMIT_DATE_ENV)
        .ok()
        .and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        })
        .map(|date| date.naive_local())
        .unwrap_or_else(|| chrono::Local::now().naive_local())
}
