//! Common ancestor finder for merges
//!
//! Locates the merge base of two commits with a two-phase DAG search:
//!
//! 1. Mark every ancestor of the first commit (itself included) as reached
//!    from the head side.
//! 2. Walk the ancestry of the second commit breadth-first and stop at the
//!    first commit already reached from the head side.
//!
//! Breadth-first order means the base returned is the marked commit with the
//! fewest parent hops from the second commit. Both phases keep a visited state
//! per commit, so shared ancestors on repeated merge topologies are expanded
//! once and the search also terminates on malformed cyclic input.
//!
//! Unrelated histories have no common ancestor and yield `None`.
//!
//! ## Debug Logging
//!
//! Building with the `debug_merge` feature prints the visit order and the
//! final visit states to stderr:
//!
//! ```toml
//! [features]
//! debug_merge = []
//! ```

use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::Result;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};
use std::fmt;

macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const REACHED_FROM_HEAD = 0b01;
        const REACHED_FROM_TARGET = 0b10;
        const REACHED_FROM_BOTH = Self::REACHED_FROM_HEAD.bits() | Self::REACHED_FROM_TARGET.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::REACHED_FROM_HEAD) {
            flags.push("HEAD");
        }
        if self.contains(VisitState::REACHED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Finds the merge base between two commits
///
/// Takes a loader returning the parent ids of a commit, so it can run against
/// the snapshot store or an in-memory history in tests.
pub struct CommonAncestorFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&CommitId) -> Result<Vec<CommitId>>,
{
    parents_loader: ParentsLoaderFn,
}

impl<ParentsLoaderFn> CommonAncestorFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&CommitId) -> Result<Vec<CommitId>>,
{
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self { parents_loader }
    }

    pub fn find_common_ancestor(
        &self,
        head: &CommitId,
        target: &CommitId,
    ) -> Result<Option<CommitId>> {
        debug_log!("finding common ancestor of {} and {}", head, target);

        let mut states = HashMap::<CommitId, VisitState>::new();
        self.mark_head_ancestors(head, &mut states)?;

        let mut queue = VecDeque::from([target.clone()]);
        while let Some(commit_id) = queue.pop_front() {
            let state = states.entry(commit_id.clone()).or_insert(VisitState::NONE);
            if state.contains(VisitState::REACHED_FROM_TARGET) {
                continue;
            }
            state.insert(VisitState::REACHED_FROM_TARGET);
            debug_log!("  target side visits {} ({:?})", commit_id, state);

            if *state == VisitState::REACHED_FROM_BOTH {
                debug_log!("common ancestor: {}", commit_id);
                return Ok(Some(commit_id));
            }

            queue.extend((self.parents_loader)(&commit_id)?);
        }

        debug_log!("no common ancestor, final states: {:?}", states);
        Ok(None)
    }

    fn mark_head_ancestors(
        &self,
        head: &CommitId,
        states: &mut HashMap<CommitId, VisitState>,
    ) -> Result<()> {
        let mut worklist = vec![head.clone()];

        while let Some(commit_id) = worklist.pop() {
            let state = states.entry(commit_id.clone()).or_insert(VisitState::NONE);
            if state.contains(VisitState::REACHED_FROM_HEAD) {
                continue;
            }
            state.insert(VisitState::REACHED_FROM_HEAD);
            debug_log!("  head side visits {}", commit_id);

            worklist.extend((self.parents_loader)(&commit_id)?);
        }

        Ok(())
    }
}
