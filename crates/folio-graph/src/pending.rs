//! The pending set: linked entries not yet placed in the graph.
//!
//! `Pending` is a small arena. Every entry gets a stable [`SlotId`] when the
//! set is built; removing an entry empties its slot, so ids held by a
//! traversal stay valid and the set only ever shrinks. Iteration always
//! follows the linker's output order, which keeps candidate selection
//! deterministic.

use crate::link::LinkedEntry;
use crate::types::{BranchName, CommitId};

/// Stable index of an entry in a [`Pending`] set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// The raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The most recently placed entry of a traversal, identified by its branch
/// and commit. Descendants are looked up relative to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frontier {
    /// Branch of the placed entry.
    pub branch_name: BranchName,
    /// Commit of the placed entry.
    pub commit_id: CommitId,
}

impl Frontier {
    /// The frontier positioned at `entry`.
    #[must_use]
    pub fn at(entry: &LinkedEntry) -> Self {
        Self {
            branch_name: entry.branch_name.clone(),
            commit_id: entry.commit_id.clone(),
        }
    }

    /// `entry` continues this frontier's lane: same branch, parent is the
    /// frontier commit.
    #[must_use]
    pub fn is_continued_by(&self, entry: &LinkedEntry) -> bool {
        entry.branch_name == self.branch_name && entry.has_parent(&self.commit_id)
    }

    /// `entry` forks off this frontier: another branch whose parent is the
    /// frontier commit.
    #[must_use]
    pub fn is_forked_by(&self, entry: &LinkedEntry) -> bool {
        entry.branch_name != self.branch_name && entry.has_parent(&self.commit_id)
    }
}

/// Arena of linked entries awaiting placement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pending {
    slots: Vec<Option<LinkedEntry>>,
    live: usize,
}

impl Pending {
    /// Build a pending set holding every entry, in order.
    #[must_use]
    pub fn new(entries: Vec<LinkedEntry>) -> Self {
        let live = entries.len();
        Self {
            slots: entries.into_iter().map(Some).collect(),
            live,
        }
    }

    /// Number of entries still pending.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` once every entry has been taken.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// The entry in `slot`, if it is still pending.
    #[must_use]
    pub fn get(&self, slot: SlotId) -> Option<&LinkedEntry> {
        self.slots.get(slot.0).and_then(Option::as_ref)
    }

    /// Returns `true` if `slot` is still pending.
    #[must_use]
    pub fn contains(&self, slot: SlotId) -> bool {
        self.get(slot).is_some()
    }

    /// Remove and return the entry in `slot`.
    pub fn take(&mut self, slot: SlotId) -> Option<LinkedEntry> {
        let taken = self.slots.get_mut(slot.0).and_then(Option::take);
        if taken.is_some() {
            self.live -= 1;
        }
        taken
    }

    /// Pending entries with their slots, in input order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &LinkedEntry)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|entry| (SlotId(i), entry)))
    }

    /// The first pending entry matching `pred`.
    pub fn find(&self, mut pred: impl FnMut(&LinkedEntry) -> bool) -> Option<SlotId> {
        self.iter()
            .find(|(_, entry)| pred(entry))
            .map(|(slot, _)| slot)
    }

    /// Slots of every pending entry matching `pred`, in input order.
    pub fn find_all(&self, mut pred: impl FnMut(&LinkedEntry) -> bool) -> Vec<SlotId> {
        self.iter()
            .filter(|(_, entry)| pred(entry))
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Remove every pending entry matching `pred` and return them in order.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&LinkedEntry) -> bool) -> Vec<LinkedEntry> {
        let mut removed = Vec::new();
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(&mut pred) {
                removed.extend(slot.take());
            }
        }
        self.live -= removed.len();
        removed
    }

    /// Consume the set, returning whatever was never taken.
    #[must_use]
    pub fn into_remaining(self) -> Vec<LinkedEntry> {
        self.slots.into_iter().flatten().collect()
    }
}
