// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark reconciliation.
//!
//! Indicator layout is immediate-mode: every draw produces the complete mark list. A [`Scene`]
//! remembers the previous list and turns the next one into enter/update/exit diffs keyed by
//! [`MarkId`], so retained renderers only touch what changed (switching the gauge shape exits the
//! old gauge's marks and enters the new ones).

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::mark::{Mark, MarkGroup, MarkId};

/// A change to the retained mark set.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark appeared.
    Enter {
        /// Mark id.
        id: MarkId,
        /// The new mark.
        new: Box<Mark>,
    },
    /// A mark changed.
    Update {
        /// Mark id.
        id: MarkId,
        /// The previous mark.
        old: Box<Mark>,
        /// The new mark.
        new: Box<Mark>,
    },
    /// A mark disappeared.
    Exit {
        /// Mark id.
        id: MarkId,
        /// The removed mark.
        old: Box<Mark>,
    },
}

impl MarkDiff {
    /// The id the diff refers to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

/// The retained set of marks from the last [`Scene::tick`].
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Mark>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the retained marks with `marks` and returns the diffs.
    ///
    /// Enter and update diffs follow the order of `marks`; exit diffs follow, sorted by id.
    /// Unchanged marks produce no diff. If `marks` repeats an id, the last one wins.
    pub fn tick(&mut self, marks: Vec<Mark>) -> Vec<MarkDiff> {
        let mut out = Vec::new();
        let mut seen: HashSet<MarkId> = HashSet::with_capacity(marks.len());
        let mut next: HashMap<MarkId, Mark> = HashMap::with_capacity(marks.len());

        for mark in marks {
            let id = mark.id;
            seen.insert(id);
            match self.marks.get(&id) {
                None => out.push(MarkDiff::Enter {
                    id,
                    new: Box::new(mark.clone()),
                }),
                Some(old) if *old != mark => out.push(MarkDiff::Update {
                    id,
                    old: Box::new(old.clone()),
                    new: Box::new(mark.clone()),
                }),
                Some(_) => {}
            }
            next.insert(id, mark);
        }

        let mut exits: Vec<MarkId> = self
            .marks
            .keys()
            .copied()
            .filter(|id| !seen.contains(id))
            .collect();
        exits.sort();
        for id in exits {
            if let Some(old) = self.marks.remove(&id) {
                out.push(MarkDiff::Exit {
                    id,
                    old: Box::new(old),
                });
            }
        }

        self.marks = next;
        out
    }

    /// Returns a retained mark.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    /// Number of retained marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Number of retained marks in `group`.
    pub fn group_len(&self, group: MarkGroup) -> usize {
        self.marks.values().filter(|m| m.group == group).count()
    }

    /// Retained marks sorted into paint order `(z_index, id)`.
    pub fn paint_order(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.values().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }
}
