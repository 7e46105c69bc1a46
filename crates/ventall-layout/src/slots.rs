#![forbid(unsafe_code)]

//! Canonical ancestor slot tree.
//!
//! The tree is a perfect binary tree of fixed branching factor 2: every
//! generation reserves all of its slots regardless of occupancy. Occupancy
//! is the only thing that varies - a missing parent link, a dangling id, or
//! a hidden person all produce the same unoccupied slot, never an error.
//!
//! The whole tree is rebuilt from scratch whenever the root id or the
//! generation depth changes; nodes are never mutated in place.

use std::fmt;

use ventall_core::{ParentLinkIndex, PersonId, PersonIndex};

/// Defensive upper bound on generation depth.
///
/// Bad data can make parent links look cyclic; depth bounding (rather than
/// cycle detection) keeps every build finite. 2^10 = 1024 slots in the last
/// generation is already far beyond what any viewport can label.
pub const MAX_GENERATIONS: u8 = 10;

/// A fixed position in the canonical ancestor tree.
///
/// `slot_index` ranges over `[0, 2^generation)`. The node holds at most a
/// person id; the record itself stays in the [`PersonIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotNode {
    /// Generation, 0 = root.
    pub generation: u8,
    /// Position within the generation, left to right.
    pub slot_index: u32,
    /// Occupying person, if any.
    pub person: Option<PersonId>,
}

impl SlotNode {
    /// Whether a person occupies this slot.
    #[inline]
    #[must_use]
    pub fn occupied(&self) -> bool {
        self.person.is_some()
    }
}

/// The derived ancestor tree for one root at one depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTree {
    root: PersonId,
    generations: Vec<Vec<SlotNode>>,
}

impl SlotTree {
    /// The root person's id.
    #[must_use]
    pub fn root(&self) -> &PersonId {
        &self.root
    }

    /// Materialized depth: the highest generation index present.
    #[must_use]
    pub fn depth(&self) -> u8 {
        (self.generations.len() - 1) as u8
    }

    /// Slots of one generation, or `None` beyond the materialized depth.
    #[must_use]
    pub fn generation(&self, g: u8) -> Option<&[SlotNode]> {
        self.generations.get(g as usize).map(Vec::as_slice)
    }

    /// A single slot by coordinates.
    #[must_use]
    pub fn slot(&self, g: u8, index: u32) -> Option<&SlotNode> {
        self.generations.get(g as usize)?.get(index as usize)
    }

    /// Slot coordinates of a person, if present anywhere in the tree.
    ///
    /// Used to remap the selection after a rebuild: the same ancestor can
    /// land on a different slot under a new root.
    #[must_use]
    pub fn find_person(&self, id: &PersonId) -> Option<(u8, u32)> {
        for row in &self.generations {
            for slot in row {
                if slot.person.as_ref() == Some(id) {
                    return Some((slot.generation, slot.slot_index));
                }
            }
        }
        None
    }

    /// Total number of occupied slots across all generations.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.generations
            .iter()
            .flatten()
            .filter(|s| s.occupied())
            .count()
    }
}

/// Slot tree build failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotTreeError {
    /// The requested root id is absent from the index or hidden.
    RootNotFound { id: PersonId },
}

impl fmt::Display for SlotTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { id } => {
                write!(f, "root person `{id}` not found or hidden")
            }
        }
    }
}

impl std::error::Error for SlotTreeError {}

/// Derives the ancestor slot tree for a root person.
///
/// Borrows both indexes for its lifetime; building is read-only and can be
/// repeated any number of times ([`build`](Self::build) is idempotent for
/// unchanged data).
#[derive(Debug, Clone, Copy)]
pub struct SlotTreeBuilder<'a> {
    persons: &'a PersonIndex,
    links: &'a ParentLinkIndex,
}

impl<'a> SlotTreeBuilder<'a> {
    /// Create a builder over the chart's indexes.
    #[must_use]
    pub fn new(persons: &'a PersonIndex, links: &'a ParentLinkIndex) -> Self {
        Self { persons, links }
    }

    /// Build the tree for `root` covering generations `0..=max_generation`.
    ///
    /// `max_generation` is clamped to [`MAX_GENERATIONS`]. Fails only when
    /// the root itself does not resolve to a visible person; every other
    /// absence becomes an unoccupied slot.
    pub fn build(&self, root: &PersonId, max_generation: u8) -> Result<SlotTree, SlotTreeError> {
        if self.persons.visible(root).is_none() {
            return Err(SlotTreeError::RootNotFound { id: root.clone() });
        }
        let depth = max_generation.min(MAX_GENERATIONS);

        let mut generations = Vec::with_capacity(depth as usize + 1);
        generations.push(vec![SlotNode {
            generation: 0,
            slot_index: 0,
            person: Some(root.clone()),
        }]);

        for g in 1..=depth {
            let prev = &generations[g as usize - 1];
            let mut row = Vec::with_capacity(prev.len() * 2);
            for slot in prev {
                // An unoccupied slot emits two unoccupied children without
                // consulting the link index: the hidden person's own parents
                // must never be visited.
                let link = slot
                    .person
                    .as_ref()
                    .and_then(|id| self.links.parents_of(id));
                let father = link.and_then(|l| self.resolve(l.father.as_ref()));
                let mother = link.and_then(|l| self.resolve(l.mother.as_ref()));
                row.push(SlotNode {
                    generation: g,
                    slot_index: slot.slot_index * 2,
                    person: father,
                });
                row.push(SlotNode {
                    generation: g,
                    slot_index: slot.slot_index * 2 + 1,
                    person: mother,
                });
            }
            generations.push(row);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            root = %root,
            depth,
            occupied = generations.iter().flatten().filter(|s| s.occupied()).count(),
            "slot tree built"
        );

        Ok(SlotTree {
            root: root.clone(),
            generations,
        })
    }

    /// A candidate is effectively absent when the link field is empty, the
    /// id dangles, or the person is hidden.
    fn resolve(&self, candidate: Option<&PersonId>) -> Option<PersonId> {
        let id = candidate?;
        self.persons.visible(id).map(|p| p.id.clone())
    }
}
