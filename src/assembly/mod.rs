//! Placement engine: parts are dropped onto slots on a board.
//!
//! Every operation mutates the [`Board`] and returns the events a renderer
//! needs; nothing here knows how the board is drawn.

pub mod parts;

use std::collections::{BTreeMap, HashSet};

use rand::Rng;

use crate::error::{Error, Result};
use crate::feedback;
use crate::progress;

pub use parts::{default_layout, Part, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlacementOptions {
    /// A placed part cannot be picked up again.
    pub disable_source_after_placement: bool,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            disable_source_after_placement: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartStatus {
    Pending,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    AlreadyFilled,
    WrongSlot { part: Part },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyEvent {
    Rejected { slot: String, reason: Rejection },
    /// Brief highlight on a slot that refused a part.
    Pulse { slot: String },
    Placed { part: Part, slot: String },
    PartDone { part: Part },
    Praise(&'static str),
    Progress { percent: u8 },
    /// Emitted once, on the drop that fills the last slot.
    Completed,
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Board {
    slots: Vec<Slot>,
    placed: BTreeMap<String, Part>,
    options: PlacementOptions,
    completed: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::with_options(PlacementOptions::default())
    }
}

impl Board {
    /// Build a board on a custom layout. The layout needs at least one slot,
    /// unique slot ids and no part accepted by two slots.
    pub fn new(slots: Vec<Slot>, options: PlacementOptions) -> Result<Self> {
        validate_layout(&slots)?;
        Ok(Self::unchecked(slots, options))
    }

    /// Board on the default layout.
    pub fn with_options(options: PlacementOptions) -> Self {
        Self::unchecked(default_layout(), options)
    }

    fn unchecked(slots: Vec<Slot>, options: PlacementOptions) -> Self {
        Self {
            slots,
            placed: BTreeMap::new(),
            options,
            completed: false,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, slot_id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == slot_id)
    }

    /// The slot that accepts `part`, if the layout has one.
    pub fn slot_for(&self, part: Part) -> Option<&Slot> {
        self.slots.iter().find(|s| s.accepts == part)
    }

    pub fn occupant(&self, slot_id: &str) -> Option<Part> {
        self.placed.get(slot_id).copied()
    }

    pub fn part_status(&self, part: Part) -> PartStatus {
        if self.placed.values().any(|p| *p == part) {
            PartStatus::Done
        } else {
            PartStatus::Pending
        }
    }

    /// Parts that appear on this board, in layout order.
    pub fn parts(&self) -> impl Iterator<Item = Part> + '_ {
        self.slots.iter().map(|s| s.accepts)
    }

    pub fn filled_count(&self) -> usize {
        self.placed.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn percent(&self) -> u8 {
        progress::percent(self.filled_count(), self.slot_count())
    }

    pub fn is_complete(&self) -> bool {
        self.filled_count() == self.slot_count()
    }

    /// Whether `part` may be picked up.
    pub fn can_drag(&self, part: Part) -> bool {
        !(self.options.disable_source_after_placement
            && self.part_status(part) == PartStatus::Done)
    }

    /// Drop `part` onto the slot `slot_id`.
    ///
    /// A filled slot rejects everything; an empty slot rejects any part it
    /// does not accept. Rejections leave the board untouched.
    pub fn attempt_placement<R: Rng + ?Sized>(
        &mut self,
        part: Part,
        slot_id: &str,
        rng: &mut R,
    ) -> Result<Vec<AssemblyEvent>> {
        let (slot_id, accepts) = self
            .slot(slot_id)
            .map(|s| (s.id.clone(), s.accepts))
            .ok_or_else(|| Error::UnknownSlot(slot_id.to_string()))?;

        if self.placed.contains_key(&slot_id) {
            log::debug!("drop of {part} onto filled slot {slot_id}");
            return Ok(vec![AssemblyEvent::Rejected {
                slot: slot_id,
                reason: Rejection::AlreadyFilled,
            }]);
        }

        if accepts != part {
            log::debug!("{part} does not fit {slot_id}");
            return Ok(vec![
                AssemblyEvent::Rejected {
                    slot: slot_id.clone(),
                    reason: Rejection::WrongSlot { part },
                },
                AssemblyEvent::Pulse { slot: slot_id },
            ]);
        }

        self.placed.insert(slot_id.clone(), part);
        let mut events = vec![
            AssemblyEvent::Placed {
                part,
                slot: slot_id,
            },
            AssemblyEvent::PartDone { part },
            AssemblyEvent::Praise(feedback::random_praise(rng)),
            AssemblyEvent::Progress {
                percent: self.percent(),
            },
        ];
        if self.is_complete() && !self.completed {
            self.completed = true;
            log::info!("assembly complete");
            events.push(AssemblyEvent::Completed);
        }
        Ok(events)
    }

    /// Empty every slot. Calling it on an empty board changes nothing.
    pub fn reset(&mut self) -> Vec<AssemblyEvent> {
        self.placed.clear();
        self.completed = false;
        vec![AssemblyEvent::Cleared, AssemblyEvent::Progress { percent: 0 }]
    }
}

fn validate_layout(slots: &[Slot]) -> Result<()> {
    if slots.is_empty() {
        return Err(Error::InvalidLayout("no slots".into()));
    }
    let mut ids = HashSet::new();
    let mut accepted = HashSet::new();
    for slot in slots {
        if !ids.insert(slot.id.as_str()) {
            return Err(Error::InvalidLayout(format!("slot id {} used twice", slot.id)));
        }
        if !accepted.insert(slot.accepts) {
            return Err(Error::InvalidLayout(format!(
                "{} accepted by more than one slot",
                slot.accepts
            )));
        }
    }
    Ok(())
}
