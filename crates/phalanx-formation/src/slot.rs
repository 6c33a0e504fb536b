use phalanx_core::{SoldierId, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Role a slot asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SlotType {
    Any,
    Melee,
    Ranged,
}

impl SlotType {
    pub const ALL: [SlotType; 3] = [SlotType::Any, SlotType::Melee, SlotType::Ranged];

    /// Grid code used in formation definitions.
    pub fn code(self) -> char {
        match self {
            SlotType::Any => 'A',
            SlotType::Melee => 'F',
            SlotType::Ranged => 'R',
        }
    }

    /// Case-insensitive inverse of [`code`](SlotType::code).
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'A' => Some(SlotType::Any),
            'F' => Some(SlotType::Melee),
            'R' => Some(SlotType::Ranged),
            _ => None,
        }
    }
}

/// Per-archetype cost of standing in each slot type. Lower is better; an unsuitable role is
/// expressed with a large cost rather than a refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SlotCosts {
    pub any: u32,
    pub melee: u32,
    pub ranged: u32,
}

impl SlotCosts {
    pub const fn new(any: u32, melee: u32, ranged: u32) -> Self {
        Self { any, melee, ranged }
    }

    pub fn cost(&self, slot_type: SlotType) -> u32 {
        match slot_type {
            SlotType::Any => self.any,
            SlotType::Melee => self.melee,
            SlotType::Ranged => self.ranged,
        }
    }
}

/// Who holds a slot. The costs travel with the id so the formation can redistribute members
/// without asking the host for them again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub id: SoldierId,
    pub costs: SlotCosts,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub slot_type: SlotType,
    /// Offset from the formation anchor.
    pub offset: Vec2,
    pub occupant: Option<Occupant>,
}

impl Slot {
    pub fn new(slot_type: SlotType, offset: Vec2) -> Self {
        Self {
            slot_type,
            offset,
            occupant: None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// Cost of placing a soldier with `costs` here, or `None` if the slot is taken.
    pub fn score(&self, costs: &SlotCosts) -> Option<u32> {
        self.is_free().then(|| costs.cost(self.slot_type))
    }
}
