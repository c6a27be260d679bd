//! Gear items and their fixed ability effects.
//!
//! Headgear toughens but hides the face, footwear quickens but pinches,
//! belts trade dexterity for constitution by size, and potions grant a
//! short-lived buff. Every category diminishes at least one ability, which
//! is what lets the equipment bag satisfy its negative-effect quota.

use crate::character::abilities::Abilities;
use crate::core::constants::POTION_EFFECT_STRIKES;
use crate::core::error::Result;
use crate::items::types::{BeltSize, GearKind, Provenance};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gear {
    kind: GearKind,
    seq: u32,
    status: Provenance,
}

impl Gear {
    /// A fresh, unpooled item. `seq` numbers items per category from 1.
    pub fn new(kind: GearKind, seq: u32) -> Self {
        Self {
            kind,
            seq,
            status: Provenance::Unassigned,
        }
    }

    pub fn kind(&self) -> GearKind {
        self.kind
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.kind.name(), self.seq)
    }

    /// The modifier vector this item applies to its wearer.
    pub fn effect(&self) -> Abilities {
        match self.kind {
            GearKind::Headgear => Abilities::from_values(0, 2, 0, -2),
            GearKind::Footwear => Abilities::from_values(0, -3, 5, -2),
            GearKind::Potion => Abilities::from_values(1, -1, 1, 0),
            GearKind::Belt(BeltSize::Small) => Abilities::from_values(0, 1, -1, 0),
            GearKind::Belt(BeltSize::Medium) => Abilities::from_values(0, 2, -2, 0),
            GearKind::Belt(BeltSize::Large) => Abilities::from_values(0, 3, -2, 0),
        }
    }

    pub fn has_negative_effect(&self) -> bool {
        self.effect().has_negative_component()
    }

    /// How many attacker strikes a potion's buff lasts; 0 for worn gear.
    pub fn effect_strikes(&self) -> u32 {
        match self.kind {
            GearKind::Potion => POTION_EFFECT_STRIKES,
            _ => 0,
        }
    }

    /// Belt-budget units this item consumes when worn.
    pub fn unit_cost(&self) -> u32 {
        match self.kind {
            GearKind::Belt(size) => size.units(),
            _ => 0,
        }
    }

    pub fn status(&self) -> Provenance {
        self.status
    }

    pub fn mark_pooled(&mut self) -> Result<()> {
        self.status.mark_pooled()
    }

    pub fn mark_issued(&mut self) -> Result<()> {
        self.status.mark_issued()
    }
}
