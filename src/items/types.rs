//! Item taxonomy: weapon and gear categories, belt sizes, and the
//! pool-to-player custody state machine shared by every item.

use crate::core::error::{BattleError, Result};
use serde::{Deserialize, Serialize};

/// The five weapon categories stocked by the armory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Axe,
    Flail,
    Broadsword,
    Katana,
    TwoHandedSword,
}

impl WeaponKind {
    /// All kinds, in armory stocking order.
    pub fn all() -> [WeaponKind; 5] {
        [
            WeaponKind::Axe,
            WeaponKind::Flail,
            WeaponKind::Broadsword,
            WeaponKind::Katana,
            WeaponKind::TwoHandedSword,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Axe => "Axe",
            WeaponKind::Flail => "Flail",
            WeaponKind::Broadsword => "Broad Sword",
            WeaponKind::Katana => "Katana",
            WeaponKind::TwoHandedSword => "Two-handed Sword",
        }
    }

    pub fn weight(&self) -> WeaponWeight {
        match self {
            WeaponKind::Katana => WeaponWeight::Light,
            WeaponKind::Axe | WeaponKind::Broadsword => WeaponWeight::Medium,
            WeaponKind::Flail | WeaponKind::TwoHandedSword => WeaponWeight::Heavy,
        }
    }

    /// Katanas are light enough to be wielded as a matched pair.
    pub fn is_paired(&self) -> bool {
        matches!(self, WeaponKind::Katana)
    }
}

/// Weight class, which fixes a weapon's damage-roll formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponWeight {
    Light,
    Medium,
    Heavy,
}

/// The four gear categories carried in the equipment bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GearKind {
    Headgear,
    Footwear,
    Potion,
    Belt(BeltSize),
}

impl GearKind {
    pub fn name(&self) -> &'static str {
        match self {
            GearKind::Headgear => "Headgear",
            GearKind::Footwear => "Footwear",
            GearKind::Potion => "Potion",
            GearKind::Belt(_) => "Belt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeltSize {
    Small,
    Medium,
    Large,
}

impl BeltSize {
    pub fn all() -> [BeltSize; 3] {
        [BeltSize::Small, BeltSize::Medium, BeltSize::Large]
    }

    /// How much of a player's 10-unit belt budget this size consumes.
    pub fn units(&self) -> u32 {
        match self {
            BeltSize::Small => 1,
            BeltSize::Medium => 2,
            BeltSize::Large => 4,
        }
    }
}

/// Custody of an item, advancing one way only:
/// `Unassigned -> InPool -> Issued`.
///
/// An item can never leave a pool except by being issued, and can never be
/// taken back from a player. Backward or skipped moves are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    Unassigned,
    InPool,
    Issued,
}

impl Provenance {
    pub fn mark_pooled(&mut self) -> Result<()> {
        match self {
            Provenance::Unassigned => {
                *self = Provenance::InPool;
                Ok(())
            }
            _ => Err(BattleError::IllegalState(
                "an item already in circulation cannot re-enter a pool".to_string(),
            )),
        }
    }

    pub fn mark_issued(&mut self) -> Result<()> {
        match self {
            Provenance::InPool => {
                *self = Provenance::Issued;
                Ok(())
            }
            Provenance::Unassigned => Err(BattleError::IllegalState(
                "an item must be pooled before it can be issued".to_string(),
            )),
            Provenance::Issued => Err(BattleError::IllegalState(
                "an issued item cannot be issued again".to_string(),
            )),
        }
    }
}
