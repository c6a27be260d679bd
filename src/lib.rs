//! Arena: a two-player turn-based battle engine.
//!
//! Players with randomly rolled abilities are outfitted from shared,
//! scarcity-bound equipment pools and then alternate attack and defense
//! until one runs out of health or the match stalls into a draw. All
//! randomness flows through an injected [`rng::RandomSource`], so every
//! battle can be replayed deterministically.

pub mod character;
pub mod core;
pub mod items;
pub mod rng;

pub use crate::character::abilities::{Abilities, AbilityType};
pub use crate::character::player::Player;
pub use crate::core::battle::{BattleEngine, BattlePhase, StrikeOutcome, TurnRecord};
pub use crate::core::error::{BattleError, Result};
pub use crate::items::armory::Armory;
pub use crate::items::bag::EquipmentBag;
pub use crate::items::gear::Gear;
pub use crate::items::types::{BeltSize, GearKind, Provenance, WeaponKind, WeaponWeight};
pub use crate::items::weapons::Weapon;
pub use crate::rng::{FixedSource, RandomSource, ScriptedSource};
