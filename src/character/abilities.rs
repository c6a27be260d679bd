use crate::core::constants::NUM_ABILITIES;
use serde::{Deserialize, Serialize};

/// The four abilities every player brings into the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityType {
    Strength,
    Constitution,
    Dexterity,
    Charisma,
}

impl AbilityType {
    pub fn all() -> [AbilityType; NUM_ABILITIES] {
        [
            AbilityType::Strength,
            AbilityType::Constitution,
            AbilityType::Dexterity,
            AbilityType::Charisma,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            AbilityType::Strength => "Strength",
            AbilityType::Constitution => "Constitution",
            AbilityType::Dexterity => "Dexterity",
            AbilityType::Charisma => "Charisma",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AbilityType::Strength => 0,
            AbilityType::Constitution => 1,
            AbilityType::Dexterity => 2,
            AbilityType::Charisma => 3,
        }
    }
}

/// A full ability vector.
///
/// Signed throughout: the same type carries a player's rolled abilities and
/// the positive/negative modifier vectors gear applies to them, and gear can
/// push a component below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    values: [i32; NUM_ABILITIES],
}

impl Abilities {
    pub fn zero() -> Self {
        Self {
            values: [0; NUM_ABILITIES],
        }
    }

    pub fn from_values(strength: i32, constitution: i32, dexterity: i32, charisma: i32) -> Self {
        Self {
            values: [strength, constitution, dexterity, charisma],
        }
    }

    pub fn get(&self, ability: AbilityType) -> i32 {
        self.values[ability.index()]
    }

    pub fn set(&mut self, ability: AbilityType, value: i32) {
        self.values[ability.index()] = value;
    }

    /// Component-wise addition, used to fold gear effects into a vector.
    pub fn add(&mut self, other: &Abilities) {
        for ability in AbilityType::all() {
            self.values[ability.index()] += other.get(ability);
        }
    }

    pub fn total(&self) -> i32 {
        self.values.iter().sum()
    }

    /// True if any component diminishes rather than enhances.
    pub fn has_negative_component(&self) -> bool {
        self.values.iter().any(|&v| v < 0)
    }
}

impl Default for Abilities {
    fn default() -> Self {
        Self::zero()
    }
}
