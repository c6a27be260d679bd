//! Weapon items and their damage rolls.
//!
//! Katanas are light paired blades (4-6 damage), axes and broad swords are
//! dependable medium weapons (6-10), while flails and two-handed swords hit
//! for 8-12 but only in sufficiently dexterous or strong hands; below the
//! gate they swing like a light weapon.

use crate::character::abilities::{Abilities, AbilityType};
use crate::core::constants::HEAVY_WEAPON_GATE;
use crate::core::error::Result;
use crate::items::types::{Provenance, WeaponKind, WeaponWeight};
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    kind: WeaponKind,
    seq: u32,
    status: Provenance,
}

impl Weapon {
    /// A fresh, unpooled weapon. `seq` numbers weapons per kind from 1.
    pub fn new(kind: WeaponKind, seq: u32) -> Self {
        Self {
            kind,
            seq,
            status: Provenance::Unassigned,
        }
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn weight(&self) -> WeaponWeight {
        self.kind.weight()
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.kind.name(), self.seq)
    }

    /// Roll this weapon's contribution to a strike.
    ///
    /// `wielder` is the attacker's effective ability vector; the heavy kinds
    /// check it against their wielding gate.
    pub fn strike_power<R: RandomSource>(&self, wielder: &Abilities, rng: &mut R) -> i32 {
        match self.kind {
            WeaponKind::Katana => rng.next_int(0, 2) + 4,
            WeaponKind::Axe | WeaponKind::Broadsword => rng.next_int(0, 4) + 6,
            WeaponKind::Flail => gated_roll(wielder.get(AbilityType::Dexterity), rng),
            WeaponKind::TwoHandedSword => gated_roll(wielder.get(AbilityType::Strength), rng),
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

/// Full damage above the gate, half-hearted light damage below it.
fn gated_roll<R: RandomSource>(ability: i32, rng: &mut R) -> i32 {
    if ability > HEAVY_WEAPON_GATE {
        rng.next_int(0, 4) + 8
    } else {
        rng.next_int(0, 2) + 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedSource;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn wielder(strength: i32, dexterity: i32) -> Abilities {
        Abilities::from_values(strength, 8, dexterity, 8)
    }

    #[test]
    fn test_katana_rolls_light_damage() {
        let katana = Weapon::new(WeaponKind::Katana, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let power = katana.strike_power(&wielder(20, 20), &mut rng);
            assert!((4..=6).contains(&power));
        }
    }

    #[test]
    fn test_medium_weapons_roll_six_to_ten() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for weapon in [
            Weapon::new(WeaponKind::Axe, 1),
            Weapon::new(WeaponKind::Broadsword, 1),
        ] {
            for _ in 0..200 {
                let power = weapon.strike_power(&wielder(8, 8), &mut rng);
                assert!((6..=10).contains(&power));
            }
        }
    }

    #[test]
    fn test_flail_gates_on_dexterity() {
        let flail = Weapon::new(WeaponKind::Flail, 1);
        let mut rng = FixedSource(0);
        assert_eq!(flail.strike_power(&wielder(8, 15), &mut rng), 8);
        assert_eq!(flail.strike_power(&wielder(8, 14), &mut rng), 4);
        assert_eq!(flail.strike_power(&wielder(20, 10), &mut rng), 4);
    }

    #[test]
    fn test_two_handed_sword_gates_on_strength() {
        let sword = Weapon::new(WeaponKind::TwoHandedSword, 1);
        let mut rng = FixedSource(0);
        assert_eq!(sword.strike_power(&wielder(15, 8), &mut rng), 8);
        assert_eq!(sword.strike_power(&wielder(14, 8), &mut rng), 4);
        assert_eq!(sword.strike_power(&wielder(10, 20), &mut rng), 4);
    }

    #[test]
    fn test_gated_rolls_stay_in_range() {
        let flail = Weapon::new(WeaponKind::Flail, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            assert!((8..=12).contains(&flail.strike_power(&wielder(8, 20), &mut rng)));
            assert!((4..=6).contains(&flail.strike_power(&wielder(8, 8), &mut rng)));
        }
    }

    #[test]
    fn test_names_and_weights() {
        let weapon = Weapon::new(WeaponKind::TwoHandedSword, 2);
        assert_eq!(weapon.name(), "Two-handed Sword 2");
        assert_eq!(weapon.weight(), WeaponWeight::Heavy);
    }
}
