//! Battle players: rolled abilities, gear and weapon acquisition, and the
//! derived combat statistics the arena queries every turn.

use crate::character::abilities::{Abilities, AbilityType};
use crate::core::constants::{
    ABILITY_DICE, AVOID_ROLL_MAX, BELT_CAPACITY_UNITS, DICE_SIDES, FOOTWEAR_CAPACITY,
    HEADGEAR_CAPACITY, STRIKE_ROLL_MAX,
};
use crate::core::error::{BattleError, Result};
use crate::items::armory::Armory;
use crate::items::bag::EquipmentBag;
use crate::items::gear::Gear;
use crate::items::types::GearKind;
use crate::items::weapons::Weapon;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};

/// Gear a player actually wears or drinks, partitioned by category.
///
/// Existence of a loadout marks the player as having equipped, even when
/// capacity rules rejected most of the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GearLoadout {
    pub headgear: Vec<Gear>,
    pub footwear: Vec<Gear>,
    pub belts: Vec<Gear>,
    pub potions: Vec<Gear>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: u32,
    name: String,
    initial: Abilities,
    initial_health: i32,
    /// Initial abilities plus worn-gear modifiers, fixed for the match.
    abilities: Abilities,
    /// Potion modifiers, active while `effect_strikes` is above zero.
    temporary: Abilities,
    health: i32,
    effect_strikes: u32,
    headgear_units: u32,
    footwear_units: u32,
    belt_units: u32,
    loadout: Option<GearLoadout>,
    weapons: Vec<Weapon>,
}

impl Player {
    /// Roll up a new player.
    ///
    /// Each ability comes from four six-sided dice, re-rolling ones, so
    /// every component lands in 8..=24. Initial health is the sum of the
    /// four abilities; both survive every rematch.
    pub fn new<R: RandomSource>(id: u32, rng: &mut R) -> Self {
        let initial = Abilities::from_values(
            roll_ability(rng),
            roll_ability(rng),
            roll_ability(rng),
            roll_ability(rng),
        );
        let initial_health = initial.total();
        Self {
            id,
            name: format!("Player {}", id),
            initial,
            initial_health,
            abilities: initial,
            temporary: Abilities::zero(),
            health: initial_health,
            effect_strikes: 0,
            headgear_units: HEADGEAR_CAPACITY,
            footwear_units: FOOTWEAR_CAPACITY,
            belt_units: BELT_CAPACITY_UNITS,
            loadout: None,
            weapons: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Draw a 20-item batch from the bag and wear what fits.
    ///
    /// Potions are always drunk and buff the temporary vector; headgear and
    /// footwear occupy one slot each; belts consume their size in units from
    /// a 10-unit budget. Whatever the capacity rules reject is gone for
    /// good, for this player and for the bag. The temporary effect runs for
    /// the first potion's duration plus one tick.
    pub fn equip_gear<R: RandomSource>(
        &mut self,
        bag: &mut EquipmentBag,
        rng: &mut R,
    ) -> Result<()> {
        if self.loadout.is_some() {
            return Err(BattleError::AlreadyEquipped(format!(
                "{} has already equipped gear",
                self.name
            )));
        }

        let batch = bag.assign(rng)?;
        let mut loadout = GearLoadout::default();
        for mut gear in batch {
            match gear.kind() {
                GearKind::Potion => {
                    self.temporary.add(&gear.effect());
                    gear.mark_issued()?;
                    loadout.potions.push(gear);
                }
                GearKind::Headgear => {
                    if self.headgear_units >= 1 {
                        self.headgear_units = 0;
                        self.abilities.add(&gear.effect());
                        gear.mark_issued()?;
                        loadout.headgear.push(gear);
                    }
                }
                GearKind::Footwear => {
                    if self.footwear_units >= 1 {
                        self.footwear_units = 0;
                        self.abilities.add(&gear.effect());
                        gear.mark_issued()?;
                        loadout.footwear.push(gear);
                    }
                }
                GearKind::Belt(size) => {
                    if size.units() <= self.belt_units {
                        self.belt_units -= size.units();
                        self.abilities.add(&gear.effect());
                        gear.mark_issued()?;
                        loadout.belts.push(gear);
                    }
                }
            }
        }

        self.effect_strikes = loadout
            .potions
            .first()
            .map(|potion| potion.effect_strikes() + 1)
            .unwrap_or(0);
        tracing::debug!(
            "{} equipped: {} headgear, {} footwear, {} belts, {} potions",
            self.name,
            loadout.headgear.len(),
            loadout.footwear.len(),
            loadout.belts.len(),
            loadout.potions.len()
        );
        self.loadout = Some(loadout);
        Ok(())
    }

    /// Take whatever weapon set the armory issues (one weapon, or a katana
    /// pair).
    pub fn request_weapon<R: RandomSource>(
        &mut self,
        armory: &mut Armory,
        rng: &mut R,
    ) -> Result<()> {
        if !self.weapons.is_empty() {
            return Err(BattleError::AlreadyEquipped(format!(
                "{} has already received a weapon",
                self.name
            )));
        }
        self.weapons = armory.assign(rng)?;
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.loadout.is_some() && !self.weapons.is_empty()
    }

    /// Striking power for this turn: effective strength plus a 1..=10 roll.
    pub fn striking_power<R: RandomSource>(&self, rng: &mut R) -> Result<i32> {
        self.ensure_ready("strike")?;
        Ok(self.strength() + rng.next_int(1, STRIKE_ROLL_MAX))
    }

    /// Avoidance ability for this turn: effective dexterity plus a 1..=6
    /// roll.
    pub fn avoidance_ability<R: RandomSource>(&self, rng: &mut R) -> Result<i32> {
        self.ensure_ready("avoid")?;
        Ok(self.dexterity() + rng.next_int(1, AVOID_ROLL_MAX))
    }

    /// Count down the potion buff; called once per turn on the attacker.
    ///
    /// Returns the strikes remaining. Once the counter runs down the
    /// temporary vector zeroes out, and further ticks keep returning 0.
    pub fn tick_temporary_effect(&mut self) -> u32 {
        if self.effect_strikes <= 1 {
            self.temporary = Abilities::zero();
            return 0;
        }
        self.effect_strikes -= 1;
        self.effect_strikes
    }

    /// Health drops unconditionally; it may go negative.
    pub fn apply_damage(&mut self, damage: i32) {
        self.health -= damage;
    }

    pub fn current_health(&self) -> i32 {
        self.health
    }

    pub fn initial_health(&self) -> i32 {
        self.initial_health
    }

    pub fn initial_abilities(&self) -> Abilities {
        self.initial
    }

    pub fn match_abilities(&self) -> Abilities {
        self.abilities
    }

    pub fn temporary_abilities(&self) -> Abilities {
        self.temporary
    }

    /// Match plus temporary vector, the numbers combat actually uses.
    pub fn effective_abilities(&self) -> Abilities {
        let mut effective = self.abilities;
        effective.add(&self.temporary);
        effective
    }

    pub fn strength(&self) -> i32 {
        self.effective(AbilityType::Strength)
    }

    pub fn constitution(&self) -> i32 {
        self.effective(AbilityType::Constitution)
    }

    pub fn dexterity(&self) -> i32 {
        self.effective(AbilityType::Dexterity)
    }

    pub fn charisma(&self) -> i32 {
        self.effective(AbilityType::Charisma)
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn weapon_names(&self) -> Vec<String> {
        self.weapons.iter().map(Weapon::name).collect()
    }

    /// Worn gear names, grouped headgear, potions, belts, footwear, each
    /// group sorted lexicographically.
    pub fn sorted_gear_names(&self) -> Vec<String> {
        let Some(loadout) = &self.loadout else {
            return Vec::new();
        };
        let mut names = Vec::new();
        for group in [
            &loadout.headgear,
            &loadout.potions,
            &loadout.belts,
            &loadout.footwear,
        ] {
            let mut group_names: Vec<String> = group.iter().map(Gear::name).collect();
            group_names.sort();
            names.extend(group_names);
        }
        names
    }

    /// Take off everything, rest up, and report for a fresh battle.
    ///
    /// Abilities are not re-rolled; match abilities, health, capacities and
    /// effects return to their values from before the first equip.
    pub fn reset_for_rematch(&mut self) {
        self.abilities = self.initial;
        self.temporary = Abilities::zero();
        self.health = self.initial_health;
        self.effect_strikes = 0;
        self.headgear_units = HEADGEAR_CAPACITY;
        self.footwear_units = FOOTWEAR_CAPACITY;
        self.belt_units = BELT_CAPACITY_UNITS;
        self.loadout = None;
        self.weapons.clear();
    }

    /// The abilities a player walks in with, before any gear.
    pub fn basic_info(&self) -> String {
        let mut info = format!("{}\nBasic abilities for the entire game:", self.name);
        for ability in AbilityType::all() {
            info.push_str(&format!(
                "\n{} - {}",
                ability.name(),
                self.initial.get(ability)
            ));
        }
        info
    }

    /// Full description: match and temporary abilities, gear, weapon, and
    /// readiness.
    pub fn description(&self) -> String {
        let mut text = format!("{}\nAbilities for the entire game:", self.name);
        for ability in AbilityType::all() {
            text.push_str(&format!(
                "\n{} - {}",
                ability.name(),
                self.abilities.get(ability)
            ));
        }
        text.push_str("\n\nTemporary abilities gained through potions:");
        for ability in AbilityType::all() {
            text.push_str(&format!(
                "\n{} - {}",
                ability.name(),
                self.temporary.get(ability)
            ));
        }
        let effect = self.effect_strikes.saturating_sub(1);
        text.push_str(&format!(
            "\nThe temporary effect remains for {} strikes.",
            effect
        ));
        text.push_str(&format!("\nGear equipped: {:?}", self.sorted_gear_names()));
        text.push_str(&format!("\nWeapon in hand: {:?}", self.weapon_names()));
        text.push('\n');
        text.push_str(match (self.loadout.is_some(), !self.weapons.is_empty()) {
            (true, true) => "Ready for battle!",
            (true, false) => "Still waiting on a weapon from the armory.",
            (false, true) => "Still waiting on gear from the equipment bag.",
            (false, false) => "Needs gear and a weapon before the match can start.",
        });
        text
    }

    fn effective(&self, ability: AbilityType) -> i32 {
        self.abilities.get(ability) + self.temporary.get(ability)
    }

    fn ensure_ready(&self, action: &str) -> Result<()> {
        if !self.is_ready() {
            return Err(BattleError::NotReady(format!(
                "{} must hold gear and a weapon to {}",
                self.name, action
            )));
        }
        Ok(())
    }
}

/// Four six-sided dice, each re-rolled until it shows something other
/// than one.
fn roll_ability<R: RandomSource>(rng: &mut R) -> i32 {
    let mut total = 0;
    for _ in 0..ABILITY_DICE {
        let mut face = rng.next_int(1, DICE_SIDES);
        while face == 1 {
            face = rng.next_int(1, DICE_SIDES);
        }
        total += face;
    }
    total
}
