//! The arena's battle state machine.
//!
//! Two players are called in, outfitted from shared pools, and then trade
//! strikes until one of them runs out of health or the turns grow so
//! redundant the match is declared a draw.

use crate::character::player::Player;
use crate::core::constants::REDUNDANCY_WINDOW;
use crate::core::error::{BattleError, Result};
use crate::items::armory::Armory;
use crate::items::bag::EquipmentBag;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};

/// Where a battle stands. Phases only move forward, except for a rematch,
/// which drops a started battle back to `Prepared`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    NotStarted,
    PlayersCalled,
    Prepared,
    InProgress,
    Over,
}

/// How a single strike landed.
///
/// `Absorbed` is a hit whose damage the defender's constitution soaked up
/// completely; for stall detection it counts the same as `Avoided`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeOutcome {
    Struck { damage: i32 },
    Absorbed,
    Avoided,
}

impl StrikeOutcome {
    pub fn is_effective(&self) -> bool {
        matches!(self, StrikeOutcome::Struck { .. })
    }
}

/// Everything that happened in one resolved turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    pub round: u32,
    pub attacker: u32,
    pub defender: u32,
    pub striking_power: i32,
    pub avoidance: i32,
    pub outcome: StrikeOutcome,
    pub attacker_health: i32,
    pub defender_health: i32,
}

/// The battle engine. Owns the random source, both players, and the two
/// equipment pools; drives the whole encounter turn by turn.
#[derive(Debug)]
pub struct BattleEngine<R: RandomSource> {
    rng: R,
    title: String,
    players: Vec<Player>,
    bag: EquipmentBag,
    armory: Armory,
    phase: BattlePhase,
    attacker: usize,
    defender: usize,
    winners: Vec<u32>,
    turn_count: u32,
    records: Vec<TurnRecord>,
}

impl<R: RandomSource> BattleEngine<R> {
    /// Set up the arena: fresh pools, no players yet.
    pub fn new(mut rng: R) -> Result<Self> {
        let bag = EquipmentBag::new(&mut rng)?;
        let armory = Armory::new(&mut rng)?;
        Ok(Self {
            rng,
            title: "Win Over Luck!".to_string(),
            players: Vec::new(),
            bag,
            armory,
            phase: BattlePhase::NotStarted,
            attacker: 0,
            defender: 0,
            winners: Vec::new(),
            turn_count: 0,
            records: Vec::new(),
        })
    }

    pub fn introduce_battle(&self) -> String {
        format!(
            "Welcome to....\n{}\n\n\
             A turn-based battle game set on the grand Arena!\n\
             Two players enter with randomly assigned abilities, equip \
             whatever gear and weapons the arena hands them, and then trade \
             blows.\nEach turn the attacker takes a swing; if their striking \
             power beats the defender's avoidance, the defender potentially \
             takes damage.\nTurns continue until one player's total damage \
             reaches their health, or the battle stalls into a draw.\n\
             Let's try your luck!",
            self.title
        )
    }

    /// Call both players onto the arena with rolled abilities.
    pub fn call_players(&mut self, first_id: u32, second_id: u32) -> Result<()> {
        if self.phase != BattlePhase::NotStarted {
            return Err(BattleError::IllegalState(
                "players were already called for this battle".to_string(),
            ));
        }
        if first_id == second_id {
            return Err(BattleError::InvalidArgument(
                "the two players need distinct identifiers".to_string(),
            ));
        }
        self.players.push(Player::new(first_id, &mut self.rng));
        self.players.push(Player::new(second_id, &mut self.rng));
        self.phase = BattlePhase::PlayersCalled;
        Ok(())
    }

    /// Outfit both players: a gear batch from the bag, then a weapon set
    /// from the armory.
    pub fn prepare(&mut self) -> Result<()> {
        if self.phase != BattlePhase::PlayersCalled {
            return Err(BattleError::IllegalState(
                "call the players before preparing them".to_string(),
            ));
        }
        for player in &mut self.players {
            player.equip_gear(&mut self.bag, &mut self.rng)?;
            player.request_weapon(&mut self.armory, &mut self.rng)?;
        }
        self.phase = BattlePhase::Prepared;
        Ok(())
    }

    pub fn players_basic_info(&self) -> Result<String> {
        self.ensure_players_called("get their details")?;
        let infos: Vec<String> = self.players.iter().map(Player::basic_info).collect();
        Ok(infos.join("\n\n"))
    }

    pub fn players_description(&self) -> Result<String> {
        self.ensure_players_called("get their complete description")?;
        let descriptions: Vec<String> = self.players.iter().map(Player::description).collect();
        Ok(descriptions.join("\n\n"))
    }

    /// Begin the battle. The player with strictly lower charisma starts as
    /// the defender; a tie is broken by a coin flip.
    pub fn start(&mut self) -> Result<()> {
        if self.phase != BattlePhase::Prepared {
            return Err(BattleError::IllegalState(
                "prepare the players before starting the battle".to_string(),
            ));
        }
        let first = self.players[0].charisma();
        let second = self.players[1].charisma();
        self.defender = if first > second {
            1
        } else if second > first {
            0
        } else {
            self.rng.next_int(0, 1).clamp(0, 1) as usize
        };
        self.attacker = 1 - self.defender;
        self.phase = BattlePhase::InProgress;
        tracing::debug!(
            "battle started; {} defends first",
            self.players[self.defender].name()
        );
        Ok(())
    }

    /// Resolve one turn.
    ///
    /// Roles swap, the new attacker's potion buff ticks down, and the
    /// strike resolves. The stall check runs before the game-over check so
    /// a drawn-out battle keeps signalling [`BattleError::Redundancy`] (the
    /// caller's cue to show the final result) rather than a generic state
    /// error.
    pub fn play_turn(&mut self) -> Result<()> {
        match self.phase {
            BattlePhase::InProgress | BattlePhase::Over => {}
            _ => {
                return Err(BattleError::IllegalState(
                    "start the battle before playing turns".to_string(),
                ))
            }
        }
        if self.is_stalled() {
            return Err(BattleError::Redundancy);
        }
        if self.phase == BattlePhase::Over {
            return Err(BattleError::IllegalState(
                "the battle has ended; view the results".to_string(),
            ));
        }

        std::mem::swap(&mut self.attacker, &mut self.defender);
        self.players[self.attacker].tick_temporary_effect();

        let striking_power = self.players[self.attacker].striking_power(&mut self.rng)?;
        let avoidance = self.players[self.defender].avoidance_ability(&mut self.rng)?;

        let outcome = if striking_power > avoidance {
            let actual_damage = {
                let attacker = &self.players[self.attacker];
                let wielder = attacker.effective_abilities();
                let mut weapon_damage = 0;
                for weapon in attacker.weapons() {
                    weapon_damage += weapon.strike_power(&wielder, &mut self.rng);
                }
                attacker.strength() + weapon_damage - self.players[self.defender].constitution()
            };
            if actual_damage > 0 {
                self.players[self.defender].apply_damage(actual_damage);
                StrikeOutcome::Struck {
                    damage: actual_damage,
                }
            } else {
                StrikeOutcome::Absorbed
            }
        } else {
            StrikeOutcome::Avoided
        };

        self.turn_count += 1;
        let record = TurnRecord {
            round: self.turn_count,
            attacker: self.players[self.attacker].id(),
            defender: self.players[self.defender].id(),
            striking_power,
            avoidance,
            outcome,
            attacker_health: self.players[self.attacker].current_health(),
            defender_health: self.players[self.defender].current_health(),
        };
        tracing::debug!(
            "round {}: {} vs {} -> {:?}",
            record.round,
            record.striking_power,
            record.avoidance,
            record.outcome
        );
        self.records.push(record);
        self.evaluate_end();
        Ok(())
    }

    /// A human-readable account of the latest turn.
    pub fn turn_details(&self) -> Result<String> {
        match self.phase {
            BattlePhase::InProgress | BattlePhase::Over => {}
            _ => {
                return Err(BattleError::IllegalState(
                    "the battle has not started yet".to_string(),
                ))
            }
        }
        let Some(record) = self.records.last() else {
            return Ok(format!(
                "Round 0\nAttacker: {}; Health: {}\nDefender: {}; Health: {}",
                self.players[self.attacker].name(),
                self.players[self.attacker].current_health(),
                self.players[self.defender].name(),
                self.players[self.defender].current_health()
            ));
        };
        let verdict = match record.outcome {
            StrikeOutcome::Struck { damage } => format!(
                "Whoa, that was a great move. Player {} strikes!\n\
                 Damage caused to Player {}'s health is {}",
                record.attacker, record.defender, damage
            ),
            StrikeOutcome::Absorbed => format!(
                "Player {} shrugged the blow off without a scratch.",
                record.defender
            ),
            StrikeOutcome::Avoided => format!(
                "That was amazingly defended. Player {} is safe.",
                record.defender
            ),
        };
        Ok(format!(
            "Round {}\nTurn details:\n\
             Attacker: Player {}; Health: {}\nStriking power: {}\n\
             Defender: Player {}; Health: {}\nAvoidance ability: {}\n{}",
            record.round,
            record.attacker,
            record.attacker_health,
            record.striking_power,
            record.defender,
            record.defender_health,
            record.avoidance,
            verdict
        ))
    }

    /// Winner ids: empty while the battle runs, one id for a victory, both
    /// ids for a draw.
    pub fn winners(&self) -> &[u32] {
        &self.winners
    }

    pub fn final_result(&self) -> String {
        if self.phase != BattlePhase::Over {
            return "The battle is ongoing, keep playing turns!".to_string();
        }
        match self.winners.as_slice() {
            [winner] => format!("Player {} wins!!!!!!", winner),
            _ => "It's a draw. Both players are extremely competitive!".to_string(),
        }
    }

    /// Rest the players and re-run the whole preparation against fresh
    /// pools. Abilities and initial health carry over; everything else is
    /// re-dealt. Only available once the current battle has been started.
    pub fn rematch(&mut self) -> Result<()> {
        match self.phase {
            BattlePhase::InProgress | BattlePhase::Over => {}
            _ => {
                return Err(BattleError::IllegalState(
                    "start the current battle before asking for a rematch".to_string(),
                ))
            }
        }
        for player in &mut self.players {
            player.reset_for_rematch();
        }
        self.bag = EquipmentBag::new(&mut self.rng)?;
        self.armory = Armory::new(&mut self.rng)?;
        self.winners.clear();
        self.records.clear();
        self.turn_count = 0;
        self.attacker = 0;
        self.defender = 0;
        self.phase = BattlePhase::PlayersCalled;
        tracing::debug!("rematch: arena refreshed");
        self.prepare()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == BattlePhase::Over
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    pub fn attacker(&self) -> Option<&Player> {
        match self.phase {
            BattlePhase::InProgress | BattlePhase::Over => self.players.get(self.attacker),
            _ => None,
        }
    }

    pub fn defender(&self) -> Option<&Player> {
        match self.phase {
            BattlePhase::InProgress | BattlePhase::Over => self.players.get(self.defender),
            _ => None,
        }
    }

    /// The most recent `REDUNDANCY_WINDOW` strikes all failed to do damage.
    fn is_stalled(&self) -> bool {
        self.records.len() >= REDUNDANCY_WINDOW
            && self.records[self.records.len() - REDUNDANCY_WINDOW..]
                .iter()
                .all(|record| !record.outcome.is_effective())
    }

    fn evaluate_end(&mut self) {
        if !self.winners.is_empty() {
            return;
        }
        if self.players[self.defender].current_health() <= 0 {
            self.winners.push(self.players[self.attacker].id());
            self.phase = BattlePhase::Over;
            tracing::info!(
                "battle over after {} rounds; {} wins",
                self.turn_count,
                self.players[self.attacker].name()
            );
        } else if self.is_stalled() {
            self.winners.push(self.players[self.attacker].id());
            self.winners.push(self.players[self.defender].id());
            self.phase = BattlePhase::Over;
            tracing::info!(
                "battle drawn after {} rounds of stalled strikes",
                self.turn_count
            );
        }
    }

    fn ensure_players_called(&self, action: &str) -> Result<()> {
        if self.phase == BattlePhase::NotStarted {
            return Err(BattleError::IllegalState(format!(
                "call the players to {}",
                action
            )));
        }
        Ok(())
    }
}
