// Ability generation
pub const NUM_ABILITIES: usize = 4;
pub const ABILITY_DICE: u32 = 4;
pub const DICE_SIDES: i32 = 6;

// Armory stock: per kind, 1 + a draw in [0, WEAPON_COUNT_SPREAD]
pub const WEAPON_COUNT_SPREAD: i32 = 3;
pub const MIN_WEAPONS_PER_KIND: usize = 1;

// Equipment bag stock
pub const MIN_HEADGEAR: usize = 5;
pub const MIN_FOOTWEAR: usize = 5;
pub const MIN_POTIONS: usize = 15;
pub const MIN_BELTS: usize = 15;
pub const SCARCE_GEAR_COUNT_SPREAD: i32 = 4;
pub const PLENTIFUL_GEAR_COUNT_SPREAD: i32 = 14;
pub const GEAR_BATCH_SIZE: usize = 20;
pub const NEGATIVE_EFFECT_RATIO: f32 = 0.25;

// Player slot capacities
pub const HEADGEAR_CAPACITY: u32 = 1;
pub const FOOTWEAR_CAPACITY: u32 = 1;
pub const BELT_CAPACITY_UNITS: u32 = 10;

// Potions buff the drinker for this many strikes as an attacker
pub const POTION_EFFECT_STRIKES: u32 = 2;

// Combat rolls
pub const STRIKE_ROLL_MAX: i32 = 10;
pub const AVOID_ROLL_MAX: i32 = 6;
pub const HEAVY_WEAPON_GATE: i32 = 14;

// A battle is drawn once this many consecutive strikes do no damage
pub const REDUNDANCY_WINDOW: usize = 21;
