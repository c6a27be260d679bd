//! Weapons, gear, and the pools that hand them out.

pub mod armory;
pub mod bag;
pub mod gear;
pub mod types;
pub mod weapons;
