use thiserror::Error;

/// Everything that can go wrong while setting up or playing a battle.
///
/// Violations surface immediately to the caller; nothing is retried or
/// silently corrected. [`BattleError::Redundancy`] is the one "soft" kind:
/// it tells the caller the turn loop has stalled into a draw and the final
/// result should be displayed.
#[derive(Error, Debug)]
pub enum BattleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("already equipped: {0}")]
    AlreadyEquipped(String),

    #[error("not ready: {0}")]
    NotReady(String),

    #[error("pool depleted: {0}")]
    DepletedPool(String),

    #[error("insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("insufficient negative-effect gear: {0}")]
    InsufficientNegativeEffect(String),

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("the turns are redundant; the battle has stalled into a draw")]
    Redundancy,
}

pub type Result<T> = std::result::Result<T, BattleError>;
