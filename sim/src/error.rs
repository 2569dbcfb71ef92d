use thiserror::Error;

use crate::player::PlayerId;

/// Contract violations surfaced by the simulation.
///
/// Absence (no floor, empty ray) is never an error. These variants mean the caller
/// asked for something that cannot exist; treat them as fatal.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("player {0} is dead")]
    PlayerDead(PlayerId),

    #[error("player {0} already exists")]
    DuplicatePlayer(PlayerId),

    #[error("bomb has not been planted")]
    BombNotPlanted,

    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}
