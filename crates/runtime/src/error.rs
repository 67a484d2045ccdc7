use vale_core::{FocusError, OracleError, SpawnError};

use crate::config::ConfigError;
use crate::content::ContentError;

/// Errors surfaced by runtime operations.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Focus(#[from] FocusError),

    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error("unknown npc '{0}'")]
    UnknownNpc(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Content(#[from] ContentError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
