//! Error types surfaced by the core's fallible APIs.
//!
//! In-loop failures that the simulation simply continues past (rejected
//! hits, capacity-full inventory adds) are outcome enums on the operations
//! themselves; the types here are the ones a caller must not ignore.

use crate::state::EntityId;

/// Errors from claiming or using the single interaction focus slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FocusError {
    /// Another player already holds the focus slot. The request is a no-op.
    #[error("interaction focus already held by {holder}")]
    AlreadyHeld { holder: EntityId },

    /// The player issuing the command does not hold focus.
    #[error("player {player} does not hold interaction focus")]
    NotFocused { player: EntityId },

    /// The command does not apply to the hub's current phase.
    #[error("interaction command not valid in phase {phase}")]
    WrongPhase { phase: crate::interaction::Phase },
}

/// Errors from spawning objects into the world arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    /// Attacks must be stamped with a live owner at creation time.
    #[error("attack owner {owner} is not present in the world")]
    OwnerMissing { owner: EntityId },
}
