//! Synchronous per-frame event queue.
//!
//! Events replace the engine-style delegate broadcasts (OnHit, OnEnd,
//! OnDeath): producers push during a tick, the host drains and dispatches
//! within the same tick. Destruction flushes an object's end-of-life
//! report before the object leaves the arena, so the queue never holds a
//! reference to anything, only ids and copied payloads.

use crate::combat::{AttackFate, AttackReport};
use crate::quest::QuestId;
use crate::state::{AttackId, EntityId, ItemId};

/// Everything the simulation reports back to its host.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// An entity's health reached zero. Fired exactly once per entity.
    /// `killer` is the owner of the attack that landed the fatal hit.
    EntityDied {
        entity: EntityId,
        killer: Option<EntityId>,
    },

    /// An attack damaged a target (per-hit notification).
    AttackHit {
        attack: AttackId,
        owner: EntityId,
        target: EntityId,
    },

    /// End-of-life report: every distinct entity the attack hit, in
    /// insertion order. Fired exactly once, synchronously at removal.
    AttackEnded { fate: AttackFate, report: AttackReport },

    /// A player stored an item in their inventory.
    ItemPickedUp { player: EntityId, item: ItemId },

    /// A quest entered a player's log.
    QuestAccepted { player: EntityId, quest: QuestId },

    /// A quest's goal was reached.
    QuestCompleted { player: EntityId, quest: QuestId },

    /// A completed quest was handed back to its NPC and left the log.
    QuestTurnedIn { player: EntityId, quest: QuestId },
}

/// FIFO queue drained once per frame by the host.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    /// Takes every pending event, preserving emission order.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
