//! Attack resolution engine.
//!
//! Attacks are transient hitboxes spawned from immutable templates. The
//! world owns them for their lifetime; their creator only learns about
//! them again through per-hit and end-of-life events.

mod attack;

pub use attack::{Anchor, AttackState, AttackTemplate, DestroyFlags};

use crate::state::{AttackId, EntityId};

/// Outcome of presenting one collision candidate to an attack.
///
/// Everything except `Hit` is a rejected hit: non-fatal, the contact loop
/// simply continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum HitOutcome {
    /// Damage was applied and the target recorded in the hit-set.
    Hit,
    /// Candidate is the attack's own owner.
    OwnerExcluded,
    /// Candidate was already damaged by this attack instance.
    AlreadyHit,
    /// Candidate rejected the damage (untargetable).
    Untargetable,
    /// Candidate id has no entity behind it.
    NotAnEntity,
}

impl HitOutcome {
    #[inline]
    pub fn is_hit(self) -> bool {
        matches!(self, HitOutcome::Hit)
    }
}

/// How an attack instance left the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AttackFate {
    /// Still live in the arena.
    Active,
    /// Timeout deadline passed.
    Expired,
    /// Destroyed by its hit/collide policy.
    Terminated,
}

/// End-of-life report, emitted exactly once when an attack leaves the
/// arena. `hits` preserves insertion order and holds no duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub attack: AttackId,
    pub owner: EntityId,
    pub hits: Vec<EntityId>,
}
