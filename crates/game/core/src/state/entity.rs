//! Entity health model.
//!
//! Health is mutated only through [`EntityState::damage`]; the death
//! notification is derived from the outcome and fires exactly once, on the
//! transition to zero health.

use bitflags::bitflags;

use super::{EntityId, Vec2};

bitflags! {
    /// Targeting flags checked during damage application.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EntityFlags: u8 {
        /// Damage calls fail outright; the attacker does not register a hit.
        const UNTARGETABLE = 1 << 0;
        /// Damage calls succeed (and register a hit) but subtract nothing.
        const INVINCIBLE = 1 << 1;
    }
}

/// Health pool tracked per entity.
///
/// Invariant: `0 <= current <= maximum`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthPool {
    pub maximum: f32,
    pub current: f32,
}

impl HealthPool {
    /// New pool filled to its maximum.
    pub fn full(maximum: f32) -> Self {
        Self {
            maximum,
            current: maximum,
        }
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Outcome of a single damage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DamageOutcome {
    /// Target was untargetable; nothing changed.
    Rejected,
    /// The call counted as a hit (even against an invincible or already
    /// dead target).
    Applied,
    /// The hit dropped health to zero. Reported exactly once per entity.
    Fatal,
}

impl DamageOutcome {
    /// True when the attacker should record the target as hit.
    #[inline]
    pub fn is_hit(self) -> bool {
        !matches!(self, DamageOutcome::Rejected)
    }
}

/// A damageable object in the world arena.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityState {
    pub id: EntityId,
    pub position: Vec2,
    pub health: HealthPool,
    pub flags: EntityFlags,
    death_fired: bool,
}

impl EntityState {
    pub fn new(id: EntityId, position: Vec2, health: HealthPool, flags: EntityFlags) -> Self {
        Self {
            id,
            position,
            health,
            flags,
            death_fired: false,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }

    /// Applies damage per the targeting flags.
    ///
    /// Untargetable entities reject the call without mutation. Invincible
    /// entities absorb the hit (health unchanged) but still report
    /// [`DamageOutcome::Applied`]. [`DamageOutcome::Fatal`] is returned only
    /// on the transition to zero health; hitting a corpse keeps reporting
    /// `Applied` so death can never fire twice.
    pub fn damage(&mut self, amount: f32) -> DamageOutcome {
        if self.flags.contains(EntityFlags::UNTARGETABLE) {
            return DamageOutcome::Rejected;
        }

        let applied = if self.flags.contains(EntityFlags::INVINCIBLE) {
            0.0
        } else {
            amount
        };
        self.health.current = (self.health.current - applied).max(0.0);

        if self.health.is_depleted() && !self.death_fired {
            self.death_fired = true;
            return DamageOutcome::Fatal;
        }

        DamageOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(flags: EntityFlags) -> EntityState {
        EntityState::new(EntityId(7), Vec2::ZERO, HealthPool::full(10.0), flags)
    }

    #[test]
    fn untargetable_rejects_without_mutation() {
        let mut e = entity(EntityFlags::UNTARGETABLE);
        for _ in 0..4 {
            assert_eq!(e.damage(25.0), DamageOutcome::Rejected);
        }
        assert_eq!(e.health.current, 10.0);
    }

    #[test]
    fn invincible_counts_as_hit_but_keeps_health() {
        let mut e = entity(EntityFlags::INVINCIBLE);
        assert_eq!(e.damage(25.0), DamageOutcome::Applied);
        assert_eq!(e.health.current, 10.0);
    }

    #[test]
    fn death_fires_exactly_once() {
        let mut e = entity(EntityFlags::empty());
        assert_eq!(e.damage(10.0), DamageOutcome::Fatal);
        assert_eq!(e.damage(10.0), DamageOutcome::Applied);
        assert!(!e.is_alive());
    }

    #[test]
    fn health_never_goes_negative() {
        let mut e = entity(EntityFlags::empty());
        e.damage(1000.0);
        assert_eq!(e.health.current, 0.0);
    }
}
