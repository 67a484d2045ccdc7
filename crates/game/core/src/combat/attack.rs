use arrayvec::ArrayVec;
use bitflags::bitflags;

use super::{AttackFate, AttackReport, HitOutcome};
use crate::config::GameConfig;
use crate::state::{AttackId, EntityId, EntityState, Timestamp, Vec2};

bitflags! {
    /// Conditions under which an attack destroys itself.
    ///
    /// An empty set means persistent: the attack lives until something
    /// outside the policy removes it.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DestroyFlags: u8 {
        /// Destroy once the duration deadline passes.
        const TIMEOUT = 1 << 0;
        /// Destroy on the first successful hit.
        const ON_HIT = 1 << 1;
        /// Destroy on any contact that is not a successful ON_HIT hit.
        const ON_COLLIDE = 1 << 2;
    }
}

/// Immutable descriptor an attack instance is spawned from.
///
/// Owner identity, spawn anchor, and the timeout deadline are stamped at
/// spawn time; the template itself is shared, read-only data.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackTemplate {
    pub damage: f32,
    /// Travel speed along the forward axis. Zero for stationary hitboxes.
    pub speed: f32,
    /// Lifetime in seconds, used only with [`DestroyFlags::TIMEOUT`].
    pub duration: f32,
    pub destroy: DestroyFlags,
    /// Detach from the owner at spawn. World-space attacks (projectiles)
    /// are not dragged along by the owner's own movement.
    pub use_world_space: bool,
}

/// Spawn-time parent resolution: what the attack's offset is relative to.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    /// Offset is owner-relative; the hitbox follows the owner.
    Owner,
    /// Offset is absolute, fixed at the owner's position at spawn.
    World(Vec2),
}

/// A live attack instance owned by the world arena.
#[derive(Clone, Debug, PartialEq)]
pub struct AttackState {
    pub id: AttackId,
    /// Spawning entity, excluded from hits. Immutable after creation.
    pub owner: EntityId,
    pub damage: f32,
    pub speed: f32,
    pub destroy: DestroyFlags,
    /// Absolute timeout deadline; `None` unless TIMEOUT is set.
    pub ends_at: Option<Timestamp>,
    /// Unit forward axis the attack travels along.
    pub forward: Vec2,
    pub anchor: Anchor,
    /// Travel offset relative to the anchor.
    pub offset: Vec2,
    hits: ArrayVec<EntityId, { GameConfig::MAX_HITS_PER_ATTACK }>,
    fate: AttackFate,
}

impl AttackState {
    /// Spawns an instance from a template.
    ///
    /// `direction` need not be normalized; a zero direction falls back to
    /// the +X axis.
    pub fn spawn(
        template: &AttackTemplate,
        id: AttackId,
        owner: &EntityState,
        direction: Vec2,
        now: Timestamp,
    ) -> Self {
        let anchor = if template.use_world_space {
            Anchor::World(owner.position)
        } else {
            Anchor::Owner
        };

        let ends_at = template
            .destroy
            .contains(DestroyFlags::TIMEOUT)
            .then(|| now + f64::from(template.duration));

        Self {
            id,
            owner: owner.id,
            damage: template.damage,
            speed: template.speed,
            destroy: template.destroy,
            ends_at,
            forward: direction.normalized_or_right(),
            anchor,
            offset: Vec2::ZERO,
            hits: ArrayVec::new(),
            fate: AttackFate::Active,
        }
    }

    #[inline]
    pub fn fate(&self) -> AttackFate {
        self.fate
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self.fate, AttackFate::Active)
    }

    /// Distinct targets hit so far, in insertion order.
    pub fn hits(&self) -> &[EntityId] {
        &self.hits
    }

    pub fn already_hit(&self, target: EntityId) -> bool {
        self.hits.contains(&target)
    }

    /// True when the hit-set cannot record another target. Contacts must
    /// be rejected while this holds; damaging a target the set cannot
    /// remember would let it be hit again next step.
    pub(crate) fn hit_set_full(&self) -> bool {
        self.hits.is_full()
    }

    /// Records a successful hit; false when the hit-set has no room.
    pub(crate) fn record_hit(&mut self, target: EntityId) -> bool {
        self.hits.try_push(target).is_ok()
    }

    /// Applies the per-contact destroy policy after a contact resolved.
    ///
    /// ON_HIT terminates on a successful hit. ON_COLLIDE terminates on any
    /// contact unless that contact was a successful hit already consumed by
    /// ON_HIT, so the two flags can never double-fire on the same contact.
    /// Marking a fate does not remove the attack: remaining contacts in the
    /// same physics step still resolve before destruction is finalized.
    pub(crate) fn note_contact(&mut self, outcome: HitOutcome) {
        let hit_consumed_by_on_hit =
            outcome.is_hit() && self.destroy.contains(DestroyFlags::ON_HIT);

        if hit_consumed_by_on_hit {
            self.fate = AttackFate::Terminated;
        } else if self.destroy.contains(DestroyFlags::ON_COLLIDE) {
            self.fate = AttackFate::Terminated;
        }
    }

    /// Marks the attack expired once the timeout deadline has passed.
    pub(crate) fn check_timeout(&mut self, now: Timestamp) {
        if !self.is_live() {
            return;
        }
        if let Some(ends_at) = self.ends_at
            && now >= ends_at
        {
            self.fate = AttackFate::Expired;
        }
    }

    /// Kinematic translation along the forward axis.
    pub(crate) fn integrate(&mut self, dt: f32) {
        if self.speed != 0.0 {
            self.offset += self.forward.scaled(self.speed * dt);
        }
    }

    /// World-space position, resolving the anchor against the owner.
    pub fn world_position(&self, owner_position: Vec2) -> Vec2 {
        match self.anchor {
            Anchor::Owner => owner_position + self.offset,
            Anchor::World(origin) => origin + self.offset,
        }
    }

    pub fn report(&self) -> AttackReport {
        AttackReport {
            attack: self.id,
            owner: self.owner,
            hits: self.hits.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityFlags, HealthPool};

    fn owner() -> EntityState {
        EntityState::new(
            EntityId(1),
            Vec2::new(4.0, 2.0),
            HealthPool::full(10.0),
            EntityFlags::empty(),
        )
    }

    fn template(destroy: DestroyFlags) -> AttackTemplate {
        AttackTemplate {
            damage: 5.0,
            speed: 2.0,
            duration: 1.5,
            destroy,
            use_world_space: false,
        }
    }

    #[test]
    fn timeout_deadline_is_absolute() {
        let tpl = template(DestroyFlags::TIMEOUT);
        let mut atk = AttackState::spawn(&tpl, AttackId(0), &owner(), Vec2::RIGHT, Timestamp(10.0));
        assert_eq!(atk.ends_at, Some(Timestamp(11.5)));

        atk.check_timeout(Timestamp(11.4));
        assert!(atk.is_live());
        atk.check_timeout(Timestamp(11.5));
        assert_eq!(atk.fate(), AttackFate::Expired);
    }

    #[test]
    fn persistent_attack_never_times_out() {
        let tpl = template(DestroyFlags::empty());
        let mut atk = AttackState::spawn(&tpl, AttackId(0), &owner(), Vec2::RIGHT, Timestamp::ZERO);
        assert_eq!(atk.ends_at, None);
        atk.check_timeout(Timestamp(1e9));
        assert!(atk.is_live());
    }

    #[test]
    fn owner_anchored_attack_follows_owner() {
        let tpl = template(DestroyFlags::empty());
        let mut atk = AttackState::spawn(&tpl, AttackId(0), &owner(), Vec2::RIGHT, Timestamp::ZERO);
        atk.integrate(0.5); // offset +1.0 along x
        assert_eq!(atk.world_position(Vec2::new(9.0, 9.0)), Vec2::new(10.0, 9.0));
    }

    #[test]
    fn world_space_attack_detaches_at_spawn_position() {
        let mut tpl = template(DestroyFlags::empty());
        tpl.use_world_space = true;
        let mut atk = AttackState::spawn(&tpl, AttackId(0), &owner(), Vec2::RIGHT, Timestamp::ZERO);
        atk.integrate(0.5);
        // Owner has moved; the projectile has not noticed.
        assert_eq!(atk.world_position(Vec2::new(9.0, 9.0)), Vec2::new(5.0, 2.0));
    }

    #[test]
    fn on_collide_spares_hits_consumed_by_on_hit() {
        let both = DestroyFlags::ON_HIT | DestroyFlags::ON_COLLIDE;
        let mut atk = AttackState::spawn(
            &template(both),
            AttackId(0),
            &owner(),
            Vec2::RIGHT,
            Timestamp::ZERO,
        );
        // A successful hit terminates via ON_HIT, not doubly via ON_COLLIDE.
        atk.note_contact(HitOutcome::Hit);
        assert_eq!(atk.fate(), AttackFate::Terminated);

        // A miss against ON_COLLIDE alone also terminates.
        let mut atk = AttackState::spawn(
            &template(DestroyFlags::ON_COLLIDE),
            AttackId(1),
            &owner(),
            Vec2::RIGHT,
            Timestamp::ZERO,
        );
        atk.note_contact(HitOutcome::NotAnEntity);
        assert_eq!(atk.fate(), AttackFate::Terminated);

        // ON_HIT alone ignores misses.
        let mut atk = AttackState::spawn(
            &template(DestroyFlags::ON_HIT),
            AttackId(2),
            &owner(),
            Vec2::RIGHT,
            Timestamp::ZERO,
        );
        atk.note_contact(HitOutcome::Untargetable);
        assert!(atk.is_live());
    }
}
