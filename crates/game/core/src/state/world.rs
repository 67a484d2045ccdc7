//! Entity/attack arenas and the frame tick.
//!
//! The world is advanced by an explicit update loop: a variable-step logic
//! phase ([`WorldState::logic_step`]) and a fixed-step physics phase
//! ([`WorldState::physics_step`]). Collision detection itself is external;
//! the physics phase consumes [`Contact`] pairs supplied by the host.

use super::{AttackId, EntityId, Timestamp, Vec2};
use crate::combat::{AttackState, AttackTemplate, HitOutcome};
use crate::error::SpawnError;
use crate::events::{EventQueue, GameEvent};
use crate::state::entity::{EntityFlags, EntityState, HealthPool};

/// One overlap reported by the external physics world for this step:
/// an attack's hitbox against some candidate id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contact {
    pub attack: AttackId,
    pub candidate: EntityId,
}

impl Contact {
    pub fn new(attack: AttackId, candidate: EntityId) -> Self {
        Self { attack, candidate }
    }
}

/// Owns every live object, keyed by stable ids that are never reused.
#[derive(Debug, Default)]
pub struct WorldState {
    clock: Timestamp,
    entities: Vec<EntityState>,
    attacks: Vec<AttackState>,
    next_entity: u32,
    next_attack: u32,
    events: EventQueue,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic session clock, sampled once per frame in the logic phase.
    #[inline]
    pub fn clock(&self) -> Timestamp {
        self.clock
    }

    // ========================================================================
    // Entity arena
    // ========================================================================

    pub fn spawn_entity(&mut self, position: Vec2, health: HealthPool, flags: EntityFlags) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        self.entities.push(EntityState::new(id, position, health, flags));
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityState> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut EntityState> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    /// Removes an entity from the arena (e.g. a defeated enemy).
    pub fn despawn_entity(&mut self, id: EntityId) -> Option<EntityState> {
        let index = self.entities.iter().position(|entity| entity.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityState> {
        self.entities.iter()
    }

    // ========================================================================
    // Attack arena
    // ========================================================================

    /// Spawns an attack from a template, stamping the owner's identity at
    /// creation time.
    pub fn spawn_attack(
        &mut self,
        template: &AttackTemplate,
        owner: EntityId,
        direction: Vec2,
    ) -> Result<AttackId, SpawnError> {
        let owner_state = self
            .entity(owner)
            .cloned()
            .ok_or(SpawnError::OwnerMissing { owner })?;

        let id = AttackId(self.next_attack);
        self.next_attack += 1;
        self.attacks.push(AttackState::spawn(
            template,
            id,
            &owner_state,
            direction,
            self.clock,
        ));
        Ok(id)
    }

    pub fn attack(&self, id: AttackId) -> Option<&AttackState> {
        self.attacks.iter().find(|attack| attack.id == id)
    }

    pub fn attacks(&self) -> impl Iterator<Item = &AttackState> {
        self.attacks.iter()
    }

    // ========================================================================
    // Tick phases
    // ========================================================================

    /// Variable-step logic phase: advances the clock and expires timed-out
    /// attacks. Runs once per frame, before the physics sub-steps.
    pub fn logic_step(&mut self, dt: f32) {
        self.clock = self.clock + f64::from(dt);

        let now = self.clock;
        for attack in &mut self.attacks {
            attack.check_timeout(now);
        }
        self.flush_ended();
    }

    /// Fixed-step physics phase: kinematics, then contact resolution.
    ///
    /// Every contact belonging to an attack is resolved before that
    /// attack's destruction decision is finalized. A fate marked mid-step
    /// (ON_HIT, ON_COLLIDE) therefore never hides a legitimate
    /// simultaneous hit in the same step; removal and the end-of-life
    /// report happen only after the whole contact slice is processed.
    pub fn physics_step(&mut self, dt: f32, contacts: &[Contact]) {
        for attack in &mut self.attacks {
            attack.integrate(dt);
        }

        for contact in contacts {
            self.resolve_contact(*contact);
        }

        self.flush_ended();
    }

    /// Resolves one collision-pair notification.
    ///
    /// Mirrors the canonical hit pipeline: owner exclusion, duplicate
    /// exclusion, entity-capability check, damage attempt, hit recording,
    /// then the destroy policy.
    fn resolve_contact(&mut self, contact: Contact) -> HitOutcome {
        let Some(attack_index) = self
            .attacks
            .iter()
            .position(|attack| attack.id == contact.attack)
        else {
            // The attack was flushed earlier this frame; stale pair.
            return HitOutcome::NotAnEntity;
        };

        let outcome = {
            let attack = &self.attacks[attack_index];

            if contact.candidate == attack.owner {
                HitOutcome::OwnerExcluded
            } else if attack.already_hit(contact.candidate) {
                HitOutcome::AlreadyHit
            } else if attack.hit_set_full() {
                // No room to record another target; reject before the
                // damage call so damage and recording stay in lockstep.
                HitOutcome::AlreadyHit
            } else {
                let damage = attack.damage;
                let owner = attack.owner;
                match self.entity_mut(contact.candidate) {
                    None => HitOutcome::NotAnEntity,
                    Some(target) => {
                        let result = target.damage(damage);
                        if result.is_hit() {
                            if result == super::DamageOutcome::Fatal {
                                self.events.push(GameEvent::EntityDied {
                                    entity: contact.candidate,
                                    killer: Some(owner),
                                });
                            }
                            HitOutcome::Hit
                        } else {
                            HitOutcome::Untargetable
                        }
                    }
                }
            }
        };

        let attack = &mut self.attacks[attack_index];
        if outcome.is_hit() {
            if attack.record_hit(contact.candidate) {
                self.events.push(GameEvent::AttackHit {
                    attack: attack.id,
                    owner: attack.owner,
                    target: contact.candidate,
                });
            }
        }
        attack.note_contact(outcome);

        outcome
    }

    /// Removes every non-live attack, flushing each end-of-life report
    /// synchronously before the instance becomes invalid.
    fn flush_ended(&mut self) {
        let mut index = 0;
        while index < self.attacks.len() {
            if self.attacks[index].is_live() {
                index += 1;
                continue;
            }
            let ended = self.attacks.remove(index);
            self.events.push(GameEvent::AttackEnded {
                fate: ended.fate(),
                report: ended.report(),
            });
        }
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Takes this frame's events, in emission order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }
}
