//! Player control state: movement, dodge, the act gate, inventory and
//! quest bookkeeping.

use crate::combat::AttackTemplate;
use crate::config::GameConfig;
use crate::error::SpawnError;
use crate::events::{EventQueue, GameEvent};
use crate::quest::{AcceptOutcome, Quest, QuestId, QuestLog};
use crate::state::{AddOutcome, AttackId, EntityId, InventoryState, ItemId, Timestamp, Vec2, WorldState};

/// Axis input below this squared magnitude is treated as no input.
const MOVE_DEAD_ZONE_SQ: f32 = 0.01;

/// Everything about a player that is not their world entity: the entity
/// arena keeps position and health, this keeps control and progression.
#[derive(Debug)]
pub struct PlayerState {
    pub id: EntityId,
    pub speed: f32,
    /// False while an interaction holds focus over this player.
    pub action_input_enabled: bool,
    pub inventory: InventoryState,
    pub quests: QuestLog,
    config: GameConfig,
    move_axis: Vec2,
    can_act: bool,
    dodge_until: Option<Timestamp>,
    pending_attack: Option<AttackId>,
    /// Ids of every quest ever accepted, surviving turn-in. Dialog exit
    /// branching distinguishes "never offered" from "done with".
    accepted: Vec<QuestId>,
}

impl PlayerState {
    pub fn new(id: EntityId, speed: f32, config: GameConfig) -> Self {
        Self {
            id,
            speed,
            action_input_enabled: true,
            inventory: InventoryState::empty(),
            quests: QuestLog::new(),
            config,
            move_axis: Vec2::ZERO,
            can_act: true,
            dodge_until: None,
            pending_attack: None,
            accepted: Vec::new(),
        }
    }

    // ========================================================================
    // Movement and dodge
    // ========================================================================

    /// Stores the movement axis, squashing the controller dead zone.
    pub fn set_move_axis(&mut self, axis: Vec2) {
        self.move_axis = if axis.sq_magnitude() < MOVE_DEAD_ZONE_SQ {
            Vec2::ZERO
        } else {
            axis
        };
    }

    pub fn move_axis(&self) -> Vec2 {
        self.move_axis
    }

    pub fn is_dodging(&self, now: Timestamp) -> bool {
        self.dodge_until.is_some_and(|deadline| now < deadline)
    }

    /// Current movement speed, boosted while the dodge window is open.
    pub fn effective_speed(&self, now: Timestamp) -> f32 {
        if self.is_dodging(now) {
            self.speed * self.config.dodge_multiplier
        } else {
            self.speed
        }
    }

    /// Starts a dodge. Rejected while a dodge is already running.
    pub fn dodge(&mut self, now: Timestamp) -> bool {
        if self.is_dodging(now) {
            return false;
        }
        self.dodge_until = Some(now + f64::from(self.config.dodge_window));
        true
    }

    /// Moves the player's entity by the current axis, honoring the input
    /// gate and the dodge boost. Call once per physics sub-step.
    pub fn integrate(&mut self, world: &mut WorldState, dt: f32) {
        let now = world.clock();
        if let Some(deadline) = self.dodge_until
            && now >= deadline
        {
            self.dodge_until = None;
        }

        if !self.action_input_enabled || self.move_axis == Vec2::ZERO {
            return;
        }

        let step = self.move_axis.scaled(self.effective_speed(now) * dt);
        if let Some(entity) = world.entity_mut(self.id) {
            entity.position += step;
        }
    }

    // ========================================================================
    // Attacking
    // ========================================================================

    pub fn can_act(&self) -> bool {
        self.can_act
    }

    /// Spawns an attack in the given direction, closing the act gate until
    /// that attack ends. Returns `None` when the gate or the input gate is
    /// closed.
    pub fn attack(
        &mut self,
        world: &mut WorldState,
        template: &AttackTemplate,
        direction: Vec2,
    ) -> Result<Option<AttackId>, SpawnError> {
        if !self.can_act || !self.action_input_enabled {
            return Ok(None);
        }

        let id = world.spawn_attack(template, self.id, direction)?;
        self.pending_attack = Some(id);
        self.can_act = false;
        Ok(Some(id))
    }

    /// End-of-life callback for the player's own attack: reopens the act
    /// gate. Reports for other attacks are ignored.
    pub fn notify_attack_ended(&mut self, attack: AttackId) {
        if self.pending_attack == Some(attack) {
            self.pending_attack = None;
            self.can_act = true;
        }
    }

    // ========================================================================
    // Progression
    // ========================================================================

    /// Stores a picked-up item and advances matching fetch quests. A full
    /// inventory rejects the pickup and leaves quests untouched.
    pub fn pick_up(&mut self, item: ItemId, events: &mut EventQueue) -> AddOutcome {
        let outcome = self.inventory.add(item);
        if !outcome.is_stored() {
            return outcome;
        }

        events.push(GameEvent::ItemPickedUp {
            player: self.id,
            item,
        });
        for quest in self.quests.update_item(item) {
            events.push(GameEvent::QuestCompleted {
                player: self.id,
                quest,
            });
        }
        outcome
    }

    /// Credits one kill toward every running kill quest.
    pub fn record_kill(&mut self, events: &mut EventQueue) {
        for quest in self.quests.update_kill() {
            events.push(GameEvent::QuestCompleted {
                player: self.id,
                quest,
            });
        }
    }

    /// Accepts a quest into the log, seeding fetch progress from held
    /// items. Completion reached by seeding alone is announced here too.
    pub fn accept_quest(&mut self, quest: Quest, events: &mut EventQueue) -> AcceptOutcome {
        let id = quest.id;
        let outcome = self.quests.accept(quest, &self.inventory);
        if outcome != AcceptOutcome::Accepted {
            return outcome;
        }

        if !self.accepted.contains(&id) {
            self.accepted.push(id);
        }
        events.push(GameEvent::QuestAccepted {
            player: self.id,
            quest: id,
        });
        if self.quests.get(id).is_some_and(|entry| entry.completed) {
            events.push(GameEvent::QuestCompleted {
                player: self.id,
                quest: id,
            });
        }
        outcome
    }

    /// Whether this quest id was ever accepted, including after turn-in.
    pub fn has_accepted(&self, quest: QuestId) -> bool {
        self.accepted.contains(&quest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DestroyFlags;
    use crate::quest::QuestGoal;
    use crate::state::{EntityFlags, HealthPool};

    fn setup() -> (WorldState, PlayerState) {
        let mut world = WorldState::new();
        let id = world.spawn_entity(Vec2::ZERO, HealthPool::full(100.0), EntityFlags::empty());
        let player = PlayerState::new(id, 4.0, GameConfig::new());
        (world, player)
    }

    fn melee() -> AttackTemplate {
        AttackTemplate {
            damage: 10.0,
            speed: 0.0,
            duration: 0.2,
            destroy: DestroyFlags::TIMEOUT,
            use_world_space: false,
        }
    }

    #[test]
    fn dead_zone_squashes_small_axis() {
        let (_, mut player) = setup();
        player.set_move_axis(Vec2::new(0.05, 0.05));
        assert_eq!(player.move_axis(), Vec2::ZERO);
        player.set_move_axis(Vec2::new(0.0, 1.0));
        assert_eq!(player.move_axis(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn dodge_doubles_speed_until_window_closes() {
        let (mut world, mut player) = setup();
        player.set_move_axis(Vec2::RIGHT);

        assert!(player.dodge(world.clock()));
        assert!(!player.dodge(world.clock()), "dodge may not restart mid-window");
        assert_eq!(player.effective_speed(world.clock()), 8.0);

        player.integrate(&mut world, 0.1);
        assert!((world.entity(player.id).unwrap().position.x - 0.8).abs() < 1e-5);

        // Past the 0.25s window the boost is gone and dodging re-arms.
        world.logic_step(0.3);
        player.integrate(&mut world, 0.1);
        assert_eq!(player.effective_speed(world.clock()), 4.0);
        assert!(player.dodge(world.clock()));
    }

    #[test]
    fn disabled_input_freezes_movement() {
        let (mut world, mut player) = setup();
        player.set_move_axis(Vec2::RIGHT);
        player.action_input_enabled = false;
        player.integrate(&mut world, 0.1);
        assert_eq!(world.entity(player.id).unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn act_gate_closes_until_attack_end_report() {
        let (mut world, mut player) = setup();

        let first = player.attack(&mut world, &melee(), Vec2::RIGHT).unwrap();
        let first = first.expect("gate was open");
        assert!(!player.can_act());
        assert!(player.attack(&mut world, &melee(), Vec2::RIGHT).unwrap().is_none());

        // A different attack's report leaves the gate closed.
        player.notify_attack_ended(AttackId(first.0 + 1));
        assert!(!player.can_act());

        player.notify_attack_ended(first);
        assert!(player.can_act());
    }

    #[test]
    fn attack_blocked_while_interaction_holds_input() {
        let (mut world, mut player) = setup();
        player.action_input_enabled = false;
        assert!(player.attack(&mut world, &melee(), Vec2::RIGHT).unwrap().is_none());
        assert!(player.can_act());
    }

    #[test]
    fn pickup_announces_and_advances_fetch_quests() {
        let (_, mut player) = setup();
        let mut events = EventQueue::default();
        let quest = Quest::new("restock", "", QuestGoal::fetch(ItemId(5), 1));
        let id = quest.id;
        player.accept_quest(quest, &mut events);
        events.drain();

        player.pick_up(ItemId(5), &mut events);
        let drained = events.drain();
        assert!(matches!(drained[0], GameEvent::ItemPickedUp { item: ItemId(5), .. }));
        assert!(
            matches!(drained[1], GameEvent::QuestCompleted { quest, .. } if quest == id)
        );
    }

    #[test]
    fn rejected_pickup_leaves_quests_untouched() {
        let (_, mut player) = setup();
        let mut events = EventQueue::default();
        for n in 0..GameConfig::MAX_INVENTORY_SLOTS as u32 {
            player.pick_up(ItemId(n), &mut events);
        }
        let quest = Quest::new("restock", "", QuestGoal::fetch(ItemId(100), 1));
        let id = quest.id;
        player.accept_quest(quest, &mut events);
        events.drain();

        assert_eq!(player.pick_up(ItemId(100), &mut events), AddOutcome::Rejected);
        assert!(events.is_empty());
        assert!(!player.quests.get(id).unwrap().completed);
    }

    #[test]
    fn accept_with_held_items_completes_immediately() {
        let (_, mut player) = setup();
        let mut events = EventQueue::default();
        for _ in 0..3 {
            player.pick_up(ItemId(7), &mut events);
        }
        events.drain();

        let quest = Quest::new("restock", "", QuestGoal::fetch(ItemId(7), 3));
        let id = quest.id;
        player.accept_quest(quest, &mut events);

        let drained = events.drain();
        assert!(matches!(drained[0], GameEvent::QuestAccepted { quest, .. } if quest == id));
        assert!(matches!(drained[1], GameEvent::QuestCompleted { quest, .. } if quest == id));
        assert!(player.has_accepted(id));
    }

    #[test]
    fn kill_credit_completes_kill_quests() {
        let (_, mut player) = setup();
        let mut events = EventQueue::default();
        let quest = Quest::new("cull", "", QuestGoal::kill(2));
        let id = quest.id;
        player.accept_quest(quest, &mut events);
        events.drain();

        player.record_kill(&mut events);
        assert!(events.is_empty());
        player.record_kill(&mut events);
        assert!(
            matches!(events.drain()[0], GameEvent::QuestCompleted { quest, .. } if quest == id)
        );
    }
}
