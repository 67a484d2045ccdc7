//! The per-frame session loop.
//!
//! A session owns one world, one player, the interaction hub, and the
//! event bus. Each frame the host feeds it decoded input commands and
//! the physics layer's contact pairs; the session routes commands, steps
//! the simulation, and fans the resulting events out before returning.

use vale_core::{
    AddOutcome, Contact, CoreEnv, EntityFlags, EntityId, Enemy, GameEvent, HealthPool,
    InteractionHub, ItemId, Phase, PlayerState, Presenter, Vec2, WorldState,
};

use crate::config::SessionConfig;
use crate::content::{StaticContent, StraightLineNav};
use crate::error::{Result, RuntimeError};
use crate::events::{EventBus, Topic};
use crate::input::InputCommand;

pub struct Session {
    config: SessionConfig,
    world: WorldState,
    player: PlayerState,
    hub: InteractionHub,
    bus: EventBus,
    content: StaticContent,
    nav: StraightLineNav,
    enemies: Vec<Enemy>,
    accumulator: f32,
    pending_contacts: Vec<Contact>,
}

impl Session {
    /// Creates a session with the player spawned at the origin.
    pub fn new(config: SessionConfig, content: StaticContent) -> Self {
        let mut world = WorldState::new();
        let player_id = world.spawn_entity(
            Vec2::ZERO,
            HealthPool::full(config.player_health),
            EntityFlags::empty(),
        );
        let player = PlayerState::new(player_id, config.player_speed, config.game_config());
        tracing::info!(player = %player_id, "session started");

        Self {
            config,
            world,
            player,
            hub: InteractionHub::new(),
            bus: EventBus::new(),
            content,
            nav: StraightLineNav,
            enemies: Vec::new(),
            accumulator: 0.0,
            pending_contacts: Vec::new(),
        }
    }

    // ========================================================================
    // Setup and access
    // ========================================================================

    /// Spawns a hostile entity steering toward `goal`.
    pub fn spawn_enemy(&mut self, position: Vec2, health: f32, speed: f32, goal: Vec2) -> EntityId {
        let id = self
            .world
            .spawn_entity(position, HealthPool::full(health), EntityFlags::empty());
        self.enemies.push(Enemy::new(id, speed, goal));
        tracing::debug!(enemy = %id, "enemy spawned");
        id
    }

    pub fn subscribe(&mut self, topic: Topic, subscriber: impl FnMut(&GameEvent) + 'static) {
        self.bus.subscribe(topic, subscriber);
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn phase(&self) -> Phase {
        self.hub.phase()
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Advances the session by one frame.
    ///
    /// Inputs are routed first, then the variable-step logic phase, then
    /// fixed-step physics sub-steps. Contact pairs are buffered until the
    /// next sub-step actually runs, then handed to that sub-step only; a
    /// frame shorter than the fixed step never drops its overlap reports.
    /// Events are dispatched last, within the same frame, looping until
    /// reactions stop producing follow-ups.
    ///
    /// A rejected focus request is logged and swallowed; every other
    /// error aborts the frame.
    pub fn frame(
        &mut self,
        dt: f32,
        contacts: &[Contact],
        inputs: &[InputCommand],
        presenter: &mut dyn Presenter,
    ) -> Result<()> {
        for command in inputs {
            match self.apply(command, presenter) {
                Ok(()) => {}
                Err(RuntimeError::Focus(focus)) => {
                    tracing::warn!(%focus, "interaction rejected");
                }
                Err(other) => return Err(other),
            }
        }

        self.world.logic_step(dt);

        self.accumulator += dt;
        self.pending_contacts.extend_from_slice(contacts);
        while self.accumulator >= self.config.fixed_dt {
            self.accumulator -= self.config.fixed_dt;
            let step_contacts = std::mem::take(&mut self.pending_contacts);
            self.world.physics_step(self.config.fixed_dt, &step_contacts);
            self.player.integrate(&mut self.world, self.config.fixed_dt);
            for enemy in &self.enemies {
                enemy.tick(&mut self.world, &self.nav, self.config.fixed_dt);
            }
        }

        self.dispatch_events();
        Ok(())
    }

    fn apply(&mut self, command: &InputCommand, presenter: &mut dyn Presenter) -> Result<()> {
        match command {
            InputCommand::MoveAxis { x, y } => {
                self.player.set_move_axis(Vec2::new(*x, *y));
            }
            InputCommand::Dodge => {
                if self.player.action_input_enabled && self.player.dodge(self.world.clock()) {
                    tracing::debug!("dodge started");
                }
            }
            InputCommand::Attack { x, y } => {
                let direction = Vec2::new(*x, *y).normalized_or_right();
                let melee = self.config.melee;
                if let Some(attack) = self.player.attack(&mut self.world, &melee, direction)? {
                    tracing::debug!(%attack, "attack spawned");
                }
            }
            InputCommand::Interact { npc, dialog } => {
                let env = CoreEnv::empty().with_npcs(&self.content);
                let template = env
                    .npcs()?
                    .template(npc)
                    .ok_or_else(|| RuntimeError::UnknownNpc(npc.clone()))?;
                vale_core::npc::interact(
                    &template,
                    *dialog,
                    &mut self.hub,
                    &mut self.player,
                    presenter,
                    self.world.events_mut(),
                )?;
            }
            InputCommand::Advance => {
                self.hub
                    .advance(&mut self.player, presenter, self.world.events_mut())?;
            }
            InputCommand::QuestDecision { accept } => {
                self.hub.quest_decision(
                    *accept,
                    &mut self.player,
                    presenter,
                    self.world.events_mut(),
                )?;
            }
            InputCommand::ExitShop => {
                self.hub.exit_shop(&mut self.player, presenter)?;
            }
            InputCommand::PickUp { item } => {
                let outcome = self.player.pick_up(ItemId(*item), self.world.events_mut());
                if outcome == AddOutcome::Rejected {
                    tracing::warn!(item, "inventory full, pickup rejected");
                }
            }
        }
        Ok(())
    }

    /// Drains and publishes events until reactions stop producing new
    /// ones. Kill credit and the act-gate reopen happen here, so their
    /// follow-up events still land in the same frame.
    fn dispatch_events(&mut self) {
        loop {
            let events = self.world.drain_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.react(&event);
                self.bus.publish(&event);
            }
        }
    }

    fn react(&mut self, event: &GameEvent) {
        match event {
            GameEvent::AttackEnded { fate, report } => {
                tracing::debug!(attack = %report.attack, ?fate, hits = report.hits.len(), "attack ended");
                self.player.notify_attack_ended(report.attack);
            }
            GameEvent::EntityDied { entity, killer } => {
                if *entity == self.player.id {
                    tracing::warn!("player died");
                    return;
                }
                tracing::debug!(entity = %entity, "entity defeated");
                self.world.despawn_entity(*entity);
                self.enemies.retain(|enemy| enemy.id != *entity);
                if *killer == Some(self.player.id) {
                    self.player.record_kill(self.world.events_mut());
                }
            }
            _ => {}
        }
    }
}
