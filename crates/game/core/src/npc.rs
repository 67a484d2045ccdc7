//! NPC templates and enemy steering.

use crate::error::FocusError;
use crate::events::EventQueue;
use crate::interaction::{Dialog, InteractionHub, Presenter, ShopStock};
use crate::player::PlayerState;
use crate::state::{EntityId, Vec2, WorldState};

/// What happens when a player interacts with an NPC.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NpcInteraction {
    /// Talker: one of these dialogs plays, picked by the caller.
    Dialogs(Vec<Dialog>),
    /// Vendor: opens the shop screen over this stock.
    Shop(ShopStock),
}

/// Static NPC definition resolved by name through the NPC oracle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcTemplate {
    pub name: String,
    pub interaction: NpcInteraction,
}

/// Routes an interact input to the right hub entry point.
///
/// `dialog_index` selects among a talker's dialogs (wrapped into range);
/// hosts that want variety roll it, deterministic ones pass 0. An NPC
/// with no dialogs is a silent no-op.
pub fn interact(
    template: &NpcTemplate,
    dialog_index: usize,
    hub: &mut InteractionHub,
    player: &mut PlayerState,
    presenter: &mut dyn Presenter,
    events: &mut EventQueue,
) -> Result<(), FocusError> {
    match &template.interaction {
        NpcInteraction::Dialogs(dialogs) => {
            if dialogs.is_empty() {
                return Ok(());
            }
            let dialog = &dialogs[dialog_index % dialogs.len()];
            hub.enter_dialog(dialog, player, presenter, events)
        }
        NpcInteraction::Shop(stock) => hub.enter_shop(stock, player, presenter),
    }
}

/// A hostile entity steering toward a goal position.
#[derive(Clone, Copy, Debug)]
pub struct Enemy {
    pub id: EntityId,
    pub speed: f32,
    pub goal: Vec2,
}

impl Enemy {
    pub fn new(id: EntityId, speed: f32, goal: Vec2) -> Self {
        Self { id, speed, goal }
    }

    /// Steps toward the nav oracle's next waypoint, never overshooting it.
    /// Dead or despawned enemies stay put.
    pub fn tick(&self, world: &mut WorldState, nav: &dyn crate::env::NavOracle, dt: f32) {
        let Some(entity) = world.entity(self.id) else {
            return;
        };
        if !entity.is_alive() {
            return;
        }

        let position = entity.position;
        let to_waypoint = nav.next_waypoint(position, self.goal) - position;
        let distance_sq = to_waypoint.sq_magnitude();
        if distance_sq <= f32::EPSILON {
            return;
        }

        let distance = distance_sq.sqrt();
        let step = (self.speed * dt).min(distance);
        let motion = to_waypoint.scaled(step / distance);
        if let Some(entity) = world.entity_mut(self.id) {
            entity.position += motion;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::NavOracle;
    use crate::interaction::{Phase, RecordingPresenter};
    use crate::state::{EntityFlags, HealthPool};

    struct StraightLine;

    impl NavOracle for StraightLine {
        fn next_waypoint(&self, _from: Vec2, goal: Vec2) -> Vec2 {
            goal
        }
    }

    #[test]
    fn enemy_steps_toward_goal_without_overshooting() {
        let mut world = WorldState::new();
        let id = world.spawn_entity(Vec2::ZERO, HealthPool::full(30.0), EntityFlags::empty());
        let enemy = Enemy::new(id, 2.0, Vec2::new(10.0, 0.0));

        enemy.tick(&mut world, &StraightLine, 0.5);
        assert!((world.entity(id).unwrap().position.x - 1.0).abs() < 1e-5);

        // A huge step clamps at the waypoint.
        enemy.tick(&mut world, &StraightLine, 100.0);
        assert!((world.entity(id).unwrap().position.x - 10.0).abs() < 1e-5);
        enemy.tick(&mut world, &StraightLine, 1.0);
        assert!((world.entity(id).unwrap().position.x - 10.0).abs() < 1e-5);
    }

    #[test]
    fn dead_enemy_stops_moving() {
        let mut world = WorldState::new();
        let id = world.spawn_entity(Vec2::ZERO, HealthPool::full(10.0), EntityFlags::empty());
        world.entity_mut(id).unwrap().damage(10.0);

        let enemy = Enemy::new(id, 2.0, Vec2::new(10.0, 0.0));
        enemy.tick(&mut world, &StraightLine, 1.0);
        assert_eq!(world.entity(id).unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn interact_routes_talker_and_vendor() {
        let mut world = WorldState::new();
        let pid = world.spawn_entity(Vec2::ZERO, HealthPool::full(100.0), EntityFlags::empty());
        let mut player = PlayerState::new(pid, 4.0, GameConfig::new());
        let mut hub = InteractionHub::new();
        let mut ui = RecordingPresenter::new();
        let mut events = EventQueue::default();

        let talker = NpcTemplate {
            name: "elder".into(),
            interaction: NpcInteraction::Dialogs(vec![
                Dialog::plain(vec!["a".into()]),
                Dialog::plain(vec!["b".into()]),
            ]),
        };
        // Index wraps into range.
        interact(&talker, 3, &mut hub, &mut player, &mut ui, &mut events).unwrap();
        assert_eq!(ui.last_line(), Some("b"));
        hub.advance(&mut player, &mut ui, &mut events).unwrap();
        assert_eq!(hub.phase(), Phase::Idle);

        let vendor = NpcTemplate {
            name: "trader".into(),
            interaction: NpcInteraction::Shop(ShopStock::default()),
        };
        interact(&vendor, 0, &mut hub, &mut player, &mut ui, &mut events).unwrap();
        assert_eq!(hub.phase(), Phase::InShop);
    }
}
