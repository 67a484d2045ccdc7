//! Topic-based event fan-out.
//!
//! Simulation events are published synchronously at the end of each
//! frame, in emission order. Subscribers register per topic so a quest
//! HUD never sees combat traffic. Everything runs on the session thread;
//! there are no channels and no buffering beyond the frame itself.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use vale_core::GameEvent;

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Topic {
    /// Entity lifecycle and pickups.
    World,
    /// Per-hit and end-of-life attack reports.
    Combat,
    /// Quest lifecycle announcements.
    Interaction,
}

impl Topic {
    pub fn of(event: &GameEvent) -> Topic {
        match event {
            GameEvent::EntityDied { .. } | GameEvent::ItemPickedUp { .. } => Topic::World,
            GameEvent::AttackHit { .. } | GameEvent::AttackEnded { .. } => Topic::Combat,
            GameEvent::QuestAccepted { .. }
            | GameEvent::QuestCompleted { .. }
            | GameEvent::QuestTurnedIn { .. } => Topic::Interaction,
        }
    }
}

type Subscriber = Box<dyn FnMut(&GameEvent)>;

/// Single-threaded topic bus.
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<Topic, Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for one topic.
    pub fn subscribe(&mut self, topic: Topic, subscriber: impl FnMut(&GameEvent) + 'static) {
        self.subscribers
            .entry(topic)
            .or_default()
            .push(Box::new(subscriber));
    }

    /// Delivers an event to every subscriber of its topic, in
    /// registration order.
    pub fn publish(&mut self, event: &GameEvent) {
        let topic = Topic::of(event);
        match self.subscribers.get_mut(&topic) {
            Some(subscribers) if !subscribers.is_empty() => {
                for subscriber in subscribers {
                    subscriber(event);
                }
            }
            _ => tracing::trace!(?topic, "no subscribers for topic"),
        }
    }
}

/// Shared event recorder for tests and headless hosts.
///
/// Clones share the same backing log, so one half can live inside a bus
/// subscription while the other is inspected later.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A closure suitable for [`EventBus::subscribe`].
    pub fn recorder(&self) -> impl FnMut(&GameEvent) + 'static {
        let events = Rc::clone(&self.events);
        move |event| events.borrow_mut().push(event.clone())
    }

    /// Takes everything recorded so far.
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
