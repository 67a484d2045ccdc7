//! Engine-independent interaction core for a 2D action-RPG.
//!
//! `vale-core` defines the canonical rules: entity health, timed attack
//! hitboxes with at-most-once hit tracking, inventories, quest progress,
//! and the dialog/shop interaction state machine. It is single-threaded
//! and frame-driven; collision detection, pathfinding, rendering, and raw
//! input live behind the traits in [`env`] and [`interaction::Presenter`].
//! All state mutation flows through [`state::WorldState`] and the
//! interaction service in [`interaction::InteractionHub`].
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod events;
pub mod interaction;
pub mod npc;
pub mod player;
pub mod quest;
pub mod state;

pub use combat::{AttackFate, AttackReport, AttackTemplate, DestroyFlags, HitOutcome};
pub use config::GameConfig;
pub use env::{CoreEnv, ItemDefinition, ItemOracle, NavOracle, NpcOracle, OracleError};
pub use error::{FocusError, SpawnError};
pub use events::{EventQueue, GameEvent};
pub use interaction::{
    Dialog, InteractionHub, Phase, Presenter, RecordingPresenter, ShopStock, ShopView,
};
pub use npc::{Enemy, NpcInteraction, NpcTemplate};
pub use player::PlayerState;
pub use quest::{AcceptOutcome, Quest, QuestGoal, QuestId, QuestLog};
pub use state::{
    AddOutcome, AttackId, Contact, DamageOutcome, EntityFlags, EntityId, EntityState, HealthPool,
    InventorySlot, InventoryState, ItemId, Timestamp, Vec2, WorldState,
};
