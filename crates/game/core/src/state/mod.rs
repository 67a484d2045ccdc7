//! World state: identity handles, entities, inventories, and the arena.
//!
//! Objects are owned by [`WorldState`] and addressed by stable ids rather
//! than references; destruction is removal from the arena with a
//! synchronous end-of-life flush.

mod common;
mod entity;
mod inventory;
mod world;

pub use common::{AttackId, EntityId, ItemId, Timestamp, Vec2};
pub use entity::{DamageOutcome, EntityFlags, EntityState, HealthPool};
pub use inventory::{AddOutcome, InventorySlot, InventoryState};
pub use world::{Contact, WorldState};
