//! Host runtime around the interaction core.
//!
//! This crate wires the pure simulation in `vale-core` to everything a
//! host process needs: content loading, input decoding, configuration,
//! telemetry, and a per-frame session loop that routes commands, steps
//! the world, and fans events out to subscribers.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the frame loop and command routing
//! - [`content`] implements the core's oracles over loaded definitions
//! - [`events`] provides the topic-based event bus
//! - [`input`] defines the wire-level command set
//! - [`config`] and [`telemetry`] cover process setup

pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod input;
pub mod session;
pub mod telemetry;

pub use config::{ConfigError, SessionConfig};
pub use content::{ContentError, StaticContent, StraightLineNav};
pub use error::{Result, RuntimeError};
pub use events::{EventBus, EventLog, Topic};
pub use input::InputCommand;
pub use session::Session;
