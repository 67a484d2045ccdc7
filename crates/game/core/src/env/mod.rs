//! Read-only oracles the host supplies to the core.
//!
//! The core never owns content tables or navigation data. Hosts implement
//! these traits over whatever backing store they have and hand the core a
//! [`CoreEnv`] borrowing them for the duration of a call.

use crate::npc::NpcTemplate;
use crate::state::{ItemId, Vec2};

/// Static description of an item, resolved by id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub description: String,
}

/// Resolves item ids to their static definitions.
pub trait ItemOracle {
    fn definition(&self, id: ItemId) -> Option<ItemDefinition>;
}

/// Resolves NPC names to their interaction templates.
pub trait NpcOracle {
    fn template(&self, name: &str) -> Option<NpcTemplate>;
}

/// Supplies steering targets for enemy movement.
pub trait NavOracle {
    /// Next position to steer toward when moving from `from` to `goal`.
    fn next_waypoint(&self, from: Vec2, goal: Vec2) -> Vec2;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OracleError {
    #[error("item oracle not available")]
    ItemsNotAvailable,
    #[error("npc oracle not available")]
    NpcsNotAvailable,
    #[error("nav oracle not available")]
    NavNotAvailable,
}

/// Borrowed bundle of oracles for a single core call.
///
/// Individual oracles are optional so hosts only wire up what a given
/// operation needs; accessors return an error when a missing oracle is
/// actually touched.
#[derive(Clone, Copy, Default)]
pub struct CoreEnv<'a> {
    items: Option<&'a dyn ItemOracle>,
    npcs: Option<&'a dyn NpcOracle>,
    nav: Option<&'a dyn NavOracle>,
}

impl<'a> CoreEnv<'a> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_all(
        items: &'a dyn ItemOracle,
        npcs: &'a dyn NpcOracle,
        nav: &'a dyn NavOracle,
    ) -> Self {
        Self {
            items: Some(items),
            npcs: Some(npcs),
            nav: Some(nav),
        }
    }

    pub fn with_items(mut self, items: &'a dyn ItemOracle) -> Self {
        self.items = Some(items);
        self
    }

    pub fn with_npcs(mut self, npcs: &'a dyn NpcOracle) -> Self {
        self.npcs = Some(npcs);
        self
    }

    pub fn with_nav(mut self, nav: &'a dyn NavOracle) -> Self {
        self.nav = Some(nav);
        self
    }

    pub fn items(&self) -> Result<&'a dyn ItemOracle, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    pub fn npcs(&self) -> Result<&'a dyn NpcOracle, OracleError> {
        self.npcs.ok_or(OracleError::NpcsNotAvailable)
    }

    pub fn nav(&self) -> Result<&'a dyn NavOracle, OracleError> {
        self.nav.ok_or(OracleError::NavNotAvailable)
    }
}
