//! Static content definitions and the oracle implementations over them.
//!
//! Content ships as JSON: item definitions plus NPC templates, with
//! dialogs and their quest offers inline. Quests are constructed once at
//! load time so every interaction with the same NPC offers the same
//! quest id.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vale_core::{
    Dialog, InventorySlot, ItemDefinition, ItemId, ItemOracle, NavOracle, NpcInteraction,
    NpcOracle, NpcTemplate, Quest, QuestGoal, ShopStock, Vec2,
};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content file")]
    Io(#[from] std::io::Error),
    #[error("malformed content definition")]
    Parse(#[from] serde_json::Error),
}

// ============================================================================
// Definition file format
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct ContentDef {
    #[serde(default)]
    items: Vec<ItemDef>,
    #[serde(default)]
    npcs: Vec<NpcDef>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ItemDef {
    id: u32,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct NpcDef {
    name: String,
    #[serde(default)]
    dialogs: Vec<DialogDef>,
    /// Present: this NPC is a vendor and `dialogs` is ignored.
    #[serde(default)]
    shop: Option<Vec<StockDef>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DialogDef {
    lines: Vec<String>,
    #[serde(default)]
    quest: Option<QuestDef>,
}

#[derive(Debug, Serialize, Deserialize)]
struct QuestDef {
    name: String,
    #[serde(default)]
    description: String,
    goal: GoalDef,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum GoalDef {
    Fetch { item: u32, required: u32 },
    Kill { required: u32 },
}

#[derive(Debug, Serialize, Deserialize)]
struct StockDef {
    item: u32,
    count: u32,
}

// ============================================================================
// Loaded content
// ============================================================================

/// In-memory content tables implementing the core's lookup oracles.
#[derive(Debug, Default)]
pub struct StaticContent {
    items: HashMap<ItemId, ItemDefinition>,
    npcs: HashMap<String, NpcTemplate>,
}

impl StaticContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let def: ContentDef = serde_json::from_str(json)?;
        let mut content = Self::new();

        for item in def.items {
            content.add_item(ItemDefinition {
                id: ItemId(item.id),
                name: item.name,
                description: item.description,
            });
        }

        for npc in def.npcs {
            let interaction = match npc.shop {
                Some(stock) => NpcInteraction::Shop(ShopStock::new(
                    stock
                        .into_iter()
                        .map(|slot| InventorySlot::new(ItemId(slot.item), slot.count))
                        .collect(),
                )),
                None => NpcInteraction::Dialogs(
                    npc.dialogs.into_iter().map(build_dialog).collect(),
                ),
            };
            content.add_npc(NpcTemplate {
                name: npc.name,
                interaction,
            });
        }

        tracing::info!(
            items = content.items.len(),
            npcs = content.npcs.len(),
            "content loaded"
        );
        Ok(content)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn add_item(&mut self, definition: ItemDefinition) {
        self.items.insert(definition.id, definition);
    }

    pub fn add_npc(&mut self, template: NpcTemplate) {
        self.npcs.insert(template.name.clone(), template);
    }
}

fn build_dialog(def: DialogDef) -> Dialog {
    match def.quest {
        Some(quest) => {
            let goal = match quest.goal {
                GoalDef::Fetch { item, required } => QuestGoal::fetch(ItemId(item), required),
                GoalDef::Kill { required } => QuestGoal::kill(required),
            };
            Dialog::with_quest(def.lines, Quest::new(quest.name, quest.description, goal))
        }
        None => Dialog::plain(def.lines),
    }
}

impl ItemOracle for StaticContent {
    fn definition(&self, id: ItemId) -> Option<ItemDefinition> {
        self.items.get(&id).cloned()
    }
}

impl NpcOracle for StaticContent {
    fn template(&self, name: &str) -> Option<NpcTemplate> {
        self.npcs.get(name).cloned()
    }
}

/// Nav oracle for open fields: the next waypoint is always the goal.
#[derive(Clone, Copy, Debug, Default)]
pub struct StraightLineNav;

impl NavOracle for StraightLineNav {
    fn next_waypoint(&self, _from: Vec2, goal: Vec2) -> Vec2 {
        goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "items": [{"id": 5, "name": "potion", "description": "restores health"}],
        "npcs": [
            {
                "name": "elder",
                "dialogs": [
                    {"lines": ["welcome"], "quest": {
                        "name": "restock",
                        "description": "bring 3 potions",
                        "goal": {"fetch": {"item": 5, "required": 3}}
                    }}
                ]
            },
            {"name": "trader", "shop": [{"item": 5, "count": 4}]}
        ]
    }"#;

    #[test]
    fn loads_items_npcs_and_quests() {
        let content = StaticContent::from_json(SAMPLE).unwrap();
        assert_eq!(content.definition(ItemId(5)).unwrap().name, "potion");

        let elder = content.template("elder").unwrap();
        let NpcInteraction::Dialogs(dialogs) = &elder.interaction else {
            panic!("elder should be a talker");
        };
        let quest = dialogs[0].offered_quest().unwrap();
        assert_eq!(quest.name, "restock");
        assert_eq!(quest.goal, QuestGoal::fetch(ItemId(5), 3));

        let trader = content.template("trader").unwrap();
        assert!(matches!(trader.interaction, NpcInteraction::Shop(_)));
    }

    #[test]
    fn repeated_lookups_share_the_quest_id() {
        let content = StaticContent::from_json(SAMPLE).unwrap();
        let first = content.template("elder").unwrap();
        let second = content.template("elder").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = StaticContent::from_json("{").unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
    }
}
