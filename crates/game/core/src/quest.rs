//! Quest templates, goals, and per-player progress tracking.
//!
//! Quest ids come from a single process-wide counter assigned at
//! construction time, so an id never repeats within a session no matter
//! which NPC definition created the quest.

use std::sync::atomic::{AtomicU32, Ordering};

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::{InventoryState, ItemId};

static NEXT_QUEST_ID: AtomicU32 = AtomicU32::new(0);

/// Process-wide unique quest identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestId(pub u32);

impl QuestId {
    fn next() -> Self {
        Self(NEXT_QUEST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for QuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "quest#{}", self.0)
    }
}

/// Quantified completion condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestGoal {
    /// Collect `required` of a specific item.
    Fetch {
        item: ItemId,
        required: u32,
        current: u32,
    },
    /// Defeat `required` enemies.
    Kill { required: u32, current: u32 },
}

impl QuestGoal {
    pub fn fetch(item: ItemId, required: u32) -> Self {
        Self::Fetch {
            item,
            required,
            current: 0,
        }
    }

    pub fn kill(required: u32) -> Self {
        Self::Kill {
            required,
            current: 0,
        }
    }

    pub fn is_reached(&self) -> bool {
        match *self {
            QuestGoal::Fetch {
                required, current, ..
            }
            | QuestGoal::Kill { required, current } => current >= required,
        }
    }
}

/// A quest with its progress state.
///
/// Templates on NPC definitions are shared read-only; a player's log holds
/// its own copy, carrying the same id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quest {
    pub id: QuestId,
    pub name: String,
    pub description: String,
    pub goal: QuestGoal,
    pub started: bool,
    pub completed: bool,
}

impl Quest {
    /// Constructs a quest with a freshly assigned id.
    pub fn new(name: impl Into<String>, description: impl Into<String>, goal: QuestGoal) -> Self {
        Self {
            id: QuestId::next(),
            name: name.into(),
            description: description.into(),
            goal,
            started: false,
            completed: false,
        }
    }

    /// Counts one kill toward a kill goal and recomputes completion.
    pub fn update_kill(&mut self) {
        if let QuestGoal::Kill { current, .. } = &mut self.goal {
            *current += 1;
        }
        self.completed = self.goal.is_reached();
    }

    /// Counts one picked-up item toward a matching fetch goal.
    pub fn update_item(&mut self, item: ItemId) {
        if let QuestGoal::Fetch {
            item: needed,
            current,
            ..
        } = &mut self.goal
            && *needed == item
        {
            *current += 1;
        }
        self.completed = self.goal.is_reached();
    }

    /// Seeds fetch progress from whatever the player already holds.
    ///
    /// Called once on acceptance so items collected before taking the
    /// quest count immediately; a single inventory lookup.
    pub fn update_item_initial(&mut self, inventory: &InventoryState) {
        if let QuestGoal::Fetch {
            item: needed,
            current,
            ..
        } = &mut self.goal
        {
            *current = inventory.count_of(*needed);
        }
        self.completed = self.goal.is_reached();
    }
}

/// Outcome of offering a quest to a player's log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AcceptOutcome {
    Accepted,
    /// The log already holds this id; accepting again is a no-op.
    Duplicate,
    /// The log is at capacity; nothing changed.
    LogFull,
}

/// A player's quest list. Quests are unique by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestLog {
    quests: ArrayVec<Quest, { GameConfig::MAX_QUESTS }>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a quest: marks it started and seeds fetch progress from the
    /// player's current inventory. Idempotent by id.
    pub fn accept(&mut self, mut quest: Quest, inventory: &InventoryState) -> AcceptOutcome {
        if self.get(quest.id).is_some() {
            return AcceptOutcome::Duplicate;
        }

        quest.started = true;
        quest.update_item_initial(inventory);

        match self.quests.try_push(quest) {
            Ok(()) => AcceptOutcome::Accepted,
            Err(_) => AcceptOutcome::LogFull,
        }
    }

    pub fn get(&self, id: QuestId) -> Option<&Quest> {
        self.quests.iter().find(|quest| quest.id == id)
    }

    /// Removes a quest (turn-in), returning it if present.
    pub fn remove(&mut self, id: QuestId) -> Option<Quest> {
        let index = self.quests.iter().position(|quest| quest.id == id)?;
        Some(self.quests.remove(index))
    }

    /// Advances every started kill goal by one. Returns the ids of quests
    /// whose completion flipped on this update.
    pub fn update_kill(&mut self) -> Vec<QuestId> {
        let mut completed = Vec::new();
        for quest in &mut self.quests {
            if !quest.started {
                continue;
            }
            let was_completed = quest.completed;
            quest.update_kill();
            if quest.completed && !was_completed {
                completed.push(quest.id);
            }
        }
        completed
    }

    /// Advances every started fetch goal matching `item` by one. Returns
    /// the ids of quests whose completion flipped on this update.
    pub fn update_item(&mut self, item: ItemId) -> Vec<QuestId> {
        let mut completed = Vec::new();
        for quest in &mut self.quests {
            if !quest.started {
                continue;
            }
            let was_completed = quest.completed;
            quest.update_item(item);
            if quest.completed && !was_completed {
                completed.push(quest.id);
            }
        }
        completed
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_monotonic() {
        let a = Quest::new("a", "", QuestGoal::kill(1));
        let b = Quest::new("b", "", QuestGoal::kill(1));
        assert!(b.id > a.id);
    }

    #[test]
    fn accepting_twice_keeps_one_entry() {
        let mut log = QuestLog::new();
        let inventory = InventoryState::empty();
        let quest = Quest::new("cull", "thin the herd", QuestGoal::kill(3));

        assert_eq!(log.accept(quest.clone(), &inventory), AcceptOutcome::Accepted);
        assert_eq!(log.accept(quest, &inventory), AcceptOutcome::Duplicate);
        assert_eq!(log.len(), 1);
        assert!(log.iter().next().unwrap().started);
    }

    #[test]
    fn fetch_quest_seeded_from_inventory_completes_immediately() {
        let potion = ItemId(11);
        let mut inventory = InventoryState::empty();
        for _ in 0..3 {
            inventory.add(potion);
        }

        let mut log = QuestLog::new();
        let quest = Quest::new("restock", "bring 3 potions", QuestGoal::fetch(potion, 3));
        let id = quest.id;
        log.accept(quest, &inventory);

        assert!(log.get(id).unwrap().completed);
    }

    #[test]
    fn kill_updates_only_kill_goals() {
        let mut log = QuestLog::new();
        let inventory = InventoryState::empty();
        let kill = Quest::new("cull", "", QuestGoal::kill(2));
        let fetch = Quest::new("restock", "", QuestGoal::fetch(ItemId(1), 2));
        let kill_id = kill.id;
        let fetch_id = fetch.id;
        log.accept(kill, &inventory);
        log.accept(fetch, &inventory);

        assert!(log.update_kill().is_empty());
        let completed = log.update_kill();
        assert_eq!(completed, vec![kill_id]);

        match log.get(fetch_id).unwrap().goal {
            QuestGoal::Fetch { current, .. } => assert_eq!(current, 0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn item_updates_only_matching_fetch_goals() {
        let mut log = QuestLog::new();
        let inventory = InventoryState::empty();
        let quest = Quest::new("restock", "", QuestGoal::fetch(ItemId(1), 1));
        let id = quest.id;
        log.accept(quest, &inventory);

        assert!(log.update_item(ItemId(2)).is_empty());
        assert_eq!(log.update_item(ItemId(1)), vec![id]);
        // Overshooting required never un-completes.
        assert!(log.update_item(ItemId(1)).is_empty());
        assert!(log.get(id).unwrap().completed);
    }

    #[test]
    fn turn_in_removes_quest() {
        let mut log = QuestLog::new();
        let inventory = InventoryState::empty();
        let quest = Quest::new("cull", "", QuestGoal::kill(0));
        let id = quest.id;
        log.accept(quest, &inventory);

        // required = 0 completes on acceptance seeding.
        assert!(log.get(id).unwrap().completed);
        assert!(log.remove(id).is_some());
        assert!(log.is_empty());
        assert!(log.remove(id).is_none());
    }
}
