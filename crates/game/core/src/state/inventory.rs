//! Player-held item storage.
//!
//! An inventory is an ordered list of `(item, count)` slots with unique
//! item ids, capped at [`GameConfig::MAX_INVENTORY_SLOTS`]. A slot is
//! removed the moment its count reaches zero. Adding past the cap is
//! rejected explicitly rather than dropped silently.

use arrayvec::ArrayVec;

use super::ItemId;
use crate::config::GameConfig;

/// Inventory slot containing an item and its quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub item: ItemId,
    pub count: u32,
}

impl InventorySlot {
    pub fn new(item: ItemId, count: u32) -> Self {
        Self { item, count }
    }
}

/// Outcome of an inventory add.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AddOutcome {
    /// A new slot was created for the item.
    Added,
    /// An existing slot's count was incremented.
    Stacked,
    /// All slots are occupied by other items; nothing changed.
    Rejected,
}

impl AddOutcome {
    /// True when the item actually entered the inventory.
    #[inline]
    pub fn is_stored(self) -> bool {
        !matches!(self, AddOutcome::Rejected)
    }
}

/// Ordered, capacity-bounded item storage.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    slots: ArrayVec<InventorySlot, { GameConfig::MAX_INVENTORY_SLOTS }>,
}

impl InventoryState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds one of `item`, stacking onto an existing slot first.
    pub fn add(&mut self, item: ItemId) -> AddOutcome {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.item == item) {
            slot.count += 1;
            return AddOutcome::Stacked;
        }

        match self.slots.try_push(InventorySlot::new(item, 1)) {
            Ok(()) => AddOutcome::Added,
            Err(_) => AddOutcome::Rejected,
        }
    }

    /// Removes one of `item`. Returns false if the item is not held.
    /// The slot disappears when its count reaches zero.
    pub fn remove(&mut self, item: ItemId) -> bool {
        let Some(index) = self.slots.iter().position(|slot| slot.item == item) else {
            return false;
        };

        self.slots[index].count -= 1;
        if self.slots[index].count == 0 {
            self.slots.remove(index);
        }
        true
    }

    /// Quantity of `item` currently held (zero when absent).
    pub fn count_of(&self, item: ItemId) -> u32 {
        self.slots
            .iter()
            .find(|slot| slot.item == item)
            .map_or(0, |slot| slot.count)
    }

    /// Slot at a display position, if occupied.
    pub fn slot(&self, index: usize) -> Option<&InventorySlot> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventorySlot> {
        self.slots.iter()
    }
}
