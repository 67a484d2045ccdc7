use crate::config::GameConfig;
use crate::state::{InventorySlot, InventoryState};

/// An NPC's shop stock: item stacks in display order. Stock beyond the
/// fixed slot count never renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopStock {
    pub slots: Vec<InventorySlot>,
}

impl ShopStock {
    pub fn new(slots: Vec<InventorySlot>) -> Self {
        Self { slots }
    }
}

/// Snapshot of the shop screen: the player's inventory on one side and
/// the shop's stock on the other, assembled by position with no
/// scrolling or reordering. Empty positions stay blank.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopView {
    pub player: [Option<InventorySlot>; GameConfig::MAX_SHOP_SLOTS],
    pub stock: [Option<InventorySlot>; GameConfig::MAX_SHOP_SLOTS],
}

impl ShopView {
    pub fn assemble(inventory: &InventoryState, shop: &ShopStock) -> Self {
        let mut player = [None; GameConfig::MAX_SHOP_SLOTS];
        for (position, slot) in inventory.iter().take(GameConfig::MAX_SHOP_SLOTS).enumerate() {
            player[position] = Some(*slot);
        }

        let mut stock = [None; GameConfig::MAX_SHOP_SLOTS];
        for (position, slot) in shop.slots.iter().take(GameConfig::MAX_SHOP_SLOTS).enumerate() {
            stock[position] = Some(*slot);
        }

        Self { player, stock }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ItemId;

    #[test]
    fn view_fills_by_position_and_leaves_rest_blank() {
        let mut inventory = InventoryState::empty();
        inventory.add(ItemId(1));
        inventory.add(ItemId(1));
        inventory.add(ItemId(2));

        let stock = ShopStock::new(vec![InventorySlot {
            item: ItemId(7),
            count: 5,
        }]);

        let view = ShopView::assemble(&inventory, &stock);
        assert_eq!(view.player[0], Some(InventorySlot { item: ItemId(1), count: 2 }));
        assert_eq!(view.player[1], Some(InventorySlot { item: ItemId(2), count: 1 }));
        assert!(view.player[2].is_none());
        assert_eq!(view.stock[0], Some(InventorySlot { item: ItemId(7), count: 5 }));
        assert!(view.stock[1..].iter().all(Option::is_none));
    }

    #[test]
    fn stock_beyond_slot_count_is_dropped_from_view() {
        let slots = (0..12)
            .map(|n| InventorySlot {
                item: ItemId(n),
                count: 1,
            })
            .collect();
        let view = ShopView::assemble(&InventoryState::empty(), &ShopStock::new(slots));
        assert!(view.stock.iter().all(Option::is_some));
        assert_eq!(view.stock.len(), GameConfig::MAX_SHOP_SLOTS);
    }
}
