//! Dialog and shop interaction state machine.
//!
//! One [`InteractionHub`] owns the single focus slot: while a player is
//! in a dialog or shop, their normal action input is disabled and the hub
//! captures input instead. The hub never draws anything itself; hosts
//! implement [`Presenter`] and receive display callbacks synchronously.

mod dialog;
mod hub;
mod shop;

pub use dialog::Dialog;
pub use hub::InteractionHub;
pub use shop::{ShopStock, ShopView};

/// Where the focused interaction currently is. `Idle` means no focus held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Idle,
    InDialog,
    QuestOffer,
    InShop,
}

/// Host-side display surface for interaction output.
///
/// Calls arrive synchronously from within hub operations, in the order
/// the player would see them.
pub trait Presenter {
    fn set_dialog_panel(&mut self, visible: bool);
    fn show_line(&mut self, line: &str);
    fn show_quest_offer(&mut self, name: &str, description: &str);
    fn hide_quest_offer(&mut self);
    fn show_shop(&mut self, view: &ShopView);
    fn hide_shop(&mut self);
}

/// Presenter that records what it was told to display. Used in tests and
/// by headless hosts that only need the latest surface state.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    pub dialog_visible: bool,
    pub lines: Vec<String>,
    pub offer: Option<(String, String)>,
    pub shop: Option<ShopView>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_line(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

impl Presenter for RecordingPresenter {
    fn set_dialog_panel(&mut self, visible: bool) {
        self.dialog_visible = visible;
    }

    fn show_line(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }

    fn show_quest_offer(&mut self, name: &str, description: &str) {
        self.offer = Some((name.to_owned(), description.to_owned()));
    }

    fn hide_quest_offer(&mut self) {
        self.offer = None;
    }

    fn show_shop(&mut self, view: &ShopView) {
        self.shop = Some(view.clone());
    }

    fn hide_shop(&mut self) {
        self.shop = None;
    }
}
