use crate::error::FocusError;
use crate::events::{EventQueue, GameEvent};
use crate::interaction::{Dialog, Phase, Presenter, ShopStock, ShopView};
use crate::player::PlayerState;
use crate::quest::Quest;
use crate::state::EntityId;

/// Owns the single interaction focus slot.
///
/// While a focus is held, exactly one of the two input channels is
/// enabled: the hub's capture, or the focused player's normal action
/// input. Every transition in and out keeps that split intact.
#[derive(Debug, Default)]
pub struct InteractionHub {
    phase: Phase,
    focus: Option<EntityId>,
    capture_enabled: bool,
    lines: Vec<String>,
    cursor: usize,
    dialog_quest: Option<Quest>,
    pending_offer: Option<Quest>,
}

impl InteractionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn focus(&self) -> Option<EntityId> {
        self.focus
    }

    pub fn capture_enabled(&self) -> bool {
        self.capture_enabled
    }

    // ========================================================================
    // Dialog
    // ========================================================================

    /// Captures `player` and begins `dialog`, showing the first line
    /// immediately. Rejected while any focus is held, including by the
    /// same player.
    pub fn enter_dialog(
        &mut self,
        dialog: &Dialog,
        player: &mut PlayerState,
        presenter: &mut dyn Presenter,
        events: &mut EventQueue,
    ) -> Result<(), FocusError> {
        if let Some(holder) = self.focus {
            return Err(FocusError::AlreadyHeld { holder });
        }

        self.focus = Some(player.id);
        player.action_input_enabled = false;
        self.capture_enabled = true;
        presenter.set_dialog_panel(true);

        self.begin_dialog(dialog.lines.clone(), dialog.offered_quest().cloned());
        self.advance(player, presenter, events)
    }

    /// Interact input while a dialog is up: show the next line, or run
    /// the exit branch once the lines are spent.
    pub fn advance(
        &mut self,
        player: &mut PlayerState,
        presenter: &mut dyn Presenter,
        events: &mut EventQueue,
    ) -> Result<(), FocusError> {
        self.check_focus(player, Phase::InDialog)?;

        if self.cursor < self.lines.len() {
            presenter.show_line(&self.lines[self.cursor]);
            self.cursor += 1;
            return Ok(());
        }

        self.exit_dialog(player, presenter, events);
        Ok(())
    }

    fn exit_dialog(
        &mut self,
        player: &mut PlayerState,
        presenter: &mut dyn Presenter,
        events: &mut EventQueue,
    ) {
        let Some(quest) = self.dialog_quest.take() else {
            presenter.set_dialog_panel(false);
            self.release(player);
            return;
        };

        if !player.has_accepted(quest.id) {
            // Keep focus while the player decides.
            self.phase = Phase::QuestOffer;
            presenter.show_quest_offer(&quest.name, &quest.description);
            self.pending_offer = Some(quest);
            return;
        }

        let turned_in = player
            .quests
            .get(quest.id)
            .is_some_and(|entry| entry.completed);
        if turned_in {
            player.quests.remove(quest.id);
            events.push(GameEvent::QuestTurnedIn {
                player: player.id,
                quest: quest.id,
            });
            let congrats = format!("Well done, that settles \"{}\".", quest.name);
            self.begin_dialog(vec![congrats], None);
            // Show the synthetic line without another input.
            if self.cursor < self.lines.len() {
                presenter.show_line(&self.lines[self.cursor]);
                self.cursor += 1;
            }
            return;
        }

        // Accepted but not complete (or already turned in earlier).
        presenter.set_dialog_panel(false);
        self.release(player);
    }

    /// Resolves a pending quest offer. Focus releases either way.
    pub fn quest_decision(
        &mut self,
        accept: bool,
        player: &mut PlayerState,
        presenter: &mut dyn Presenter,
        events: &mut EventQueue,
    ) -> Result<(), FocusError> {
        self.check_focus(player, Phase::QuestOffer)?;

        let offer = self.pending_offer.take();
        if accept && let Some(quest) = offer {
            player.accept_quest(quest, events);
        }

        presenter.hide_quest_offer();
        presenter.set_dialog_panel(false);
        self.release(player);
        Ok(())
    }

    // ========================================================================
    // Shop
    // ========================================================================

    pub fn enter_shop(
        &mut self,
        stock: &ShopStock,
        player: &mut PlayerState,
        presenter: &mut dyn Presenter,
    ) -> Result<(), FocusError> {
        if let Some(holder) = self.focus {
            return Err(FocusError::AlreadyHeld { holder });
        }

        self.focus = Some(player.id);
        player.action_input_enabled = false;
        self.capture_enabled = true;
        self.phase = Phase::InShop;

        let view = ShopView::assemble(&player.inventory, stock);
        presenter.show_shop(&view);
        Ok(())
    }

    pub fn exit_shop(
        &mut self,
        player: &mut PlayerState,
        presenter: &mut dyn Presenter,
    ) -> Result<(), FocusError> {
        self.check_focus(player, Phase::InShop)?;
        presenter.hide_shop();
        self.release(player);
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn begin_dialog(&mut self, lines: Vec<String>, quest: Option<Quest>) {
        self.phase = Phase::InDialog;
        self.lines = lines;
        self.cursor = 0;
        self.dialog_quest = quest;
    }

    fn check_focus(&self, player: &PlayerState, expected: Phase) -> Result<(), FocusError> {
        if self.phase != expected {
            return Err(FocusError::WrongPhase { phase: self.phase });
        }
        if self.focus != Some(player.id) {
            return Err(FocusError::NotFocused { player: player.id });
        }
        Ok(())
    }

    fn release(&mut self, player: &mut PlayerState) {
        self.phase = Phase::Idle;
        self.focus = None;
        self.capture_enabled = false;
        self.lines.clear();
        self.cursor = 0;
        self.dialog_quest = None;
        self.pending_offer = None;
        player.action_input_enabled = true;
    }
}
