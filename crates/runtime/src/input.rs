//! Wire-level player commands.
//!
//! Hosts decode whatever their transport carries (keyboard map, network
//! frame, replay file) into these commands and feed them to the session.

use serde::{Deserialize, Serialize};

/// One player input for the current frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputCommand {
    /// Movement axis, raw from the controller; the core squashes the
    /// dead zone.
    MoveAxis { x: f32, y: f32 },
    /// Start a dodge.
    Dodge,
    /// Swing in a direction.
    Attack { x: f32, y: f32 },
    /// Interact with a named NPC. `dialog` selects among a talker's
    /// dialogs; hosts that want variety roll it.
    Interact { npc: String, dialog: usize },
    /// Advance the current dialog.
    Advance,
    /// Answer a pending quest offer.
    QuestDecision { accept: bool },
    /// Leave the shop screen.
    ExitShop,
    /// Pick up a ground item.
    PickUp { item: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_round_trip_through_json() {
        let command = InputCommand::Interact {
            npc: "elder".into(),
            dialog: 1,
        };
        let json = serde_json::to_string(&command).unwrap();
        assert!(json.contains("\"type\":\"interact\""));
        assert_eq!(serde_json::from_str::<InputCommand>(&json).unwrap(), command);
    }

    #[test]
    fn replay_line_decodes() {
        let command: InputCommand =
            serde_json::from_str(r#"{"type":"move_axis","x":0.0,"y":-1.0}"#).unwrap();
        assert_eq!(command, InputCommand::MoveAxis { x: 0.0, y: -1.0 });
    }
}
