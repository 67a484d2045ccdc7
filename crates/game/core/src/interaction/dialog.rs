use crate::quest::Quest;

/// Immutable dialog content: the lines an NPC speaks, optionally
/// followed by a quest offer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dialog {
    pub lines: Vec<String>,
    pub has_quest: bool,
    pub quest: Option<Quest>,
}

impl Dialog {
    pub fn plain(lines: Vec<String>) -> Self {
        Self {
            lines,
            has_quest: false,
            quest: None,
        }
    }

    pub fn with_quest(lines: Vec<String>, quest: Quest) -> Self {
        Self {
            lines,
            has_quest: true,
            quest: Some(quest),
        }
    }

    /// The quest this dialog actually offers. `has_quest` without an
    /// attached quest is treated as no offer.
    pub fn offered_quest(&self) -> Option<&Quest> {
        if self.has_quest { self.quest.as_ref() } else { None }
    }
}
