//! What each player sees when flipping their card
use crate::config::GameConfig;
use crate::player::Role;
use crate::round::RoundState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum CardFace {
    Word(String),
    /// Mr. White has to guess the word from the discussion.
    Unknown,
    Hint(String),
    NoHint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealCard {
    pub player_name: String,
    pub role: Role,
    pub face: CardFace,
    pub is_last: bool,
}

#[must_use]
pub fn face_for(role: Role, round: &RoundState, config: &GameConfig) -> CardFace {
    match role {
        Role::Citizen => CardFace::Word(round.secret_word.clone()),
        Role::MrWhite => CardFace::Unknown,
        Role::Impostor if config.hint_enabled => CardFace::Hint(round.category.clone()),
        Role::Impostor => CardFace::NoHint,
    }
}

/// Card for the player at `index`, if any.
#[must_use]
pub fn reveal_for(round: &RoundState, index: usize, config: &GameConfig) -> Option<RevealCard> {
    let assignment = round.assignments.get(index)?;
    Some(RevealCard {
        player_name: assignment.name.clone(),
        role: assignment.role,
        face: face_for(assignment.role, round, config),
        is_last: index + 1 == round.player_count(),
    })
}
