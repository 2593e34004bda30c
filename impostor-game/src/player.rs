//! Players and the roles they are dealt each round
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque player identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Citizen,
    Impostor,
    MrWhite,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Impostor => "impostor",
            Self::MrWhite => "mr_white",
        }
    }

    /// Label shown on the player's card.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Citizen => "Citizen",
            Self::Impostor => "Impostor",
            Self::MrWhite => "Mr. White",
        }
    }

    /// Whether the role is anything other than a plain citizen.
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, Self::Citizen)
    }

    /// Whether the player holding this role is told the secret word.
    #[must_use]
    pub const fn knows_word(self) -> bool {
        matches!(self, Self::Citizen)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "citizen" => Ok(Self::Citizen),
            "impostor" => Ok(Self::Impostor),
            "mr_white" => Ok(Self::MrWhite),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

impl Player {
    /// Create a player from user input. Surrounding whitespace is trimmed and
    /// blank names are rejected.
    #[must_use]
    pub fn new(name: &str) -> Option<Self> {
        let clean = name.trim();
        if clean.is_empty() {
            return None;
        }
        Some(Self {
            id: PlayerId::new(),
            name: clean.to_string(),
            role: Role::default(),
        })
    }
}

/// Collect the display names of `players`, preserving order.
#[must_use]
pub fn player_names(players: &[Player]) -> Vec<String> {
    players.iter().map(|p| p.name.clone()).collect()
}
