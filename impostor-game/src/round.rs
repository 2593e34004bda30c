//! Round setup: validation, secret word, roles and starting player
use crate::config::GameConfig;
use crate::pack::WordPack;
use crate::player::{Player, PlayerId, Role};
use crate::rng::RngBundle;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest players a round can be dealt to.
pub const MIN_PLAYERS: usize = 3;
/// Category label used when no pack claims the drawn word.
pub const FALLBACK_CATEGORY: &str = "General";

/// Reasons a round cannot start, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("At least 3 players are needed.")]
    InsufficientPlayers,
    #[error("Select at least one pack.")]
    NoPackSelected,
    #[error("The selected packs have no words.")]
    EmptyWordPool,
    #[error("Too many special roles for this many players.")]
    TooManySpecialRoles,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub player_id: PlayerId,
    pub name: String,
    pub role: Role,
}

/// Per-round state, replaced wholesale by every successful round start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub secret_word: String,
    pub category: String,
    /// One entry per player, in roster order.
    pub assignments: Vec<RoleAssignment>,
    pub current_index: usize,
    pub starting_player: String,
}

/// Result of asking for the next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStep {
    Advanced(usize),
    Exhausted,
}

impl RoundState {
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.assignments.len()
    }

    #[must_use]
    pub fn current(&self) -> Option<&RoleAssignment> {
        self.assignments.get(self.current_index)
    }

    #[must_use]
    pub fn is_last_turn(&self) -> bool {
        self.current_index + 1 >= self.assignments.len()
    }

    /// Move to the next player, or report that everyone has seen their card.
    /// The index never moves past the last player.
    pub fn advance(&mut self) -> TurnStep {
        if self.is_last_turn() {
            TurnStep::Exhausted
        } else {
            self.current_index += 1;
            TurnStep::Advanced(self.current_index)
        }
    }

    /// Count of each role dealt this round as `(citizens, impostors, mr_whites)`.
    #[must_use]
    pub fn role_counts(&self) -> (usize, usize, usize) {
        self.assignments
            .iter()
            .fold((0, 0, 0), |(c, i, w), a| match a.role {
                Role::Citizen => (c + 1, i, w),
                Role::Impostor => (c, i + 1, w),
                Role::MrWhite => (c, i, w + 1),
            })
    }
}

/// Check every precondition of a round in fixed order, without drawing.
///
/// # Errors
///
/// Returns the first failing [`ValidationError`].
pub fn validate(
    players: &[Player],
    packs: &[WordPack],
    config: &GameConfig,
) -> Result<(), ValidationError> {
    if players.len() < MIN_PLAYERS {
        return Err(ValidationError::InsufficientPlayers);
    }
    let mut selected = packs.iter().filter(|p| p.is_selected).peekable();
    if selected.peek().is_none() {
        return Err(ValidationError::NoPackSelected);
    }
    if selected.all(|p| p.words.is_empty()) {
        return Err(ValidationError::EmptyWordPool);
    }
    if !config.fits(players.len()) {
        return Err(ValidationError::TooManySpecialRoles);
    }
    Ok(())
}

/// Deal a new round. Pure with respect to the inputs: the caller commits the
/// returned state (and writes roles back to its players) only on success.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the roster, pack selection or
/// configuration cannot support a round. No random draw happens in that case.
pub fn start_round(
    players: &[Player],
    packs: &[WordPack],
    config: &GameConfig,
    rng: &mut RngBundle,
) -> Result<RoundState, ValidationError> {
    validate(players, packs, config)?;

    let pool: Vec<&String> = packs
        .iter()
        .filter(|p| p.is_selected)
        .flat_map(|p| p.words.iter())
        .collect();
    let secret_word = pool
        .choose(rng.words())
        .map(|w| (*w).clone())
        .ok_or(ValidationError::EmptyWordPool)?;
    let category = category_for(&secret_word, packs);

    let mut roles = role_multiset(config, players.len());
    roles.shuffle(rng.roles());
    let assignments = players
        .iter()
        .zip(roles)
        .map(|(player, role)| RoleAssignment {
            player_id: player.id,
            name: player.name.clone(),
            role,
        })
        .collect();

    let starting_player = players
        .choose(rng.starter())
        .map(|p| p.name.clone())
        .ok_or(ValidationError::InsufficientPlayers)?;

    log::debug!(
        "round dealt to {} players from a pool of {} words (category {category})",
        players.len(),
        pool.len()
    );

    Ok(RoundState {
        secret_word,
        category,
        assignments,
        current_index: 0,
        starting_player,
    })
}

/// Name of the first non-generated pack holding `word`, else the first
/// selected pack, else [`FALLBACK_CATEGORY`].
#[must_use]
pub fn category_for(word: &str, packs: &[WordPack]) -> String {
    packs
        .iter()
        .find(|p| !p.is_generated && p.contains_word(word))
        .or_else(|| packs.iter().find(|p| p.is_selected))
        .map_or_else(|| FALLBACK_CATEGORY.to_string(), |p| p.name.clone())
}

/// Unshuffled roles for `player_count` players: impostors, then the optional
/// Mr. White, then citizens.
#[must_use]
pub fn role_multiset(config: &GameConfig, player_count: usize) -> Vec<Role> {
    let mut roles = vec![Role::Impostor; config.impostors.min(player_count)];
    if config.mr_white_enabled && roles.len() < player_count {
        roles.push(Role::MrWhite);
    }
    roles.resize(player_count, Role::Citizen);
    roles
}
