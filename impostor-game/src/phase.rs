//! Screen phases and the transition reducer
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// How long the splash screen stays up before the menu appears.
pub const SPLASH_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Splash,
    Menu,
    Settings,
    PlayerSetup,
    PackSelection,
    Playing,
    Finished,
}

impl GamePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Splash => "splash",
            Self::Menu => "menu",
            Self::Settings => "settings",
            Self::PlayerSetup => "player_setup",
            Self::PackSelection => "pack_selection",
            Self::Playing => "playing",
            Self::Finished => "finished",
        }
    }

    /// Phases a user can reach by plain navigation.
    #[must_use]
    pub const fn is_navigable(self) -> bool {
        matches!(
            self,
            Self::Menu | Self::Settings | Self::PlayerSetup | Self::PackSelection
        )
    }

    #[must_use]
    pub const fn is_in_round(self) -> bool {
        matches!(self, Self::Playing | Self::Finished)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs to [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum PhaseAction {
    SplashElapsed,
    Navigate(GamePhase),
    RoundStarted,
    TurnsExhausted,
    ReturnToMenu,
    Restarted,
}

impl fmt::Display for PhaseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SplashElapsed => f.write_str("splash_elapsed"),
            Self::Navigate(target) => write!(f, "navigate({target})"),
            Self::RoundStarted => f.write_str("round_started"),
            Self::TurnsExhausted => f.write_str("turns_exhausted"),
            Self::ReturnToMenu => f.write_str("return_to_menu"),
            Self::Restarted => f.write_str("restarted"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("action {action} is not allowed from phase {from}")]
    Invalid { from: GamePhase, action: PhaseAction },
}

/// Reduce `(phase, action)` to the next phase. Rejected pairs leave the caller's
/// phase untouched.
///
/// # Errors
///
/// Returns [`TransitionError::Invalid`] for any pair outside the allowed graph.
pub fn transition(phase: GamePhase, action: PhaseAction) -> Result<GamePhase, TransitionError> {
    use GamePhase::{Finished, Menu, PackSelection, PlayerSetup, Playing, Settings, Splash};
    use PhaseAction::{
        Navigate, Restarted, ReturnToMenu, RoundStarted, SplashElapsed, TurnsExhausted,
    };

    let next = match (phase, action) {
        (Splash, SplashElapsed) => Some(Menu),
        (Menu, Navigate(target @ (Settings | PlayerSetup | PackSelection)))
        | (Settings | PlayerSetup | PackSelection, Navigate(target @ Menu))
        | (PlayerSetup, Navigate(target @ PackSelection)) => Some(target),
        (Menu | PackSelection, RoundStarted) => Some(Playing),
        (Playing, TurnsExhausted) => Some(Finished),
        (Playing | Finished, ReturnToMenu) => Some(Menu),
        (Finished, Restarted) => Some(Playing),
        _ => None,
    };
    next.ok_or(TransitionError::Invalid {
        from: phase,
        action,
    })
}
