//! Persisted game configuration
use serde::{Deserialize, Serialize};

/// Schema version written with every configuration record.
pub const CONFIG_VERSION: u32 = 1;
pub const MIN_IMPOSTORS: usize = 1;
/// Ceiling applied to stored impostor counts.
pub const MAX_IMPOSTORS: usize = u8::MAX as usize;
pub const MIN_DEBATE_MINUTES: u8 = 1;
pub const MAX_DEBATE_MINUTES: u8 = 10;
pub const DEFAULT_DEBATE_MINUTES: u8 = 3;

/// Fixed configuration record. Every field carries an explicit default so a
/// partially written or older record still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "GameConfig::default_version")]
    pub version: u32,
    #[serde(default = "GameConfig::default_impostors")]
    pub impostors: usize,
    #[serde(default)]
    pub mr_white_enabled: bool,
    #[serde(default = "GameConfig::default_enabled")]
    pub hint_enabled: bool,
    #[serde(default)]
    pub timer_enabled: bool,
    #[serde(default = "GameConfig::default_debate_minutes")]
    pub debate_minutes: u8,
    #[serde(default = "GameConfig::default_enabled")]
    pub haptics_enabled: bool,
}

impl GameConfig {
    const fn default_version() -> u32 {
        CONFIG_VERSION
    }

    const fn default_impostors() -> usize {
        MIN_IMPOSTORS
    }

    const fn default_enabled() -> bool {
        true
    }

    const fn default_debate_minutes() -> u8 {
        DEFAULT_DEBATE_MINUTES
    }

    /// Number of non-citizen roles a round will deal.
    #[must_use]
    pub const fn special_roles(&self) -> usize {
        self.impostors
            .saturating_add(if self.mr_white_enabled { 1 } else { 0 })
    }

    /// Whether a round with `player_count` players leaves at least one citizen.
    #[must_use]
    pub const fn fits(&self, player_count: usize) -> bool {
        self.special_roles() < player_count
    }

    /// Largest impostor count the stepper allows for `player_count` players.
    #[must_use]
    pub const fn max_impostors_for(player_count: usize) -> usize {
        if player_count > MIN_IMPOSTORS + 1 {
            player_count - 1
        } else {
            MIN_IMPOSTORS
        }
    }

    /// Debate duration in seconds.
    #[must_use]
    pub const fn debate_seconds(&self) -> u32 {
        self.debate_minutes as u32 * 60
    }

    /// Copy with every field forced into its valid range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.version = CONFIG_VERSION;
        self.impostors = self.impostors.clamp(MIN_IMPOSTORS, MAX_IMPOSTORS);
        self.debate_minutes = clamp_debate_minutes(self.debate_minutes);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            impostors: MIN_IMPOSTORS,
            mr_white_enabled: false,
            hint_enabled: true,
            timer_enabled: false,
            debate_minutes: DEFAULT_DEBATE_MINUTES,
            haptics_enabled: true,
        }
    }
}

#[must_use]
pub fn clamp_debate_minutes(minutes: u8) -> u8 {
    minutes.clamp(MIN_DEBATE_MINUTES, MAX_DEBATE_MINUTES)
}
