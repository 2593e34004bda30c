//! Impostor Game Engine
//!
//! Platform-agnostic core logic for the Impostor party word game: players,
//! word packs, configuration, round dealing and the screen phase machine.
//! This crate provides all game mechanics without UI or platform-specific
//! dependencies; hosts supply a [`KeyValueStore`] and render from the engine's
//! read accessors or its event subscriptions.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod pack;
pub mod persistence;
pub mod phase;
pub mod player;
pub mod repository;
pub mod reveal;
pub mod rng;
pub mod round;
pub mod synth;
pub mod timer;

// Re-export commonly used types
pub use catalog::default_packs;
pub use config::GameConfig;
pub use engine::{
    Action, ActionError, EngineEvent, EngineSnapshot, ImpostorEngine, Outcome, SubscriptionId,
};
pub use pack::{PackColor, PackId, WordPack};
pub use persistence::{
    JsonFileStore, KeyValueStore, MemoryStore, PersistedRecords, PersistenceError,
};
pub use phase::{GamePhase, PhaseAction, SPLASH_DURATION, TransitionError, transition};
pub use player::{Player, PlayerId, Role};
pub use repository::{ImportError, PackRepository, export_pack};
pub use reveal::{CardFace, RevealCard, reveal_for};
pub use rng::{CountingRng, RngBundle};
pub use round::{RoleAssignment, RoundState, TurnStep, ValidationError, start_round};
pub use synth::synthesize;
pub use timer::{DebateTimer, TimerTick};
