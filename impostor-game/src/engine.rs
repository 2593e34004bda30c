//! Owned engine state, its write surface, and change notifications
use crate::catalog;
use crate::config::{GameConfig, clamp_debate_minutes};
use crate::pack::{PackColor, PackId, WordPack};
use crate::persistence::{self, KeyValueStore, PersistenceError};
use crate::phase::{GamePhase, PhaseAction, TransitionError, transition};
use crate::player::{Player, PlayerId};
use crate::repository::{self, ImportError, PackRepository};
use crate::reveal::{RevealCard, reveal_for};
use crate::rng::RngBundle;
use crate::round::{self, RoundState, TurnStep, ValidationError};
use crate::synth;
use crate::timer::DebateTimer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the presentation layer needs to render, by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub players: Vec<Player>,
    pub packs: Vec<WordPack>,
    pub config: GameConfig,
    pub round: Option<RoundState>,
    pub phase: GamePhase,
}

/// Notification sent to subscribers after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PlayersChanged,
    PacksChanged,
    ConfigChanged,
    PhaseChanged(GamePhase),
    RoundStarted,
    TurnAdvanced(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Every write operation as a value, for [`ImpostorEngine::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddPlayer(String),
    RemovePlayer(PlayerId),
    ClearPlayers,
    AddPack {
        name: String,
        icon: String,
        color: PackColor,
        words: Vec<String>,
    },
    CreatePack,
    UpdatePack(WordPack),
    DeletePack(PackId),
    TogglePack(PackId),
    ResetPacks,
    ImportPack(String),
    SetMrWhite(bool),
    SetHint(bool),
    SetTimer(bool),
    SetDebateMinutes(u8),
    SetHaptics(bool),
    IncrementImpostors,
    DecrementImpostors,
    Navigate(GamePhase),
    FinishSplash,
    StartRound,
    AdvanceTurn,
    Reset,
    Restart,
    Flush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Unchanged,
    PlayerAdded(PlayerId),
    PackAdded(PackId),
    Selection(bool),
    TurnAdvanced(usize),
    RoundFinished,
}

impl From<bool> for Outcome {
    fn from(changed: bool) -> Self {
        if changed { Self::Applied } else { Self::Unchanged }
    }
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

type Subscriber = Box<dyn FnMut(&EngineEvent)>;

/// Game engine for one application session. Owns players, packs,
/// configuration, the current round and phase, and writes the persistent
/// records through `S` after every mutation.
pub struct ImpostorEngine<S>
where
    S: KeyValueStore,
{
    store: S,
    players: Vec<Player>,
    packs: PackRepository,
    config: GameConfig,
    round: Option<RoundState>,
    phase: GamePhase,
    rng: RngBundle,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S> ImpostorEngine<S>
where
    S: KeyValueStore,
{
    /// Load persisted state from `store` with an entropy-seeded random source.
    pub fn load(store: S) -> Self {
        Self::with_rng(store, RngBundle::from_entropy())
    }

    /// Load persisted state from `store` with a reproducible random source.
    pub fn load_with_seed(store: S, seed: u64) -> Self {
        Self::with_rng(store, RngBundle::from_user_seed(seed))
    }

    fn with_rng(store: S, rng: RngBundle) -> Self {
        let records = persistence::load(&store);
        let seeded = records.packs.is_empty();
        let packs = if seeded {
            catalog::default_packs()
        } else {
            records.packs
        };
        let mut engine = Self {
            store,
            players: records.players,
            packs: PackRepository::new(packs),
            config: records.config,
            round: None,
            phase: GamePhase::Splash,
            rng,
            subscribers: Vec::new(),
            next_subscription: 0,
        };
        engine.resynthesize();
        if seeded {
            log::info!("no stored packs, seeded the built-in catalog");
            engine.persist();
        }
        engine
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn packs(&self) -> &[WordPack] {
        self.packs.packs()
    }

    #[must_use]
    pub const fn repository(&self) -> &PackRepository {
        &self.packs
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            players: self.players.clone(),
            packs: self.packs.packs().to_vec(),
            config: self.config.clone(),
            round: self.round.clone(),
            phase: self.phase,
        }
    }

    /// Card for the player whose turn it is.
    #[must_use]
    pub fn current_card(&self) -> Option<RevealCard> {
        let round = self.round.as_ref()?;
        reveal_for(round, round.current_index, &self.config)
    }

    /// A fresh debate countdown, when the timer is enabled.
    #[must_use]
    pub fn debate_timer(&self) -> Option<DebateTimer> {
        self.config
            .timer_enabled
            .then(|| DebateTimer::new(self.config.debate_minutes))
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&EngineEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn emit(&mut self, event: &EngineEvent) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }

    fn persist(&self) {
        persistence::save(&self.store, &self.players, self.packs.packs(), &self.config);
    }

    fn resynthesize(&mut self) {
        let packs = synth::synthesize(&self.players, self.packs.packs(), self.rng.shuffle());
        self.packs.replace_all(packs);
    }

    fn players_changed(&mut self) {
        self.resynthesize();
        self.persist();
        self.emit(&EngineEvent::PlayersChanged);
        self.emit(&EngineEvent::PacksChanged);
    }

    fn packs_changed(&mut self, resynthesize: bool) {
        if resynthesize {
            self.resynthesize();
        }
        self.persist();
        self.emit(&EngineEvent::PacksChanged);
    }

    fn config_changed(&mut self) {
        self.persist();
        self.emit(&EngineEvent::ConfigChanged);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            self.phase = phase;
            self.emit(&EngineEvent::PhaseChanged(phase));
        }
    }

    /// Explicit save, for hosts about to be suspended.
    ///
    /// # Errors
    ///
    /// Returns an error if any record cannot be written.
    pub fn flush(&self) -> Result<(), PersistenceError> {
        persistence::try_save(&self.store, &self.players, self.packs.packs(), &self.config)
    }

    /// Add a player. Blank names are ignored.
    pub fn add_player(&mut self, name: &str) -> Option<PlayerId> {
        let player = Player::new(name)?;
        let id = player.id;
        self.players.push(player);
        self.players_changed();
        Some(id)
    }

    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        let removed = self.players.len() != before;
        if removed {
            self.players_changed();
        }
        removed
    }

    pub fn clear_players(&mut self) -> bool {
        if self.players.is_empty() {
            return false;
        }
        self.players.clear();
        self.players_changed();
        true
    }

    pub fn add_pack(
        &mut self,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: PackColor,
        words: Vec<String>,
    ) -> PackId {
        let id = self.packs.add_pack(name, icon, color, words);
        self.packs_changed(true);
        id
    }

    pub fn create_pack(&mut self) -> PackId {
        let id = self.packs.create_pack();
        self.packs_changed(true);
        id
    }

    /// Replace a user pack. Unknown or generated ids are ignored.
    pub fn update_pack(&mut self, pack: WordPack) -> bool {
        let updated = self.packs.update_pack(pack);
        if updated {
            self.packs_changed(true);
        }
        updated
    }

    pub fn delete_pack(&mut self, id: PackId) -> bool {
        let deleted = self.packs.delete_pack(id);
        if deleted {
            self.packs_changed(true);
        }
        deleted
    }

    pub fn toggle_pack(&mut self, id: PackId) -> Option<bool> {
        let selected = self.packs.toggle_selection(id)?;
        self.packs_changed(false);
        Some(selected)
    }

    pub fn reset_packs(&mut self) {
        self.packs.reset_to_defaults();
        self.packs_changed(true);
    }

    /// Export a pack by id; unknown and generated packs export as `""`.
    #[must_use]
    pub fn export_pack(&self, id: PackId) -> String {
        self.packs
            .get(id)
            .map(repository::export_pack)
            .unwrap_or_default()
    }

    /// Import a pack from its exported text.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Malformed`] for unparseable text; nothing changes.
    pub fn try_import_pack(&mut self, text: &str) -> Result<PackId, ImportError> {
        let id = self.packs.import_pack(text)?;
        self.packs_changed(true);
        Ok(id)
    }

    /// Boolean form of [`Self::try_import_pack`].
    pub fn import_pack(&mut self, text: &str) -> bool {
        match self.try_import_pack(text) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("rejected pack import: {err}");
                false
            }
        }
    }

    fn update_config(&mut self, apply: impl FnOnce(&mut GameConfig)) -> bool {
        let before = self.config.clone();
        apply(&mut self.config);
        let changed = self.config != before;
        if changed {
            self.config_changed();
        }
        changed
    }

    pub fn set_mr_white(&mut self, enabled: bool) -> bool {
        self.update_config(|cfg| cfg.mr_white_enabled = enabled)
    }

    pub fn set_hint(&mut self, enabled: bool) -> bool {
        self.update_config(|cfg| cfg.hint_enabled = enabled)
    }

    pub fn set_timer(&mut self, enabled: bool) -> bool {
        self.update_config(|cfg| cfg.timer_enabled = enabled)
    }

    /// Set the debate length, clamped to 1..=10 minutes.
    pub fn set_debate_minutes(&mut self, minutes: u8) -> bool {
        self.update_config(|cfg| cfg.debate_minutes = clamp_debate_minutes(minutes))
    }

    pub fn set_haptics(&mut self, enabled: bool) -> bool {
        self.update_config(|cfg| cfg.haptics_enabled = enabled)
    }

    /// Raise the impostor count while it stays below `players - 1`.
    pub fn increment_impostors(&mut self) -> bool {
        let players = self.players.len();
        self.update_config(|cfg| {
            if cfg.impostors.saturating_add(1) < players {
                cfg.impostors += 1;
            }
        })
    }

    /// Lower the impostor count while it stays at least one.
    pub fn decrement_impostors(&mut self) -> bool {
        self.update_config(|cfg| {
            if cfg.impostors > 1 {
                cfg.impostors -= 1;
            }
        })
    }

    /// Move between menu screens.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] if `target` is not reachable from the
    /// current phase.
    pub fn navigate(&mut self, target: GamePhase) -> Result<(), TransitionError> {
        let next = transition(self.phase, PhaseAction::Navigate(target))?;
        self.set_phase(next);
        Ok(())
    }

    /// Leave the splash screen once its timeout has elapsed.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] outside the splash phase.
    pub fn finish_splash(&mut self) -> Result<(), TransitionError> {
        let next = transition(self.phase, PhaseAction::SplashElapsed)?;
        self.set_phase(next);
        Ok(())
    }

    fn deal(&mut self, action: PhaseAction) -> Result<(), ActionError> {
        let next = transition(self.phase, action)?;
        let round = round::start_round(
            &self.players,
            self.packs.packs(),
            &self.config,
            &mut self.rng,
        )?;
        for (player, assignment) in self.players.iter_mut().zip(&round.assignments) {
            player.role = assignment.role;
        }
        self.round = Some(round);
        self.emit(&EngineEvent::RoundStarted);
        self.set_phase(next);
        Ok(())
    }

    /// Deal a new round and enter play. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Transition`] when called outside the menu or
    /// pack selection, or [`ActionError::Validation`] when the round cannot be
    /// dealt.
    pub fn start_round(&mut self) -> Result<(), ActionError> {
        self.deal(PhaseAction::RoundStarted)
    }

    /// Deal again from the finished screen with the current roster and
    /// configuration. A failed deal keeps the finished phase and the previous
    /// round.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Transition`] outside the finished phase, or the
    /// same [`ActionError::Validation`] a fresh start would report.
    pub fn restart(&mut self) -> Result<(), ActionError> {
        self.deal(PhaseAction::Restarted)
    }

    /// Hand the device to the next player, or finish the round after the last.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] when no round is being played.
    pub fn advance_turn(&mut self) -> Result<TurnStep, TransitionError> {
        let invalid = TransitionError::Invalid {
            from: self.phase,
            action: PhaseAction::TurnsExhausted,
        };
        if self.phase != GamePhase::Playing {
            return Err(invalid);
        }
        let step = self.round.as_mut().ok_or(invalid)?.advance();
        match step {
            TurnStep::Advanced(index) => self.emit(&EngineEvent::TurnAdvanced(index)),
            TurnStep::Exhausted => {
                let next = transition(self.phase, PhaseAction::TurnsExhausted)?;
                self.set_phase(next);
            }
        }
        Ok(step)
    }

    /// Drop the current round and return to the menu.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] when no round is in progress or finished.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        let next = transition(self.phase, PhaseAction::ReturnToMenu)?;
        self.round = None;
        self.set_phase(next);
        Ok(())
    }

    /// Apply `action` through the matching operation.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying operation. Failed actions leave the
    /// engine unchanged.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, ActionError> {
        log::trace!("dispatch {action:?}");
        let outcome = match action {
            Action::AddPlayer(name) => self
                .add_player(&name)
                .map_or(Outcome::Unchanged, Outcome::PlayerAdded),
            Action::RemovePlayer(id) => self.remove_player(id).into(),
            Action::ClearPlayers => self.clear_players().into(),
            Action::AddPack {
                name,
                icon,
                color,
                words,
            } => Outcome::PackAdded(self.add_pack(name, icon, color, words)),
            Action::CreatePack => Outcome::PackAdded(self.create_pack()),
            Action::UpdatePack(pack) => self.update_pack(pack).into(),
            Action::DeletePack(id) => self.delete_pack(id).into(),
            Action::TogglePack(id) => self
                .toggle_pack(id)
                .map_or(Outcome::Unchanged, Outcome::Selection),
            Action::ResetPacks => {
                self.reset_packs();
                Outcome::Applied
            }
            Action::ImportPack(text) => Outcome::PackAdded(self.try_import_pack(&text)?),
            Action::SetMrWhite(on) => self.set_mr_white(on).into(),
            Action::SetHint(on) => self.set_hint(on).into(),
            Action::SetTimer(on) => self.set_timer(on).into(),
            Action::SetDebateMinutes(minutes) => self.set_debate_minutes(minutes).into(),
            Action::SetHaptics(on) => self.set_haptics(on).into(),
            Action::IncrementImpostors => self.increment_impostors().into(),
            Action::DecrementImpostors => self.decrement_impostors().into(),
            Action::Navigate(target) => {
                self.navigate(target)?;
                Outcome::Applied
            }
            Action::FinishSplash => {
                self.finish_splash()?;
                Outcome::Applied
            }
            Action::StartRound => {
                self.start_round()?;
                Outcome::Applied
            }
            Action::AdvanceTurn => match self.advance_turn()? {
                TurnStep::Advanced(index) => Outcome::TurnAdvanced(index),
                TurnStep::Exhausted => Outcome::RoundFinished,
            },
            Action::Reset => {
                self.reset()?;
                Outcome::Applied
            }
            Action::Restart => {
                self.restart()?;
                Outcome::Applied
            }
            Action::Flush => {
                self.flush()?;
                Outcome::Applied
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::player::Role;
    use crate::synth::{PLAYERS_PACK_NAME, RANDOM_CLEAN_PACK_NAME};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine() -> ImpostorEngine<MemoryStore> {
        ImpostorEngine::load_with_seed(MemoryStore::new(), 0xC0FFEE)
    }

    fn ready_engine(players: &[&str]) -> ImpostorEngine<MemoryStore> {
        let mut engine = engine();
        for name in players {
            engine.add_player(name);
        }
        let animals = engine
            .packs()
            .iter()
            .find(|p| p.name == "Animals")
            .map(|p| p.id)
            .unwrap();
        engine.toggle_pack(animals);
        engine.finish_splash().unwrap();
        engine
    }

    #[test]
    fn fresh_engine_seeds_catalog_and_starts_in_splash() {
        let engine = engine();
        assert_eq!(engine.phase(), GamePhase::Splash);
        assert_eq!(engine.repository().user_packs().count(), 12);
        assert_eq!(engine.packs()[0].name, RANDOM_CLEAN_PACK_NAME);
        assert!(engine.store().contains(persistence::PACKS_KEY));
        assert!(engine.round().is_none());
    }

    #[test]
    fn blank_player_names_are_ignored() {
        let mut engine = engine();
        assert!(engine.add_player("   ").is_none());
        assert!(engine.players().is_empty());
        assert_eq!(
            engine.dispatch(Action::AddPlayer(String::new())).unwrap(),
            Outcome::Unchanged
        );
    }

    #[test]
    fn players_pack_follows_roster() {
        let mut engine = engine();
        let ids: Vec<_> = ["A", "B", "C"]
            .iter()
            .filter_map(|n| engine.add_player(n))
            .collect();
        let players_pack = engine
            .packs()
            .iter()
            .find(|p| p.name == PLAYERS_PACK_NAME)
            .unwrap();
        assert_eq!(players_pack.words, vec!["A", "B", "C"]);
        engine.remove_player(ids[0]);
        assert!(engine.packs().iter().all(|p| p.name != PLAYERS_PACK_NAME));
        assert!(engine.clear_players());
        assert!(!engine.clear_players());
    }

    #[test]
    fn round_lifecycle_through_finish_and_reset() {
        let mut engine = ready_engine(&["A", "B", "C"]);
        engine.start_round().unwrap();
        assert_eq!(engine.phase(), GamePhase::Playing);
        let round = engine.round().unwrap();
        assert_eq!(round.category, "Animals");
        let dealt: Vec<Role> = round.assignments.iter().map(|a| a.role).collect();
        let held: Vec<Role> = engine.players().iter().map(|p| p.role).collect();
        assert_eq!(dealt, held);

        assert_eq!(engine.advance_turn().unwrap(), TurnStep::Advanced(1));
        assert_eq!(engine.advance_turn().unwrap(), TurnStep::Advanced(2));
        assert_eq!(engine.advance_turn().unwrap(), TurnStep::Exhausted);
        assert_eq!(engine.phase(), GamePhase::Finished);
        assert_eq!(engine.round().unwrap().current_index, 2);
        assert!(engine.advance_turn().is_err());

        engine.reset().unwrap();
        assert_eq!(engine.phase(), GamePhase::Menu);
        assert!(engine.round().is_none());
    }

    #[test]
    fn failed_start_changes_nothing() {
        let mut engine = ready_engine(&["A", "B"]);
        let before = engine.snapshot();
        let err = engine.start_round().unwrap_err();
        assert!(matches!(
            err,
            ActionError::Validation(ValidationError::InsufficientPlayers)
        ));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn start_round_requires_menu_or_pack_selection() {
        let mut engine = ready_engine(&["A", "B", "C"]);
        engine.navigate(GamePhase::Settings).unwrap();
        assert!(matches!(
            engine.start_round(),
            Err(ActionError::Transition(_))
        ));
        engine.navigate(GamePhase::Menu).unwrap();
        engine.navigate(GamePhase::PackSelection).unwrap();
        engine.start_round().unwrap();
    }

    #[test]
    fn restart_with_invalid_config_keeps_finished_round() {
        let mut engine = ready_engine(&["A", "B", "C"]);
        engine.start_round().unwrap();
        while engine.phase() == GamePhase::Playing {
            engine.advance_turn().unwrap();
        }
        let finished = engine.round().cloned();
        let selected: Vec<_> = engine.repository().selected().map(|p| p.id).collect();
        for id in selected {
            engine.toggle_pack(id);
        }

        let err = engine.restart().unwrap_err();
        assert!(matches!(
            err,
            ActionError::Validation(ValidationError::NoPackSelected)
        ));
        assert_eq!(engine.phase(), GamePhase::Finished);
        assert_eq!(engine.round().cloned(), finished);
    }

    #[test]
    fn restart_deals_a_fresh_round() {
        let mut engine = ready_engine(&["A", "B", "C", "D"]);
        engine.start_round().unwrap();
        for _ in 0..4 {
            engine.advance_turn().unwrap();
        }
        engine.restart().unwrap();
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.round().unwrap().current_index, 0);
    }

    #[test]
    fn impostor_stepper_respects_bounds() {
        let mut engine = ready_engine(&["A", "B", "C"]);
        assert!(!engine.decrement_impostors());
        assert!(engine.increment_impostors());
        assert_eq!(engine.config().impostors, 2);
        assert!(!engine.increment_impostors());
        assert!(engine.decrement_impostors());
        assert_eq!(engine.config().impostors, 1);
    }

    #[test]
    fn config_setters_clamp_and_persist() {
        let store = MemoryStore::new();
        let mut engine = ImpostorEngine::load_with_seed(store.clone(), 1);
        assert!(engine.set_debate_minutes(30));
        assert_eq!(engine.config().debate_minutes, 10);
        assert!(!engine.set_debate_minutes(12));
        assert!(engine.set_timer(true));
        assert_eq!(engine.debate_timer().map(|t| t.total()), Some(600));

        let reloaded = ImpostorEngine::load_with_seed(store, 2);
        assert_eq!(reloaded.config(), engine.config());
    }

    #[test]
    fn subscribers_observe_events_until_unsubscribed() {
        let mut engine = ready_engine(&["A", "B", "C"]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        engine.start_round().unwrap();
        engine.advance_turn().unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                EngineEvent::RoundStarted,
                EngineEvent::PhaseChanged(GamePhase::Playing),
                EngineEvent::TurnAdvanced(1)
            ]
        );

        assert!(engine.unsubscribe(id));
        assert!(!engine.unsubscribe(id));
        engine.set_hint(false);
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn dispatch_mirrors_direct_operations() {
        let mut engine = engine();
        assert_eq!(
            engine.dispatch(Action::FinishSplash).unwrap(),
            Outcome::Applied
        );
        for name in ["A", "B", "C"] {
            assert!(matches!(
                engine.dispatch(Action::AddPlayer(name.into())).unwrap(),
                Outcome::PlayerAdded(_)
            ));
        }
        let Outcome::PackAdded(id) = engine
            .dispatch(Action::AddPack {
                name: "Mine".into(),
                icon: "star.fill".into(),
                color: PackColor::BLUE,
                words: vec!["Moon".into()],
            })
            .unwrap()
        else {
            panic!("expected a new pack");
        };
        assert_eq!(
            engine.dispatch(Action::TogglePack(id)).unwrap(),
            Outcome::Selection(true)
        );
        engine.dispatch(Action::StartRound).unwrap();
        assert_eq!(engine.round().unwrap().secret_word, "Moon");
        assert_eq!(engine.round().unwrap().category, "Mine");
        assert_eq!(
            engine.dispatch(Action::AdvanceTurn).unwrap(),
            Outcome::TurnAdvanced(1)
        );
        engine.dispatch(Action::AdvanceTurn).unwrap();
        assert_eq!(
            engine.dispatch(Action::AdvanceTurn).unwrap(),
            Outcome::RoundFinished
        );
        assert!(matches!(
            engine.dispatch(Action::ImportPack("nope".into())),
            Err(ActionError::Import(_))
        ));
        assert!(matches!(
            engine.dispatch(Action::Navigate(GamePhase::Settings)),
            Err(ActionError::Transition(_))
        ));
    }

    #[test]
    fn dispatch_flush_reports_write_failures() {
        struct ReadOnly;

        impl KeyValueStore for ReadOnly {
            type Error = std::io::Error;

            fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> {
                Ok(None)
            }

            fn set(&self, _key: &str, _value: &str) -> Result<(), Self::Error> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                ))
            }

            fn remove(&self, _key: &str) -> Result<(), Self::Error> {
                Ok(())
            }
        }

        let mut engine = ImpostorEngine::load_with_seed(ReadOnly, 7);
        assert!(engine.flush().is_err());
        assert!(matches!(
            engine.dispatch(Action::Flush),
            Err(ActionError::Persistence(PersistenceError::Store(_)))
        ));
        assert_eq!(
            ImpostorEngine::load_with_seed(MemoryStore::new(), 7)
                .dispatch(Action::Flush)
                .unwrap(),
            Outcome::Applied
        );
    }

    #[test]
    fn export_import_through_engine() {
        let mut engine = engine();
        let source = engine.repository().user_packs().next().cloned().unwrap();
        let text = engine.export_pack(source.id);
        assert!(engine.import_pack(&text));
        assert!(!engine.import_pack("{}"));
        assert_eq!(engine.repository().user_packs().count(), 13);
        let generated = engine.packs()[0].id;
        assert!(engine.export_pack(generated).is_empty());
    }

    #[test]
    fn current_card_tracks_turn() {
        let mut engine = ready_engine(&["A", "B", "C"]);
        assert!(engine.current_card().is_none());
        engine.start_round().unwrap();
        let card = engine.current_card().unwrap();
        assert_eq!(card.player_name, "A");
        engine.advance_turn().unwrap();
        assert_eq!(engine.current_card().unwrap().player_name, "B");
    }
}
