use anyhow::{Context, Result, anyhow, bail, ensure};
use impostor_game::synth::{PLAYERS_PACK_NAME, RANDOM_ADULT_PACK_NAME, RANDOM_CLEAN_PACK_NAME};
use impostor_game::{
    GameConfig, GamePhase, ImpostorEngine, KeyValueStore, MemoryStore, PackColor, Player,
    RngBundle, TurnStep, ValidationError, WordPack, default_packs, pack::words, start_round,
};

use super::TestScenario;

const ROSTER: [&str; 10] = [
    "Ana", "Bea", "Cai", "Dan", "Eli", "Fay", "Gus", "Hal", "Ivy", "Jon",
];

pub fn catalog_scenarios() -> Vec<TestScenario> {
    vec![
        TestScenario::new(
            "Smoke",
            "Default catalog, four players, one full round",
            smoke_expectation,
        ),
        TestScenario::new(
            "Role Distribution",
            "Dealt roles match the configured multiset for 3-10 players",
            role_distribution_expectation,
        ),
        TestScenario::new(
            "Validation Order",
            "Round start errors surface in fixed precedence",
            validation_order_expectation,
        ),
        TestScenario::new(
            "Synthesis",
            "Generated packs track players and packs and keep selection",
            synthesis_expectation,
        ),
        TestScenario::new(
            "Import Export",
            "Every catalog pack survives export and re-import",
            import_export_expectation,
        ),
        TestScenario::new(
            "Persistence",
            "A reloaded engine reproduces players, packs and config",
            persistence_expectation,
        ),
    ]
}

fn roster(count: usize) -> Vec<Player> {
    ROSTER
        .iter()
        .take(count)
        .filter_map(|name| Player::new(name))
        .collect()
}

fn engine_with_players(seed: u64, count: usize) -> Result<ImpostorEngine<MemoryStore>> {
    let mut engine = ImpostorEngine::load_with_seed(MemoryStore::new(), seed);
    engine.finish_splash()?;
    for name in ROSTER.iter().take(count) {
        engine
            .add_player(name)
            .with_context(|| format!("player {name} was rejected"))?;
    }
    Ok(engine)
}

fn select_by_name<S: KeyValueStore>(engine: &mut ImpostorEngine<S>, name: &str) -> Result<()> {
    let id = engine
        .packs()
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.id)
        .ok_or_else(|| anyhow!("pack {name} missing"))?;
    match engine.toggle_pack(id) {
        Some(true) => Ok(()),
        other => bail!("selecting {name} returned {other:?}"),
    }
}

fn smoke_expectation(seed: u64) -> Result<()> {
    let mut engine = engine_with_players(seed, 4)?;
    let first = engine
        .repository()
        .user_packs()
        .next()
        .map(|p| p.name.clone())
        .context("catalog is empty")?;
    select_by_name(&mut engine, &first)?;
    engine.start_round()?;
    ensure!(engine.phase() == GamePhase::Playing, "round did not start");

    let round = engine.round().cloned().context("round missing")?;
    ensure!(
        round.category == first,
        "category {} != {first}",
        round.category
    );
    let mut turns = 1;
    while engine.advance_turn()? != TurnStep::Exhausted {
        turns += 1;
    }
    ensure!(turns == 4, "walked {turns} turns for 4 players");
    ensure!(engine.phase() == GamePhase::Finished, "round did not finish");
    engine.reset()?;
    ensure!(engine.round().is_none(), "reset kept the round");
    Ok(())
}

fn role_distribution_expectation(seed: u64) -> Result<()> {
    let pack = WordPack::new("Pets", "pawprint.fill", PackColor::GREEN, words(&["Dog", "Cat"]))
        .selected();
    let packs = [pack];
    let mut rng = RngBundle::from_user_seed(seed);
    for count in 3..=ROSTER.len() {
        let players = roster(count);
        for impostors in 1..count {
            for mr_white in [false, true] {
                let cfg = GameConfig {
                    impostors,
                    mr_white_enabled: mr_white,
                    ..GameConfig::default()
                };
                let result = start_round(&players, &packs, &cfg, &mut rng);
                if !cfg.fits(count) {
                    ensure!(
                        result == Err(ValidationError::TooManySpecialRoles),
                        "{count} players with {impostors} impostors and mr_white={mr_white} should be rejected"
                    );
                    continue;
                }
                let round = result?;
                let expected = (
                    count - impostors - usize::from(mr_white),
                    impostors,
                    usize::from(mr_white),
                );
                ensure!(
                    round.role_counts() == expected,
                    "{count} players dealt {:?}, expected {expected:?}",
                    round.role_counts()
                );
            }
        }
    }
    Ok(())
}

fn validation_order_expectation(seed: u64) -> Result<()> {
    let mut rng = RngBundle::from_user_seed(seed);
    let greedy = GameConfig {
        impostors: 8,
        mr_white_enabled: true,
        ..GameConfig::default()
    };
    let empty = WordPack::new("Blank", "pencil", PackColor::GRAY, Vec::new()).selected();
    let full = WordPack::new("Pets", "pawprint.fill", PackColor::GREEN, words(&["Dog"])).selected();
    let mut unselected = full.clone();
    unselected.is_selected = false;

    let cases = [
        (roster(2), vec![empty.clone()], ValidationError::InsufficientPlayers),
        (roster(3), vec![unselected], ValidationError::NoPackSelected),
        (roster(3), vec![empty], ValidationError::EmptyWordPool),
        (roster(3), vec![full], ValidationError::TooManySpecialRoles),
    ];
    for (players, packs, expected) in cases {
        let got = start_round(&players, &packs, &greedy, &mut rng);
        ensure!(got == Err(expected), "expected {expected:?}, got {got:?}");
    }
    ensure!(rng.total_draws() == 0, "failed validation consumed randomness");
    Ok(())
}

fn synthesis_expectation(seed: u64) -> Result<()> {
    let mut engine = engine_with_players(seed, 2)?;
    ensure!(
        engine.packs().iter().all(|p| p.name != PLAYERS_PACK_NAME),
        "players pack present with two players"
    );
    engine.add_player("Cai");
    select_by_name(&mut engine, PLAYERS_PACK_NAME)?;
    select_by_name(&mut engine, RANDOM_ADULT_PACK_NAME)?;

    engine.add_pack("Planets", "star.fill", PackColor::INDIGO, words(&["Mars", "Venus"]));
    let packs = engine.packs();
    let names: Vec<&str> = packs.iter().take(3).map(|p| p.name.as_str()).collect();
    ensure!(
        names == [RANDOM_CLEAN_PACK_NAME, RANDOM_ADULT_PACK_NAME, PLAYERS_PACK_NAME],
        "generated packs out of order: {names:?}"
    );
    ensure!(packs[1].is_selected && packs[2].is_selected, "selection lost");
    ensure!(
        packs[0].words.iter().any(|w| w == "Mars"),
        "new pack missing from clean pool"
    );

    let clean_total: usize = engine
        .repository()
        .user_packs()
        .filter(|p| !p.is_adult)
        .map(|p| p.words.len())
        .sum();
    ensure!(
        engine.packs()[0].words.len() == clean_total,
        "clean pool lost words"
    );

    engine.add_player("Dan");
    let players_pack = engine
        .packs()
        .iter()
        .find(|p| p.name == PLAYERS_PACK_NAME)
        .context("players pack vanished")?;
    ensure!(players_pack.is_selected, "players pack lost selection");
    ensure!(
        players_pack.words == ["Ana", "Bea", "Cai", "Dan"],
        "players pack words {:?}",
        players_pack.words
    );
    Ok(())
}

fn import_export_expectation(seed: u64) -> Result<()> {
    let mut engine = ImpostorEngine::load_with_seed(MemoryStore::new(), seed);
    for source in default_packs() {
        let id = engine.add_pack(
            source.name.clone(),
            source.icon.clone(),
            source.color,
            source.words.clone(),
        );
        let text = engine.export_pack(id);
        ensure!(!text.is_empty(), "export of {} was empty", source.name);
        let copy_id = engine.try_import_pack(&text)?;
        let copy = engine
            .repository()
            .get(copy_id)
            .context("imported pack missing")?;
        ensure!(copy_id != id, "import reused the id");
        ensure!(
            copy.name == source.name
                && copy.icon == source.icon
                && copy.color == source.color
                && copy.words == source.words,
            "{} changed through export",
            source.name
        );
        ensure!(!copy.is_selected && !copy.is_generated, "flags not reset");
    }
    ensure!(!engine.import_pack("{\"name\":"), "truncated text imported");
    Ok(())
}

fn persistence_expectation(seed: u64) -> Result<()> {
    let store = MemoryStore::new();
    let mut engine = ImpostorEngine::load_with_seed(store.clone(), seed);
    engine.finish_splash()?;
    for name in ROSTER.iter().take(5) {
        engine.add_player(name);
    }
    select_by_name(&mut engine, "Music")?;
    engine.set_mr_white(true);
    engine.set_timer(true);
    engine.set_debate_minutes(7);
    engine.increment_impostors();
    engine.create_pack();
    engine.flush()?;

    let reloaded = ImpostorEngine::load_with_seed(store, seed.wrapping_add(1));
    ensure!(reloaded.players() == engine.players(), "players differ");
    ensure!(reloaded.config() == engine.config(), "config differs");
    let user = |e: &ImpostorEngine<MemoryStore>| -> Vec<WordPack> {
        e.repository().user_packs().cloned().collect()
    };
    ensure!(user(&reloaded) == user(&engine), "user packs differ");
    ensure!(
        reloaded.packs().len() == engine.packs().len(),
        "generated packs not rebuilt"
    );
    Ok(())
}
