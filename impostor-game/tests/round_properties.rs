use impostor_game::{
    GameConfig, PackColor, Player, RngBundle, Role, ValidationError, WordPack, pack::words,
    round::validate, start_round, synthesize,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;

fn roster(names: &[&str]) -> Vec<Player> {
    names.iter().filter_map(|n| Player::new(n)).collect()
}

fn numbered(count: usize) -> Vec<Player> {
    (1..=count)
        .filter_map(|i| Player::new(&format!("Player {i}")))
        .collect()
}

fn dog_cat() -> WordPack {
    WordPack::new("Pets", "pawprint.fill", PackColor::GREEN, words(&["Dog", "Cat"])).selected()
}

#[test]
fn three_players_dog_cat_scenario() {
    let players = roster(&["A", "B", "C"]);
    let packs = vec![dog_cat()];
    for seed in 0..64 {
        let round = start_round(
            &players,
            &packs,
            &GameConfig::default(),
            &mut RngBundle::from_user_seed(seed),
        )
        .unwrap();
        assert!(["Dog", "Cat"].contains(&round.secret_word.as_str()));
        assert_eq!(round.category, "Pets");
        assert_eq!(round.role_counts(), (2, 1, 0));
        assert_eq!(round.current_index, 0);
    }
}

#[test]
fn fewer_than_three_players_is_rejected() {
    let packs = vec![dog_cat()];
    for count in 0..3 {
        let mut rng = RngBundle::from_user_seed(count as u64);
        assert_eq!(
            start_round(&numbered(count), &packs, &GameConfig::default(), &mut rng),
            Err(ValidationError::InsufficientPlayers)
        );
        assert_eq!(rng.total_draws(), 0);
    }
}

#[test]
fn five_players_four_impostors_and_mr_white_is_too_many() {
    let cfg = GameConfig {
        impostors: 4,
        mr_white_enabled: true,
        ..GameConfig::default()
    };
    assert_eq!(
        start_round(
            &numbered(5),
            &[dog_cat()],
            &cfg,
            &mut RngBundle::from_user_seed(5)
        ),
        Err(ValidationError::TooManySpecialRoles)
    );
}

#[test]
fn special_role_capacity_boundary() {
    let packs = vec![dog_cat()];
    for players in 3..=10 {
        for impostors in 1..=players {
            for mr_white in [false, true] {
                let cfg = GameConfig {
                    impostors,
                    mr_white_enabled: mr_white,
                    ..GameConfig::default()
                };
                let special = impostors + usize::from(mr_white);
                let result = validate(&numbered(players), &packs, &cfg);
                if special >= players {
                    assert_eq!(result, Err(ValidationError::TooManySpecialRoles));
                } else {
                    assert_eq!(result, Ok(()));
                }
            }
        }
    }
}

#[test]
fn dealt_roles_match_configured_multiset() {
    let packs = vec![dog_cat()];
    let mut seed = 0;
    for players in 3..=10 {
        let roster = numbered(players);
        for impostors in 1..players {
            for mr_white in [false, true] {
                let cfg = GameConfig {
                    impostors,
                    mr_white_enabled: mr_white,
                    ..GameConfig::default()
                };
                if !cfg.fits(players) {
                    continue;
                }
                seed += 1;
                let round =
                    start_round(&roster, &packs, &cfg, &mut RngBundle::from_user_seed(seed))
                        .unwrap();
                let (citizens, dealt_impostors, whites) = round.role_counts();
                assert_eq!(dealt_impostors, impostors);
                assert_eq!(whites, usize::from(mr_white));
                assert_eq!(citizens, players - impostors - usize::from(mr_white));
                assert_eq!(round.assignments.len(), players);
                assert!(roster.iter().any(|p| p.name == round.starting_player));
            }
        }
    }
}

#[test]
fn roles_and_starting_player_vary_across_seeds() {
    let roster = numbered(6);
    let packs = vec![dog_cat()];
    let cfg = GameConfig::default();
    let mut impostor_seats = HashSet::new();
    let mut starters = HashSet::new();
    for seed in 0..200 {
        let round = start_round(&roster, &packs, &cfg, &mut RngBundle::from_user_seed(seed))
            .unwrap();
        let seat = round
            .assignments
            .iter()
            .position(|a| a.role == Role::Impostor)
            .unwrap();
        impostor_seats.insert(seat);
        starters.insert(round.starting_player);
    }
    assert_eq!(impostor_seats.len(), 6);
    assert_eq!(starters.len(), 6);
}

#[test]
fn words_drawn_only_from_selected_packs() {
    let mut packs = vec![
        dog_cat(),
        WordPack::new("Food", "fork.knife", PackColor::RED, words(&["Sushi"])),
    ];
    packs[1].is_selected = false;
    for seed in 0..50 {
        let round = start_round(
            &numbered(4),
            &packs,
            &GameConfig::default(),
            &mut RngBundle::from_user_seed(seed),
        )
        .unwrap();
        assert_ne!(round.secret_word, "Sushi");
    }
}

#[test]
fn generated_pool_words_credit_their_source_pack() {
    let players = numbered(3);
    let sources = vec![
        WordPack::new("Animals", "pawprint.fill", PackColor::GREEN, words(&["Dog"])),
        WordPack::new("Food", "fork.knife", PackColor::RED, words(&["Sushi"])),
    ];
    let mut packs = synthesize(&players, &sources, &mut ChaCha20Rng::seed_from_u64(9));
    packs[0].is_selected = true;

    for seed in 0..20 {
        let round = start_round(
            &players,
            &packs,
            &GameConfig::default(),
            &mut RngBundle::from_user_seed(seed),
        )
        .unwrap();
        let expected = if round.secret_word == "Dog" { "Animals" } else { "Food" };
        assert_eq!(round.category, expected);
    }
}

#[test]
fn players_pack_words_fall_back_to_its_own_name() {
    let players = numbered(3);
    let mut packs = synthesize(&players, &[], &mut ChaCha20Rng::seed_from_u64(1));
    let players_pack = packs
        .iter_mut()
        .find(|p| p.name == impostor_game::synth::PLAYERS_PACK_NAME)
        .unwrap();
    players_pack.is_selected = true;

    let round = start_round(
        &players,
        &packs,
        &GameConfig::default(),
        &mut RngBundle::from_user_seed(3),
    )
    .unwrap();
    assert!(round.secret_word.starts_with("Player "));
    assert_eq!(round.category, impostor_game::synth::PLAYERS_PACK_NAME);
}

#[test]
fn resynthesis_is_idempotent_for_selection_flags() {
    let players = numbered(4);
    let sources = impostor_game::default_packs();
    let mut rng = ChaCha20Rng::seed_from_u64(77);
    let mut packs = synthesize(&players, &sources, &mut rng);
    packs[0].is_selected = true;
    packs[2].is_selected = true;
    packs[5].is_selected = true;

    let flags = |packs: &[WordPack]| -> Vec<(String, bool)> {
        packs
            .iter()
            .map(|p| (p.name.clone(), p.is_selected))
            .collect()
    };
    let once = synthesize(&players, &packs, &mut rng);
    let twice = synthesize(&players, &once, &mut rng);
    assert_eq!(flags(&once), flags(&packs));
    assert_eq!(flags(&twice), flags(&once));
}
