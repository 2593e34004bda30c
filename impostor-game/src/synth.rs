//! Generated packs recomputed from the live player and pack lists
use crate::pack::{PackColor, WordPack};
use crate::player::Player;
use rand::RngCore;
use rand::seq::SliceRandom;

pub const PLAYERS_PACK_NAME: &str = "Players";
pub const RANDOM_ADULT_PACK_NAME: &str = "Random adult";
pub const RANDOM_CLEAN_PACK_NAME: &str = "Random clean";
/// Sole word of a random pack with no source words.
pub const EMPTY_PLACEHOLDER: &str = "Empty";
/// Minimum roster size for the players pack to exist.
pub const PLAYERS_PACK_MIN_PLAYERS: usize = 3;

/// Rebuild the generated packs from `players` and the non-generated entries
/// of `packs`. The returned list leads with Random clean, Random adult and
/// (with enough players) Players, followed by the non-generated packs in their
/// existing order. A generated pack keeps the id and selection flag of its
/// previous incarnation.
pub fn synthesize<R: RngCore + ?Sized>(
    players: &[Player],
    packs: &[WordPack],
    rng: &mut R,
) -> Vec<WordPack> {
    let previous = |name: &str| packs.iter().find(|p| p.is_generated && p.name == name);
    let sources: Vec<&WordPack> = packs.iter().filter(|p| !p.is_generated).collect();

    let mut generated = Vec::with_capacity(3);
    generated.push(random_pack(
        RANDOM_CLEAN_PACK_NAME,
        "shuffle",
        PackColor::NEON_GREEN,
        false,
        &sources,
        rng,
        previous(RANDOM_CLEAN_PACK_NAME),
    ));
    generated.push(random_pack(
        RANDOM_ADULT_PACK_NAME,
        "exclamationmark.triangle.fill",
        PackColor::NEON_RED,
        true,
        &sources,
        rng,
        previous(RANDOM_ADULT_PACK_NAME),
    ));
    if players.len() >= PLAYERS_PACK_MIN_PLAYERS {
        let names = players.iter().map(|p| p.name.clone()).collect();
        let pack = WordPack::new(PLAYERS_PACK_NAME, "person.2.fill", PackColor::PINK, names);
        generated.push(inherit(pack, previous(PLAYERS_PACK_NAME)));
    }

    log::debug!(
        "synthesized {} generated packs from {} players and {} source packs",
        generated.len(),
        players.len(),
        sources.len()
    );

    generated.extend(sources.into_iter().cloned());
    generated
}

fn random_pack<R: RngCore + ?Sized>(
    name: &str,
    icon: &str,
    color: PackColor,
    adult: bool,
    sources: &[&WordPack],
    rng: &mut R,
    previous: Option<&WordPack>,
) -> WordPack {
    let mut pool: Vec<String> = sources
        .iter()
        .filter(|p| p.is_adult == adult)
        .flat_map(|p| p.words.iter().cloned())
        .collect();
    if pool.is_empty() {
        pool.push(EMPTY_PLACEHOLDER.to_string());
    } else {
        pool.shuffle(rng);
    }
    let mut pack = WordPack::new(name, icon, color, pool);
    pack.is_adult = adult;
    inherit(pack, previous)
}

fn inherit(mut pack: WordPack, previous: Option<&WordPack>) -> WordPack {
    pack.is_generated = true;
    if let Some(prev) = previous {
        pack.id = prev.id;
        pack.is_selected = prev.is_selected;
    }
    pack
}
