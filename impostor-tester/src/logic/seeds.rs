use anyhow::{Result, bail};
use std::collections::HashSet;

/// Fallback seed when the CLI provides none.
pub const DEFAULT_SEED: u64 = 1337;

/// Resolve a list of CLI seed arguments into canonical seeds.
///
/// Supports decimal integers (negative values use their magnitude), `0x`
/// hexadecimal literals, and the keyword `random` for a fresh entropy seed.
/// Duplicates are dropped while keeping first-seen order.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seen = HashSet::new();
    let mut seeds = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        let seed = parse_seed_token(token)?;
        if seen.insert(seed) {
            seeds.push(seed);
        }
    }

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }
    Ok(seeds)
}

fn parse_seed_token(token: &str) -> Result<u64> {
    if token.eq_ignore_ascii_case("random") {
        let seed = rand::random::<u64>();
        log::info!("random seed resolved to {seed}");
        return Ok(seed);
    }

    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        && let Ok(value) = u64::from_str_radix(&hex.replace('_', ""), 16)
    {
        return Ok(value);
    }

    if let Ok(value) = token.parse::<i64>() {
        return Ok(value.unsigned_abs());
    }

    if let Ok(value) = token.parse::<u64>() {
        return Ok(value);
    }

    bail!("Unrecognized seed token: {token}");
}
