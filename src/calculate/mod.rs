//! Player statistics calculation.
//!
//! Reduces a player's tournament history to a [`PlayerStats`] summary:
//! - Podium counts and rates
//! - Average placement over ranked results
//! - Teammate and flag diversity

pub mod placement;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::models::{PlayerId, PlayerStats, TournamentRecord};

pub use placement::{ordinal_suffix, parse_placement, DID_NOT_QUALIFY};

/// Options controlling how strictly history is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsOptions {
    /// Skip placements that fail to parse instead of failing the whole summary.
    #[serde(default)]
    pub tolerate_parse_failures: bool,
}

/// Round to one decimal place, ties to even.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Percentage of `count` over `total`, one decimal.
pub fn rate(count: u32, total: u32, quantity: &'static str) -> Result<f64> {
    if total == 0 {
        return Err(EngineError::DivisionUndefined { quantity });
    }
    Ok(round_to_tenth(count as f64 / total as f64 * 100.0))
}

/// Mean of the given ranks, one decimal. `None` for an empty sample.
pub fn average_rank(ranks: &[u32]) -> Option<f64> {
    if ranks.is_empty() {
        return None;
    }
    let sum: u64 = ranks.iter().map(|&r| r as u64).sum();
    Some(round_to_tenth(sum as f64 / ranks.len() as f64))
}

/// Aggregate a player's tournament history.
///
/// Only records whose roster includes `player` count toward the summary.
/// Fails with [`EngineError::DivisionUndefined`] when none do, and with
/// [`EngineError::Format`] on an unparseable placement unless
/// `options.tolerate_parse_failures` is set.
pub fn aggregate_player_stats(
    player: PlayerId,
    records: &[TournamentRecord],
    options: StatsOptions,
) -> Result<PlayerStats> {
    let mut total = 0u32;
    let mut podium = [0u32; 3];
    let mut ranks = Vec::new();
    let mut unparsed = 0u32;
    let mut teammates = BTreeSet::new();
    let mut countries = BTreeSet::new();

    for record in records {
        if !record.includes(player) {
            debug!(
                "Skipping tournament {}: player {} not on roster",
                record.id, player
            );
            continue;
        }
        total += 1;

        for mate in record.teammates.iter().filter(|t| t.id != player) {
            teammates.insert(mate.id);
            countries.insert(mate.country_code.as_str());
        }

        let parsed = match parse_placement(&record.placement) {
            Ok(parsed) => parsed,
            Err(e) if options.tolerate_parse_failures => {
                warn!("Ignoring placement of tournament {}: {}", record.id, e);
                unparsed += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        if let Some(position) = parsed.podium() {
            podium[position as usize - 1] += 1;
        }
        if let Some(rank) = parsed.rank {
            ranks.push(rank);
        }
    }

    let [first_places, second_places, third_places] = podium;
    let first_rate = rate(first_places, total, "firstRate")?;
    let top3_rate = rate(first_places + second_places + third_places, total, "top3Rate")?;

    debug!(
        "Aggregated {} tournaments for player {} ({} ranked)",
        total,
        player,
        ranks.len()
    );

    Ok(PlayerStats {
        total_tournaments: total,
        first_places,
        second_places,
        third_places,
        first_rate,
        top3_rate,
        avg_placement: average_rank(&ranks),
        unique_teammate_count: teammates.len() as u32,
        unique_country_count: countries.len() as u32,
        unparsed_placements: unparsed,
    })
}
