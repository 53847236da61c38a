//! Derived player statistics.

use serde::{Deserialize, Serialize};

/// Performance summary over a player's tournament history.
///
/// Recomputed on every request; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub total_tournaments: u32,

    pub first_places: u32,

    pub second_places: u32,

    pub third_places: u32,

    /// Percentage of tournaments won, one decimal
    pub first_rate: f64,

    /// Percentage of tournaments finished in the top 3, one decimal
    pub top3_rate: f64,

    /// Mean rank over ranked tournaments, one decimal.
    /// `None` when no tournament has a rank.
    pub avg_placement: Option<f64>,

    /// Distinct teammates, excluding the player
    pub unique_teammate_count: u32,

    /// Distinct teammate flags, excluding the player's own entry
    pub unique_country_count: u32,

    /// Placements skipped because they could not be parsed (tolerant mode only)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub unparsed_placements: u32,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl PlayerStats {
    /// Podium finishes of any kind.
    pub fn podiums(&self) -> u32 {
        self.first_places + self.second_places + self.third_places
    }
}
