//! Per-map comparison output.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{BeatmapId, BeatmapMeta, PlayerId};

/// Which session scored more on an aligned map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Winner {
    SessionA,
    SessionB,
    Tie,
}

impl Winner {
    /// Decide the winner from the two session totals.
    pub fn from_totals(total_a: u64, total_b: u64) -> Self {
        match total_a.cmp(&total_b) {
            Ordering::Greater => Winner::SessionA,
            Ordering::Less => Winner::SessionB,
            Ordering::Equal => Winner::Tie,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::SessionA => write!(f, "sessionA"),
            Winner::SessionB => write!(f, "sessionB"),
            Winner::Tie => write!(f, "tie"),
        }
    }
}

/// `total_a - total_b`, clamped to the `i64` range.
pub fn score_margin(total_a: u64, total_b: u64) -> i64 {
    let diff = total_a as i128 - total_b as i128;
    diff.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// Comparison of one aligned pair of games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    /// Beatmap played in session A at this position
    pub beatmap_id: BeatmapId,

    pub title: Option<String>,

    pub cover_image_url: Option<String>,

    /// Scores in session A, keyed over the union of both sessions' players
    pub scores_session_a: BTreeMap<PlayerId, u64>,

    /// Scores in session B, keyed over the union of both sessions' players
    pub scores_session_b: BTreeMap<PlayerId, u64>,

    pub total_session_a: u64,

    pub total_session_b: u64,

    /// `total_session_a - total_session_b`, clamped to the `i64` range
    pub margin: i64,

    pub winner: Winner,
}

impl ComparisonEntry {
    /// Return a copy carrying the given beatmap metadata.
    pub fn with_meta(&self, meta: &BeatmapMeta) -> Self {
        Self {
            title: Some(meta.title.clone()),
            cover_image_url: meta.cover_image_url.clone(),
            ..self.clone()
        }
    }
}
