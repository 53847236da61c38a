//! Match session models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{BeatmapId, PlayerId};

/// Display metadata for a beatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatmapMeta {
    pub id: BeatmapId,
    pub title: String,
    pub cover_image_url: Option<String>,
}

/// One game (map played) within a multiplayer match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Absent for aborted rounds and warm-ups.
    #[serde(default)]
    pub beatmap_id: Option<BeatmapId>,

    /// Final score per player.
    #[serde(default)]
    pub scores: BTreeMap<PlayerId, u64>,

    /// Beatmap title, when the feed embeds it.
    #[serde(default)]
    pub title: Option<String>,

    /// Beatmapset cover, when the feed embeds it.
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

impl GameRecord {
    /// Create a game on the given beatmap with no scores yet.
    pub fn new(beatmap_id: Option<BeatmapId>) -> Self {
        Self {
            beatmap_id,
            scores: BTreeMap::new(),
            title: None,
            cover_image_url: None,
        }
    }

    /// Builder method to record a player's score.
    pub fn with_score(mut self, player: PlayerId, score: u64) -> Self {
        self.scores.insert(player, score);
        self
    }

    /// Builder method to attach embedded beatmap metadata.
    pub fn with_meta(mut self, title: impl Into<String>, cover_image_url: Option<String>) -> Self {
        self.title = Some(title.into());
        self.cover_image_url = cover_image_url;
        self
    }

    /// Whether the game was played on an identifiable beatmap.
    pub fn is_comparable(&self) -> bool {
        self.beatmap_id.is_some()
    }

    /// Sum of all player scores in this game, saturating at `u64::MAX`.
    pub fn total_score(&self) -> u64 {
        self.scores
            .values()
            .fold(0u64, |total, score| total.saturating_add(*score))
    }
}

/// How many games to drop from each end of a session before comparing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimSpec {
    #[serde(default)]
    pub skip_start: usize,
    #[serde(default)]
    pub skip_end: usize,
}

impl TrimSpec {
    pub fn new(skip_start: usize, skip_end: usize) -> Self {
        Self {
            skip_start,
            skip_end,
        }
    }
}
