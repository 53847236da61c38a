//! Match session comparison.
//!
//! Two sessions are compared turn by turn: game *i* of session A against
//! game *i* of session B, whatever beatmaps they were played on. Sessions of
//! unequal length are cut to the shorter one; the extra games of the longer
//! session are not reported.

pub mod align;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{
    score_margin, BeatmapId, BeatmapMeta, CacheKey, ComparisonEntry, GameRecord, MatchId, PlayerId,
    TrimSpec, Winner,
};

pub use align::{align_sessions, dedup_keep_last, trim_session};

/// Which comparison pipeline to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    /// Games keep duplicates; metadata comes from the games themselves.
    #[default]
    Standard,
    /// Duplicate beatmaps collapse to their last play; metadata is looked up
    /// separately (see [`augment_with_metadata`]).
    Legacy,
}

impl std::fmt::Display for CompareMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareMode::Standard => write!(f, "standard"),
            CompareMode::Legacy => write!(f, "legacy"),
        }
    }
}

/// A request to compare two matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub match_id_a: MatchId,
    pub match_id_b: MatchId,
    #[serde(default)]
    pub trim_a: TrimSpec,
    #[serde(default)]
    pub trim_b: TrimSpec,
    #[serde(default)]
    pub mode: CompareMode,
}

impl CompareRequest {
    pub fn new(match_id_a: MatchId, match_id_b: MatchId) -> Self {
        Self {
            match_id_a,
            match_id_b,
            trim_a: TrimSpec::default(),
            trim_b: TrimSpec::default(),
            mode: CompareMode::default(),
        }
    }

    /// Identity of the comparison this request produces.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::generate(&[
            &self.match_id_a.to_string(),
            &self.match_id_b.to_string(),
            &self.trim_a.skip_start.to_string(),
            &self.trim_a.skip_end.to_string(),
            &self.trim_b.skip_start.to_string(),
            &self.trim_b.skip_end.to_string(),
            &self.mode.to_string(),
        ])
    }
}

/// Source of beatmap display metadata for legacy comparisons.
pub trait BeatmapLookup {
    fn beatmap(&self, id: BeatmapId) -> Option<&BeatmapMeta>;
}

impl BeatmapLookup for HashMap<BeatmapId, BeatmapMeta> {
    fn beatmap(&self, id: BeatmapId) -> Option<&BeatmapMeta> {
        self.get(&id)
    }
}

impl BeatmapLookup for [BeatmapMeta] {
    fn beatmap(&self, id: BeatmapId) -> Option<&BeatmapMeta> {
        self.iter().find(|m| m.id == id)
    }
}

/// Compare one aligned pair of games.
///
/// Both score maps in the result cover every player seen on either side;
/// a player missing from one game scores 0 there.
///
/// Returns `None` when `game_a` has no beatmap; trimmed sessions never
/// contain such games.
pub fn compare_games(game_a: &GameRecord, game_b: &GameRecord) -> Option<ComparisonEntry> {
    let beatmap_id = game_a.beatmap_id?;
    if game_b.beatmap_id != Some(beatmap_id) {
        debug!(
            "Aligned games differ in beatmap: {} vs {:?}",
            beatmap_id, game_b.beatmap_id
        );
    }

    let players: BTreeSet<PlayerId> = game_a
        .scores
        .keys()
        .chain(game_b.scores.keys())
        .copied()
        .collect();
    let fill = |game: &GameRecord| -> BTreeMap<PlayerId, u64> {
        players
            .iter()
            .map(|p| (*p, game.scores.get(p).copied().unwrap_or(0)))
            .collect()
    };

    let total_a = game_a.total_score();
    let total_b = game_b.total_score();

    Some(ComparisonEntry {
        beatmap_id,
        title: game_a.title.clone(),
        cover_image_url: game_a.cover_image_url.clone(),
        scores_session_a: fill(game_a),
        scores_session_b: fill(game_b),
        total_session_a: total_a,
        total_session_b: total_b,
        margin: score_margin(total_a, total_b),
        winner: Winner::from_totals(total_a, total_b),
    })
}

/// Compare two trimmed sessions position by position.
pub fn compare_aligned(session_a: &[GameRecord], session_b: &[GameRecord]) -> Vec<ComparisonEntry> {
    if session_a.len() != session_b.len() {
        debug!(
            "Session lengths differ ({} vs {}); comparing the first {}",
            session_a.len(),
            session_b.len(),
            session_a.len().min(session_b.len())
        );
    }

    session_a
        .iter()
        .zip(session_b)
        .filter_map(|(a, b)| compare_games(a, b))
        .collect()
}

/// Trim, align and compare two raw sessions.
///
/// In legacy mode replays are collapsed before trimming, so the skip counts
/// index the deduplicated session.
pub fn compare_sessions(
    session_a: &[GameRecord],
    session_b: &[GameRecord],
    request: &CompareRequest,
) -> Result<Vec<ComparisonEntry>> {
    let (a, b) = match request.mode {
        CompareMode::Standard => {
            align_sessions(session_a, request.trim_a, session_b, request.trim_b)?
        }
        CompareMode::Legacy => {
            let a = dedup_keep_last(session_a.to_vec());
            let b = dedup_keep_last(session_b.to_vec());
            align_sessions(&a, request.trim_a, &b, request.trim_b)?
        }
    };

    let entries = compare_aligned(&a, &b);
    debug!(
        "Compared match {} with match {} ({} mode): {} maps",
        request.match_id_a,
        request.match_id_b,
        request.mode,
        entries.len()
    );
    Ok(entries)
}

/// Attach looked-up title and cover to each entry.
///
/// Entries whose beatmap is unknown to `lookup` are returned unchanged.
pub fn augment_with_metadata<L>(entries: &[ComparisonEntry], lookup: &L) -> Vec<ComparisonEntry>
where
    L: BeatmapLookup + ?Sized,
{
    entries
        .iter()
        .map(|entry| match lookup.beatmap(entry.beatmap_id) {
            Some(meta) => entry.with_meta(meta),
            None => {
                warn!("No metadata for beatmap {}", entry.beatmap_id);
                entry.clone()
            }
        })
        .collect()
}
