//! Session trimming and alignment.
//!
//! A session log starts and ends with noise (warm-ups, tiebreaker tests,
//! aborted picks). Callers say how many games to drop from each end; games
//! without a beatmap are dropped afterwards.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{EngineError, Result};
use crate::models::{BeatmapId, GameRecord, TrimSpec};

/// Drop `trim.skip_start` games from the front and `trim.skip_end` from the
/// back, then remove games without a beatmap.
///
/// Each count may equal the session length (yielding nothing) but not
/// exceed it. When the two counts overlap the result is empty.
pub fn trim_session(games: &[GameRecord], trim: TrimSpec) -> Result<Vec<GameRecord>> {
    let len = games.len();
    if trim.skip_start > len || trim.skip_end > len {
        return Err(EngineError::Range {
            len,
            skip_start: trim.skip_start,
            skip_end: trim.skip_end,
        });
    }

    let end = len - trim.skip_end;
    let kept = games
        .get(trim.skip_start..end)
        .unwrap_or_default()
        .iter()
        .filter(|g| g.is_comparable())
        .cloned()
        .collect::<Vec<_>>();

    debug!(
        "Trimmed session of {} games to {} ({:?})",
        len,
        kept.len(),
        trim
    );
    Ok(kept)
}

/// Collapse games sharing a beatmap id.
///
/// Works as a map keyed by beatmap id where a later insert overwrites the
/// earlier value: each id keeps the slot of its first appearance and the
/// contents of its last. Games without a beatmap keep a slot of their own so
/// that trim counts applied afterwards still see them. Used by the legacy
/// comparison, where a replayed map supersedes an earlier aborted attempt.
pub fn dedup_keep_last(games: Vec<GameRecord>) -> Vec<GameRecord> {
    let mut slots: HashMap<BeatmapId, usize> = HashMap::new();
    let mut out: Vec<GameRecord> = Vec::with_capacity(games.len());

    for game in games {
        let Some(id) = game.beatmap_id else {
            out.push(game);
            continue;
        };
        match slots.get(&id) {
            Some(&slot) => out[slot] = game,
            None => {
                slots.insert(id, out.len());
                out.push(game);
            }
        }
    }

    out
}

/// Trim both sessions. Either failing to trim fails the alignment.
pub fn align_sessions(
    session_a: &[GameRecord],
    trim_a: TrimSpec,
    session_b: &[GameRecord],
    trim_b: TrimSpec,
) -> Result<(Vec<GameRecord>, Vec<GameRecord>)> {
    Ok((trim_session(session_a, trim_a)?, trim_session(session_b, trim_b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: Option<u64>) -> GameRecord {
        GameRecord::new(id).with_score(1, 1000)
    }

    fn ids(games: &[GameRecord]) -> Vec<Option<u64>> {
        games.iter().map(|g| g.beatmap_id).collect()
    }

    #[test]
    fn test_no_trim_filters_absent_beatmaps() {
        let games = vec![game(Some(1)), game(None), game(Some(2)), game(None)];

        let kept = trim_session(&games, TrimSpec::default()).unwrap();

        assert_eq!(ids(&kept), vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_trim_applies_before_filter() {
        // The warm-up without a beatmap still counts toward skip_start.
        let games = vec![game(None), game(Some(1)), game(Some(2)), game(Some(3))];

        let kept = trim_session(&games, TrimSpec::new(1, 1)).unwrap();

        assert_eq!(ids(&kept), vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_trim_equal_to_length_is_empty() {
        let games = vec![game(Some(1)), game(Some(2))];

        assert!(trim_session(&games, TrimSpec::new(2, 0)).unwrap().is_empty());
        assert!(trim_session(&games, TrimSpec::new(0, 2)).unwrap().is_empty());
        assert!(trim_session(&[], TrimSpec::new(0, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_overlapping_trims_are_empty() {
        let games = vec![game(Some(1)), game(Some(2)), game(Some(3))];

        assert!(trim_session(&games, TrimSpec::new(2, 2)).unwrap().is_empty());
    }

    #[test]
    fn test_trim_beyond_length_is_range_error() {
        let games = vec![game(Some(1)), game(Some(2))];

        let err = trim_session(&games, TrimSpec::new(3, 0)).unwrap_err();
        assert_eq!(
            err,
            EngineError::Range {
                len: 2,
                skip_start: 3,
                skip_end: 0
            }
        );
        assert!(trim_session(&games, TrimSpec::new(0, 3)).is_err());
    }

    #[test]
    fn test_duplicates_preserved_without_dedup() {
        let games = vec![game(Some(5)), game(Some(5))];

        assert_eq!(trim_session(&games, TrimSpec::default()).unwrap().len(), 2);
    }

    #[test]
    fn test_dedup_keeps_last_in_first_slot() {
        let games = vec![
            GameRecord::new(Some(10)).with_score(1, 1),
            GameRecord::new(Some(20)).with_score(1, 2),
            GameRecord::new(Some(10)).with_score(1, 3),
            GameRecord::new(Some(30)).with_score(1, 4),
        ];

        let deduped = dedup_keep_last(games);

        assert_eq!(ids(&deduped), vec![Some(10), Some(20), Some(30)]);
        assert_eq!(deduped[0].scores[&1], 3);
    }

    #[test]
    fn test_dedup_keeps_games_without_beatmap() {
        let games = vec![game(None), game(Some(10)), game(None), game(Some(10))];

        let deduped = dedup_keep_last(games);

        assert_eq!(ids(&deduped), vec![None, Some(10), None]);
    }

    #[test]
    fn test_align_sessions_reports_either_range_error() {
        let a = vec![game(Some(1))];
        let b = vec![game(Some(2))];

        assert!(align_sessions(&a, TrimSpec::default(), &b, TrimSpec::new(0, 2)).is_err());

        let (ta, tb) = align_sessions(&a, TrimSpec::default(), &b, TrimSpec::default()).unwrap();
        assert_eq!((ta.len(), tb.len()), (1, 1));
    }
}
