//! # OTH Engine
//!
//! Match comparison and performance aggregation for osu! tournament history.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (games, comparisons, tournaments, stats)
//! - **compare**: Session trimming, alignment and per-map comparison
//! - **calculate**: Placement parsing and player statistics
//! - **cover**: Tournament cover discovery from forum posts
//! - **config**: Configuration loading and validation
//! - **storage**: Fixture files for the command-line harness
//!
//! Everything under `compare` and `calculate` is a pure function of its
//! inputs: no I/O, no shared state, safe to call from any thread.

pub mod calculate;
pub mod compare;
pub mod config;
pub mod cover;
pub mod error;
pub mod models;
pub mod storage;

pub use calculate::{aggregate_player_stats, parse_placement, StatsOptions};
pub use compare::{compare_sessions, CompareMode, CompareRequest};
pub use error::{EngineError, Result};
pub use models::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn session(maps: &[Option<u64>]) -> Vec<GameRecord> {
        maps.iter()
            .enumerate()
            .map(|(i, m)| GameRecord::new(*m).with_score(1, 1000 + i as u64))
            .collect()
    }

    #[test]
    fn test_aligned_length_is_min_of_filtered_lengths() {
        let cases: [(&[Option<u64>], &[Option<u64>]); 4] = [
            (&[Some(1), None, Some(2)], &[Some(1)]),
            (&[None, None], &[Some(1), Some(2)]),
            (&[Some(1), Some(2), Some(3)], &[None, Some(4), Some(5), None, Some(6)]),
            (&[], &[]),
        ];

        for (a, b) in cases {
            let a = session(a);
            let b = session(b);
            let expected = a
                .iter()
                .filter(|g| g.is_comparable())
                .count()
                .min(b.iter().filter(|g| g.is_comparable()).count());

            let entries = compare_sessions(&a, &b, &CompareRequest::new(1, 2)).unwrap();
            assert_eq!(entries.len(), expected);
        }
    }

    #[test]
    fn test_placement_properties() {
        assert_eq!(parse_placement("1st").unwrap().rank, Some(1));
        assert_eq!(parse_placement("2nd").unwrap().rank, Some(2));
        assert_eq!(parse_placement("3rd").unwrap().rank, Some(3));
        assert_eq!(parse_placement("Did Not Qualify").unwrap().rank, None);
        assert_eq!(parse_placement("Top 8").unwrap().rank, Some(8));
    }

    #[test]
    fn test_stats_end_to_end() {
        let player = 42;
        let records: Vec<_> = ["1st", "2nd", "1st", "Did Not Qualify"]
            .iter()
            .enumerate()
            .map(|(i, p)| TournamentRecord::new(i as u64, *p).with_teammate(player, "CA"))
            .collect();

        let stats = aggregate_player_stats(player, &records, StatsOptions::default()).unwrap();

        assert_eq!(stats.total_tournaments, 4);
        assert_eq!(stats.first_places, 2);
        assert_eq!(stats.first_rate, 50.0);
        assert_eq!(stats.top3_rate, 75.0);
        assert_eq!(stats.avg_placement, Some(1.3));

        let err = aggregate_player_stats(player, &[], StatsOptions::default()).unwrap_err();
        assert_eq!(err.kind(), "DivisionUndefinedError");
    }
}
