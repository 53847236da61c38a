//! Tournament history models.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{PlayerId, TournamentId};

/// A roster member of a tournament team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teammate {
    pub id: PlayerId,

    /// ISO 3166-1 alpha-2 flag code (e.g., "KR", "US")
    pub country_code: String,
}

impl Teammate {
    pub fn new(id: PlayerId, country_code: impl Into<String>) -> Self {
        Self {
            id,
            country_code: country_code.into(),
        }
    }
}

/// A team's result in one tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRecord {
    pub id: TournamentId,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub team_name: Option<String>,

    /// Free-form result, e.g. "1st", "Top 8", "Did Not Qualify"
    pub placement: String,

    /// Full team roster, including the player whose history this is
    #[serde(default)]
    pub teammates: Vec<Teammate>,

    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl TournamentRecord {
    /// Create a record with an empty roster.
    pub fn new(id: TournamentId, placement: impl Into<String>) -> Self {
        Self {
            id,
            name: None,
            team_name: None,
            placement: placement.into(),
            teammates: Vec::new(),
            date: None,
        }
    }

    /// Builder method to add a roster member.
    pub fn with_teammate(mut self, id: PlayerId, country_code: impl Into<String>) -> Self {
        self.teammates.push(Teammate::new(id, country_code));
        self
    }

    /// Builder method to set the tournament name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method to set the date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Whether the player was on this team.
    pub fn includes(&self, player: PlayerId) -> bool {
        self.teammates.iter().any(|t| t.id == player)
    }

    /// Distinct roster ids.
    pub fn teammate_ids(&self) -> BTreeSet<PlayerId> {
        self.teammates.iter().map(|t| t.id).collect()
    }

    /// Distinct roster country codes.
    pub fn country_codes(&self) -> BTreeSet<&str> {
        self.teammates
            .iter()
            .map(|t| t.country_code.as_str())
            .collect()
    }
}

/// Records whose roster contains the player, in input order.
pub fn qualifying_records(
    player: PlayerId,
    records: &[TournamentRecord],
) -> Vec<&TournamentRecord> {
    records.iter().filter(|r| r.includes(player)).collect()
}

/// Order a history newest first. Undated records go last, keeping their
/// relative order.
pub fn sort_recent_first(records: &mut [TournamentRecord]) {
    records.sort_by(|a, b| match (a.date, b.date) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
