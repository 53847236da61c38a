//! Tournament placement model.

use serde::{Deserialize, Serialize};

/// How a rank was expressed in the placement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlacementForm {
    /// An exact finishing position ("1st", "4th")
    Exact,
    /// The bound of the bracket a team went out in ("Top 8", "Group 16")
    Bracket,
    /// Did not qualify for the bracket
    NotQualified,
}

/// Normalized tournament placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinalPlacement {
    /// Rank (1 = winner); `None` when the result does not rank.
    pub rank: Option<u32>,

    pub form: PlacementForm,
}

impl OrdinalPlacement {
    pub fn exact(rank: u32) -> Self {
        Self {
            rank: Some(rank),
            form: PlacementForm::Exact,
        }
    }

    pub fn bracket(rank: u32) -> Self {
        Self {
            rank: Some(rank),
            form: PlacementForm::Bracket,
        }
    }

    pub fn not_qualified() -> Self {
        Self {
            rank: None,
            form: PlacementForm::NotQualified,
        }
    }

    /// Exact podium position (1, 2 or 3), if any.
    pub fn podium(&self) -> Option<u32> {
        match (self.form, self.rank) {
            (PlacementForm::Exact, Some(rank @ 1..=3)) => Some(rank),
            _ => None,
        }
    }

    /// Check if this is a podium finish (exact top 3).
    pub fn is_podium(&self) -> bool {
        self.podium().is_some()
    }

    /// Check if this is a win (exact 1st place).
    pub fn is_winner(&self) -> bool {
        self.podium() == Some(1)
    }
}
