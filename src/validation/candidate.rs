use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::ruleset::GameMode;

/// How the player recorded the result of a match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntryMethod {
    /// Rank and final points typed in directly
    RankPlusPoints,
    /// Rank and raw score; final points are calculated
    RankPlusRaw,
    /// Rank only; final points come from a synthesized raw score
    ProvisionalRankOnly,
}

/// One user-submitted match record, before validation.
///
/// Optional fields are `None` when the user left them empty. Integer fields
/// are signed so that out-of-range input reaches the validator intact.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    /// `YYYY-MM-DD`, or an ISO-8601 date-time whose date part counts
    pub date: String,

    pub game_mode: GameMode,

    pub entry_method: EntryMethod,

    pub rank: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_points: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_score: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chip_count: Option<i32>,

    /// Players at or above base points, floating-uma rulesets only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_count: Option<i32>,
}

impl MatchCandidate {
    pub fn new(date: &str, game_mode: GameMode, entry_method: EntryMethod, rank: i32) -> Self {
        Self {
            date: date.to_string(),
            game_mode,
            entry_method,
            rank,
            final_points: None,
            raw_score: None,
            chip_count: None,
            floating_count: None,
        }
    }

    pub fn with_final_points(mut self, points: f64) -> Self {
        self.final_points = Some(points);
        self
    }

    pub fn with_raw_score(mut self, raw_score: i32) -> Self {
        self.raw_score = Some(raw_score);
        self
    }

    pub fn with_chip_count(mut self, chips: i32) -> Self {
        self.chip_count = Some(chips);
        self
    }

    pub fn with_floating_count(mut self, count: i32) -> Self {
        self.floating_count = Some(count);
        self
    }

    pub fn player_count(&self) -> u8 {
        self.game_mode.player_count()
    }
}
