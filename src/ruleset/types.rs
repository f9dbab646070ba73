use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::matrix::UmaMatrix;
use crate::error::RuleConfigError;

/// Number of players at the table.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    Three,
    Four,
}

impl GameMode {
    pub fn player_count(self) -> u8 {
        match self {
            GameMode::Three => 3,
            GameMode::Four => 4,
        }
    }
}

/// Scoring ruleset.
///
/// Final points for a player are `(raw - base_points) / 1000 + uma + oka`,
/// where the uma entry comes from `uma` (fixed) or from the `uma_matrix` row
/// for the number of floating players, and `oka` is credited to rank 1 only.
///
/// Example YAML:
/// ```yaml
/// rulesetId: m-league
/// ruleName: "M-League"
/// gameMode: four
/// startingPoints: 25000
/// basePoints: 30000
/// uma: [30, 10, -10, -30]
/// oka: 20
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Ruleset {
    /// Identifier used to select the ruleset from the CLI
    #[serde(default)]
    pub ruleset_id: String,

    pub rule_name: String,

    pub game_mode: GameMode,

    pub starting_points: i32,

    /// Break-even point; a player at or above it is "floating"
    pub base_points: i32,

    /// Switches uma lookup from `uma` to `uma_matrix`
    #[serde(default)]
    pub use_floating_uma: bool,

    /// One entry per finishing rank, summing to zero
    pub uma: Vec<i32>,

    /// Uma rows keyed by floating-player count; read only when `use_floating_uma` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uma_matrix: Option<UmaMatrix>,

    pub oka: i32,

    #[serde(default)]
    pub use_chips: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl Ruleset {
    /// Fixed-uma ruleset with no chips.
    pub fn fixed(
        ruleset_id: &str,
        rule_name: &str,
        game_mode: GameMode,
        starting_points: i32,
        base_points: i32,
        uma: Vec<i32>,
        oka: i32,
    ) -> Self {
        Self {
            ruleset_id: ruleset_id.to_string(),
            rule_name: rule_name.to_string(),
            game_mode,
            starting_points,
            base_points,
            use_floating_uma: false,
            uma,
            uma_matrix: None,
            oka,
            use_chips: false,
            memo: None,
        }
    }

    /// Switch this ruleset to floating uma with the given matrix.
    pub fn with_uma_matrix(mut self, matrix: UmaMatrix) -> Self {
        self.use_floating_uma = true;
        self.uma_matrix = Some(matrix);
        self
    }

    pub fn with_chips(mut self, use_chips: bool) -> Self {
        self.use_chips = use_chips;
        self
    }

    pub fn player_count(&self) -> u8 {
        self.game_mode.player_count()
    }

    /// Fixed uma for a 1-based rank.
    pub fn uma_for_rank(&self, rank: i32) -> Result<i32, RuleConfigError> {
        rank_entry(&self.uma, rank)
    }

    /// Uma row for a floating count. Missing matrix or row is a configuration defect.
    pub fn uma_row(&self, floating_count: u8) -> Result<&[i32], RuleConfigError> {
        let matrix = self
            .uma_matrix
            .as_ref()
            .ok_or(RuleConfigError::MissingUmaMatrix)?;
        matrix
            .row(floating_count)
            .ok_or(RuleConfigError::MissingUmaRow(floating_count))
    }

    /// Oka credited to the given rank.
    pub fn oka_for(&self, rank: i32) -> i32 {
        if rank == 1 {
            self.oka
        } else {
            0
        }
    }
}

pub(crate) fn rank_entry(row: &[i32], rank: i32) -> Result<i32, RuleConfigError> {
    usize::try_from(rank.saturating_sub(1))
        .ok()
        .and_then(|idx| row.get(idx).copied())
        .ok_or(RuleConfigError::UmaNotDefined { rank })
}
