use serde::Serialize;
use tracing::debug;

use crate::error::RuleConfigError;
use crate::ruleset::Ruleset;

/// Offset from base points used to synthesize a raw score, indexed by rank.
/// Ranks past the table take the last entry.
pub const PROVISIONAL_OFFSETS: [i32; 4] = [15_000, 5_000, -5_000, -15_000];

/// Step-by-step trace of one final-points calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointCalculation {
    pub raw_score: i32,
    pub base_points: i32,
    pub base_calculation: f64, // (raw - base) / 1000, rounded to one decimal
    pub rank: i32,
    pub uma_points: i32,
    pub oka_points: i32,
    pub final_points: f64,
    pub formula: String, // e.g. "(45100 - 30000) / 1000 + 30 + 20 = 65.1"
    pub is_provisional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisional_raw_score: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointResult {
    pub final_points: f64,
    pub calculation: PointCalculation,
}

/// Round half away from zero to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Apply the final-points formula with an already chosen uma value.
pub(crate) fn compose(raw_score: i32, rank: i32, uma_points: i32, ruleset: &Ruleset) -> PointResult {
    let base_points = ruleset.base_points;
    let oka_points = ruleset.oka_for(rank);
    let basic = (f64::from(raw_score) - f64::from(base_points)) / 1000.0;
    let final_points = round_to_tenth(basic + f64::from(uma_points) + f64::from(oka_points));

    PointResult {
        final_points,
        calculation: PointCalculation {
            raw_score,
            base_points,
            base_calculation: round_to_tenth(basic),
            rank,
            uma_points,
            oka_points,
            final_points,
            formula: format!(
                "({} - {}) / 1000 + {} + {} = {:.1}",
                raw_score, base_points, uma_points, oka_points, final_points
            ),
            is_provisional: false,
            provisional_raw_score: None,
        },
    }
}

/// Final points from rank and raw score using the ruleset's fixed uma.
pub fn calculate_final_points(
    ruleset: &Ruleset,
    rank: i32,
    raw_score: i32,
) -> Result<PointResult, RuleConfigError> {
    let uma = ruleset.uma_for_rank(rank)?;
    Ok(compose(raw_score, rank, uma, ruleset))
}

/// Raw score assumed for a rank when only the rank is known.
pub fn provisional_raw_score(base_points: i32, rank: i32) -> i32 {
    let idx = usize::try_from(rank.saturating_sub(1))
        .unwrap_or(0)
        .min(PROVISIONAL_OFFSETS.len() - 1);
    base_points.saturating_add(PROVISIONAL_OFFSETS[idx])
}

/// Final points for a rank-only entry: the formula applied to a synthesized raw score.
pub fn calculate_provisional_points(
    ruleset: &Ruleset,
    rank: i32,
) -> Result<PointResult, RuleConfigError> {
    let raw_score = provisional_raw_score(ruleset.base_points, rank);
    debug!(rank, raw_score, "using provisional raw score");
    let mut result = calculate_final_points(ruleset, rank, raw_score)?;
    result.calculation.mark_provisional();
    Ok(result)
}

impl PointCalculation {
    pub(crate) fn mark_provisional(&mut self) {
        self.is_provisional = true;
        self.provisional_raw_score = Some(self.raw_score);
    }
}
