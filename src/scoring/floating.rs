use super::points::{compose, PointResult};
use crate::error::RuleConfigError;
use crate::ruleset::types::rank_entry;
use crate::ruleset::Ruleset;

/// A player at or above base points is floating.
pub fn is_player_floating(raw_score: i32, base_points: i32) -> bool {
    raw_score >= base_points
}

/// Final points with the uma taken from the matrix row for `floating_count`.
pub fn calculate_points(
    raw_score: i32,
    rank: i32,
    floating_count: u8,
    ruleset: &Ruleset,
) -> Result<f64, RuleConfigError> {
    calculate_breakdown(raw_score, rank, floating_count, ruleset).map(|r| r.final_points)
}

/// Same as [`calculate_points`] with the full calculation trace.
pub fn calculate_breakdown(
    raw_score: i32,
    rank: i32,
    floating_count: u8,
    ruleset: &Ruleset,
) -> Result<PointResult, RuleConfigError> {
    let row = ruleset.uma_row(floating_count)?;
    let uma = rank_entry(row, rank)?;
    Ok(compose(raw_score, rank, uma, ruleset))
}
