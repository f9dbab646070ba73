use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use super::floating::calculate_breakdown;
use super::points::{
    calculate_final_points, calculate_provisional_points, provisional_raw_score, PointCalculation,
    PointResult,
};
use crate::error::RuleConfigError;
use crate::ruleset::Ruleset;
use crate::validation::stages::MAX_FINAL_POINTS;
use crate::validation::{
    validate_on, EntryMethod, ErrorCode, MatchCandidate, ValidationError, ValidationResult,
};

/// Point value to store for a validated match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedScore {
    pub rank: i32,
    pub final_points: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_count: Option<i32>,
    /// Only kept when the ruleset uses chips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chip_count: Option<i32>,
    /// Absent when the final points were entered directly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation: Option<PointCalculation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub validation: ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ResolvedScore>,
}

/// Derive the final points for an entry per its entry method.
///
/// Returns `Ok(None)` when the entry lacks a value its method needs, which
/// cannot happen for an entry that passed validation.
pub fn resolve_final_points(
    candidate: &MatchCandidate,
    ruleset: &Ruleset,
) -> Result<Option<ResolvedScore>, RuleConfigError> {
    let rank = candidate.rank;
    let floating_count = candidate
        .floating_count
        .and_then(|count| u8::try_from(count).ok());

    let (final_points, raw_score, calculation) = match candidate.entry_method {
        EntryMethod::RankPlusPoints => match candidate.final_points {
            Some(points) => (points, candidate.raw_score, None),
            None => return Ok(None),
        },
        EntryMethod::RankPlusRaw => {
            let Some(raw_score) = candidate.raw_score else {
                return Ok(None);
            };
            let result = if ruleset.use_floating_uma {
                let Some(count) = floating_count else {
                    return Ok(None);
                };
                calculate_breakdown(raw_score, rank, count, ruleset)?
            } else {
                calculate_final_points(ruleset, rank, raw_score)?
            };
            split(result)
        }
        EntryMethod::ProvisionalRankOnly => {
            let result = if ruleset.use_floating_uma {
                let Some(count) = floating_count else {
                    return Ok(None);
                };
                let raw_score = provisional_raw_score(ruleset.base_points, rank);
                debug!(rank, raw_score, count, "using provisional raw score");
                let mut result = calculate_breakdown(raw_score, rank, count, ruleset)?;
                result.calculation.mark_provisional();
                result
            } else {
                calculate_provisional_points(ruleset, rank)?
            };
            split(result)
        }
    };

    let chip_count = if ruleset.use_chips {
        candidate.chip_count
    } else {
        None
    };

    Ok(Some(ResolvedScore {
        rank,
        final_points,
        raw_score,
        floating_count: candidate.floating_count,
        chip_count,
        calculation,
    }))
}

fn split(result: PointResult) -> (f64, Option<i32>, Option<PointCalculation>) {
    let raw_score = result.calculation.raw_score;
    (result.final_points, Some(raw_score), Some(result.calculation))
}

/// Validate an entry and, if it passes, resolve the points to store.
pub fn score_match(
    candidate: &MatchCandidate,
    ruleset: &Ruleset,
) -> Result<MatchOutcome, RuleConfigError> {
    score_match_on(candidate, ruleset, Local::now().date_naive())
}

pub fn score_match_on(
    candidate: &MatchCandidate,
    ruleset: &Ruleset,
    today: NaiveDate,
) -> Result<MatchOutcome, RuleConfigError> {
    let mut validation = validate_on(candidate, ruleset, today)?;
    if !validation.is_valid {
        return Ok(MatchOutcome {
            validation,
            score: None,
        });
    }

    let score = resolve_final_points(candidate, ruleset)?;
    let out_of_range = score
        .as_ref()
        .is_some_and(|s| !(-MAX_FINAL_POINTS..=MAX_FINAL_POINTS).contains(&s.final_points));
    if out_of_range {
        debug!(?score, "calculated points out of range");
        validation.extend([ValidationError::new(
            "finalPoints",
            ErrorCode::CalculatedPointsOutOfRange,
        )]);
        return Ok(MatchOutcome {
            validation,
            score: None,
        });
    }

    Ok(MatchOutcome { validation, score })
}
