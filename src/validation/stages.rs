//! Individual checks run by the validation pipeline, grouped by stage.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use strum_macros::{Display, EnumIter};

use super::candidate::{EntryMethod, MatchCandidate};
use super::types::{ErrorCode, ValidationError};
use crate::error::RuleConfigError;
use crate::ruleset::floating::get_valid_floating_counts;
use crate::ruleset::types::rank_entry;
use crate::ruleset::{GameMode, Ruleset};
use crate::scoring::floating::is_player_floating;

pub const MAX_FINAL_POINTS: f64 = 999.9;
pub const MAX_RAW_SCORE: i32 = 999_900;
pub const RAW_SCORE_UNIT: i32 = 100;
pub const MAX_DATE_AGE_DAYS: u64 = 365 * 5;
const PRECISION_TOLERANCE: f64 = 1e-10;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    BasicFormat,
    EntryConsistency,
    FloatingExistence,
    FloatingConsistency,
    RankRelation,
    PointBounds,
}

impl Stage {
    pub fn run(
        self,
        candidate: &MatchCandidate,
        ruleset: &Ruleset,
        today: NaiveDate,
    ) -> Result<Vec<ValidationError>, RuleConfigError> {
        match self {
            Stage::BasicFormat => Ok(check_basic_format(candidate, ruleset, today)),
            Stage::EntryConsistency => Ok(check_entry_method(candidate, ruleset)),
            Stage::FloatingExistence => check_floating_existence(candidate, ruleset),
            Stage::FloatingConsistency => Ok(check_floating_consistency(candidate, ruleset)),
            Stage::RankRelation => Ok(check_rank_relation(candidate, ruleset)),
            Stage::PointBounds => check_point_bounds(candidate, ruleset),
        }
    }
}

// Stage 1: basic format

/// Date part of a match date string, as written.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times, and naive ISO-8601 date-times.
pub fn parse_match_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
        .map(|dt| dt.date())
}

pub fn validate_date(date: &str, today: NaiveDate) -> Vec<ValidationError> {
    let Some(match_date) = parse_match_date(date) else {
        return vec![ValidationError::new("date", ErrorCode::InvalidDateFormat)];
    };

    let mut errors = Vec::new();
    if match_date > today {
        errors.push(ValidationError::new("date", ErrorCode::FutureDate));
    }
    let oldest = today
        .checked_sub_days(Days::new(MAX_DATE_AGE_DAYS))
        .unwrap_or(NaiveDate::MIN);
    if match_date < oldest {
        errors.push(ValidationError::new("date", ErrorCode::TooOldDate));
    }
    errors
}

pub fn validate_rank(rank: i32, game_mode: GameMode) -> Vec<ValidationError> {
    let max_rank = i32::from(game_mode.player_count());
    if (1..=max_rank).contains(&rank) {
        Vec::new()
    } else {
        vec![ValidationError::with_params(
            "rank",
            ErrorCode::InvalidRank,
            &[("maxRank", max_rank.to_string())],
        )]
    }
}

pub fn validate_final_points(points: f64) -> Vec<ValidationError> {
    if !points.is_finite() {
        return vec![ValidationError::new(
            "finalPoints",
            ErrorCode::InvalidFinalPointsRange,
        )];
    }

    let mut errors = Vec::new();
    if !(-MAX_FINAL_POINTS..=MAX_FINAL_POINTS).contains(&points) {
        errors.push(ValidationError::new(
            "finalPoints",
            ErrorCode::InvalidFinalPointsRange,
        ));
    }
    let rounded = (points * 10.0).round() / 10.0;
    if (points - rounded).abs() > PRECISION_TOLERANCE {
        errors.push(ValidationError::new(
            "finalPoints",
            ErrorCode::InvalidFinalPointsPrecision,
        ));
    }
    errors
}

pub fn validate_raw_score(score: i32) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !(-MAX_RAW_SCORE..=MAX_RAW_SCORE).contains(&score) {
        errors.push(ValidationError::new("rawScore", ErrorCode::InvalidRawScoreRange));
    }
    if score % RAW_SCORE_UNIT != 0 {
        errors.push(ValidationError::new("rawScore", ErrorCode::InvalidRawScoreUnit));
    }
    errors
}

pub fn validate_floating_count_range(count: i32, game_mode: GameMode) -> Vec<ValidationError> {
    let max_floating = i32::from(game_mode.player_count());
    if (0..=max_floating).contains(&count) {
        Vec::new()
    } else {
        vec![ValidationError::with_params(
            "floatingCount",
            ErrorCode::InvalidFloatingCountRange,
            &[("maxFloating", max_floating.to_string())],
        )]
    }
}

pub fn validate_chip_count(count: i32) -> Vec<ValidationError> {
    if count < 0 {
        vec![ValidationError::new("chipCount", ErrorCode::InvalidChipCount)]
    } else {
        Vec::new()
    }
}

pub fn validate_game_mode(game_mode: GameMode, ruleset: &Ruleset) -> Vec<ValidationError> {
    if game_mode == ruleset.game_mode {
        Vec::new()
    } else {
        vec![ValidationError::with_params(
            "gameMode",
            ErrorCode::GameModeMismatch,
            &[("gameMode", ruleset.player_count().to_string())],
        )]
    }
}

fn check_basic_format(
    candidate: &MatchCandidate,
    ruleset: &Ruleset,
    today: NaiveDate,
) -> Vec<ValidationError> {
    let mut errors = validate_date(&candidate.date, today);
    errors.extend(validate_game_mode(candidate.game_mode, ruleset));
    errors.extend(validate_rank(candidate.rank, candidate.game_mode));
    if let Some(points) = candidate.final_points {
        errors.extend(validate_final_points(points));
    }
    if let Some(score) = candidate.raw_score {
        errors.extend(validate_raw_score(score));
    }
    if let Some(count) = candidate.floating_count {
        errors.extend(validate_floating_count_range(count, candidate.game_mode));
    }
    if let Some(chips) = candidate.chip_count {
        errors.extend(validate_chip_count(chips));
    }
    errors
}

// Stage 2: entry method vs. ruleset

fn check_entry_method(candidate: &MatchCandidate, ruleset: &Ruleset) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !ruleset.use_floating_uma && candidate.floating_count.is_some() {
        errors.push(ValidationError::new(
            "floatingCount",
            ErrorCode::FloatingCountWithFixedUma,
        ));
    }

    let needs_floating_count = matches!(
        candidate.entry_method,
        EntryMethod::RankPlusRaw | EntryMethod::ProvisionalRankOnly
    );
    if ruleset.use_floating_uma && needs_floating_count && candidate.floating_count.is_none() {
        errors.push(ValidationError::new(
            "floatingCount",
            ErrorCode::MissingFloatingCount,
        ));
    }

    match candidate.entry_method {
        EntryMethod::RankPlusPoints if candidate.final_points.is_none() => {
            errors.push(ValidationError::new("finalPoints", ErrorCode::MissingFinalPoints));
        }
        EntryMethod::RankPlusRaw if candidate.raw_score.is_none() => {
            errors.push(ValidationError::new("rawScore", ErrorCode::MissingRawScore));
        }
        _ => {}
    }

    errors
}

// Stage 3: can this floating count exist at all

fn check_floating_existence(
    candidate: &MatchCandidate,
    ruleset: &Ruleset,
) -> Result<Vec<ValidationError>, RuleConfigError> {
    let (true, Some(count)) = (ruleset.use_floating_uma, candidate.floating_count) else {
        return Ok(Vec::new());
    };

    let (min_count, max_count) = get_valid_floating_counts(
        ruleset.starting_points,
        ruleset.base_points,
        candidate.game_mode,
    )?;

    let mut errors = Vec::new();
    if count < i32::from(min_count) {
        errors.push(ValidationError::new(
            "floatingCount",
            ErrorCode::ImpossibleZeroFloating,
        ));
    }
    if count > i32::from(max_count) {
        errors.push(ValidationError::with_params(
            "floatingCount",
            ErrorCode::ImpossibleAllFloating,
            &[("maxFloating", max_count.to_string())],
        ));
    }
    Ok(errors)
}

// Stage 4: own raw score vs. floating count

fn check_floating_consistency(
    candidate: &MatchCandidate,
    ruleset: &Ruleset,
) -> Vec<ValidationError> {
    let (true, Some(raw_score), Some(count)) = (
        ruleset.use_floating_uma,
        candidate.raw_score,
        candidate.floating_count,
    ) else {
        return Vec::new();
    };

    let players = i32::from(candidate.player_count());
    let floating = is_player_floating(raw_score, ruleset.base_points);
    let mut errors = Vec::new();
    if floating && count == 0 {
        errors.push(ValidationError::new(
            "floatingCount",
            ErrorCode::FloatingScoreWithZeroCount,
        ));
    }
    if !floating && count == players {
        errors.push(ValidationError::new(
            "floatingCount",
            ErrorCode::SinkingScoreWithAllFloating,
        ));
    }
    errors
}

// Stage 5: rank vs. raw score

fn check_rank_relation(candidate: &MatchCandidate, ruleset: &Ruleset) -> Vec<ValidationError> {
    let (true, Some(raw_score), Some(count)) = (
        ruleset.use_floating_uma,
        candidate.raw_score,
        candidate.floating_count,
    ) else {
        return Vec::new();
    };

    let base = ruleset.base_points;
    let players = i32::from(candidate.player_count());
    let rank = candidate.rank;
    let is_last = rank == players;
    let mut errors = Vec::new();

    if rank == 1 && count >= 2 && raw_score < base {
        errors.push(ValidationError::new(
            "rawScore",
            ErrorCode::TopRankSinkingWithFloating,
        ));
    }
    if is_last && count <= players - 2 && raw_score > base {
        errors.push(ValidationError::new(
            "rawScore",
            ErrorCode::LastRankFloatingWithoutAllFloating,
        ));
    }
    if ruleset.starting_points < base && is_last && raw_score > base {
        errors.push(ValidationError::new(
            "rawScore",
            ErrorCode::LastRankFloatingWithLowerStart,
        ));
    }
    if count == players && raw_score < base {
        errors.push(ValidationError::new(
            "floatingCount",
            ErrorCode::AllFloatingWithSinkingScore,
        ));
    }
    if count == 0 && raw_score >= base {
        errors.push(ValidationError::new(
            "floatingCount",
            ErrorCode::AllSinkingWithFloatingScore,
        ));
    }
    errors
}

// Stage 6: final points reachable for first and last place

/// Uma row that applies to this candidate, or `None` when the bound cannot be checked.
fn bound_row<'a>(
    candidate: &MatchCandidate,
    ruleset: &'a Ruleset,
    applies: impl Fn(i32) -> bool,
) -> Result<Option<&'a [i32]>, RuleConfigError> {
    if !ruleset.use_floating_uma {
        return Ok(Some(ruleset.uma.as_slice()));
    }
    match candidate.floating_count {
        Some(count) if applies(count) => {
            let count = u8::try_from(count).map_err(|_| RuleConfigError::UmaNotDefined {
                rank: candidate.rank,
            })?;
            ruleset.uma_row(count).map(Some)
        }
        _ => Ok(None),
    }
}

fn check_point_bounds(
    candidate: &MatchCandidate,
    ruleset: &Ruleset,
) -> Result<Vec<ValidationError>, RuleConfigError> {
    let Some(points) = candidate.final_points else {
        return Ok(Vec::new());
    };

    let players = i32::from(candidate.player_count());
    let mut errors = Vec::new();

    // The top bound assumes a floating leader, the bottom one a sinking trailer.
    if candidate.rank == 1 {
        if let Some(row) = bound_row(candidate, ruleset, |count| count >= 1)? {
            let min_points = rank_entry(row, 1)? + ruleset.oka;
            if points < f64::from(min_points) {
                errors.push(ValidationError::with_params(
                    "finalPoints",
                    ErrorCode::TopPointsBelowMinimum,
                    &[("minPoints", min_points.to_string())],
                ));
            }
        }
    }

    if candidate.rank == players {
        if let Some(row) = bound_row(candidate, ruleset, |count| count < players)? {
            let max_points = rank_entry(row, players)?;
            if points > f64::from(max_points) {
                errors.push(ValidationError::with_params(
                    "finalPoints",
                    ErrorCode::LastPointsAboveMaximum,
                    &[("maxPoints", max_points.to_string())],
                ));
            }
        }
    }

    Ok(errors)
}
