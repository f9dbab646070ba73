pub mod candidate;
pub mod stages;
pub mod types;

pub use candidate::{EntryMethod, MatchCandidate};
pub use stages::Stage;
pub use types::{format_template, ErrorCode, Severity, ValidationError, ValidationResult};

use chrono::{Local, NaiveDate};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::error::RuleConfigError;
use crate::ruleset::Ruleset;

/// Validate a match entry against its ruleset using today's local date.
pub fn validate(
    candidate: &MatchCandidate,
    ruleset: &Ruleset,
) -> Result<ValidationResult, RuleConfigError> {
    validate_on(candidate, ruleset, Local::now().date_naive())
}

/// Validate a match entry with an explicit "today" for the date checks.
///
/// Stages run in order and the first stage that reports anything ends the
/// run; its errors are the result. A broken ruleset is returned as `Err`
/// instead of being mixed into the user-facing errors.
pub fn validate_on(
    candidate: &MatchCandidate,
    ruleset: &Ruleset,
    today: NaiveDate,
) -> Result<ValidationResult, RuleConfigError> {
    for stage in Stage::iter() {
        let errors = stage.run(candidate, ruleset, today)?;
        if !errors.is_empty() {
            debug!(%stage, errors = errors.len(), "validation stopped");
            return Ok(ValidationResult::from_errors(errors));
        }
    }
    Ok(ValidationResult::valid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::{GameMode, UmaMatrix};
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn m_league() -> Ruleset {
        Ruleset::fixed(
            "m-league",
            "M-League",
            GameMode::Four,
            25000,
            30000,
            vec![30, 10, -10, -30],
            20,
        )
    }

    fn renmei() -> Ruleset {
        Ruleset::fixed(
            "renmei",
            "Floating four",
            GameMode::Four,
            30000,
            30000,
            vec![30, 10, -10, -30],
            0,
        )
        .with_uma_matrix(UmaMatrix::from_rows(vec![
            vec![0, 0, 0, 0],
            vec![12, -1, -3, -8],
            vec![8, 4, -4, -8],
            vec![8, 3, 1, -12],
            vec![0, 0, 0, 0],
        ]))
    }

    fn lower_start_three() -> Ruleset {
        Ruleset::fixed(
            "three-lower",
            "Lower start three",
            GameMode::Three,
            30000,
            35000,
            vec![20, 0, -20],
            15,
        )
        .with_uma_matrix(UmaMatrix::from_rows(vec![
            vec![0, 0, 0],
            vec![40, -20, -20],
            vec![20, 0, -20],
            vec![0, 0, 0],
        ]))
    }

    fn points(mode: GameMode, rank: i32, final_points: f64) -> MatchCandidate {
        MatchCandidate::new("2024-01-15", mode, EntryMethod::RankPlusPoints, rank)
            .with_final_points(final_points)
    }

    fn raw(mode: GameMode, rank: i32, raw_score: i32) -> MatchCandidate {
        MatchCandidate::new("2024-01-15", mode, EntryMethod::RankPlusRaw, rank)
            .with_raw_score(raw_score)
    }

    fn run(candidate: &MatchCandidate, ruleset: &Ruleset) -> ValidationResult {
        validate_on(candidate, ruleset, today()).unwrap()
    }

    #[test]
    fn test_valid_fixed_entry() {
        let result = run(&points(GameMode::Four, 1, 65.1), &m_league());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_valid_floating_entry() {
        let candidate = raw(GameMode::Four, 2, 32000).with_floating_count(2);
        assert!(run(&candidate, &renmei()).is_valid);
    }

    #[test]
    fn test_basic_format_errors_accumulate() {
        let candidate = MatchCandidate::new("bad", GameMode::Four, EntryMethod::RankPlusRaw, 5)
            .with_raw_score(12345)
            .with_chip_count(-1);
        let result = run(&candidate, &m_league());
        assert_eq!(
            result.codes(),
            vec![
                ErrorCode::InvalidDateFormat,
                ErrorCode::InvalidRank,
                ErrorCode::InvalidRawScoreUnit,
                ErrorCode::InvalidChipCount,
            ]
        );
    }

    #[test]
    fn test_basic_format_masks_later_stages() {
        // Floating count under fixed uma would be E-01-01, but the raw score fails first.
        let candidate = raw(GameMode::Four, 1, 12345).with_floating_count(2);
        let result = run(&candidate, &m_league());
        assert_eq!(result.codes(), vec![ErrorCode::InvalidRawScoreUnit]);
    }

    #[test]
    fn test_floating_count_with_fixed_uma() {
        let candidate = raw(GameMode::Four, 1, 45000).with_floating_count(2);
        assert_eq!(
            run(&candidate, &m_league()).codes(),
            vec![ErrorCode::FloatingCountWithFixedUma]
        );
    }

    #[rstest]
    #[case(EntryMethod::RankPlusRaw)]
    #[case(EntryMethod::ProvisionalRankOnly)]
    fn test_floating_rules_require_floating_count(#[case] method: EntryMethod) {
        let candidate =
            MatchCandidate::new("2024-01-15", GameMode::Four, method, 1).with_raw_score(45000);
        assert_eq!(
            run(&candidate, &renmei()).codes(),
            vec![ErrorCode::MissingFloatingCount]
        );
    }

    #[test]
    fn test_points_entry_without_floating_count_is_fine() {
        assert!(run(&points(GameMode::Four, 2, 10.0), &renmei()).is_valid);
    }

    #[test]
    fn test_missing_required_values() {
        let no_points =
            MatchCandidate::new("2024-01-15", GameMode::Four, EntryMethod::RankPlusPoints, 1);
        assert_eq!(
            run(&no_points, &m_league()).codes(),
            vec![ErrorCode::MissingFinalPoints]
        );

        let no_raw = MatchCandidate::new("2024-01-15", GameMode::Four, EntryMethod::RankPlusRaw, 1);
        assert_eq!(run(&no_raw, &m_league()).codes(), vec![ErrorCode::MissingRawScore]);
    }

    #[test]
    fn test_provisional_fixed_needs_nothing_else() {
        let candidate =
            MatchCandidate::new("2024-01-15", GameMode::Four, EntryMethod::ProvisionalRankOnly, 3);
        assert!(run(&candidate, &m_league()).is_valid);
    }

    #[test]
    fn test_zero_floating_impossible_with_equal_points() {
        let candidate = raw(GameMode::Four, 4, 25000).with_floating_count(0);
        let result = run(&candidate, &renmei());
        assert_eq!(result.codes(), vec![ErrorCode::ImpossibleZeroFloating]);
        assert_eq!(result.errors[0].field, "floatingCount");
    }

    #[test]
    fn test_all_floating_impossible_with_lower_start() {
        let candidate = raw(GameMode::Three, 1, 50000).with_floating_count(3);
        let result = run(&candidate, &lower_start_three());
        assert_eq!(result.codes(), vec![ErrorCode::ImpossibleAllFloating]);
        assert_eq!(
            result.errors[0].hint.as_deref(),
            Some("Set the floating count to 2 or less")
        );
    }

    #[test]
    fn test_floating_score_with_zero_count() {
        let candidate = raw(GameMode::Three, 1, 35000).with_floating_count(0);
        assert_eq!(
            run(&candidate, &lower_start_three()).codes(),
            vec![ErrorCode::FloatingScoreWithZeroCount]
        );
    }

    #[test]
    fn test_sinking_score_with_all_floating() {
        let candidate = raw(GameMode::Four, 4, 29000).with_floating_count(4);
        assert_eq!(
            run(&candidate, &renmei()).codes(),
            vec![ErrorCode::SinkingScoreWithAllFloating]
        );
    }

    #[test]
    fn test_top_rank_sinking_with_floating() {
        let candidate = raw(GameMode::Four, 1, 29000).with_floating_count(2);
        let result = run(&candidate, &renmei());
        assert_eq!(result.codes(), vec![ErrorCode::TopRankSinkingWithFloating]);
        assert_eq!(result.errors[0].field, "rawScore");
    }

    #[test]
    fn test_last_rank_floating_without_all_floating() {
        let candidate = raw(GameMode::Four, 4, 31000).with_floating_count(2);
        assert_eq!(
            run(&candidate, &renmei()).codes(),
            vec![ErrorCode::LastRankFloatingWithoutAllFloating]
        );
    }

    #[test]
    fn test_last_rank_floating_with_lower_start() {
        let candidate = raw(GameMode::Three, 3, 36000).with_floating_count(1);
        assert_eq!(
            run(&candidate, &lower_start_three()).codes(),
            vec![
                ErrorCode::LastRankFloatingWithoutAllFloating,
                ErrorCode::LastRankFloatingWithLowerStart,
            ]
        );
    }

    #[test]
    fn test_last_rank_at_base_with_lower_start_is_fine() {
        // Exactly at base is floating but not above it.
        let candidate = raw(GameMode::Three, 3, 35000).with_floating_count(2);
        assert!(run(&candidate, &lower_start_three()).is_valid);
    }

    #[test]
    fn test_top_points_below_minimum() {
        let result = run(&points(GameMode::Four, 1, 49.0), &m_league());
        assert_eq!(result.codes(), vec![ErrorCode::TopPointsBelowMinimum]);
        assert_eq!(
            result.errors[0].hint.as_deref(),
            Some("Final points must be at least 50")
        );
        assert!(run(&points(GameMode::Four, 1, 50.0), &m_league()).is_valid);
    }

    #[test]
    fn test_last_points_above_maximum() {
        let result = run(&points(GameMode::Four, 4, -29.9), &m_league());
        assert_eq!(result.codes(), vec![ErrorCode::LastPointsAboveMaximum]);
        assert_eq!(
            result.errors[0].hint.as_deref(),
            Some("Final points must be at most -30")
        );
        assert!(run(&points(GameMode::Four, 4, -30.0), &m_league()).is_valid);
    }

    #[test]
    fn test_three_player_last_place_bound() {
        let rules = Ruleset::fixed(
            "sanma",
            "Sanma",
            GameMode::Three,
            35000,
            40000,
            vec![20, 0, -20],
            15,
        );
        assert_eq!(
            run(&points(GameMode::Three, 3, -19.0), &rules).codes(),
            vec![ErrorCode::LastPointsAboveMaximum]
        );
        assert!(run(&points(GameMode::Three, 2, 5.0), &rules).is_valid);
    }

    #[test]
    fn test_floating_top_bound_uses_matrix_row() {
        let candidate = points(GameMode::Four, 1, 11.9).with_floating_count(1);
        assert_eq!(
            run(&candidate, &renmei()).codes(),
            vec![ErrorCode::TopPointsBelowMinimum]
        );
        let candidate = points(GameMode::Four, 1, 12.0).with_floating_count(1);
        assert!(run(&candidate, &renmei()).is_valid);
    }

    #[test]
    fn test_floating_bounds_skipped_without_floating_count() {
        assert!(run(&points(GameMode::Four, 1, -5.0), &renmei()).is_valid);
    }

    #[test]
    fn test_floating_last_bound_skipped_when_all_float() {
        // With everyone floating, last place is not below base.
        let candidate = points(GameMode::Four, 4, 3.0).with_floating_count(4);
        assert!(run(&candidate, &renmei()).is_valid);
    }

    #[test]
    fn test_floating_top_bound_skipped_when_none_float() {
        let candidate = points(GameMode::Three, 1, -3.0).with_floating_count(0);
        assert!(run(&candidate, &lower_start_three()).is_valid);
    }

    #[test]
    fn test_game_mode_mismatch_is_user_error() {
        let result = run(&points(GameMode::Four, 4, -10.0), &lower_start_three());
        assert_eq!(result.codes(), vec![ErrorCode::GameModeMismatch]);
        assert_eq!(result.errors[0].field, "gameMode");
    }

    #[test]
    fn test_missing_matrix_row_is_config_error() {
        let mut rules = renmei();
        rules.uma_matrix = Some(UmaMatrix::from_rows(vec![vec![0, 0, 0, 0]]));
        let candidate = points(GameMode::Four, 1, 20.0).with_floating_count(2);
        assert_eq!(
            validate_on(&candidate, &rules, today()),
            Err(RuleConfigError::MissingUmaRow(2))
        );
    }

    #[test]
    fn test_starting_above_base_is_config_error() {
        let mut rules = renmei();
        rules.starting_points = 35000;
        let candidate = raw(GameMode::Four, 1, 45000).with_floating_count(2);
        assert!(matches!(
            validate_on(&candidate, &rules, today()),
            Err(RuleConfigError::StartingAboveBase { .. })
        ));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let candidate = raw(GameMode::Four, 1, 29000).with_floating_count(2);
        let rules = renmei();
        assert_eq!(run(&candidate, &rules), run(&candidate, &rules));
    }
}
