//! Structural checks for floating-uma configuration.
//!
//! The number of floating players (raw score at or above base points) that
//! can actually occur depends on how the starting points relate to the base
//! points. Matrix rows for counts that cannot occur must be all zeros so the
//! matrix stays total over `0..=player_count`.

use super::matrix::UmaMatrix;
use super::types::GameMode;
use crate::error::RuleConfigError;

/// Inclusive `(min, max)` range of floating counts reachable under the given points.
///
/// - starting == base: everyone starts at break-even, so at least one player floats.
/// - starting < base: everyone can sink, but not everyone can float.
/// - starting > base: invalid ruleset.
pub fn get_valid_floating_counts(
    starting_points: i32,
    base_points: i32,
    game_mode: GameMode,
) -> Result<(u8, u8), RuleConfigError> {
    let players = game_mode.player_count();
    if starting_points == base_points {
        Ok((1, players))
    } else if starting_points < base_points {
        Ok((0, players - 1))
    } else {
        Err(RuleConfigError::StartingAboveBase {
            starting: starting_points,
            base: base_points,
        })
    }
}

/// Check one uma row. Returns all violations (empty means valid).
///
/// A length mismatch skips the sum check.
pub fn validate_uma_array(uma: &[i32], game_mode: GameMode) -> Vec<String> {
    let expected = game_mode.player_count() as usize;
    if uma.len() != expected {
        return vec![format!(
            "uma must have {} entries for a {}-player game (got {})",
            expected,
            game_mode,
            uma.len()
        )];
    }

    let total: i32 = uma.iter().sum();
    if total != 0 {
        return vec![format!("uma must sum to 0 (currently {})", total)];
    }

    Vec::new()
}

/// Check a whole floating-uma matrix against the reachable floating counts.
pub fn validate_uma_matrix(
    matrix: &UmaMatrix,
    game_mode: GameMode,
    starting_points: i32,
    base_points: i32,
) -> Result<Vec<String>, RuleConfigError> {
    let (min_count, max_count) =
        get_valid_floating_counts(starting_points, base_points, game_mode)?;
    let players = game_mode.player_count();
    let mut errors = Vec::new();

    for count in 0..=players {
        let Some(row) = matrix.row(count) else {
            errors.push(format!("floating count {}: uma row is missing", count));
            continue;
        };

        if (min_count..=max_count).contains(&count) {
            errors.extend(
                validate_uma_array(row, game_mode)
                    .into_iter()
                    .map(|err| format!("floating count {}: {}", count, err)),
            );
        } else {
            let zeros = vec![0; players as usize];
            if row != zeros.as_slice() {
                errors.push(format!(
                    "floating count {} cannot occur under this ruleset, so its uma row must be {:?}",
                    count, zeros
                ));
            }
        }
    }

    for (count, _) in matrix.iter().filter(|(count, _)| *count > players) {
        errors.push(format!(
            "floating count {}: exceeds the {} players of a {}-player game",
            count, players, game_mode
        ));
    }

    Ok(errors)
}

/// Range check for a single observed floating count.
pub fn validate_floating_count(
    count: i32,
    starting_points: i32,
    base_points: i32,
    game_mode: GameMode,
) -> Result<Vec<String>, RuleConfigError> {
    let (min_count, max_count) =
        get_valid_floating_counts(starting_points, base_points, game_mode)?;
    if count < i32::from(min_count) || count > i32::from(max_count) {
        Ok(vec![format!(
            "floating count must be between {} and {}",
            min_count, max_count
        )])
    } else {
        Ok(Vec::new())
    }
}
