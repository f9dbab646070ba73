use super::floating::{validate_uma_array, validate_uma_matrix};
use super::types::Ruleset;

pub const MIN_POINTS_SETTING: i32 = 10_000;
pub const MAX_POINTS_SETTING: i32 = 50_000;

/// Validate a ruleset at creation/load time.
/// Returns all validation errors at once (not just the first).
pub fn validate_ruleset(ruleset: &Ruleset) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if ruleset.rule_name.trim().is_empty() {
        errors.push("ruleName: must not be empty".to_string());
    }

    for (field, value) in [
        ("startingPoints", ruleset.starting_points),
        ("basePoints", ruleset.base_points),
    ] {
        if !(MIN_POINTS_SETTING..=MAX_POINTS_SETTING).contains(&value) {
            errors.push(format!(
                "{}: must be between {} and {} (got {})",
                field, MIN_POINTS_SETTING, MAX_POINTS_SETTING, value
            ));
        }
    }

    let points_ordered = ruleset.base_points >= ruleset.starting_points;
    if !points_ordered {
        errors.push(format!(
            "basePoints: must be at least startingPoints ({} < {})",
            ruleset.base_points, ruleset.starting_points
        ));
    }

    for err in validate_uma_array(&ruleset.uma, ruleset.game_mode) {
        errors.push(format!("uma: {}", err));
    }

    if ruleset.use_floating_uma {
        match &ruleset.uma_matrix {
            None => errors.push("umaMatrix: required when useFloatingUma is true".to_string()),
            // No legal floating range exists until the points are ordered.
            Some(matrix) if points_ordered => {
                if let Ok(matrix_errors) = validate_uma_matrix(
                    matrix,
                    ruleset.game_mode,
                    ruleset.starting_points,
                    ruleset.base_points,
                ) {
                    errors.extend(matrix_errors.into_iter().map(|err| format!("umaMatrix: {}", err)));
                }
            }
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::{GameMode, UmaMatrix};

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

    #[test]
    fn test_valid_fixed_ruleset() {
        assert!(validate_ruleset(&m_league()).is_ok());
    }

    #[test]
    fn test_valid_floating_ruleset() {
        let rules = Ruleset::fixed(
            "floating-three",
            "Floating three",
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
        ]));
        assert!(validate_ruleset(&rules).is_ok());
    }

    #[test]
    fn test_base_below_starting() {
        let mut rules = m_league();
        rules.starting_points = 35000;
        let errors = validate_ruleset(&rules).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("basePoints"));
    }

    #[test]
    fn test_points_out_of_range() {
        let mut rules = m_league();
        rules.starting_points = 5000;
        let errors = validate_ruleset(&rules).unwrap_err();
        assert!(errors[0].starts_with("startingPoints"));
    }

    #[test]
    fn test_floating_without_matrix() {
        let mut rules = m_league();
        rules.use_floating_uma = true;
        let errors = validate_ruleset(&rules).unwrap_err();
        assert_eq!(errors, vec!["umaMatrix: required when useFloatingUma is true".to_string()]);
    }

    #[test]
    fn test_floating_matrix_errors_prefixed() {
        let rules = m_league().with_uma_matrix(UmaMatrix::from_rows(vec![
            vec![0, 0, 0, 0],
            vec![12, -1, -3, -8],
        ]));
        let errors = validate_ruleset(&rules).unwrap_err();
        assert!(errors.iter().all(|e| e.starts_with("umaMatrix: ")));
        assert!(errors.iter().any(|e| e.contains("floating count 2: uma row is missing")));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut rules = m_league();
        rules.rule_name = " ".to_string(); // Error 1
        rules.uma = vec![30, 10, -10]; // Error 2
        rules.base_points = 60000; // Error 3
        let errors = validate_ruleset(&rules).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
