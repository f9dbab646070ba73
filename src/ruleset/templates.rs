use super::types::{GameMode, Ruleset};

/// Commonly played rulesets offered as starting points.
pub fn common_templates() -> Vec<Ruleset> {
    vec![
        Ruleset::fixed(
            "m-league",
            "M-League (4 players)",
            GameMode::Four,
            25000,
            30000,
            vec![30, 10, -10, -30],
            20,
        ),
        Ruleset::fixed(
            "free-standard",
            "Free parlor standard (4 players)",
            GameMode::Four,
            25000,
            30000,
            vec![20, 10, -10, -20],
            20,
        ),
        Ruleset::fixed(
            "competition",
            "Competition (4 players)",
            GameMode::Four,
            25000,
            30000,
            vec![15, 5, -5, -15],
            20,
        ),
        Ruleset::fixed(
            "sanma-standard",
            "Three-player standard",
            GameMode::Three,
            35000,
            40000,
            vec![20, 0, -20],
            15,
        ),
        Ruleset::fixed(
            "sanma-high-rate",
            "Three-player high rate",
            GameMode::Three,
            25000,
            35000,
            vec![30, 0, -30],
            30,
        ),
    ]
}

/// Suggest an uma table from the gap between starting and base points.
pub fn suggest_uma(starting_points: i32, base_points: i32, game_mode: GameMode) -> Vec<i32> {
    let point_diff = base_points - starting_points;
    match (game_mode, point_diff) {
        (GameMode::Three, 10_000) => vec![30, 0, -30],
        (GameMode::Three, _) => vec![20, 0, -20],
        (GameMode::Four, 10_000) => vec![40, 20, -20, -40],
        (GameMode::Four, _) => vec![30, 10, -10, -30],
    }
}

/// Oka implied by the points every player pays in: `(base - starting) * players / 1000`.
pub fn calculate_oka(starting_points: i32, base_points: i32, game_mode: GameMode) -> i32 {
    let point_diff = base_points - starting_points;
    (point_diff * i32::from(game_mode.player_count())).div_euclid(1000)
}
