pub mod floating;
pub mod points;
pub mod resolve;

pub use floating::{calculate_breakdown, calculate_points, is_player_floating};
pub use points::{
    calculate_final_points, calculate_provisional_points, provisional_raw_score, round_to_tenth,
    PointCalculation, PointResult,
};
pub use resolve::{resolve_final_points, score_match, score_match_on, MatchOutcome, ResolvedScore};
