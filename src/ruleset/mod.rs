pub mod floating;
pub mod matrix;
pub mod templates;
pub mod types;
pub mod validation;

pub use floating::{
    get_valid_floating_counts, validate_floating_count, validate_uma_array, validate_uma_matrix,
};
pub use matrix::UmaMatrix;
pub use templates::{calculate_oka, common_templates, suggest_uma};
pub use types::{GameMode, Ruleset};
pub use validation::validate_ruleset;
