pub mod config;
pub mod error;
pub mod output;
pub mod ruleset;
pub mod scoring;
pub mod validation;

pub use error::RuleConfigError;
pub use ruleset::{GameMode, Ruleset, UmaMatrix};
pub use scoring::{calculate_final_points, calculate_provisional_points, PointCalculation, PointResult};
pub use validation::{validate, validate_on, EntryMethod, ErrorCode, MatchCandidate, ValidationResult};
