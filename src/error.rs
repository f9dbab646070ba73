use thiserror::Error;

/// A defect in the ruleset itself, as opposed to a defect in the match entry.
///
/// These are never folded into a `ValidationResult`; they mean the ruleset
/// must be fixed before any match can be scored against it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleConfigError {
    #[error("starting points ({starting}) must not exceed base points ({base})")]
    StartingAboveBase { starting: i32, base: i32 },

    #[error("floating uma is enabled but no uma matrix is configured")]
    MissingUmaMatrix,

    #[error("uma matrix has no row for floating count {0}")]
    MissingUmaRow(u8),

    #[error("uma for rank {rank} is not defined")]
    UmaNotDefined { rank: i32 },
}
