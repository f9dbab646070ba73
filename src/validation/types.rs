use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Validation error codes, grouped by the stage that reports them.
///
/// - `E-00`: basic format
/// - `E-01`: entry method vs. ruleset
/// - `E-10`: floating count cannot exist under the ruleset
/// - `E-20`: raw score vs. floating count
/// - `E-30`: rank vs. raw score
/// - `E-40`: computed points
/// - `E-43` / `E-44`: final points outside what rank 1 / last place can reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
pub enum ErrorCode {
    #[strum(serialize = "E-00-01")]
    InvalidDateFormat,
    #[strum(serialize = "E-00-02")]
    FutureDate,
    #[strum(serialize = "E-00-03")]
    TooOldDate,
    #[strum(serialize = "E-00-04")]
    InvalidRank,
    #[strum(serialize = "E-00-05")]
    InvalidFinalPointsRange,
    #[strum(serialize = "E-00-06")]
    InvalidFinalPointsPrecision,
    #[strum(serialize = "E-00-07")]
    InvalidRawScoreRange,
    #[strum(serialize = "E-00-08")]
    InvalidRawScoreUnit,
    #[strum(serialize = "E-00-09")]
    InvalidChipCount,
    #[strum(serialize = "E-00-10")]
    InvalidFloatingCountRange,
    #[strum(serialize = "E-00-11")]
    GameModeMismatch,

    #[strum(serialize = "E-01-01")]
    FloatingCountWithFixedUma,
    #[strum(serialize = "E-01-02")]
    MissingFloatingCount,
    #[strum(serialize = "E-01-03")]
    MissingFinalPoints,
    #[strum(serialize = "E-01-04")]
    MissingRawScore,

    #[strum(serialize = "E-10-01")]
    ImpossibleZeroFloating,
    #[strum(serialize = "E-10-02")]
    ImpossibleAllFloating,
    #[strum(serialize = "E-10-03")]
    InvalidFloatingCountRangeForRule,

    #[strum(serialize = "E-20-01")]
    FloatingScoreWithZeroCount,
    #[strum(serialize = "E-20-02")]
    SinkingScoreWithAllFloating,
    #[strum(serialize = "E-20-03")]
    InconsistentFloatingCountWithEqualPoints,
    #[strum(serialize = "E-20-04")]
    InconsistentFloatingCountWithLowerStart,

    #[strum(serialize = "E-30-01")]
    TopRankSinkingWithFloating,
    #[strum(serialize = "E-30-02")]
    LastRankFloatingWithoutAllFloating,
    #[strum(serialize = "E-30-03")]
    LastRankFloatingWithLowerStart,
    #[strum(serialize = "E-30-04")]
    AllFloatingWithSinkingScore,
    #[strum(serialize = "E-30-05")]
    AllSinkingWithFloatingScore,

    #[strum(serialize = "E-40-01")]
    UmaNotDefined,
    #[strum(serialize = "E-40-02")]
    CalculatedPointsOutOfRange,
    #[strum(serialize = "E-40-03")]
    CalculatedPointsPrecisionError,

    #[strum(serialize = "E-43-01")]
    TopPointsBelowMinimum,

    #[strum(serialize = "E-44-01")]
    LastPointsAboveMaximum,
}

impl ErrorCode {
    /// User-facing message template.
    pub fn message(self) -> &'static str {
        use ErrorCode::*;
        match self {
            InvalidDateFormat => "The match date is not in a valid format",
            FutureDate => "The match date cannot be in the future",
            TooOldDate => "The match date cannot be more than 5 years ago",
            InvalidRank => "The rank is out of range",
            InvalidFinalPointsRange => "The final points are out of range",
            InvalidFinalPointsPrecision => "The final points have too many decimal places",
            InvalidRawScoreRange => "The raw score is out of range",
            InvalidRawScoreUnit => "The raw score is not in units of 100",
            InvalidChipCount => "The chip count is invalid",
            InvalidFloatingCountRange => "The floating count is out of range",
            GameModeMismatch => "The game mode does not match the ruleset",
            FloatingCountWithFixedUma => "A floating count is not used with a fixed-uma ruleset",
            MissingFloatingCount => "A floating-uma ruleset requires the floating count",
            MissingFinalPoints => "Rank + final points entry requires the final points",
            MissingRawScore => "Rank + raw score entry requires the raw score",
            ImpossibleZeroFloating => {
                "Zero floating players cannot occur when starting points equal base points"
            }
            ImpossibleAllFloating => {
                "Everyone floating cannot occur when starting points are below base points"
            }
            InvalidFloatingCountRangeForRule => "This floating count cannot occur under the ruleset",
            FloatingScoreWithZeroCount => {
                "Your raw score is floating but the floating count is 0"
            }
            SinkingScoreWithAllFloating => {
                "Your raw score is sinking but every player is marked as floating"
            }
            InconsistentFloatingCountWithEqualPoints => {
                "With starting points equal to base points the floating count must be at least 1"
            }
            InconsistentFloatingCountWithLowerStart => {
                "With starting points below base points not every player can float"
            }
            TopRankSinkingWithFloating => {
                "Rank 1 is below base points although at least two players are floating"
            }
            LastRankFloatingWithoutAllFloating => {
                "Last place is above base points although few players are floating"
            }
            LastRankFloatingWithLowerStart => {
                "Last place cannot be above base points when starting points are below base points"
            }
            AllFloatingWithSinkingScore => "Every player is floating but your raw score is sinking",
            AllSinkingWithFloatingScore => "Every player is sinking but your raw score is floating",
            UmaNotDefined => "The ruleset defines no uma for this rank or floating count",
            CalculatedPointsOutOfRange => "The calculated final points are out of range",
            CalculatedPointsPrecisionError => "The calculated final points have invalid precision",
            TopPointsBelowMinimum => "Final points for rank 1 are below the ruleset minimum",
            LastPointsAboveMaximum => "Final points for last place are above the ruleset maximum",
        }
    }

    /// Hint template; `{name}` placeholders are filled in by [`format_template`].
    pub fn hint(self) -> &'static str {
        use ErrorCode::*;
        match self {
            InvalidDateFormat => "Enter the date as YYYY-MM-DD",
            FutureDate => "Choose today or an earlier date",
            TooOldDate => "Choose a date within the last 5 years",
            InvalidRank => "Enter a rank from 1 to {maxRank}",
            InvalidFinalPointsRange => "Enter a value from -999.9 to 999.9",
            InvalidFinalPointsPrecision => "Use at most one decimal place",
            InvalidRawScoreRange => "Enter a value from -999900 to 999900",
            InvalidRawScoreUnit => "The last two digits must be 00",
            InvalidChipCount => "Enter an integer of 0 or more",
            InvalidFloatingCountRange => "Enter a value from 0 to {maxFloating}",
            GameModeMismatch => "This ruleset is for {gameMode}-player games",
            FloatingCountWithFixedUma => "Remove the floating count",
            MissingFloatingCount => "Enter the floating count",
            MissingFinalPoints => "Enter the final points",
            MissingRawScore => "Enter the raw score",
            ImpossibleZeroFloating => "Set the floating count to 1 or more",
            ImpossibleAllFloating => "Set the floating count to {maxFloating} or less",
            InvalidFloatingCountRangeForRule => "Check the floating count",
            FloatingScoreWithZeroCount => "Set the floating count to 1 or more",
            SinkingScoreWithAllFloating => "Check the floating count or raw score",
            InconsistentFloatingCountWithEqualPoints => "Set the floating count to 1 or more",
            InconsistentFloatingCountWithLowerStart => "Check the floating count or raw score",
            TopRankSinkingWithFloating
            | LastRankFloatingWithoutAllFloating
            | LastRankFloatingWithLowerStart => "Check the raw score or rank",
            AllFloatingWithSinkingScore | AllSinkingWithFloatingScore => {
                "Check the floating count or raw score"
            }
            UmaNotDefined => "Check the ruleset or floating count",
            CalculatedPointsOutOfRange => "Check the raw score or rank",
            CalculatedPointsPrecisionError => "This may be a system error",
            TopPointsBelowMinimum => "Final points must be at least {minPoints}",
            LastPointsAboveMaximum => "Final points must be at most {maxPoints}",
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        ErrorCode::from_str(&code)
            .map_err(|_| serde::de::Error::custom(format!("unknown error code '{}'", code)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Replace `{key}` placeholders with the given values.
pub fn format_template(template: &str, params: &[(&str, String)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |text, (key, value)| {
            text.replace(&format!("{{{}}}", key), value)
        })
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub code: ErrorCode,
    pub message: String,
    pub severity: Severity,
    #[serde(default)]
    pub hint: Option<String>,
}

impl ValidationError {
    pub fn new(field: &str, code: ErrorCode) -> Self {
        Self::with_params(field, code, &[])
    }

    /// Error whose message and hint templates are filled from `params`.
    pub fn with_params(field: &str, code: ErrorCode, params: &[(&str, String)]) -> Self {
        Self {
            field: field.to_string(),
            code,
            message: format_template(code.message(), params),
            severity: Severity::Error,
            hint: Some(format_template(code.hint(), params)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn valid() -> Self {
        Self::from_errors(Vec::new())
    }

    pub fn codes(&self) -> Vec<ErrorCode> {
        self.errors.iter().map(|e| e.code).collect()
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Append more errors, keeping `is_valid` in step.
    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
        self.is_valid = self.errors.is_empty();
    }
}
