pub mod formatter;

pub use formatter::{
    format_calculation, format_outcome, format_points, format_ruleset_table,
    format_validation_errors, should_use_colors,
};
