use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::ruleset::Ruleset;
use crate::scoring::{MatchOutcome, PointCalculation, ResolvedScore};
use crate::validation::ValidationResult;

/// Format points with an explicit sign and one decimal ("+65.1", "-15.0", "0.0")
pub fn format_points(points: f64) -> String {
    if points == 0.0 {
        "0.0".to_string()
    } else {
        format!("{:+.1}", points)
    }
}

fn format_signed(value: i32) -> String {
    if value == 0 {
        "0".to_string()
    } else {
        format!("{:+}", value)
    }
}

/// Format a point calculation as a short multi-line breakdown
pub fn format_calculation(calc: &PointCalculation, use_colors: bool) -> String {
    let points = format_points(calc.final_points);
    let headline = if use_colors {
        let colored = if calc.final_points < 0.0 {
            points.red().bold().to_string()
        } else {
            points.green().bold().to_string()
        };
        format!("{} {}", "Final points:".bold(), colored)
    } else {
        format!("Final points: {}", points)
    };

    let mut lines = vec![
        headline,
        format!(
            "  Raw score:  {} (base {}) -> {}",
            calc.raw_score,
            calc.base_points,
            format_points(calc.base_calculation)
        ),
        format!("  Uma:        {} (rank {})", format_signed(calc.uma_points), calc.rank),
        format!("  Oka:        {}", format_signed(calc.oka_points)),
    ];

    let formula = if use_colors {
        calc.formula.dimmed().to_string()
    } else {
        calc.formula.clone()
    };
    lines.push(format!("  Formula:    {}", formula));

    if let Some(raw) = calc.provisional_raw_score {
        let note = format!("  Provisional: raw score assumed as {} from rank", raw);
        lines.push(if use_colors {
            note.yellow().to_string()
        } else {
            note
        });
    }

    lines.join("\n")
}

/// Format validation errors, one per entry with its hint indented below
pub fn format_validation_errors(result: &ValidationResult, use_colors: bool) -> String {
    if result.is_valid {
        return if use_colors {
            "Valid entry".green().to_string()
        } else {
            "Valid entry".to_string()
        };
    }

    result
        .errors
        .iter()
        .map(|error| {
            let code = error.code.to_string();
            let head = if use_colors {
                format!("{} {}: {}", code.red().bold(), error.field.cyan(), error.message)
            } else {
                format!("{} {}: {}", code, error.field, error.message)
            };
            match &error.hint {
                Some(hint) if use_colors => format!("{}\n    {}", head, hint.dimmed()),
                Some(hint) => format!("{}\n    {}", head, hint),
                None => head,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_resolved(score: &ResolvedScore, use_colors: bool) -> String {
    let mut text = match &score.calculation {
        Some(calc) => format_calculation(calc, use_colors),
        None => format!("Final points: {} (as entered)", format_points(score.final_points)),
    };
    if let Some(chips) = score.chip_count {
        text.push_str(&format!("\n  Chips:      {}", chips));
    }
    text
}

/// Format the result of validating and scoring one match entry
pub fn format_outcome(outcome: &MatchOutcome, use_colors: bool) -> String {
    let status = format_validation_errors(&outcome.validation, use_colors);
    match &outcome.score {
        Some(score) if outcome.validation.is_valid => {
            format!("{}\n{}", status, format_resolved(score, use_colors))
        }
        _ => status,
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn format_uma(ruleset: &Ruleset) -> String {
    if ruleset.use_floating_uma {
        "floating".to_string()
    } else {
        let entries: Vec<String> = ruleset.uma.iter().map(|u| format_signed(*u)).collect();
        entries.join("/")
    }
}

/// Format rulesets as a table: id, mode, points, uma, oka, name
/// The default ruleset is marked with `*`. Names are truncated to the terminal width.
pub fn format_ruleset_table(
    rulesets: &[Ruleset],
    default_id: Option<&str>,
    use_colors: bool,
) -> String {
    format_ruleset_table_with_width(rulesets, default_id, use_colors, get_terminal_width())
}

fn format_ruleset_table_with_width(
    rulesets: &[Ruleset],
    default_id: Option<&str>,
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if rulesets.is_empty() {
        return "No rulesets configured.".to_string();
    }

    let id_width = rulesets
        .iter()
        .map(|r| r.ruleset_id.chars().count())
        .max()
        .unwrap_or(0);
    let umas: Vec<String> = rulesets.iter().map(format_uma).collect();
    let uma_width = umas.iter().map(|u| u.len()).max().unwrap_or(0);
    let separator = "  ";

    rulesets
        .iter()
        .zip(umas.iter())
        .map(|(ruleset, uma)| {
            let marker = if default_id == Some(ruleset.ruleset_id.as_str()) {
                "*"
            } else {
                " "
            };
            let id = format!("{:<width$}", ruleset.ruleset_id, width = id_width);
            let points = format!("{}/{}", ruleset.starting_points, ruleset.base_points);
            let fixed = format!(
                "{} {}{}{:<5}{}{:<11}{}{:<width$}{}oka {:<3}{}",
                marker,
                id,
                separator,
                ruleset.game_mode.as_ref(),
                separator,
                points,
                separator,
                uma,
                separator,
                ruleset.oka,
                separator,
                width = uma_width
            );

            let fixed_width = fixed.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&ruleset.rule_name, width - fixed_width)
                }
                Some(_) => truncate_name(&ruleset.rule_name, 20),
                None => ruleset.rule_name.clone(),
            };

            if use_colors {
                format!("{}{}", fixed, name.dimmed())
            } else {
                format!("{}{}", fixed, name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
