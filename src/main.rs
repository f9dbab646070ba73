use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use janlog::config::{self, Config};
use janlog::ruleset::common_templates;
use janlog::scoring::{self, PointResult};
use janlog::validation::stages::{validate_floating_count_range, validate_rank, validate_raw_score};
use janlog::validation::{EntryMethod, MatchCandidate, ValidationError, ValidationResult};
use janlog::{output, RuleConfigError, Ruleset};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_RULESET: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate final points from rank and raw score
    Calc {
        /// Finishing rank (1-based)
        #[arg(short, long, allow_negative_numbers = true)]
        rank: i32,
        /// Raw score at the end of the match
        #[arg(short = 's', long, allow_negative_numbers = true)]
        raw_score: i32,
        /// Players at or above base points (floating-uma rulesets)
        #[arg(short, long)]
        floating_count: Option<u8>,
        /// Ruleset id (defaults to the configured default)
        #[arg(long)]
        ruleset: Option<String>,
    },
    /// Calculate provisional final points from rank alone
    Provisional {
        #[arg(short, long)]
        rank: i32,
        #[arg(short, long)]
        floating_count: Option<u8>,
        #[arg(long)]
        ruleset: Option<String>,
    },
    /// Validate a match entry and show the points it resolves to
    Validate {
        /// Match date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        #[arg(short, long, allow_negative_numbers = true)]
        rank: i32,
        /// How the result was recorded
        #[arg(short, long, default_value = "rank_plus_raw")]
        entry_method: EntryMethod,
        #[arg(short = 'p', long, allow_negative_numbers = true)]
        final_points: Option<f64>,
        #[arg(short = 's', long, allow_negative_numbers = true)]
        raw_score: Option<i32>,
        #[arg(short, long, allow_negative_numbers = true)]
        floating_count: Option<i32>,
        #[arg(long, allow_negative_numbers = true)]
        chips: Option<i32>,
        #[arg(long)]
        ruleset: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List configured rulesets
    Rules,
    /// List built-in ruleset templates
    Templates,
    /// Write a starter config file from the built-in templates
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "janlog")]
#[command(about = "Mahjong match scoring and entry validation", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/janlog/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "janlog=debug" } else { "janlog=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn exit_ruleset_error(ruleset: &Ruleset, err: RuleConfigError) -> ! {
    eprintln!("Ruleset '{}' is misconfigured: {}", ruleset.ruleset_id, err);
    std::process::exit(EXIT_RULESET);
}

fn select_ruleset<'a>(config: &'a Config, id: Option<&str>) -> &'a Ruleset {
    match config.select_ruleset(id) {
        Ok(ruleset) => {
            debug!(ruleset = %ruleset.ruleset_id, "selected ruleset");
            ruleset
        }
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

/// Exit with the formatted errors if any input check failed.
fn reject_invalid(errors: Vec<ValidationError>, use_colors: bool) {
    if !errors.is_empty() {
        let result = ValidationResult::from_errors(errors);
        eprintln!("{}", output::format_validation_errors(&result, use_colors));
        std::process::exit(EXIT_INVALID);
    }
}

/// Check the inputs shared by `calc` and `provisional`, exiting on bad input.
fn check_point_inputs(
    ruleset: &Ruleset,
    rank: i32,
    raw_score: Option<i32>,
    floating_count: Option<u8>,
    use_colors: bool,
) {
    let mut errors = validate_rank(rank, ruleset.game_mode);
    if let Some(score) = raw_score {
        errors.extend(validate_raw_score(score));
    }
    if let Some(count) = floating_count {
        errors.extend(validate_floating_count_range(
            i32::from(count),
            ruleset.game_mode,
        ));
    }
    reject_invalid(errors, use_colors);
}

fn exit_missing_floating_count(ruleset: &Ruleset) -> ! {
    eprintln!(
        "Ruleset '{}' uses floating uma; pass --floating-count",
        ruleset.ruleset_id
    );
    std::process::exit(EXIT_INVALID);
}

fn print_points(result: &PointResult, use_colors: bool) {
    println!(
        "{}",
        output::format_calculation(&result.calculation, use_colors)
    );
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    // Init and templates never read the config file
    match cli.command {
        Commands::Init { force } => {
            let path = match config_path.map_or_else(config::get_config_path, Ok) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            if let Err(e) = config::write_starter_config(&path, force) {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Config written to {}", path.display());
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Templates => {
            let templates = common_templates();
            println!(
                "{}",
                output::format_ruleset_table(&templates, None, output::should_use_colors())
            );
            std::process::exit(EXIT_SUCCESS);
        }
        _ => {}
    }

    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate every ruleset at startup
    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Calc {
            rank,
            raw_score,
            floating_count,
            ruleset,
        } => {
            let ruleset = select_ruleset(&config, ruleset.as_deref());
            check_point_inputs(ruleset, rank, Some(raw_score), floating_count, use_colors);
            let result = match (ruleset.use_floating_uma, floating_count) {
                (true, Some(count)) => {
                    scoring::calculate_breakdown(raw_score, rank, count, ruleset)
                }
                (true, None) => exit_missing_floating_count(ruleset),
                (false, _) => scoring::calculate_final_points(ruleset, rank, raw_score),
            };
            match result {
                Ok(result) => print_points(&result, use_colors),
                Err(e) => exit_ruleset_error(ruleset, e),
            }
        }
        Commands::Provisional {
            rank,
            floating_count,
            ruleset,
        } => {
            let ruleset = select_ruleset(&config, ruleset.as_deref());
            check_point_inputs(ruleset, rank, None, floating_count, use_colors);
            let mut candidate = MatchCandidate::new(
                "",
                ruleset.game_mode,
                EntryMethod::ProvisionalRankOnly,
                rank,
            );
            candidate.floating_count = floating_count.map(i32::from);
            match scoring::resolve_final_points(&candidate, ruleset) {
                Ok(Some(resolved)) => match resolved.calculation {
                    Some(calc) => println!("{}", output::format_calculation(&calc, use_colors)),
                    None => println!("{}", output::format_points(resolved.final_points)),
                },
                Ok(None) => exit_missing_floating_count(ruleset),
                Err(e) => exit_ruleset_error(ruleset, e),
            }
        }
        Commands::Validate {
            date,
            rank,
            entry_method,
            final_points,
            raw_score,
            floating_count,
            chips,
            ruleset,
            json,
        } => {
            let ruleset = select_ruleset(&config, ruleset.as_deref());
            let candidate = MatchCandidate {
                date,
                game_mode: ruleset.game_mode,
                entry_method,
                rank,
                final_points,
                raw_score,
                chip_count: chips,
                floating_count,
            };

            let outcome = match scoring::score_match(&candidate, ruleset) {
                Ok(outcome) => outcome,
                Err(e) => exit_ruleset_error(ruleset, e),
            };

            if json {
                match serde_json::to_string_pretty(&outcome) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {}", e);
                        std::process::exit(EXIT_INVALID);
                    }
                }
            } else {
                println!("{}", output::format_outcome(&outcome, use_colors));
            }

            if !outcome.validation.is_valid {
                std::process::exit(EXIT_INVALID);
            }
        }
        Commands::Rules => {
            println!(
                "{}",
                output::format_ruleset_table(
                    &config.rulesets,
                    config.default_ruleset.as_deref(),
                    use_colors
                )
            );
        }
        Commands::Init { .. } | Commands::Templates => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
