#![allow(dead_code)]

use chrono::NaiveDate;
use janlog::validation::{EntryMethod, MatchCandidate};
use janlog::{GameMode, Ruleset, UmaMatrix};

pub const MATCH_DATE: &str = "2024-01-15";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Four players, 25000 start / 30000 base, fixed uma, oka 20.
pub fn m_league() -> Ruleset {
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

/// Four players starting at base points, floating uma, no oka.
pub fn floating_four() -> Ruleset {
    Ruleset::fixed(
        "renmei",
        "Floating four",
        GameMode::Four,
        30000,
        30000,
        vec![30, 10, -10, -30],
        0,
    )
    .with_uma_matrix(UmaMatrix::from_rows(vec![
        vec![0, 0, 0, 0],
        vec![12, -1, -3, -8],
        vec![8, 4, -4, -8],
        vec![8, 3, 1, -12],
        vec![0, 0, 0, 0],
    ]))
}

/// Three players starting below base points, floating uma, oka 15.
pub fn floating_three_lower_start() -> Ruleset {
    Ruleset::fixed(
        "three-lower",
        "Lower start three",
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
    ]))
}

pub fn raw_entry(mode: GameMode, rank: i32, raw_score: i32) -> MatchCandidate {
    MatchCandidate::new(MATCH_DATE, mode, EntryMethod::RankPlusRaw, rank).with_raw_score(raw_score)
}

pub fn points_entry(mode: GameMode, rank: i32, final_points: f64) -> MatchCandidate {
    MatchCandidate::new(MATCH_DATE, mode, EntryMethod::RankPlusPoints, rank)
        .with_final_points(final_points)
}
