//! One-shot tournament analysis
//!
//! `TournamentResult` bundles every statistic the engine derives from a
//! recorded tournament. All fields are plain data, so a result serializes to
//! JSON in one piece for storage or transport.

use serde::{Deserialize, Serialize};

use crate::error::PayoffError;
use crate::game::Game;
use crate::interaction::InteractionSet;
use crate::normalise::{normalised_payoff, normalised_payoff_diff_length, normalised_scores};
use crate::payoff::{
    matching_shapes, payoff_table, scores, LengthTable, PayoffMatrix, PayoffTable, ScoreSeries,
};
use crate::ranking::{
    payoff_diffs_means, payoff_diffs_means_diff_length, ranked_names, ranking, score_diffs,
    score_diffs_diff_length, wins, WinMatrix,
};

/// Per-player per-repetition rates for variable-length trials.
///
/// Each opponent's contribution is normalized by that pairing's own round
/// count before averaging, so entry `(i, r)` is the mean of `N − 1`
/// per-round rates rather than a ratio of totals.
fn normalised_rates(
    table: &PayoffTable,
    lengths: &LengthTable,
) -> Result<ScoreSeries, PayoffError> {
    let (n, repetitions) = matching_shapes(table, lengths)?;
    if n == 0 {
        return Ok(Vec::new());
    }
    if n < 2 {
        return Err(PayoffError::DivideByZero(
            "normalising scores requires at least two players".to_string(),
        ));
    }
    let opponents = (n - 1) as f64;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let mut series = Vec::with_capacity(repetitions);
        for r in 0..repetitions {
            let mut rate = 0.0;
            for j in 0..n {
                if j == i {
                    continue;
                }
                let length = lengths[i][j][r];
                if length == 0 {
                    return Err(PayoffError::DivideByZero(format!(
                        "pairing ({}, {}) repetition {} has zero recorded rounds",
                        i, j, r
                    )));
                }
                rate += table[i][j][r] / length as f64;
            }
            series.push(rate / opponents);
        }
        out.push(series);
    }
    Ok(out)
}

/// Every statistic derived from one recorded tournament
///
/// Shapes follow the usual conventions: `N×N×R` tables over the repetition
/// axis, `N×N` matrices, `N×R` per-player series. Player order in every
/// field matches the index order of `players`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentResult {
    /// Player display names, in index order.
    pub players: Vec<String>,
    /// Repetitions recorded per pairing.
    pub repetitions: usize,
    /// Shared trial length, or `None` for variable-length tournaments.
    pub turns: Option<usize>,
    /// Aggregate payoff per ordered pair per repetition.
    pub payoff: PayoffTable,
    /// Rounds actually played per ordered pair per repetition.
    pub lengths: LengthTable,
    /// Total payoff per player per repetition, self-play excluded.
    pub scores: ScoreSeries,
    /// Scores as per-round per-opponent rates.
    pub normalised_scores: ScoreSeries,
    /// Mean per-round rate per ordered pair.
    pub payoff_means: PayoffMatrix,
    /// Population standard deviation of per-round rates per ordered pair.
    pub payoff_stddevs: PayoffMatrix,
    /// Mean rate advantage per matchup; antisymmetric with a zero diagonal.
    pub payoff_diffs_means: PayoffMatrix,
    /// Signed rate difference per matchup per repetition.
    pub score_diffs: PayoffTable,
    /// Player indices, best total first.
    pub ranking: Vec<usize>,
    /// Display names in ranking order.
    pub ranked_names: Vec<String>,
    /// Strict-win counts per player per repetition.
    pub wins: WinMatrix,
}

impl TournamentResult {
    /// Analyse a fixed-length tournament
    ///
    /// `players` supplies display names by index and must cover every player
    /// the set references. `turns` is the shared trial length every
    /// normalization divides by.
    pub fn from_interactions(
        players: &[String],
        interactions: &InteractionSet,
        game: &Game,
        turns: usize,
    ) -> Result<Self, PayoffError> {
        let n = interactions.player_count();
        if players.len() != n {
            return Err(PayoffError::ShapeMismatch(format!(
                "{} player names supplied for {} players",
                players.len(),
                n
            )));
        }
        let repetitions = interactions.repetition_count()?;
        let (payoff, lengths) = payoff_table(interactions, game)?;
        let score_series = scores(&payoff)?;
        let normalised = normalised_scores(&score_series, turns)?;
        let (payoff_means, payoff_stddevs) = normalised_payoff(&payoff, turns)?;
        let diff_means = payoff_diffs_means(&payoff, turns)?;
        let diffs = score_diffs(&payoff, turns)?;
        let order = ranking(&score_series);
        let names = ranked_names(players, &order)?;
        let win_counts = wins(&payoff)?;
        log::debug!("analyzed {} players over {} repetitions", n, repetitions);
        Ok(Self {
            players: players.to_vec(),
            repetitions,
            turns: Some(turns),
            payoff,
            lengths,
            scores: score_series,
            normalised_scores: normalised,
            payoff_means,
            payoff_stddevs,
            payoff_diffs_means: diff_means,
            score_diffs: diffs,
            ranking: order,
            ranked_names: names,
            wins: win_counts,
        })
    }

    /// Analyse a variable-length tournament
    ///
    /// No shared turn count exists, so every normalization divides by the
    /// round count each trial actually recorded; `turns` is `None` in the
    /// result. The ranking follows summed per-round rates, because raw
    /// totals are not comparable across unequal trial lengths.
    pub fn from_interactions_diff_length(
        players: &[String],
        interactions: &InteractionSet,
        game: &Game,
    ) -> Result<Self, PayoffError> {
        let n = interactions.player_count();
        if players.len() != n {
            return Err(PayoffError::ShapeMismatch(format!(
                "{} player names supplied for {} players",
                players.len(),
                n
            )));
        }
        let repetitions = interactions.repetition_count()?;
        let (payoff, lengths) = payoff_table(interactions, game)?;
        let score_series = scores(&payoff)?;
        let normalised = normalised_rates(&payoff, &lengths)?;
        let (payoff_means, payoff_stddevs) = normalised_payoff_diff_length(&payoff, &lengths)?;
        let diff_means = payoff_diffs_means_diff_length(&payoff, &lengths)?;
        let diffs = score_diffs_diff_length(&payoff, &lengths)?;
        let order = ranking(&normalised);
        let names = ranked_names(players, &order)?;
        let win_counts = wins(&payoff)?;
        log::debug!(
            "analyzed {} players over {} variable-length repetitions",
            n,
            repetitions
        );
        Ok(Self {
            players: players.to_vec(),
            repetitions,
            turns: None,
            payoff,
            lengths,
            scores: score_series,
            normalised_scores: normalised,
            payoff_means,
            payoff_stddevs,
            payoff_diffs_means: diff_means,
            score_diffs: diffs,
            ranking: order,
            ranked_names: names,
            wins: win_counts,
        })
    }
}
