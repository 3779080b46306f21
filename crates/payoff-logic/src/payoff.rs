//! Payoff table assembly and score aggregation
//!
//! Tables are plain nested vectors with documented shapes: `N×N` matrices,
//! `N×N×R` tables over the repetition axis, `N×R` per-player series. Every
//! builder returns a new structure and leaves its inputs untouched.

use crate::error::PayoffError;
use crate::game::Game;
use crate::interaction::{interaction_payoff, InteractionSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Aggregate payoff per ordered pair per repetition (N×N×R).
pub type PayoffTable = Vec<Vec<Vec<f64>>>;

/// Aggregate payoff per ordered pair of a single repetition (N×N).
pub type PayoffMatrix = Vec<Vec<f64>>;

/// Rounds actually played per ordered pair per repetition (N×N×R).
pub type LengthTable = Vec<Vec<Vec<usize>>>;

/// Per-player totals against all opponents, one entry per repetition (N×R).
pub type ScoreSeries = Vec<Vec<f64>>;

// ──────────────────────────── Shape validation ────────────────────────────

/// Validate an N×N×R table and return `(n, repetitions)`.
pub(crate) fn table_shape<T>(table: &[Vec<Vec<T>>]) -> Result<(usize, usize), PayoffError> {
    let n = table.len();
    let repetitions = table
        .first()
        .and_then(|row| row.first())
        .map_or(0, Vec::len);
    for (i, row) in table.iter().enumerate() {
        if row.len() != n {
            return Err(PayoffError::ShapeMismatch(format!(
                "row {} has {} columns, expected {}",
                i,
                row.len(),
                n
            )));
        }
        for (j, cell) in row.iter().enumerate() {
            if cell.len() != repetitions {
                return Err(PayoffError::ShapeMismatch(format!(
                    "cell ({}, {}) has {} repetitions, expected {}",
                    i,
                    j,
                    cell.len(),
                    repetitions
                )));
            }
        }
    }
    Ok((n, repetitions))
}

/// Validate an N×R series and return `(n, repetitions)`.
pub(crate) fn series_shape<T>(series: &[Vec<T>]) -> Result<(usize, usize), PayoffError> {
    let n = series.len();
    let repetitions = series.first().map_or(0, Vec::len);
    for (i, row) in series.iter().enumerate() {
        if row.len() != repetitions {
            return Err(PayoffError::ShapeMismatch(format!(
                "player {} has {} repetitions, expected {}",
                i,
                row.len(),
                repetitions
            )));
        }
    }
    Ok((n, repetitions))
}

/// Require a payoff table and a length table to agree in shape.
pub(crate) fn matching_shapes<A, B>(
    table: &[Vec<Vec<A>>],
    lengths: &[Vec<Vec<B>>],
) -> Result<(usize, usize), PayoffError> {
    let (n, repetitions) = table_shape(table)?;
    let (ln, lreps) = table_shape(lengths)?;
    if (n, repetitions) != (ln, lreps) {
        return Err(PayoffError::ShapeMismatch(format!(
            "payoff table is {}x{}x{}, length table is {}x{}x{}",
            n, n, repetitions, ln, ln, lreps
        )));
    }
    Ok((n, repetitions))
}

// ──────────────────────────── Table builders ────────────────────────────

/// Build row `i` of the payoff and length tables.
fn payoff_row(
    i: usize,
    n: usize,
    set: &InteractionSet,
    game: &Game,
) -> Result<(Vec<Vec<f64>>, Vec<Vec<usize>>), PayoffError> {
    let mut payoffs = Vec::with_capacity(n);
    let mut lengths = Vec::with_capacity(n);
    for j in 0..n {
        let repetitions = set
            .get(i, j)
            .ok_or(PayoffError::MissingInteraction { i, j })?;
        let mut cell = Vec::with_capacity(repetitions.len());
        let mut rounds = Vec::with_capacity(repetitions.len());
        for interaction in repetitions {
            // Stored seat order is lower-index-first; flip to the (i, j)
            // orientation when i is the higher index.
            let (total, length) = if i > j {
                interaction_payoff(&interaction.reversed(), game)
            } else {
                interaction_payoff(interaction, game)
            };
            cell.push(total);
            rounds.push(length);
        }
        payoffs.push(cell);
        lengths.push(rounds);
    }
    Ok((payoffs, lengths))
}

/// Assemble the N×N×R payoff table and its matching length table
///
/// N is one more than the maximum player index the set references. Every
/// ordered pair, self-pairings included, must have at least one recorded
/// repetition; a missing pairing fails the whole build.
///
/// With the `parallel` feature, rows are built concurrently — each row
/// writes a disjoint slice of the output, so the result is identical to the
/// sequential path.
pub fn payoff_table(
    set: &InteractionSet,
    game: &Game,
) -> Result<(PayoffTable, LengthTable), PayoffError> {
    let n = set.player_count();

    #[cfg(feature = "parallel")]
    let rows = (0..n)
        .into_par_iter()
        .map(|i| payoff_row(i, n, set, game))
        .collect::<Result<Vec<_>, PayoffError>>()?;

    #[cfg(not(feature = "parallel"))]
    let rows = (0..n)
        .map(|i| payoff_row(i, n, set, game))
        .collect::<Result<Vec<_>, PayoffError>>()?;

    log::debug!("assembled payoff table for {} players", n);
    Ok(rows.into_iter().unzip())
}

/// The single-repetition N×N payoff matrix
///
/// Requires exactly one recorded repetition per pairing; use
/// [`payoff_table`] for repeated tournaments.
pub fn payoff_matrix(set: &InteractionSet, game: &Game) -> Result<PayoffMatrix, PayoffError> {
    if set.is_empty() {
        return Ok(Vec::new());
    }
    let repetitions = set.repetition_count()?;
    if repetitions != 1 {
        return Err(PayoffError::ShapeMismatch(format!(
            "expected exactly 1 repetition per pairing, found {}",
            repetitions
        )));
    }
    let (table, _) = payoff_table(set, game)?;
    Ok(table
        .into_iter()
        .map(|row| row.into_iter().map(|cell| cell[0]).collect())
        .collect())
}

/// Sum each player's payoffs over all opponents, per repetition
///
/// Self-play cells are excluded from every sum — the diagonal is a
/// reference baseline, not part of the competitive score.
pub fn scores(table: &PayoffTable) -> Result<ScoreSeries, PayoffError> {
    let (n, repetitions) = table_shape(table)?;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let mut series = vec![0.0; repetitions];
        for j in 0..n {
            if j == i {
                continue;
            }
            for (r, &payoff) in table[i][j].iter().enumerate() {
                series[r] += payoff;
            }
        }
        out.push(series);
    }
    Ok(out)
}
