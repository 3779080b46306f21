//! Length-independent payoff rates
//!
//! Two first-class families: fixed-length trials normalize by one shared
//! turn count, variable-length trials by each repetition's own recorded
//! round count. Both yield "payoff per round" rates that stay comparable
//! when trial lengths or opponent counts differ.

use crate::error::PayoffError;
use crate::payoff::{
    matching_shapes, series_shape, table_shape, LengthTable, PayoffMatrix, PayoffTable,
    ScoreSeries,
};

/// Mean of a slice; 0.0 when empty.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation: divide by the full sample count.
fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

// ──────────────────────────── Fixed length ────────────────────────────

/// Scores as payoff per round per opponent, for fixed-length trials
///
/// Divides each per-repetition total by `turns × (N − 1)`, N inferred from
/// the series shape.
pub fn normalised_scores(scores: &ScoreSeries, turns: usize) -> Result<ScoreSeries, PayoffError> {
    let (n, _) = series_shape(scores)?;
    if n == 0 {
        return Ok(Vec::new());
    }
    if turns == 0 {
        return Err(PayoffError::DivideByZero("turns is zero".to_string()));
    }
    if n < 2 {
        return Err(PayoffError::DivideByZero(
            "normalising scores requires at least two players".to_string(),
        ));
    }
    let divisor = (turns * (n - 1)) as f64;
    Ok(scores
        .iter()
        .map(|series| series.iter().map(|total| total / divisor).collect())
        .collect())
}

/// Per-pairing payoff rates for fixed-length trials
///
/// Divides each repetition's payoff by `turns` alone (a single-opponent
/// rate), then reduces the repetition axis of every ordered pair to its
/// arithmetic mean and population standard deviation.
/// Returns (means, stddevs), both N×N.
pub fn normalised_payoff(
    table: &PayoffTable,
    turns: usize,
) -> Result<(PayoffMatrix, PayoffMatrix), PayoffError> {
    let (n, _) = table_shape(table)?;
    if n == 0 {
        return Ok((Vec::new(), Vec::new()));
    }
    if turns == 0 {
        return Err(PayoffError::DivideByZero("turns is zero".to_string()));
    }
    let turns = turns as f64;
    let mut means = Vec::with_capacity(n);
    let mut stddevs = Vec::with_capacity(n);
    for row in table {
        let mut mean_row = Vec::with_capacity(n);
        let mut std_row = Vec::with_capacity(n);
        for cell in row {
            let rates: Vec<f64> = cell.iter().map(|payoff| payoff / turns).collect();
            mean_row.push(mean(&rates));
            std_row.push(population_std(&rates));
        }
        means.push(mean_row);
        stddevs.push(std_row);
    }
    Ok((means, stddevs))
}

// ──────────────────────────── Variable length ────────────────────────────

/// Scores as payoff per round per opponent, for variable-length trials
///
/// Divides entry `(i, r)` by `lengths[i][r] × (N − 1)` — each repetition is
/// normalized by its own recorded round count, never a shared constant.
pub fn normalised_scores_diff_length(
    scores: &ScoreSeries,
    lengths: &[Vec<usize>],
) -> Result<ScoreSeries, PayoffError> {
    let (n, repetitions) = series_shape(scores)?;
    let (ln, lreps) = series_shape(lengths)?;
    if (n, repetitions) != (ln, lreps) {
        return Err(PayoffError::ShapeMismatch(format!(
            "scores are {}x{}, lengths are {}x{}",
            n, repetitions, ln, lreps
        )));
    }
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
    for (i, series) in scores.iter().enumerate() {
        let mut row = Vec::with_capacity(repetitions);
        for (r, &total) in series.iter().enumerate() {
            let length = lengths[i][r];
            if length == 0 {
                return Err(PayoffError::DivideByZero(format!(
                    "player {} repetition {} has zero recorded rounds",
                    i, r
                )));
            }
            row.push(total / (length as f64 * opponents));
        }
        out.push(row);
    }
    Ok(out)
}

/// Per-pairing payoff rates for variable-length trials
///
/// Divides each repetition's payoff by that repetition's recorded round
/// count, then reduces to mean and population standard deviation per
/// ordered pair.
/// Returns (means, stddevs), both N×N.
pub fn normalised_payoff_diff_length(
    table: &PayoffTable,
    lengths: &LengthTable,
) -> Result<(PayoffMatrix, PayoffMatrix), PayoffError> {
    let (n, _) = matching_shapes(table, lengths)?;
    let mut means = Vec::with_capacity(n);
    let mut stddevs = Vec::with_capacity(n);
    for (i, row) in table.iter().enumerate() {
        let mut mean_row = Vec::with_capacity(n);
        let mut std_row = Vec::with_capacity(n);
        for (j, cell) in row.iter().enumerate() {
            let mut rates = Vec::with_capacity(cell.len());
            for (r, &payoff) in cell.iter().enumerate() {
                let length = lengths[i][j][r];
                if length == 0 {
                    return Err(PayoffError::DivideByZero(format!(
                        "pairing ({}, {}) repetition {} has zero recorded rounds",
                        i, j, r
                    )));
                }
                rates.push(payoff / length as f64);
            }
            mean_row.push(mean(&rates));
            std_row.push(population_std(&rates));
        }
        means.push(mean_row);
        stddevs.push(std_row);
    }
    Ok((means, stddevs))
}
