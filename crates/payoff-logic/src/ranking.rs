//! Ranking, pairwise dominance statistics, and win counts

use crate::error::PayoffError;
use crate::normalise::{normalised_payoff, normalised_payoff_diff_length};
use crate::payoff::{
    matching_shapes, table_shape, LengthTable, PayoffMatrix, PayoffTable, ScoreSeries,
};

/// Strict-win counts per player per repetition (N×R).
pub type WinMatrix = Vec<Vec<u32>>;

/// Player indices sorted by total score, best first
///
/// Totals are summed across repetitions; equal totals are broken by
/// ascending player index via the stable sort, so the order is a
/// deterministic total order, never arbitrary.
pub fn ranking(scores: &ScoreSeries) -> Vec<usize> {
    let totals: Vec<f64> = scores.iter().map(|series| series.iter().sum()).collect();
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| totals[b].total_cmp(&totals[a]));
    order
}

/// Map a ranking to display names, best first
///
/// Pure bookkeeping — no computation beyond the index lookup.
pub fn ranked_names(names: &[String], ranking: &[usize]) -> Result<Vec<String>, PayoffError> {
    ranking
        .iter()
        .map(|&index| {
            names.get(index).cloned().ok_or_else(|| {
                PayoffError::ShapeMismatch(format!(
                    "ranking references player {} but only {} names were supplied",
                    index,
                    names.len()
                ))
            })
        })
        .collect()
}

/// d(i, j) = m(i, j) − m(j, i) over a square matrix of mean rates.
fn diff_matrix(means: &PayoffMatrix) -> PayoffMatrix {
    let n = means.len();
    (0..n)
        .map(|i| (0..n).map(|j| means[i][j] - means[j][i]).collect())
        .collect()
}

/// Mean normalized payoff advantage per matchup, fixed-length trials
///
/// Cell `(i, j)` is i's mean per-round rate against j minus j's mean
/// per-round rate against i. Antisymmetric with a zero diagonal; positive
/// means i dominates the matchup on average.
pub fn payoff_diffs_means(
    table: &PayoffTable,
    turns: usize,
) -> Result<PayoffMatrix, PayoffError> {
    let (means, _) = normalised_payoff(table, turns)?;
    Ok(diff_matrix(&means))
}

/// Mean normalized payoff advantage per matchup, variable-length trials
pub fn payoff_diffs_means_diff_length(
    table: &PayoffTable,
    lengths: &LengthTable,
) -> Result<PayoffMatrix, PayoffError> {
    let (means, _) = normalised_payoff_diff_length(table, lengths)?;
    Ok(diff_matrix(&means))
}

/// Per-repetition signed rate differences, fixed-length trials
///
/// Cell `(i, j)` keeps one signed normalized difference per repetition, in
/// repetition order — the raw samples behind [`payoff_diffs_means`],
/// preserved unaveraged so callers can run significance tests across
/// repetitions.
pub fn score_diffs(table: &PayoffTable, turns: usize) -> Result<PayoffTable, PayoffError> {
    let (n, repetitions) = table_shape(table)?;
    if n > 0 && turns == 0 {
        return Err(PayoffError::DivideByZero("turns is zero".to_string()));
    }
    let turns = turns as f64;
    Ok((0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    (0..repetitions)
                        .map(|r| (table[i][j][r] - table[j][i][r]) / turns)
                        .collect()
                })
                .collect()
        })
        .collect())
}

/// Per-repetition signed rate differences, variable-length trials
///
/// Each side of the difference is normalized by its own cell's recorded
/// round count before subtracting.
pub fn score_diffs_diff_length(
    table: &PayoffTable,
    lengths: &LengthTable,
) -> Result<PayoffTable, PayoffError> {
    let (n, repetitions) = matching_shapes(table, lengths)?;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let mut row = Vec::with_capacity(n);
        for j in 0..n {
            let mut cell = Vec::with_capacity(repetitions);
            for r in 0..repetitions {
                let length_ij = lengths[i][j][r];
                let length_ji = lengths[j][i][r];
                if length_ij == 0 || length_ji == 0 {
                    return Err(PayoffError::DivideByZero(format!(
                        "pairing ({}, {}) repetition {} has zero recorded rounds",
                        i, j, r
                    )));
                }
                cell.push(table[i][j][r] / length_ij as f64 - table[j][i][r] / length_ji as f64);
            }
            row.push(cell);
        }
        out.push(row);
    }
    Ok(out)
}

/// Strict-win counts per player per repetition
///
/// Player `i` earns one win in repetition `r` for every opponent `j` with
/// `table[i][j][r] > table[j][i][r]`; ties and losses count zero.
pub fn wins(table: &PayoffTable) -> Result<WinMatrix, PayoffError> {
    let (n, repetitions) = table_shape(table)?;
    let mut out = vec![vec![0u32; repetitions]; n];
    for i in 0..n {
        for j in 0..n {
            if j == i {
                continue;
            }
            for r in 0..repetitions {
                if table[i][j][r] > table[j][i][r] {
                    out[i][r] += 1;
                }
            }
        }
    }
    Ok(out)
}

/// The strictly better-paid of two players, or `None` on a tie
pub fn winning_player<P: Copy>(players: (P, P), payoffs: (f64, f64)) -> Option<P> {
    if payoffs.0 > payoffs.1 {
        Some(players.0)
    } else if payoffs.1 > payoffs.0 {
        Some(players.1)
    } else {
        None
    }
}
