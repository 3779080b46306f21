//! Payoff Analysis for Iterated Prisoner's Dilemma Tournaments
//!
//! Turns recorded match histories into tournament statistics: payoff
//! tables, per-round rates, rankings, dominance differences, and win
//! counts. This crate is compiled to:
//! - Native (for tournament pipelines and batch analysis)
//! - WASM (for frontend tournament analysis)

mod error;
mod game;
mod interaction;
mod payoff;
mod normalise;
mod ranking;
mod results;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::PayoffError;
pub use game::{Action, Game};
pub use interaction::{interaction_payoff, interaction_payoffs, Interaction, InteractionSet};
pub use payoff::{
    payoff_matrix, payoff_table, scores, LengthTable, PayoffMatrix, PayoffTable, ScoreSeries,
};
pub use normalise::{
    normalised_payoff, normalised_payoff_diff_length, normalised_scores,
    normalised_scores_diff_length,
};
pub use ranking::{
    payoff_diffs_means, payoff_diffs_means_diff_length, ranked_names, ranking, score_diffs,
    score_diffs_diff_length, winning_player, wins, WinMatrix,
};
pub use results::TournamentResult;
