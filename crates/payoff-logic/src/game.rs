//! Game scoring rule for the Iterated Prisoner's Dilemma

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PayoffError;

/// A single-round action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Cooperate,
    Defect,
}

impl Action {
    /// Parse the conventional single-letter encoding ('C' or 'D').
    pub fn from_char(c: char) -> Result<Self, PayoffError> {
        match c {
            'C' => Ok(Action::Cooperate),
            'D' => Ok(Action::Defect),
            other => Err(PayoffError::InvalidAction(other.to_string())),
        }
    }

    /// The conventional single-letter encoding.
    pub fn to_char(self) -> char {
        match self {
            Action::Cooperate => 'C',
            Action::Defect => 'D',
        }
    }
}

impl FromStr for Action {
    type Err = PayoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Action::from_char(c),
            _ => Err(PayoffError::InvalidAction(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Payoff constants scoring one round's action pair
///
/// Immutable once constructed, and passed explicitly to every function that
/// scores rounds, so one process can analyze tournaments with different rule
/// sets side by side.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    reward: f64,
    sucker: f64,
    temptation: f64,
    punishment: f64,
}

impl Game {
    /// Build a rule set from the four constants, in (R, S, T, P) order.
    pub fn new(reward: f64, sucker: f64, temptation: f64, punishment: f64) -> Self {
        Self {
            reward,
            sucker,
            temptation,
            punishment,
        }
    }

    /// The constants as an (R, P, S, T) tuple.
    pub fn rpst(&self) -> (f64, f64, f64, f64) {
        (self.reward, self.punishment, self.sucker, self.temptation)
    }

    /// Score one round
    /// Returns (payoff_a, payoff_b)
    pub fn score(&self, a: Action, b: Action) -> (f64, f64) {
        match (a, b) {
            (Action::Cooperate, Action::Cooperate) => (self.reward, self.reward),
            (Action::Cooperate, Action::Defect) => (self.sucker, self.temptation),
            (Action::Defect, Action::Cooperate) => (self.temptation, self.sucker),
            (Action::Defect, Action::Defect) => (self.punishment, self.punishment),
        }
    }
}

impl Default for Game {
    /// The classical constants: R=3, S=0, T=5, P=1.
    fn default() -> Self {
        Self::new(3.0, 0.0, 5.0, 1.0)
    }
}
