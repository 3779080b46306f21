//! Recorded interactions and per-trial payoff reduction
//!
//! An `Interaction` is the round-by-round action history of one trial; an
//! `InteractionSet` holds every trial of a tournament under canonical
//! unordered pairing keys. Both are plain data — the engine never mutates a
//! set it is given, it only derives new tables from it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PayoffError;
use crate::game::{Action, Game};

/// Round-by-round action history for one trial between two players
///
/// Round pairs are stored in seat order: under canonical storage the first
/// element of each pair belongs to the lower-indexed player. Length equals
/// the rounds actually played and may vary across repetitions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    rounds: Vec<(Action, Action)>,
}

impl Interaction {
    /// An empty trial with no rounds recorded yet.
    pub fn new() -> Self {
        Self { rounds: Vec::new() }
    }

    pub fn from_rounds(rounds: Vec<(Action, Action)>) -> Self {
        Self { rounds }
    }

    /// Parse two aligned move strings, e.g. `from_moves("CDC", "DCC")`.
    ///
    /// The strings must have equal length; each character must be 'C' or 'D'.
    pub fn from_moves(a: &str, b: &str) -> Result<Self, PayoffError> {
        let len_a = a.chars().count();
        let len_b = b.chars().count();
        if len_a != len_b {
            return Err(PayoffError::ShapeMismatch(format!(
                "move strings differ in length: {} vs {}",
                len_a, len_b
            )));
        }
        let mut rounds = Vec::with_capacity(len_a);
        for (ca, cb) in a.chars().zip(b.chars()) {
            rounds.push((Action::from_char(ca)?, Action::from_char(cb)?));
        }
        Ok(Self { rounds })
    }

    /// Record one more round.
    pub fn record(&mut self, a: Action, b: Action) {
        self.rounds.push((a, b));
    }

    pub fn rounds(&self) -> &[(Action, Action)] {
        &self.rounds
    }

    /// Number of rounds actually played.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// The same trial seen from the other seat.
    pub fn reversed(&self) -> Self {
        Self {
            rounds: self.rounds.iter().map(|&(a, b)| (b, a)).collect(),
        }
    }
}

/// Serialized form of one canonical pairing entry.
///
/// JSON objects cannot key on index pairs, so the set round-trips through a
/// list of these records.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct PairRecord {
    pair: (usize, usize),
    repetitions: Vec<Interaction>,
}

/// All recorded trials of a tournament, keyed by canonical unordered pairing
///
/// One entry per unordered pair `(min(i,j), max(i,j))`, self-pairings
/// included; each entry holds one `Interaction` per repetition, in
/// repetition order. Storing one orientation avoids duplicating every
/// pairing; consumers reading the `(i,j)` orientation with `i > j` reverse
/// each round pair before reducing (see `Interaction::reversed`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PairRecord>", into = "Vec<PairRecord>")]
pub struct InteractionSet {
    pairings: BTreeMap<(usize, usize), Vec<Interaction>>,
}

impl InteractionSet {
    pub fn new() -> Self {
        Self {
            pairings: BTreeMap::new(),
        }
    }

    fn canonical(i: usize, j: usize) -> (usize, usize) {
        if i <= j {
            (i, j)
        } else {
            (j, i)
        }
    }

    /// Record one repetition of the pairing `(i, j)`.
    ///
    /// The interaction's seats follow the argument order; recording under
    /// `(j, i)` stores the seat-swapped trial at the canonical key, so both
    /// orientations land in the same entry.
    pub fn record(&mut self, i: usize, j: usize, interaction: Interaction) {
        let (key, oriented) = if i <= j {
            ((i, j), interaction)
        } else {
            ((j, i), interaction.reversed())
        };
        self.pairings.entry(key).or_default().push(oriented);
    }

    /// All repetitions recorded for the pairing `(i, j)`.
    ///
    /// Always returned in canonical seat order (lower index first),
    /// whichever orientation was asked for.
    pub fn get(&self, i: usize, j: usize) -> Option<&[Interaction]> {
        self.pairings
            .get(&Self::canonical(i, j))
            .map(Vec::as_slice)
    }

    /// Iterate pairings in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &[Interaction])> {
        self.pairings
            .iter()
            .map(|(&pair, repetitions)| (pair, repetitions.as_slice()))
    }

    /// Number of distinct pairings recorded.
    pub fn pairing_count(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    /// One more than the maximum player index referenced; 0 when empty.
    pub fn player_count(&self) -> usize {
        self.pairings.keys().map(|&(_, j)| j + 1).max().unwrap_or(0)
    }

    /// The uniform repetition count shared by every pairing; 0 when empty.
    ///
    /// Fails if pairings disagree — a set like that cannot be stacked into
    /// a rectangular payoff table.
    pub fn repetition_count(&self) -> Result<usize, PayoffError> {
        let mut count = None;
        for (&(i, j), repetitions) in &self.pairings {
            match count {
                None => count = Some(repetitions.len()),
                Some(expected) if expected != repetitions.len() => {
                    return Err(PayoffError::ShapeMismatch(format!(
                        "pairing ({}, {}) has {} repetitions, expected {}",
                        i,
                        j,
                        repetitions.len(),
                        expected
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(count.unwrap_or(0))
    }
}

impl From<Vec<PairRecord>> for InteractionSet {
    fn from(records: Vec<PairRecord>) -> Self {
        let mut set = InteractionSet::new();
        for record in records {
            for interaction in record.repetitions {
                set.record(record.pair.0, record.pair.1, interaction);
            }
        }
        set
    }
}

impl From<InteractionSet> for Vec<PairRecord> {
    fn from(set: InteractionSet) -> Self {
        set.pairings
            .into_iter()
            .map(|(pair, repetitions)| PairRecord { pair, repetitions })
            .collect()
    }
}

// ──────────────────────────── Payoff reducers ────────────────────────────

/// Sum the first seat's payoff over one trial
///
/// Returns the total and the number of rounds reduced; the round count feeds
/// variable-length normalization downstream. An empty interaction yields
/// `(0.0, 0)` — callers must not normalize by the resulting zero length.
pub fn interaction_payoff(interaction: &Interaction, game: &Game) -> (f64, usize) {
    let mut total = 0.0;
    for &(a, b) in interaction.rounds() {
        let (pa, _) = game.score(a, b);
        total += pa;
    }
    (total, interaction.len())
}

/// Sum both seats' payoffs over one trial
/// Returns (total_a, total_b)
pub fn interaction_payoffs(interaction: &Interaction, game: &Game) -> (f64, f64) {
    let mut total_a = 0.0;
    let mut total_b = 0.0;
    for &(a, b) in interaction.rounds() {
        let (pa, pb) = game.score(a, b);
        total_a += pa;
        total_b += pb;
    }
    (total_a, total_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_set() -> InteractionSet {
        let mut set = InteractionSet::new();
        set.record(0, 0, Interaction::from_moves("CDCDC", "CDCDC").unwrap());
        set.record(0, 1, Interaction::from_moves("CDCDC", "CCDCD").unwrap());
        set.record(0, 2, Interaction::from_moves("CDCDC", "CCDCD").unwrap());
        set.record(1, 1, Interaction::from_moves("CCCCC", "CCCCC").unwrap());
        set.record(1, 2, Interaction::from_moves("CDDCD", "DDCDC").unwrap());
        set.record(2, 2, Interaction::from_moves("DDDDD", "CDCDD").unwrap());
        set
    }

    #[test]
    fn test_from_moves() {
        let interaction = Interaction::from_moves("CDC", "DCC").unwrap();
        assert_eq!(
            interaction.rounds(),
            &[
                (Action::Cooperate, Action::Defect),
                (Action::Defect, Action::Cooperate),
                (Action::Cooperate, Action::Cooperate),
            ]
        );
        assert_eq!(interaction.len(), 3);
        assert!(!interaction.is_empty());
    }

    #[test]
    fn test_from_moves_empty() {
        let interaction = Interaction::from_moves("", "").unwrap();
        assert!(interaction.is_empty());
        assert_eq!(interaction.len(), 0);
    }

    #[test]
    fn test_from_moves_length_mismatch() {
        let err = Interaction::from_moves("CD", "C").unwrap_err();
        assert!(matches!(err, PayoffError::ShapeMismatch(_)));
    }

    #[test]
    fn test_from_moves_invalid_action() {
        let err = Interaction::from_moves("CX", "CC").unwrap_err();
        assert_eq!(err, PayoffError::InvalidAction("X".to_string()));
    }

    #[test]
    fn test_record_rounds() {
        let mut interaction = Interaction::new();
        interaction.record(Action::Cooperate, Action::Defect);
        interaction.record(Action::Defect, Action::Defect);
        assert_eq!(interaction.len(), 2);
        assert_eq!(
            interaction.rounds()[1],
            (Action::Defect, Action::Defect)
        );
    }

    #[test]
    fn test_reversed() {
        let interaction = Interaction::from_moves("CD", "DD").unwrap();
        let reversed = interaction.reversed();
        assert_eq!(
            reversed.rounds(),
            &[
                (Action::Defect, Action::Cooperate),
                (Action::Defect, Action::Defect),
            ]
        );
        // Reversing twice restores the original seat order
        assert_eq!(reversed.reversed(), interaction);
    }

    #[test]
    fn test_set_canonical_storage() {
        let mut set = InteractionSet::new();
        set.record(2, 0, Interaction::from_moves("DC", "CC").unwrap());

        // Stored under (0, 2) with seats swapped to lower-index-first
        let stored = set.get(0, 2).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(
            stored[0].rounds(),
            &[
                (Action::Cooperate, Action::Defect),
                (Action::Cooperate, Action::Cooperate),
            ]
        );

        // Both orientations read the same entry
        assert_eq!(set.get(2, 0), set.get(0, 2));
        assert_eq!(set.pairing_count(), 1);
    }

    #[test]
    fn test_set_records_repetitions_in_order() {
        let mut set = InteractionSet::new();
        set.record(0, 1, Interaction::from_moves("C", "C").unwrap());
        set.record(0, 1, Interaction::from_moves("D", "D").unwrap());
        let stored = set.get(0, 1).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].rounds()[0], (Action::Cooperate, Action::Cooperate));
        assert_eq!(stored[1].rounds()[0], (Action::Defect, Action::Defect));
    }

    #[test]
    fn test_player_count() {
        assert_eq!(fixture_set().player_count(), 3);
        assert_eq!(InteractionSet::new().player_count(), 0);

        let mut sparse = InteractionSet::new();
        sparse.record(4, 1, Interaction::new());
        assert_eq!(sparse.player_count(), 5);
    }

    #[test]
    fn test_repetition_count() {
        assert_eq!(fixture_set().repetition_count(), Ok(1));
        assert_eq!(InteractionSet::new().repetition_count(), Ok(0));

        let mut set = InteractionSet::new();
        set.record(0, 1, Interaction::new());
        set.record(0, 1, Interaction::new());
        set.record(0, 2, Interaction::new());
        let err = set.repetition_count().unwrap_err();
        assert!(matches!(err, PayoffError::ShapeMismatch(_)));
    }

    #[test]
    fn test_iter_in_key_order() {
        let keys: Vec<(usize, usize)> = fixture_set().iter().map(|(pair, _)| pair).collect();
        assert_eq!(keys, vec![(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_interaction_payoff() {
        let game = Game::default();
        let set = fixture_set();

        // Self-play of player 2: D earns 5, 1, 5, 1, 1
        let (total, rounds) = interaction_payoff(&set.get(2, 2).unwrap()[0], &game);
        assert_eq!(total, 13.0);
        assert_eq!(rounds, 5);
    }

    #[test]
    fn test_interaction_payoff_empty() {
        assert_eq!(
            interaction_payoff(&Interaction::new(), &Game::default()),
            (0.0, 0)
        );
    }

    #[test]
    fn test_interaction_payoff_reversed_is_other_seat() {
        let game = Game::default();
        let interaction = Interaction::from_moves("CDDCD", "DDCDC").unwrap();
        let (a, _) = interaction_payoff(&interaction, &game);
        let (b, _) = interaction_payoff(&interaction.reversed(), &game);
        assert_eq!(a, 11.0);
        assert_eq!(b, 11.0);
        assert_eq!(interaction_payoffs(&interaction, &game), (a, b));
    }

    #[test]
    fn test_interaction_payoffs() {
        let game = Game::default();
        let set = fixture_set();
        // First seat defects every round, second cooperates twice
        let payoffs = interaction_payoffs(&set.get(2, 2).unwrap()[0], &game);
        assert_eq!(payoffs, (13.0, 3.0));
    }

    #[test]
    fn test_set_serde_round_trip() {
        let set = fixture_set();
        let json = serde_json::to_string(&set).unwrap();
        let back: InteractionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_set_serde_wire_shape() {
        let mut set = InteractionSet::new();
        set.record(0, 1, Interaction::from_moves("C", "D").unwrap());
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"[{"pair":[0,1],"repetitions":[{"rounds":[["Cooperate","Defect"]]}]}]"#
        );
    }
}
