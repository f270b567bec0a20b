use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PLAYER_NAME: &str = "You";
pub const OPPONENT_NAME: &str = "Computer";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}
impl Outcome {
    /// The same result seen from the other side of the table.
    pub fn reverse(&self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Rock,
    Paper,
    Scissors,
}
impl Piece {
    pub const ALL: [Piece; 3] = [Piece::Rock, Piece::Paper, Piece::Scissors];

    pub fn beats(&self, other: &Piece) -> Option<bool> {
        if self == other {
            None
        } else {
            Some(matches!(
                (self, other),
                (Piece::Rock, Piece::Scissors)
                    | (Piece::Scissors, Piece::Paper)
                    | (Piece::Paper, Piece::Rock)
            ))
        }
    }

    /// Outcome of playing `self` against `other`, from `self`'s side.
    pub fn versus(&self, other: &Piece) -> Outcome {
        match self.beats(other) {
            Some(true) => Outcome::Win,
            Some(false) => Outcome::Loss,
            None => Outcome::Draw,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Piece::Rock => "Rock",
            Piece::Paper => "Paper",
            Piece::Scissors => "Scissors",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown piece {0:?}, expected rock, paper or scissors")]
pub struct ParsePieceError(pub String);

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Piece::Rock),
            "paper" => Ok(Piece::Paper),
            "scissors" => Ok(Piece::Scissors),
            _ => Err(ParsePieceError(s.to_owned())),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub piece: Piece,
}
impl Participant {
    pub fn new(name: impl ToString, piece: Piece) -> Self {
        Participant {
            name: name.to_string(),
            piece,
        }
    }

    pub fn master_winner_text(&self) -> String {
        if self.name == PLAYER_NAME {
            format!("{} are the Master Winner", PLAYER_NAME)
        } else {
            format!("{} is the Master Winner", OPPONENT_NAME)
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    AwaitingSelections,
    RoundInProgress,
    RoundScored,
    MatchComplete,
}

/// Everything the presentation side needs to render a match.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchState {
    pub player: Option<Participant>,
    pub opponent: Option<Participant>,
    pub round_result: Option<String>,
    pub match_winner: Option<String>,
    pub player_score: u8,
    pub opponent_score: u8,
}

impl MatchState {
    pub fn phase(&self) -> MatchPhase {
        if self.match_winner.is_some() {
            MatchPhase::MatchComplete
        } else if self.round_result.is_some() {
            MatchPhase::RoundScored
        } else if self.player.is_some() || self.opponent.is_some() {
            MatchPhase::RoundInProgress
        } else {
            MatchPhase::AwaitingSelections
        }
    }

    /// Selection controls should be disabled once the match is decided.
    pub fn accepts_selections(&self) -> bool {
        self.match_winner.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_table_covers_every_pair() {
        use Outcome::*;
        use Piece::*;
        let table = [
            (Rock, Rock, Draw),
            (Rock, Paper, Loss),
            (Rock, Scissors, Win),
            (Paper, Rock, Win),
            (Paper, Paper, Draw),
            (Paper, Scissors, Loss),
            (Scissors, Rock, Loss),
            (Scissors, Paper, Win),
            (Scissors, Scissors, Draw),
        ];
        for (a, b, expected) in table {
            assert_eq!(expected, a.versus(&b), "{} vs {}", a, b);
        }
    }

    #[test]
    fn comparison_is_antisymmetric() {
        for a in Piece::ALL {
            for b in Piece::ALL {
                assert_eq!(a.versus(&b), b.versus(&a).reverse());
                if a == b {
                    assert_eq!(None, a.beats(&b));
                } else {
                    assert_ne!(a.beats(&b), b.beats(&a));
                }
            }
        }
    }

    #[test]
    fn parses_piece_names() {
        assert_eq!(Ok(Piece::Rock), "rock".parse());
        assert_eq!(Ok(Piece::Scissors), " Scissors\n".parse());
        assert_eq!(
            Err(ParsePieceError("lizard".to_owned())),
            "lizard".parse::<Piece>()
        );
        assert_eq!("Paper", Piece::Paper.to_string());
    }

    #[test]
    fn master_winner_text_names_the_side() {
        assert_eq!(
            "You are the Master Winner",
            Participant::new(PLAYER_NAME, Piece::Rock).master_winner_text()
        );
        assert_eq!(
            "Computer is the Master Winner",
            Participant::new(OPPONENT_NAME, Piece::Rock).master_winner_text()
        );
    }

    #[test]
    fn phase_follows_state() {
        let mut state = MatchState::default();
        assert_eq!(MatchPhase::AwaitingSelections, state.phase());
        state.player = Some(Participant::new(PLAYER_NAME, Piece::Paper));
        assert_eq!(MatchPhase::RoundInProgress, state.phase());
        state.opponent = Some(Participant::new(OPPONENT_NAME, Piece::Paper));
        state.round_result = Some("Draw".to_owned());
        assert_eq!(MatchPhase::RoundScored, state.phase());
        assert!(state.accepts_selections());
        state.round_result = None;
        state.match_winner = Some("You are the Master Winner".to_owned());
        assert_eq!(MatchPhase::MatchComplete, state.phase());
        assert!(!state.accepts_selections());
    }

    #[test]
    fn state_serializes_with_snake_case_fields() {
        let state = MatchState {
            player: Some(Participant::new(PLAYER_NAME, Piece::Scissors)),
            player_score: 1,
            ..Default::default()
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(Some("Scissors"), value["player"]["piece"].as_str());
        assert_eq!(Some(1), value["player_score"].as_u64());
        assert!(value["match_winner"].is_null());
    }
}
