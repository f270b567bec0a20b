use agent::{
    client::Client,
    strategy::{Round, Strategy},
};
use common::model::game::{MatchState, Outcome, Participant, Piece, OPPONENT_NAME, PLAYER_NAME};
use tracing::{debug, info};

use crate::model::internal::MatchConfig;

/// Synchronous best-of-N match between the human player and an automated
/// opponent. Every operation completes before returning; timers live in the
/// match thread.
pub struct MatchEngine {
    wins_required: u8,
    opponent: Client,
    state: MatchState,
}

impl MatchEngine {
    pub fn new(config: &MatchConfig, strategy: Box<dyn Strategy>) -> Self {
        MatchEngine {
            wins_required: config.wins_required,
            opponent: Client::new(strategy),
            state: MatchState::default(),
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.match_winner.is_some()
    }

    /// Rounds resolved since the last match reset.
    pub fn rounds(&self) -> &[Round] {
        self.opponent.history()
    }

    pub fn submit_player_selection(&mut self, piece: Piece) -> &MatchState {
        if self.is_terminal() {
            debug!("Match already decided, ignoring selection {}", piece);
            return &self.state;
        }

        if self.state.player.is_none() {
            self.state.player = Some(Participant::new(PLAYER_NAME, piece));
        } else {
            debug!("Player already selected this round, keeping first pick");
        }
        if self.state.opponent.is_none() {
            let opponent_piece = self.opponent.play();
            self.state.opponent = Some(Participant::new(OPPONENT_NAME, opponent_piece));
        }

        if self.state.round_result.is_none() {
            let pieces = self
                .state
                .player
                .as_ref()
                .zip(self.state.opponent.as_ref())
                .map(|(player, opponent)| (player.piece, opponent.piece));
            if let Some((player_piece, opponent_piece)) = pieces {
                self.score_round(player_piece, opponent_piece);
            }
        }

        self.check_match_winner();
        &self.state
    }

    fn score_round(&mut self, player_piece: Piece, opponent_piece: Piece) {
        let outcome = player_piece.versus(&opponent_piece);
        let result = match outcome {
            Outcome::Win => {
                self.state.player_score += 1;
                format!("{} Win", player_piece)
            }
            Outcome::Loss => {
                self.state.opponent_score += 1;
                format!("{} Win", opponent_piece)
            }
            Outcome::Draw => "Draw".to_owned(),
        };
        info!(
            "{} vs {}: {} ({}-{})",
            player_piece,
            opponent_piece,
            result,
            self.state.player_score,
            self.state.opponent_score
        );
        self.opponent.record(Round {
            my_move: opponent_piece,
            their_move: player_piece,
            outcome: outcome.reverse(),
        });
        self.state.round_result = Some(result);
    }

    fn check_match_winner(&mut self) {
        let winner = if self.state.player_score >= self.wins_required {
            self.state.player.as_ref()
        } else if self.state.opponent_score >= self.wins_required {
            self.state.opponent.as_ref()
        } else {
            return;
        };
        let Some(winner) = winner else {
            return;
        };
        let text = winner.master_winner_text();
        info!("Match decided: {}", text);
        self.state.match_winner = Some(text);
        // The winner banner replaces the round text
        self.state.round_result = None;
    }

    /// Clears the round-scoped fields unless the match has been decided.
    /// Returns whether anything was cleared.
    pub fn clear_round(&mut self) -> bool {
        if self.is_terminal() {
            debug!("Match decided, keeping final round on display");
            return false;
        }
        self.state.player = None;
        self.state.opponent = None;
        self.state.round_result = None;
        true
    }

    pub fn reset_match(&mut self) -> &MatchState {
        info!("Resetting match");
        self.state = MatchState::default();
        self.opponent.reset();
        &self.state
    }
}
