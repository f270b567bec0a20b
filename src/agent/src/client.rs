use common::model::game::Piece;
use tracing::debug;

use crate::strategy::{Round, Strategy};

/// The automated side of a match: a strategy plus what it has seen so far.
pub struct Client {
    strategy: Box<dyn Strategy>,
    history: Vec<Round>,
    last_move: Option<Piece>,
}

impl Client {
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Client {
            strategy,
            history: Vec::new(),
            last_move: None,
        }
    }

    pub fn play(&mut self) -> Piece {
        let next_move = self.strategy.make_move(&self.history);
        self.last_move = Some(next_move);
        next_move
    }

    pub fn record(&mut self, round: Round) {
        debug!("Opponent recorded {:?}", round);
        self.history.push(round);
    }

    pub fn history(&self) -> &[Round] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Piece> {
        self.last_move
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.last_move = None;
    }
}

#[cfg(test)]
mod tests {
    use common::model::game::Outcome;

    use super::*;
    use crate::strategy::{OnlyPaper, RandomMove};

    #[test]
    fn play_remembers_last_move() {
        let mut client = Client::new(Box::new(OnlyPaper {}));
        assert_eq!(None, client.last_move());
        assert_eq!(Piece::Paper, client.play());
        assert_eq!(Some(Piece::Paper), client.last_move());
    }

    #[test]
    fn reset_forgets_history() {
        let mut client = Client::new(Box::new(RandomMove::seeded(1)));
        let my_move = client.play();
        client.record(Round {
            my_move,
            their_move: my_move,
            outcome: Outcome::Draw,
        });
        assert_eq!(1, client.history().len());
        client.reset();
        assert!(client.history().is_empty());
        assert_eq!(None, client.last_move());
    }
}
