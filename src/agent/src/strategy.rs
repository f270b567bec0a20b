use common::model::game::{Outcome, Piece};
use rand::{rngs::SmallRng, Rng, SeedableRng};

#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub my_move: Piece,
    pub their_move: Piece,
    pub outcome: Outcome,
}
pub trait Strategy: Send {
    fn make_move(&mut self, history: &[Round]) -> Piece;
}

// Trivial strategies
pub struct OnlyRock {}
impl Strategy for OnlyRock {
    fn make_move(&mut self, _: &[Round]) -> Piece {
        Piece::Rock
    }
}
pub struct OnlyPaper {}
impl Strategy for OnlyPaper {
    fn make_move(&mut self, _: &[Round]) -> Piece {
        Piece::Paper
    }
}
pub struct OnlyScissors {}
impl Strategy for OnlyScissors {
    fn make_move(&mut self, _: &[Round]) -> Piece {
        Piece::Scissors
    }
}

// Random, ignores history entirely
pub struct RandomMove {
    rng: SmallRng,
}
impl RandomMove {
    pub fn new() -> Self {
        RandomMove {
            rng: SmallRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomMove {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}
impl Default for RandomMove {
    fn default() -> Self {
        Self::new()
    }
}
impl Strategy for RandomMove {
    fn make_move(&mut self, _: &[Round]) -> Piece {
        Piece::ALL[self.rng.random_range(0..Piece::ALL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_strategies_never_change() {
        let history = vec![Round {
            my_move: Piece::Rock,
            their_move: Piece::Paper,
            outcome: Outcome::Loss,
        }];
        for _ in 0..5 {
            assert_eq!(Piece::Rock, OnlyRock {}.make_move(&history));
            assert_eq!(Piece::Paper, OnlyPaper {}.make_move(&history));
            assert_eq!(Piece::Scissors, OnlyScissors {}.make_move(&history));
        }
    }

    #[test]
    fn random_move_is_roughly_uniform() {
        let mut strategy = RandomMove::seeded(7);
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            let piece = strategy.make_move(&[]);
            let index = Piece::ALL.iter().position(|p| *p == piece).unwrap();
            counts[index] += 1;
        }
        for (piece, count) in Piece::ALL.iter().zip(counts) {
            assert!(
                (850..=1150).contains(&count),
                "{} picked {} times out of 3000",
                piece,
                count
            );
        }
    }

    #[test]
    fn seeded_random_moves_repeat() {
        let mut a = RandomMove::seeded(42);
        let mut b = RandomMove::seeded(42);
        let a_moves: Vec<Piece> = (0..20).map(|_| a.make_move(&[])).collect();
        let b_moves: Vec<Piece> = (0..20).map(|_| b.make_move(&[])).collect();
        assert_eq!(a_moves, b_moves);
    }
}
