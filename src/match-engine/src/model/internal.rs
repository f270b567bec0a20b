use std::time::Duration;

use common::model::game::{MatchState, Piece};
use tokio::sync::oneshot::Sender;

use crate::error::{MatchError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    // Round wins needed to take the match
    pub wins_required: u8,
    // How long a scored round stays on screen before it is cleared
    pub round_reset_delay: Duration,
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.wins_required == 0 {
            return Err(MatchError::InvalidConfig(
                "wins_required must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            wins_required: 3,
            round_reset_delay: Duration::from_secs(1),
        }
    }
}

// Messages
#[derive(Debug)]
pub enum MatchCommand {
    Select {
        piece: Piece,
        reply: Sender<MatchState>,
    },
    ScheduleRoundReset,
    ResetMatch {
        reply: Sender<MatchState>,
    },
}
