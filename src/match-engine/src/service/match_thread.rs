use std::time::Duration;

use common::model::{game::MatchState, messages::MatchId};
use tokio::{
    sync::{
        broadcast,
        mpsc::{self, Receiver, Sender},
        watch,
    },
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{model::internal::MatchCommand, service::match_engine::MatchEngine};

// Identifies one scheduled round reset. Bumped on every schedule and match reset.
type ResetToken = u64;

struct PendingReset {
    token: ResetToken,
    timer: JoinHandle<()>,
}

/// Sole owner of a [`MatchEngine`]. Commands are applied one at a time and
/// the resulting snapshot is published whenever it changed.
pub struct MatchThread {
    id: MatchId,
    engine: MatchEngine,
    round_reset_delay: Duration,
    publisher: watch::Sender<MatchState>,
    next_token: ResetToken,
    pending_reset: Option<PendingReset>,
    timer_sender: Sender<ResetToken>,
}

impl MatchThread {
    pub fn new(
        id: MatchId,
        engine: MatchEngine,
        round_reset_delay: Duration,
        publisher: watch::Sender<MatchState>,
    ) -> (Self, Receiver<ResetToken>) {
        let (timer_sender, timer_receiver) = mpsc::channel(8);
        (
            MatchThread {
                id,
                engine,
                round_reset_delay,
                publisher,
                next_token: 0,
                pending_reset: None,
                timer_sender,
            },
            timer_receiver,
        )
    }

    pub async fn run(
        mut self,
        mut from_handle: Receiver<MatchCommand>,
        mut timer_receiver: Receiver<ResetToken>,
        mut shutdown_receiver: broadcast::Receiver<()>,
    ) {
        info!("Match {} started", self.id);
        loop {
            tokio::select! {
                command = from_handle.recv() => {
                    let Some(command) = command else {
                        debug!("All match handles dropped");
                        break;
                    };
                    self.update(command);
                }
                Some(token) = timer_receiver.recv() => {
                    self.round_reset_elapsed(token);
                }
                _ = shutdown_receiver.recv() => {
                    break;
                }
            }
        }
        self.cancel_pending_reset();
        info!("Match {} stopped", self.id);
    }

    fn update(&mut self, command: MatchCommand) {
        match command {
            MatchCommand::Select { piece, reply } => {
                debug!("Match {}: player selected {}", self.id, piece);
                self.engine.submit_player_selection(piece);
                self.publish();
                if reply.send(self.engine.state().clone()).is_err() {
                    warn!("Caller dropped before selection reply");
                }
            }
            MatchCommand::ScheduleRoundReset => self.schedule_round_reset(),
            MatchCommand::ResetMatch { reply } => {
                self.cancel_pending_reset();
                self.engine.reset_match();
                self.publish();
                if reply.send(self.engine.state().clone()).is_err() {
                    warn!("Caller dropped before reset reply");
                }
            }
        }
    }

    fn schedule_round_reset(&mut self) {
        // A newer schedule supersedes an older one
        self.cancel_pending_reset();
        let token = self.next_token;
        let delay = self.round_reset_delay;
        let sender = self.timer_sender.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver is gone once the thread stopped
            let _ = sender.send(token).await;
        });
        debug!("Match {}: round reset {} in {:?}", self.id, token, delay);
        self.pending_reset = Some(PendingReset { token, timer });
    }

    fn round_reset_elapsed(&mut self, token: ResetToken) {
        match &self.pending_reset {
            Some(pending) if pending.token == token => {
                self.pending_reset = None;
            }
            _ => {
                debug!("Ignoring stale round reset {}", token);
                return;
            }
        }
        // Terminal status is checked now, not when the reset was scheduled
        if self.engine.clear_round() {
            self.publish();
        }
    }

    fn cancel_pending_reset(&mut self) {
        if let Some(pending) = self.pending_reset.take() {
            debug!("Cancelling round reset {}", pending.token);
            pending.timer.abort();
        }
        self.next_token += 1;
    }

    fn publish(&self) {
        let state = self.engine.state();
        self.publisher.send_if_modified(|published| {
            if published == state {
                false
            } else {
                *published = state.clone();
                true
            }
        });
    }
}
