use agent::strategy::Strategy;
use common::model::{
    game::{MatchState, Piece},
    messages::MatchId,
};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{info, Level};

use crate::{
    error::Result,
    model::internal::{MatchCommand, MatchConfig},
    service::{match_engine::MatchEngine, match_thread::MatchThread},
};

/// Cloneable command/observation interface to a running match.
#[derive(Clone)]
pub struct MatchHandle {
    id: MatchId,
    to_match: mpsc::Sender<MatchCommand>,
    state: watch::Receiver<MatchState>,
}

impl MatchHandle {
    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Resolves once the round has been played; the returned snapshot
    /// already carries both pieces and the round result.
    pub async fn submit_player_selection(&self, piece: Piece) -> Result<MatchState> {
        let (reply, response) = oneshot::channel();
        self.to_match
            .send(MatchCommand::Select { piece, reply })
            .await?;
        Ok(response.await?)
    }

    /// Returns immediately; the round is cleared later by the match thread.
    pub async fn schedule_round_reset(&self) -> Result<()> {
        self.to_match.send(MatchCommand::ScheduleRoundReset).await?;
        Ok(())
    }

    pub async fn reset_match(&self) -> Result<MatchState> {
        let (reply, response) = oneshot::channel();
        self.to_match.send(MatchCommand::ResetMatch { reply }).await?;
        Ok(response.await?)
    }

    pub fn snapshot(&self) -> MatchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MatchState> {
        self.state.clone()
    }
}

pub fn spawn(
    config: MatchConfig,
    strategy: Box<dyn Strategy>,
    shutdown_receiver: broadcast::Receiver<()>,
) -> Result<(MatchHandle, JoinHandle<()>)> {
    config.validate()?;
    let id = MatchId::new();
    let (to_match_sender, to_match_receiver) = mpsc::channel(100);
    let (publisher, state) = watch::channel(MatchState::default());

    let engine = MatchEngine::new(&config, strategy);
    let (thread, timer_receiver) =
        MatchThread::new(id, engine, config.round_reset_delay, publisher);
    let match_handle = tokio::spawn(thread.run(
        to_match_receiver,
        timer_receiver,
        shutdown_receiver,
    ));

    Ok((
        MatchHandle {
            id,
            to_match: to_match_sender,
            state,
        },
        match_handle,
    ))
}

/// A match thread plus its own shutdown switch.
pub struct MatchRunner {
    pub config: MatchConfig,
    pub handle: MatchHandle,
    shutdown_sender: broadcast::Sender<()>,
    thread: JoinHandle<()>,
}

impl MatchRunner {
    pub fn new(config: MatchConfig, strategy: Box<dyn Strategy>) -> Result<Self> {
        // Init logging, ignore error if already set
        let _ = tracing_subscriber::fmt()
            .with_line_number(true)
            .with_file(true)
            .with_max_level(Level::DEBUG)
            .try_init();

        let (shutdown_sender, shutdown_receiver) = broadcast::channel(1);
        let (handle, thread) = spawn(config.clone(), strategy, shutdown_receiver)?;
        info!("Match {} ready", handle.id());

        Ok(MatchRunner {
            config,
            handle,
            shutdown_sender,
            thread,
        })
    }

    pub async fn shutdown(self) {
        // Thread may already be gone if every handle was dropped
        let _ = self.shutdown_sender.send(());
        if let Err(e) = self.thread.await {
            tracing::error!("Match thread exited non-gracefully: {}", e);
        }
    }
}
