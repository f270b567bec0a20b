use std::error;

use agent::strategy::RandomMove;
use common::{
    model::{
        game::{MatchPhase, MatchState, ParsePieceError, Piece},
        messages::ClientRequest,
    },
    utility::create_shutdown_channel,
};
use match_engine::{
    entrypoint::{spawn, MatchHandle},
    model::internal::MatchConfig,
};
use tokio::{
    io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader},
    sync::watch,
};
use tracing::{error, info, warn, Level};

type Result<T> = std::result::Result<T, Box<dyn error::Error + Send + Sync>>;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();
    // Config
    let config = MatchConfig::default();
    if let Err(e) = run(config).await {
        error!("Match driver failed: {}", e);
    }
}

async fn run(config: MatchConfig) -> Result<()> {
    let (shutdown_sender, shutdown_receiver) = create_shutdown_channel();
    let mut input_shutdown_receiver = shutdown_receiver.resubscribe();
    let (handle, match_thread) = spawn(config, Box::new(RandomMove::new()), shutdown_receiver)?;

    // Render every published snapshot as one JSON line
    let printer = tokio::spawn(print_snapshots(handle.subscribe()));

    info!("Type rock, paper or scissors to play, reset to start over");
    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_request(&line) {
                    Ok(request) => apply(&handle, request).await?,
                    Err(e) => warn!("{}", e),
                }
            }
            _ = input_shutdown_receiver.recv() => {
                break;
            }
        }
    }

    // Stops the match thread, which closes the snapshot channel and the printer with it
    let _ = shutdown_sender.send(());
    drop(handle);
    match_thread.await?;
    printer.await??;
    Ok(())
}

fn parse_request(line: &str) -> std::result::Result<ClientRequest, ParsePieceError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "reset" => Ok(ClientRequest::ResetMatch),
        other => other.parse::<Piece>().map(|piece| ClientRequest::Select { piece }),
    }
}

async fn apply(handle: &MatchHandle, request: ClientRequest) -> Result<()> {
    match request {
        ClientRequest::Select { piece } => {
            if !handle.snapshot().accepts_selections() {
                info!("Match is over, type reset to play again");
                return Ok(());
            }
            let state = handle.submit_player_selection(piece).await?;
            // Show the result for a moment, then clear the round
            if state.phase() == MatchPhase::RoundScored {
                handle.schedule_round_reset().await?;
            }
        }
        ClientRequest::ScheduleRoundReset => handle.schedule_round_reset().await?,
        ClientRequest::ResetMatch => {
            handle.reset_match().await?;
        }
    }
    Ok(())
}

async fn print_snapshots(mut updates: watch::Receiver<MatchState>) -> Result<()> {
    let mut stdout = io::stdout();
    while updates.changed().await.is_ok() {
        let line = serde_json::to_string(&*updates.borrow_and_update())? + "\n";
        stdout.write_all(line.as_bytes()).await?;
        stdout.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_driver_input() {
        assert_eq!(
            ClientRequest::Select {
                piece: Piece::Paper
            },
            parse_request("Paper").unwrap()
        );
        assert_eq!(ClientRequest::ResetMatch, parse_request(" RESET ").unwrap());
        assert!(parse_request("spock").is_err());
    }
}
