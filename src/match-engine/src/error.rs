use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::model::internal::MatchCommand;

pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("invalid match configuration: {0}")]
    InvalidConfig(String),

    #[error("match thread is no longer running")]
    EngineStopped,
}

impl From<mpsc::error::SendError<MatchCommand>> for MatchError {
    fn from(_: mpsc::error::SendError<MatchCommand>) -> Self {
        MatchError::EngineStopped
    }
}

impl From<oneshot::error::RecvError> for MatchError {
    fn from(_: oneshot::error::RecvError) -> Self {
        MatchError::EngineStopped
    }
}
