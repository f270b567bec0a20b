use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::game::Piece;

#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub struct MatchId(pub Uuid);

impl MatchId {
    pub fn new() -> Self {
        MatchId(Uuid::new_v4())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for MatchId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let uuid = Uuid::parse_str(&s).map_err(serde::de::Error::custom)?;
        Ok(MatchId(uuid))
    }
}
impl Serialize for MatchId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

// Commands issued by whatever renders the match
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ClientRequest {
    // Player picked a piece for the current round
    Select { piece: Piece },
    // Clear the round once the result has been shown
    ScheduleRoundReset,
    // Start over with zeroed scores
    ResetMatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_id_round_trips_as_string() {
        let id = MatchId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(format!("\"{}\"", id), json);
        assert_eq!(id, serde_json::from_str::<MatchId>(&json).unwrap());
        assert!(serde_json::from_str::<MatchId>("\"not-a-uuid\"").is_err());
    }

    #[test]
    fn requests_are_tagged() {
        let request: ClientRequest =
            serde_json::from_str(r#"{"type":"Select","piece":"Rock"}"#).unwrap();
        assert_eq!(ClientRequest::Select { piece: Piece::Rock }, request);
        let request: ClientRequest = serde_json::from_str(r#"{"type":"ResetMatch"}"#).unwrap();
        assert_eq!(ClientRequest::ResetMatch, request);
    }
}
