use thiserror::Error;

/// Errors raised while parsing or validating a roster snapshot.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("slot {slot} is assigned to more than one team")]
    DuplicateSlot { slot: u32 },

    #[error("team {team}: slot {slot} is outside 1..={max}")]
    SlotOutOfRange { team: String, slot: u32, max: u32 },

    #[error("team {team} has {count} players, at most {max} allowed")]
    TooManyPlayers {
        team: String,
        count: usize,
        max: usize,
    },

    #[error("team {team}: player {player} has position {position}, expected 1..={max}")]
    InvalidPosition {
        team: String,
        player: String,
        position: u8,
        max: u8,
    },

    #[error("team {team}: position {position} is used by more than one player")]
    DuplicatePosition { team: String, position: u8 },
}
