//! Roster snapshot model.
//!
//! The wire format is the JSON array served by the roster store, one object
//! per team with its players nested:
//!
//! ```json
//! [{
//!   "id": "t1", "teamName": "Falcons", "slotNumber": 1,
//!   "teamImage": "https://cdn/t1.png", "teamColor": "#ff0000",
//!   "players": [{ "id": "p1", "playerName": "Shadow",
//!                 "playerImage": "https://cdn/p1.png", "position": 1 }]
//! }]
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Highest slot number a team may occupy.
pub const MAX_SLOTS: u32 = 25;

/// Players per team.
pub const MAX_PLAYERS: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    #[serde(rename = "playerName")]
    pub name: String,
    #[serde(rename = "playerImage", default)]
    pub image: Option<String>,
    /// 1-based seat within the team.
    pub position: u8,
}

impl Player {
    /// Players without an image cannot be overlaid.
    pub fn has_image(&self) -> bool {
        has_reference(self.image.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: String,
    #[serde(rename = "teamName")]
    pub name: String,
    #[serde(rename = "slotNumber", default, skip_serializing_if = "Option::is_none")]
    pub slot_number: Option<u32>,
    #[serde(rename = "teamImage", default)]
    pub image: Option<String>,
    #[serde(rename = "teamColor", default)]
    pub color: Option<String>,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl Team {
    pub fn has_image(&self) -> bool {
        has_reference(self.image.as_deref())
    }
}

/// Blank strings count as missing, the way the roster store writes cleared images.
fn has_reference(reference: Option<&str>) -> bool {
    reference.is_some_and(|r| !r.trim().is_empty())
}

/// Full roster as returned by one fetch. Immutable once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RosterSnapshot {
    pub teams: Vec<Team>,
}

impl RosterSnapshot {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// Parse and validate a snapshot from its JSON wire form.
    pub fn from_json(raw: &str) -> Result<Self, RosterError> {
        let snapshot: Self = serde_json::from_str(raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn player_count(&self) -> usize {
        self.teams.iter().map(|t| t.players.len()).sum()
    }

    /// Check slot uniqueness, team sizes and player positions.
    pub fn validate(&self) -> Result<(), RosterError> {
        let mut slots = HashSet::new();
        for team in &self.teams {
            if let Some(slot) = team.slot_number {
                if slot == 0 || slot > MAX_SLOTS {
                    return Err(RosterError::SlotOutOfRange {
                        team: team.id.clone(),
                        slot,
                        max: MAX_SLOTS,
                    });
                }
                if !slots.insert(slot) {
                    return Err(RosterError::DuplicateSlot { slot });
                }
            }

            if team.players.len() > MAX_PLAYERS {
                return Err(RosterError::TooManyPlayers {
                    team: team.id.clone(),
                    count: team.players.len(),
                    max: MAX_PLAYERS,
                });
            }

            let mut positions = HashSet::new();
            for player in &team.players {
                if player.position == 0 || usize::from(player.position) > MAX_PLAYERS {
                    return Err(RosterError::InvalidPosition {
                        team: team.id.clone(),
                        player: player.id.clone(),
                        position: player.position,
                        max: MAX_PLAYERS as u8,
                    });
                }
                if !positions.insert(player.position) {
                    return Err(RosterError::DuplicatePosition {
                        team: team.id.clone(),
                        position: player.position,
                    });
                }
            }
        }
        Ok(())
    }
}
