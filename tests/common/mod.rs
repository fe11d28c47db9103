//! Shared fixtures for integration tests.

#![allow(dead_code)]

/// Two teams, one player without an image, slot numbers set.
pub const ROSTER_JSON: &str = r##"[
  {
    "id": "t1", "teamName": "Falcons", "slotNumber": 1,
    "teamImage": "https://cdn/falcons.png", "teamColor": "#ff0000",
    "players": [
      { "id": "p1", "playerName": "Shadow",  "playerImage": "https://cdn/shadow.png",  "position": 1 },
      { "id": "p2", "playerName": "Vortex",  "playerImage": "https://cdn/vortex.png",  "position": 2 },
      { "id": "p3", "playerName": "Ghostly", "playerImage": "",                        "position": 3 }
    ]
  },
  {
    "id": "t2", "teamName": "Wolves", "slotNumber": 2,
    "teamImage": "https://cdn/wolves.png", "teamColor": "#00ff00",
    "players": [
      { "id": "p4", "playerName": "Blitzer", "playerImage": "https://cdn/blitzer.png", "position": 1 },
      { "id": "p5", "playerName": "B0lt",    "playerImage": "https://cdn/bolt.png",    "position": 2 }
    ]
  }
]"##;

pub fn names_event(names: &[&str]) -> String {
    let players: Vec<_> = names
        .iter()
        .map(|n| serde_json::json!({ "name": n }))
        .collect();
    serde_json::json!({ "parsed": { "players": players } }).to_string()
}

pub fn raw_event(lines: &[&str]) -> String {
    serde_json::json!({ "raw_text": lines }).to_string()
}

pub const EMPTY_EVENT: &str = r#"{"raw_text":[]}"#;
