//! Participant identity.
//!
//! Chat rooms and leaderboards refer to people through [`Auth`]. It carries
//! no credentials; it is the smallest shape that lets records name who
//! wrote a message or holds a ranking.

use serde::{Deserialize, Serialize};

/// Identity of a participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Auth {
    /// Stable identifier, used for equality in rooms and groups.
    pub id: String,
    /// Name shown next to messages and rankings.
    pub display_name: String,
}

impl Auth {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}
