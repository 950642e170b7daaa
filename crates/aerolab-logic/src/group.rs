//! Leaderboard groups.
//!
//! A [`Group`] pairs each participant with their ranking label. Entries
//! keep the order they were given in; nothing here scores or sorts them.

use serde::{Deserialize, Serialize};

use crate::auth::Auth;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub auth: Auth,
    /// Free-form ranking label ("1st", "Gold", "42 pts", ...).
    pub ranking: String,
}

impl RankingEntry {
    pub fn new(auth: Auth, ranking: impl Into<String>) -> Self {
        Self {
            auth,
            ranking: ranking.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub rank_id: String,
    pub entries: Vec<RankingEntry>,
}

impl Group {
    pub fn new(rank_id: impl Into<String>, entries: Vec<RankingEntry>) -> Self {
        Self {
            rank_id: rank_id.into(),
            entries,
        }
    }

    pub fn empty(rank_id: impl Into<String>) -> Self {
        Self::new(rank_id, Vec::new())
    }

    /// Set a participant's ranking.
    ///
    /// An existing entry for the same `auth.id` is updated where it stands;
    /// otherwise the participant is appended.
    pub fn record(&mut self, auth: Auth, ranking: impl Into<String>) {
        let ranking = ranking.into();
        match self.entries.iter_mut().find(|e| e.auth.id == auth.id) {
            Some(entry) => {
                entry.auth = auth;
                entry.ranking = ranking;
            }
            None => self.entries.push(RankingEntry::new(auth, ranking)),
        }
    }

    /// 1-based position of a participant in stored order.
    pub fn position_of(&self, auth_id: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.auth.id == auth_id)
            .map(|i| i + 1)
    }

    pub fn ranking_of(&self, auth_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.auth.id == auth_id)
            .map(|e| e.ranking.as_str())
    }

    pub fn remove(&mut self, auth_id: &str) -> Option<RankingEntry> {
        let index = self.entries.iter().position(|e| e.auth.id == auth_id)?;
        Some(self.entries.remove(index))
    }
}
