//! Multi-participant chat rooms.
//!
//! A [`GroupChat`] is an ordered log of [`ChatEntry`] values, each pairing
//! an author with what they wrote, so the author list and the message list
//! can never drift apart. A [`Chatting`] is one participant's view of a
//! room: who they are, the line they are composing, and the room itself.
//!
//! Rooms are bounded. When a room is at capacity the oldest entry is
//! dropped before a new one is appended.
//!
//! ```
//! use aerolab_logic::auth::Auth;
//! use aerolab_logic::chat::{ChatConfig, Chatting, GroupChat};
//!
//! let room = GroupChat::empty("lesson-1");
//! let mut me = Chatting::new(Auth::new("u1", "Ara"), "Why does lift drop?", "lesson-1", room);
//! me.deliver(&ChatConfig::default()).unwrap();
//! assert_eq!(me.group_chat.entries.len(), 1);
//! assert!(me.chat.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::Auth;

/// One message in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub author: Auth,
    pub text: String,
}

impl ChatEntry {
    pub fn new(author: Auth, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
        }
    }
}

/// Limits applied when posting to a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum entries kept per room. Zero keeps nothing.
    pub max_history: usize,
    /// Maximum message length in characters.
    pub max_message_len: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_history: 500,
            max_message_len: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("message is {len} characters, limit is {max}")]
    MessageTooLong { len: usize, max: usize },
    #[error("participant is in room `{expected}` but the attached room is `{found}`")]
    RoomMismatch { expected: String, found: String },
}

/// A chat room and its message log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupChat {
    pub chat_id: String,
    /// Messages, oldest first.
    pub entries: Vec<ChatEntry>,
}

impl GroupChat {
    pub fn new(chat_id: impl Into<String>, entries: Vec<ChatEntry>) -> Self {
        Self {
            chat_id: chat_id.into(),
            entries,
        }
    }

    pub fn empty(chat_id: impl Into<String>) -> Self {
        Self::new(chat_id, Vec::new())
    }

    /// Append a message, evicting the oldest entry when at capacity.
    pub fn post(
        &mut self,
        author: Auth,
        text: impl Into<String>,
        config: &ChatConfig,
    ) -> Result<(), ChatError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let len = text.chars().count();
        if len > config.max_message_len {
            return Err(ChatError::MessageTooLong {
                len,
                max: config.max_message_len,
            });
        }

        if config.max_history == 0 {
            return Ok(());
        }
        while self.entries.len() >= config.max_history {
            self.entries.remove(0);
        }
        self.entries.push(ChatEntry::new(author, text));
        Ok(())
    }

    /// Distinct authors in order of first appearance.
    pub fn participants(&self) -> Vec<&Auth> {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .iter()
            .map(|e| &e.author)
            .filter(|a| seen.insert(a.id.as_str()))
            .collect()
    }

    pub fn messages_by(&self, author_id: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.author.id == author_id)
            .map(|e| e.text.as_str())
            .collect()
    }

    pub fn last_entry(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }
}

/// A participant's pending message and the room it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chatting {
    pub auth: Auth,
    /// Line being composed; cleared once delivered.
    pub chat: String,
    pub chat_id: String,
    pub group_chat: GroupChat,
}

impl Chatting {
    pub fn new(
        auth: Auth,
        chat: impl Into<String>,
        chat_id: impl Into<String>,
        group_chat: GroupChat,
    ) -> Self {
        Self {
            auth,
            chat: chat.into(),
            chat_id: chat_id.into(),
            group_chat,
        }
    }

    /// Post the pending line into the room as this participant.
    ///
    /// On error nothing changes: the pending line is kept so the caller can
    /// fix and retry.
    pub fn deliver(&mut self, config: &ChatConfig) -> Result<(), ChatError> {
        if self.chat_id != self.group_chat.chat_id {
            return Err(ChatError::RoomMismatch {
                expected: self.chat_id.clone(),
                found: self.group_chat.chat_id.clone(),
            });
        }
        self.group_chat
            .post(self.auth.clone(), self.chat.clone(), config)?;
        self.chat.clear();
        Ok(())
    }
}
