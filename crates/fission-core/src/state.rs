//! UI-agnostic chat state
//!
//! The message log is shared by every front end. It only ever grows: messages
//! are appended on each send and each completed answer, and never edited.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str = "Welcome to the Nuclear History Chat! Ask me any question about the history of nuclear fission and energy in the United States.";

/// A chat message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

/// The sender of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
}

#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
    next_id: u64,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log seeded with the system greeting.
    pub fn with_welcome() -> Self {
        let mut log = Self::new();
        log.push_system(WELCOME_MESSAGE);
        log
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.push(Role::User, text.into())
    }

    pub fn push_system(&mut self, text: impl Into<String>) -> &Message {
        self.push(Role::System, text.into())
    }

    fn push(&mut self, role: Role, text: String) -> &Message {
        self.next_id += 1;
        self.messages.push(Message {
            id: self.next_id,
            role,
            text,
            timestamp: Local::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_log_starts_with_system_greeting() {
        let log = MessageLog::with_welcome();
        assert_eq!(log.len(), 1);
        let first = &log.messages()[0];
        assert_eq!(first.role, Role::System);
        assert_eq!(first.text, WELCOME_MESSAGE);
    }

    #[test]
    fn test_messages_keep_order_and_unique_ids() {
        let mut log = MessageLog::new();
        log.push_user("When was nuclear fission discovered?");
        log.push_system("In 1938.");
        log.push_user("Thanks");

        let roles: Vec<Role> = log.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::System, Role::User]);

        let ids: Vec<u64> = log.messages().iter().map(|m| m.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(log.last().map(|m| m.text.as_str()), Some("Thanks"));
    }

    #[test]
    fn test_timestamps_do_not_go_backwards() {
        let mut log = MessageLog::new();
        log.push_user("a");
        log.push_system("b");
        let msgs = log.messages();
        assert!(msgs[0].timestamp <= msgs[1].timestamp);
    }
}
