use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::constants::DEFAULT_CONVERSATION_TITLE;
use crate::core::message::Message;

/// A named, ordered collection of messages. Messages only ever append;
/// the title changes through rename or the one-shot auto-title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: new_conversation_id(),
            title: DEFAULT_CONVERSATION_TITLE.to_string(),
            messages: Vec::new(),
        }
    }

    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_CONVERSATION_TITLE
    }

    /// Most recent code block, used by the copy-to-clipboard action.
    pub fn last_code_block(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_code())
            .map(|m| m.content.as_str())
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

pub fn new_conversation_id() -> String {
    format!("chat_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_conversations_use_the_placeholder_title() {
        let conversation = Conversation::new();
        assert!(conversation.has_default_title());
        assert!(conversation.messages.is_empty());
        assert!(conversation.id.starts_with("chat_"));
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(new_conversation_id(), new_conversation_id());
    }

    #[test]
    fn last_code_block_skips_trailing_prose() {
        let mut conversation = Conversation::new();
        conversation.messages.push(Message::bot_code("first"));
        conversation.messages.push(Message::bot_code("second"));
        conversation.messages.push(Message::bot_text("closing remarks"));
        assert_eq!(conversation.last_code_block(), Some("second"));
    }

    #[test]
    fn last_code_block_is_none_without_code() {
        let mut conversation = Conversation::new();
        conversation.messages.push(Message::user("hi"));
        assert_eq!(conversation.last_code_block(), None);
    }
}
