//! The conversation list, its active selection, and persist-on-mutation.
//!
//! Every mutating operation rewrites the full list and the active id
//! through the storage keys before returning. Unknown-id operations are
//! silent no-ops: the id may have been deleted by the time an action
//! lands, and that race is benign.

use crate::core::constants::TITLE_PREFIX_LEN;
use crate::core::conversation::Conversation;
use crate::core::message::Message;
use crate::storage::{Storage, ACTIVE_CONVERSATION_KEY, CONVERSATIONS_KEY};

pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    storage: Box<dyn Storage>,
}

impl ConversationStore {
    /// Loads persisted state. A fresh (or unreadable) store is seeded with
    /// one empty conversation; a stale active id falls back to the front
    /// of the list.
    pub fn load_or_default(storage: Box<dyn Storage>) -> Self {
        let conversations: Vec<Conversation> = storage
            .get(CONVERSATIONS_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(list) => Some(list),
                Err(e) => {
                    tracing::warn!("discarding unreadable conversation list: {e}");
                    None
                }
            })
            .unwrap_or_default();

        let active_id = storage
            .get(ACTIVE_CONVERSATION_KEY)
            .filter(|id| conversations.iter().any(|c| c.id == *id));

        let mut store = Self {
            conversations,
            active_id,
            storage,
        };
        if store.conversations.is_empty() {
            store.create_conversation();
        } else if store.active_id.is_none() {
            store.active_id = store.conversations.first().map(|c| c.id.clone());
            store.persist();
        }
        store
    }

    /// Inserts a new conversation at the front of the list and makes it
    /// active. Returns its id.
    pub fn create_conversation(&mut self) -> String {
        let conversation = Conversation::new();
        let id = conversation.id.clone();
        self.conversations.insert(0, conversation);
        self.active_id = Some(id.clone());
        self.persist();
        id
    }

    /// Most-recent-first, read-only.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active_id
            .as_deref()
            .and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn set_active(&mut self, id: &str) {
        if self.conversations.iter().any(|c| c.id == id) {
            self.active_id = Some(id.to_string());
            self.persist();
        }
    }

    pub fn append_message(&mut self, id: &str, message: Message) {
        if let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == id) {
            conversation.messages.push(message);
            self.persist();
        }
    }

    /// Empty or whitespace-only titles are rejected; anything else is
    /// stored trimmed.
    pub fn rename_conversation(&mut self, id: &str, new_title: &str) {
        let trimmed = new_title.trim();
        if trimmed.is_empty() {
            return;
        }
        if let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == id) {
            conversation.title = trimmed.to_string();
            self.persist();
        }
    }

    /// Removes a conversation. When the active one goes away, the new
    /// front of the list takes over; when the list empties, a fresh
    /// conversation is created so there is always something to type into.
    pub fn delete_conversation(&mut self, id: &str) {
        self.conversations.retain(|c| c.id != id);
        if self.active_id.as_deref() == Some(id) {
            match self.conversations.first() {
                Some(front) => self.active_id = Some(front.id.clone()),
                None => {
                    self.create_conversation();
                    return;
                }
            }
        }
        self.persist();
    }

    /// One-shot auto-title: the first `TITLE_PREFIX_LEN` characters of the
    /// first user message, applied only while the title is still the
    /// placeholder.
    pub fn auto_title(&mut self, id: &str, first_user_text: &str) {
        if let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == id) {
            if conversation.has_default_title() {
                conversation.title = first_user_text.chars().take(TITLE_PREFIX_LEN).collect();
                self.persist();
            }
        }
    }

    /// Full-snapshot write of both keys. Failures are logged and swallowed;
    /// the in-memory state stays authoritative for the session.
    fn persist(&mut self) {
        let encoded = match serde_json::to_string(&self.conversations) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!("failed to encode conversation list: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(CONVERSATIONS_KEY, &encoded) {
            tracing::error!("failed to write conversation list: {e}");
        }
        if let Some(active) = self.active_id.clone() {
            if let Err(e) = self.storage.set(ACTIVE_CONVERSATION_KEY, &active) {
                tracing::error!("failed to write active conversation id: {e}");
            }
        }
    }
}
