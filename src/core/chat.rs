//! The send lifecycle: Idle -> Sending -> {Success, Failure} -> Idle.
//!
//! One request may be in flight at a time. The pending indicator is pure
//! UI state derived from [`SendPhase`]; it is never persisted, so a
//! restart mid-send simply comes back without it.

use crate::api;
use crate::core::config::Config;
use crate::core::constants::{EMPTY_REPLY_NOTICE, REQUEST_FAILED_NOTICE};
use crate::core::message::Message;
use crate::core::splitter::{self, SegmentKind};
use crate::core::store::ConversationStore;

/// Connection parameters for the remote generation API, resolved once at
/// startup from CLI flags, the environment, and the config file.
pub struct SessionContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

impl SessionContext {
    pub fn resolve(
        config: &Config,
        model_flag: Option<String>,
        base_url_flag: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| config.api_key.clone())
            .ok_or(
                "No API key found.\n\n\
                 Set the GEMINI_API_KEY environment variable:\n\
                 export GEMINI_API_KEY=\"your-api-key-here\"\n\n\
                 or add `api_key = \"...\"` to the config file.",
            )?;

        let base_url = base_url_flag
            .or_else(|| config.base_url.clone())
            .unwrap_or_else(|| api::DEFAULT_BASE_URL.to_string());
        let model = model_flag
            .or_else(|| config.model.clone())
            .unwrap_or_else(|| api::DEFAULT_MODEL.to_string());

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            model,
            api_key,
        })
    }
}

/// Phase of the one permitted in-flight send.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SendPhase {
    #[default]
    Idle,
    Sending {
        conversation_id: String,
        /// The prompt text, kept for the post-reply auto-title.
        prompt: String,
    },
}

impl SendPhase {
    pub fn is_sending_for(&self, conversation_id: &str) -> bool {
        matches!(self, SendPhase::Sending { conversation_id: id, .. } if id == conversation_id)
    }
}

/// What the event loop hands to the spawned request task.
#[derive(Debug, Clone)]
pub struct SendRequest {
    pub conversation_id: String,
    pub prompt: String,
}

/// What the spawned request task hands back over the channel.
#[derive(Debug)]
pub struct SendOutcome {
    pub conversation_id: String,
    pub result: Result<String, String>,
}

/// Orchestrates a send against the store and the send phase. Borrowed
/// fresh for each user action, like the rest of the event handlers.
pub struct ChatController<'a> {
    store: &'a mut ConversationStore,
    phase: &'a mut SendPhase,
}

impl<'a> ChatController<'a> {
    pub fn new(store: &'a mut ConversationStore, phase: &'a mut SendPhase) -> Self {
        Self { store, phase }
    }

    /// Validates and records the outgoing message, entering the Sending
    /// phase. Returns `None` (and changes nothing) when the input is
    /// empty after trimming or another send is already in flight.
    pub fn begin_send(&mut self, input: &str) -> Option<SendRequest> {
        if *self.phase != SendPhase::Idle {
            return None;
        }
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        let conversation_id = self.store.active_id()?.to_string();
        self.store
            .append_message(&conversation_id, Message::user(text));
        *self.phase = SendPhase::Sending {
            conversation_id: conversation_id.clone(),
            prompt: text.to_string(),
        };
        Some(SendRequest {
            conversation_id,
            prompt: text.to_string(),
        })
    }

    /// Applies a completed send and returns to Idle. On success the reply
    /// is split into prose/code messages, persisted in segment order, and
    /// the conversation auto-titled. On failure the returned transient
    /// notice is for display only; nothing is persisted.
    ///
    /// A delivery for a conversation that was deleted mid-flight is
    /// dropped silently.
    pub fn finish_send(&mut self, outcome: SendOutcome) -> Option<Message> {
        let prompt = match self.phase {
            SendPhase::Sending {
                conversation_id,
                prompt,
            } if *conversation_id == outcome.conversation_id => prompt.clone(),
            _ => return None,
        };
        *self.phase = SendPhase::Idle;

        let id = outcome.conversation_id;
        if self.store.get(&id).is_none() {
            tracing::debug!("dropping reply for deleted conversation {id}");
            return None;
        }

        match outcome.result {
            Ok(reply) => {
                let reply = if reply.trim().is_empty() {
                    EMPTY_REPLY_NOTICE.to_string()
                } else {
                    reply
                };
                for segment in splitter::split(&reply) {
                    let message = match segment.kind {
                        SegmentKind::Prose => Message::bot_text(segment.text),
                        SegmentKind::Code => Message::bot_code(segment.text),
                    };
                    self.store.append_message(&id, message);
                }
                self.store.auto_title(&id, &prompt);
                None
            }
            Err(error) => {
                tracing::warn!("generation request failed: {error}");
                Some(Message::bot_text(REQUEST_FAILED_NOTICE))
            }
        }
    }
}
