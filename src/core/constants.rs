/// Title a conversation carries until its first exchange names it.
pub const DEFAULT_CONVERSATION_TITLE: &str = "New Chat";

/// Number of characters of the first user message used for the auto-title.
pub const TITLE_PREFIX_LEN: usize = 25;

/// Transient placeholder shown while a reply is in flight. Never persisted.
pub const PENDING_INDICATOR: &str = "Thinking... 🤔";

/// Reply text substituted when the API answers without any usable text.
pub const EMPTY_REPLY_NOTICE: &str = "Sorry, I couldn't respond.";

/// Transient notice shown when the request itself fails.
pub const REQUEST_FAILED_NOTICE: &str = "⚠️ Error connecting to AI";
