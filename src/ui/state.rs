//! Transient interface state. Nothing in here is ever persisted: the
//! pending indicator, error notices, scroll position, and editing modes
//! all reset on restart.

use crate::core::message::Message;
use crate::ui::toast::Toast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Sidebar,
}

/// Modal editing state for the sidebar's contextual actions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Renaming {
        conversation_id: String,
        buffer: String,
    },
    ConfirmingDelete {
        conversation_id: String,
    },
}

#[derive(Default)]
pub struct UiState {
    pub input: String,
    pub focus: Focus,
    pub mode: Mode,
    /// Index into the conversation list the sidebar cursor sits on.
    pub sidebar_selected: usize,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    /// Display-only bot notices for the currently viewed conversation,
    /// dropped on every conversation switch.
    pub notices: Vec<Message>,
    pub toast: Option<Toast>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            auto_scroll: true,
            ..Self::default()
        }
    }

    pub fn show_toast(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast::new(text));
    }

    /// Reset per-conversation view state after a switch, create, or
    /// delete.
    pub fn reset_for_conversation_switch(&mut self) {
        self.notices.clear();
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }

    pub fn clamp_sidebar_selection(&mut self, conversation_count: usize) {
        if conversation_count == 0 {
            self.sidebar_selected = 0;
        } else if self.sidebar_selected >= conversation_count {
            self.sidebar_selected = conversation_count - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_conversations_drops_transient_view_state() {
        let mut ui = UiState::new();
        ui.notices.push(Message::bot_text("notice"));
        ui.scroll_offset = 12;
        ui.auto_scroll = false;
        ui.reset_for_conversation_switch();
        assert!(ui.notices.is_empty());
        assert_eq!(ui.scroll_offset, 0);
        assert!(ui.auto_scroll);
    }

    #[test]
    fn sidebar_selection_clamps_to_the_list() {
        let mut ui = UiState::new();
        ui.sidebar_selected = 5;
        ui.clamp_sidebar_selection(3);
        assert_eq!(ui.sidebar_selected, 2);
        ui.clamp_sidebar_selection(0);
        assert_eq!(ui.sidebar_selected, 0);
    }
}
