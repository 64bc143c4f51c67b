//! Frame rendering: sidebar, timeline, input box, status line.
//!
//! Immediate-mode: every frame rebuilds the full conversation list and
//! timeline from store state, so there is no incremental-append
//! bookkeeping to get out of sync.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

use crate::core::chat::SendPhase;
use crate::core::constants::PENDING_INDICATOR;
use crate::core::store::ConversationStore;
use crate::ui::markdown::render_markdown_lite;
use crate::ui::state::{Focus, Mode, UiState};
use crate::ui::theme::Theme;
use crate::ui::toast::ToastPhase;

const SIDEBAR_WIDTH: u16 = 30;
const INPUT_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

pub fn draw(
    frame: &mut Frame,
    store: &ConversationStore,
    ui: &UiState,
    phase: &SendPhase,
    theme: &Theme,
) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        frame.area(),
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
        .split(frame.area());

    draw_sidebar(frame, columns[0], store, ui, theme);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(columns[1]);

    draw_timeline(frame, rows[0], store, ui, phase, theme);
    draw_input(frame, rows[1], store, ui, theme);
    draw_status(frame, rows[2], ui, theme);
}

fn draw_sidebar(
    frame: &mut Frame,
    area: Rect,
    store: &ConversationStore,
    ui: &UiState,
    theme: &Theme,
) {
    let mut lines = Vec::new();
    for (index, conversation) in store.conversations().iter().enumerate() {
        let is_active = store.active_id() == Some(conversation.id.as_str());
        let mut style = if is_active {
            theme.sidebar_active_style
        } else {
            theme.sidebar_item_style
        };
        if ui.focus == Focus::Sidebar && index == ui.sidebar_selected {
            style = style.patch(theme.sidebar_selected_style);
        }
        let marker = if is_active { "● " } else { "  " };
        let title = match &ui.mode {
            Mode::Renaming {
                conversation_id,
                buffer,
            } if *conversation_id == conversation.id => format!("{buffer}▏"),
            _ => conversation.title.clone(),
        };
        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), style),
            Span::styled(title, style),
        ]));
    }

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.sidebar_border_style)
            .title(Span::styled(" Conversations ", theme.sidebar_title_style)),
    );
    frame.render_widget(sidebar, area);
}

/// Timeline content for the active conversation: persisted messages,
/// then display-only notices, then the pending indicator. Also used by
/// the event loop for scroll clamping.
pub fn timeline_lines(
    store: &ConversationStore,
    ui: &UiState,
    phase: &SendPhase,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let Some(conversation) = store.active_conversation() else {
        return lines;
    };

    for message in &conversation.messages {
        if message.role.is_user() {
            lines.push(Line::from(vec![
                Span::styled("You: ".to_string(), theme.user_prefix_style),
                Span::styled(message.content.clone(), theme.user_text_style),
            ]));
        } else if message.is_code() {
            if message.content.is_empty() {
                lines.push(Line::from(Span::styled(
                    String::new(),
                    theme.code_block_style,
                )));
            }
            for code_line in message.content.lines() {
                lines.push(Line::from(Span::styled(
                    code_line.to_string(),
                    theme.code_block_style,
                )));
            }
        } else {
            lines.extend(render_markdown_lite(
                &message.content,
                theme.bot_text_style,
                theme,
            ));
        }
        lines.push(Line::from(""));
    }

    for notice in &ui.notices {
        lines.push(Line::from(Span::styled(
            notice.content.clone(),
            theme.notice_text_style,
        )));
        lines.push(Line::from(""));
    }

    if phase.is_sending_for(&conversation.id) {
        lines.push(Line::from(Span::styled(
            PENDING_INDICATOR.to_string(),
            theme.pending_style,
        )));
        lines.push(Line::from(""));
    }

    lines
}

fn draw_timeline(
    frame: &mut Frame,
    area: Rect,
    store: &ConversationStore,
    ui: &UiState,
    phase: &SendPhase,
    theme: &Theme,
) {
    let lines = timeline_lines(store, ui, phase, theme);
    let available_height = area.height.saturating_sub(1);
    let max_offset = (lines.len() as u16).saturating_sub(available_height);
    let offset = if ui.auto_scroll {
        max_offset
    } else {
        ui.scroll_offset.min(max_offset)
    };

    let title = store
        .active_conversation()
        .map(|c| format!(" {} ", c.title))
        .unwrap_or_default();
    let timeline = Paragraph::new(lines)
        .block(Block::default().title(Span::styled(title, theme.sidebar_title_style)))
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    frame.render_widget(timeline, area);
}

fn draw_input(
    frame: &mut Frame,
    area: Rect,
    store: &ConversationStore,
    ui: &UiState,
    theme: &Theme,
) {
    let (text, text_style, title, show_cursor) = match &ui.mode {
        Mode::Normal => (
            ui.input.clone(),
            theme.input_text_style,
            " Message (Enter to send) ",
            ui.focus == Focus::Input,
        ),
        Mode::Renaming { buffer, .. } => (
            buffer.clone(),
            theme.input_text_style,
            " Rename conversation (Enter to confirm, Esc to cancel) ",
            true,
        ),
        Mode::ConfirmingDelete { conversation_id } => {
            let title_text = store
                .get(conversation_id)
                .map(|c| c.title.clone())
                .unwrap_or_default();
            (
                format!("Delete \"{title_text}\"? Press y to confirm."),
                theme.notice_text_style,
                " Confirm delete ",
                false,
            )
        }
    };

    let input = Paragraph::new(Span::styled(text.clone(), text_style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.input_border_style)
            .title(Span::styled(title, theme.input_title_style)),
    );
    frame.render_widget(input, area);

    if show_cursor {
        let cursor_x = area.x + 1 + text.width() as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_status(frame: &mut Frame, area: Rect, ui: &UiState, theme: &Theme) {
    if let Some(toast) = &ui.toast {
        match toast.phase_at(Instant::now()) {
            Some(ToastPhase::Visible) => {
                let widget = Paragraph::new(Span::styled(
                    format!(" {} ", toast.text()),
                    theme.toast_style,
                ))
                .alignment(Alignment::Right);
                frame.render_widget(widget, area);
                return;
            }
            Some(ToastPhase::Fading) => {
                let widget = Paragraph::new(Span::styled(
                    format!(" {} ", toast.text()),
                    theme.toast_fading_style,
                ))
                .alignment(Alignment::Right);
                frame.render_widget(widget, area);
                return;
            }
            _ => {}
        }
    }

    let hint = match ui.focus {
        Focus::Input => "Tab: conversations · Ctrl+N: new chat · Ctrl+Y: copy code · Ctrl+C: quit",
        Focus::Sidebar => "Enter: open · n: new · r: rename · d: delete · Tab: back",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, theme.status_style)),
        area,
    );
}
