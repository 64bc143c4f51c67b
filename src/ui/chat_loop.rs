//! Main event loop: draw, poll terminal events, dispatch explicit
//! list/send commands, and drain completed request outcomes.
//!
//! The remote call runs on a spawned task and reports back over an
//! unbounded channel, so the loop itself never blocks on the network.

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::Terminal;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::core::chat::{ChatController, SendOutcome, SendPhase, SendRequest, SessionContext};
use crate::core::store::ConversationStore;
use crate::ui::renderer;
use crate::ui::state::{Focus, Mode, UiState};
use crate::ui::theme::Theme;
use crate::utils::clipboard::copy_to_clipboard;

/// Rows of chrome around the timeline: input box, status line, title row.
const CHROME_HEIGHT: u16 = 3 + 1 + 1;

const MOUSE_SCROLL_STEP: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ListAction {
    Select(String),
    Rename { id: String, title: String },
    Delete(String),
    NewChat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopAction {
    Continue,
    Exit,
}

pub async fn run(
    store: &mut ConversationStore,
    session: SessionContext,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, store, &session).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: &mut ConversationStore,
    session: &SessionContext,
) -> Result<(), Box<dyn std::error::Error>> {
    let theme = Theme::dark_default();
    let (tx, mut rx) = mpsc::unbounded_channel::<SendOutcome>();
    let mut ui = UiState::new();
    let mut phase = SendPhase::Idle;

    loop {
        if let Some(toast) = &ui.toast {
            if toast.phase_at(std::time::Instant::now()).is_none() {
                ui.toast = None;
            }
        }

        terminal.draw(|frame| renderer::draw(frame, store, &ui, &phase, &theme))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let viewport = viewport_height(terminal);
                    let action =
                        handle_key(key, store, &mut ui, &mut phase, session, &tx, viewport, &theme);
                    if action == LoopAction::Exit {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    let viewport = viewport_height(terminal);
                    match mouse.kind {
                        MouseEventKind::ScrollUp => scroll_up(
                            store,
                            &mut ui,
                            &phase,
                            &theme,
                            MOUSE_SCROLL_STEP,
                            viewport,
                        ),
                        MouseEventKind::ScrollDown => scroll_down(
                            store,
                            &mut ui,
                            &phase,
                            &theme,
                            MOUSE_SCROLL_STEP,
                            viewport,
                        ),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        while let Ok(outcome) = rx.try_recv() {
            let for_viewed = store.active_id() == Some(outcome.conversation_id.as_str());
            if let Some(notice) = ChatController::new(store, &mut phase).finish_send(outcome) {
                if for_viewed {
                    ui.notices.push(notice);
                }
            }
        }
    }

    Ok(())
}

fn viewport_height(terminal: &Terminal<CrosstermBackend<io::Stdout>>) -> u16 {
    terminal
        .size()
        .map(|size| size.height)
        .unwrap_or_default()
        .saturating_sub(CHROME_HEIGHT)
}

#[allow(clippy::too_many_arguments)]
fn handle_key(
    key: KeyEvent,
    store: &mut ConversationStore,
    ui: &mut UiState,
    phase: &mut SendPhase,
    session: &SessionContext,
    tx: &mpsc::UnboundedSender<SendOutcome>,
    viewport: u16,
    theme: &Theme,
) -> LoopAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return LoopAction::Exit;
    }

    match std::mem::take(&mut ui.mode) {
        Mode::Renaming {
            conversation_id,
            mut buffer,
        } => {
            match key.code {
                KeyCode::Enter => {
                    dispatch_list_action(
                        store,
                        ui,
                        ListAction::Rename {
                            id: conversation_id,
                            title: buffer,
                        },
                    );
                }
                KeyCode::Esc => {}
                KeyCode::Backspace => {
                    buffer.pop();
                    ui.mode = Mode::Renaming {
                        conversation_id,
                        buffer,
                    };
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    buffer.push(c);
                    ui.mode = Mode::Renaming {
                        conversation_id,
                        buffer,
                    };
                }
                _ => {
                    ui.mode = Mode::Renaming {
                        conversation_id,
                        buffer,
                    };
                }
            }
            LoopAction::Continue
        }
        Mode::ConfirmingDelete { conversation_id } => {
            // Any key other than an explicit yes declines the delete.
            if key.code == KeyCode::Char('y') || key.code == KeyCode::Char('Y') {
                dispatch_list_action(store, ui, ListAction::Delete(conversation_id));
            }
            LoopAction::Continue
        }
        Mode::Normal => match ui.focus {
            Focus::Input => handle_input_key(key, store, ui, phase, session, tx, viewport, theme),
            Focus::Sidebar => handle_sidebar_key(key, store, ui),
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_input_key(
    key: KeyEvent,
    store: &mut ConversationStore,
    ui: &mut UiState,
    phase: &mut SendPhase,
    session: &SessionContext,
    tx: &mpsc::UnboundedSender<SendOutcome>,
    viewport: u16,
    theme: &Theme,
) -> LoopAction {
    match key.code {
        KeyCode::Enter => {
            let input = ui.input.clone();
            if let Some(request) = ChatController::new(store, phase).begin_send(&input) {
                ui.input.clear();
                ui.auto_scroll = true;
                spawn_send(session, tx.clone(), request);
            }
        }
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            dispatch_list_action(store, ui, ListAction::NewChat);
        }
        KeyCode::Char('y') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            copy_last_code_block(store, ui);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            ui.input.push(c);
        }
        KeyCode::Backspace => {
            ui.input.pop();
        }
        KeyCode::Tab => {
            ui.focus = Focus::Sidebar;
            ui.sidebar_selected = active_index(store);
        }
        KeyCode::Up => scroll_up(store, ui, phase, theme, 1, viewport),
        KeyCode::Down => scroll_down(store, ui, phase, theme, 1, viewport),
        _ => {}
    }
    LoopAction::Continue
}

fn handle_sidebar_key(key: KeyEvent, store: &mut ConversationStore, ui: &mut UiState) -> LoopAction {
    match key.code {
        KeyCode::Up => {
            ui.sidebar_selected = ui.sidebar_selected.saturating_sub(1);
        }
        KeyCode::Down => {
            ui.sidebar_selected = (ui.sidebar_selected + 1)
                .min(store.conversations().len().saturating_sub(1));
        }
        KeyCode::Enter => {
            if let Some(id) = selected_id(store, ui) {
                dispatch_list_action(store, ui, ListAction::Select(id));
                ui.focus = Focus::Input;
            }
        }
        KeyCode::Char('n') => {
            dispatch_list_action(store, ui, ListAction::NewChat);
        }
        KeyCode::Char('r') => {
            if let Some(id) = selected_id(store, ui) {
                let title = store.get(&id).map(|c| c.title.clone()).unwrap_or_default();
                ui.mode = Mode::Renaming {
                    conversation_id: id,
                    buffer: title,
                };
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = selected_id(store, ui) {
                ui.mode = Mode::ConfirmingDelete {
                    conversation_id: id,
                };
            }
        }
        KeyCode::Tab | KeyCode::Esc => {
            ui.focus = Focus::Input;
        }
        _ => {}
    }
    LoopAction::Continue
}

fn selected_id(store: &ConversationStore, ui: &UiState) -> Option<String> {
    store
        .conversations()
        .get(ui.sidebar_selected)
        .map(|c| c.id.clone())
}

fn active_index(store: &ConversationStore) -> usize {
    store
        .conversations()
        .iter()
        .position(|c| store.active_id() == Some(c.id.as_str()))
        .unwrap_or(0)
}

/// The presenter's contextual actions, routed through one place so list
/// construction stays decoupled from action wiring.
fn dispatch_list_action(store: &mut ConversationStore, ui: &mut UiState, action: ListAction) {
    match action {
        ListAction::Select(id) => {
            if store.active_id() != Some(id.as_str()) {
                store.set_active(&id);
                ui.reset_for_conversation_switch();
            }
        }
        ListAction::Rename { id, title } => {
            store.rename_conversation(&id, &title);
        }
        ListAction::Delete(id) => {
            let viewed = store.active_id() == Some(id.as_str());
            store.delete_conversation(&id);
            if viewed {
                ui.reset_for_conversation_switch();
            }
            ui.clamp_sidebar_selection(store.conversations().len());
        }
        ListAction::NewChat => {
            store.create_conversation();
            ui.reset_for_conversation_switch();
            ui.sidebar_selected = 0;
        }
    }
}

fn spawn_send(
    session: &SessionContext,
    tx: mpsc::UnboundedSender<SendOutcome>,
    request: SendRequest,
) {
    let client = session.client.clone();
    let base_url = session.base_url.clone();
    let model = session.model.clone();
    let api_key = session.api_key.clone();
    tokio::spawn(async move {
        let result = crate::api::generate(&client, &base_url, &model, &api_key, &request.prompt)
            .await
            .map_err(|e| e.to_string());
        let _ = tx.send(SendOutcome {
            conversation_id: request.conversation_id,
            result,
        });
    });
}

fn copy_last_code_block(store: &ConversationStore, ui: &mut UiState) {
    let code = store
        .active_conversation()
        .and_then(|c| c.last_code_block())
        .map(str::to_string);
    match code {
        Some(code) => match copy_to_clipboard(&code) {
            Ok(()) => ui.show_toast("Code is copied on clipboard"),
            Err(error) => ui.show_toast(error),
        },
        None => ui.show_toast("No code block to copy"),
    }
}

fn scroll_up(
    store: &ConversationStore,
    ui: &mut UiState,
    phase: &SendPhase,
    theme: &Theme,
    step: u16,
    viewport: u16,
) {
    // Detach from the bottom; start from wherever auto-scroll had us.
    if ui.auto_scroll {
        ui.scroll_offset = timeline_len(store, ui, phase, theme).saturating_sub(viewport);
    }
    ui.auto_scroll = false;
    ui.scroll_offset = ui.scroll_offset.saturating_sub(step);
}

fn scroll_down(
    store: &ConversationStore,
    ui: &mut UiState,
    phase: &SendPhase,
    theme: &Theme,
    step: u16,
    viewport: u16,
) {
    let max_offset = timeline_len(store, ui, phase, theme).saturating_sub(viewport);
    ui.scroll_offset = ui.scroll_offset.saturating_add(step).min(max_offset);
    if ui.scroll_offset >= max_offset {
        ui.auto_scroll = true;
    }
}

fn timeline_len(store: &ConversationStore, ui: &UiState, phase: &SendPhase, theme: &Theme) -> u16 {
    renderer::timeline_lines(store, ui, phase, theme).len() as u16
}
