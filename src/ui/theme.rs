use ratatui::style::{Color, Modifier, Style};

/// Fixed dark palette for every piece of chrome and text the renderer
/// draws. Kept as one struct so the renderer never reaches for ad-hoc
/// colors.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background_color: Color,

    // Timeline
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub bot_text_style: Style,
    pub notice_text_style: Style,
    pub pending_style: Style,
    pub code_block_style: Style,
    pub inline_code_style: Style,

    // Sidebar
    pub sidebar_border_style: Style,
    pub sidebar_title_style: Style,
    pub sidebar_item_style: Style,
    pub sidebar_active_style: Style,
    pub sidebar_selected_style: Style,

    // Input and status
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,
    pub status_style: Style,
    pub toast_style: Style,
    pub toast_fading_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,

            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            bot_text_style: Style::default().fg(Color::White),
            notice_text_style: Style::default().fg(Color::Red),
            pending_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            code_block_style: Style::default().fg(Color::Yellow).bg(Color::Rgb(30, 30, 30)),
            inline_code_style: Style::default().fg(Color::Yellow),

            sidebar_border_style: Style::default().fg(Color::Gray),
            sidebar_title_style: Style::default().fg(Color::Gray),
            sidebar_item_style: Style::default().fg(Color::White),
            sidebar_active_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            sidebar_selected_style: Style::default().add_modifier(Modifier::REVERSED),

            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
            status_style: Style::default().fg(Color::DarkGray),
            toast_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            toast_fading_style: Style::default().fg(Color::DarkGray),
        }
    }

    /// Heading styles step down from underlined bold to plain bold.
    pub fn heading_style(&self, level: u8) -> Style {
        let base = self.bot_text_style.add_modifier(Modifier::BOLD);
        match level {
            1 => base.add_modifier(Modifier::UNDERLINED),
            2 => base,
            3 => base.fg(Color::Gray),
            _ => base.fg(Color::DarkGray),
        }
    }
}
