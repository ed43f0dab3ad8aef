use crate::state::GlobalState;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, state: &GlobalState, connected: bool) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (marker_style, link) = if connected {
            (Style::default().fg(STATUS_OK), "live")
        } else {
            (Style::default().fg(STATUS_ERROR), "offline")
        };
        let user = match &state.current_user {
            Some(user) => user.name.clone(),
            None => "not registered".to_string(),
        };

        let line = Line::from(vec![
            Span::styled("  gamesync", text_style),
            Span::styled("  │  ", separator_style),
            Span::styled("●", marker_style),
            Span::styled(format!(" {}", link), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(user, text_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
