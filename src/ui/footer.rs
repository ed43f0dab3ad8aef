use crate::ui::app::{Notice, NoticeLevel};
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR, STATUS_WARN};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer<'a> {
    notice: Option<&'a Notice>,
    signed_in: bool,
    can_retry: bool,
}

impl<'a> Footer<'a> {
    pub fn new(notice: Option<&'a Notice>, signed_in: bool, can_retry: bool) -> Self {
        Self {
            notice,
            signed_in,
            can_retry,
        }
    }

    fn hints(&self) -> String {
        let mut hints = vec![if self.signed_in {
            "Ctrl+L: Sign out"
        } else {
            "Enter: Register"
        }];
        if self.can_retry {
            hints.push("Ctrl+R: Retry");
        }
        hints.push("Esc: Quit");
        format!(" {}", hints.join(" │ "))
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let dim = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let (text, style) = match self.notice {
            Some(notice) => {
                let color = match notice.level {
                    NoticeLevel::Info => HEADER_TEXT,
                    NoticeLevel::Warning => STATUS_WARN,
                    NoticeLevel::Error => STATUS_ERROR,
                };
                (format!(" {}", notice.text), Style::default().fg(color))
            }
            None => (self.hints(), dim),
        };
        let version = format!("v{} ", VERSION);

        // Pad by char count so multi-byte separators line up.
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(text.chars().count())
            .saturating_sub(version.chars().count());

        Paragraph::new(Line::from(vec![
            Span::styled(text, style),
            Span::styled(" ".repeat(padding), dim),
            Span::styled(version, dim),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_follow_session_and_retry() {
        assert_eq!(Footer::new(None, false, false).hints(), " Enter: Register │ Esc: Quit");
        assert_eq!(
            Footer::new(None, true, true).hints(),
            " Ctrl+L: Sign out │ Ctrl+R: Retry │ Esc: Quit"
        );
    }
}
