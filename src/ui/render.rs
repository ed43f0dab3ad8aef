use crate::state::{Game, GameStatus, GlobalState};
use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect, layout_regions};
use crate::ui::register::RegisterState;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR, STATUS_OK};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let (header, body, footer) = layout_regions(frame.area());
    let global = app.global();

    frame.render_widget(Header::new().widget(&global, app.events_connected()), header);
    frame.render_widget(Clear, body);
    if global.is_signed_in() {
        draw_session(frame, body, &global);
    } else {
        draw_register(frame, body, &app.register_form());
    }

    let footer_widget = Footer::new(app.notice(), global.is_signed_in(), app.has_retry());
    frame.render_widget(footer_widget.widget(footer), footer);
}

fn draw_register(frame: &mut Frame<'_>, body: Rect, form: &RegisterState) {
    let area = centered_rect(48, 7, body);
    let text_style = Style::default().fg(HEADER_TEXT);

    let mut lines = vec![
        Line::from(Span::styled("Pick a player name:", text_style)),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(ACCENT)),
            Span::styled(form.name.clone(), text_style.add_modifier(Modifier::BOLD)),
        ]),
    ];
    if form.submitting {
        lines.push(Line::from(Span::styled(
            "Registering...",
            text_style.add_modifier(Modifier::DIM),
        )));
    } else if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(STATUS_ERROR),
        )));
    }

    let block = Block::default()
        .title(" Register ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if !form.submitting && inner.width > 2 && inner.height > 1 {
        let column = (form.name.chars().count() as u16 + 2).min(inner.width - 1);
        frame.set_cursor_position((inner.x + column, inner.y + 1));
    }
}

fn draw_session(frame: &mut Frame<'_>, body: Rect, global: &GlobalState) {
    let text_style = Style::default().fg(HEADER_TEXT);
    let mut lines = Vec::new();
    if let Some(user) = &global.current_user {
        lines.push(Line::from(Span::styled(
            format!("Signed in as {} ({})", user.name, user.id),
            text_style,
        )));
        lines.push(Line::from(""));
    }
    match &global.current_game {
        Some(game) => lines.extend(game_lines(game)),
        None => lines.push(Line::from(Span::styled(
            "Waiting for a game...",
            text_style.add_modifier(Modifier::DIM),
        ))),
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), body);
}

fn game_lines(game: &Game) -> Vec<Line<'static>> {
    let status_style = if game.is_finished() {
        Style::default().fg(STATUS_ERROR)
    } else {
        Style::default().fg(STATUS_OK)
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("Game {}  ", game.id), Style::default().fg(ACCENT)),
        Span::styled(status_label(game.status), status_style),
    ])];
    lines.extend(
        game.players
            .iter()
            .map(|player| Line::from(format!("  • {}", player.name))),
    );
    lines
}

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Waiting => "waiting for players",
        GameStatus::InProgress => "in progress",
        GameStatus::Finished => "finished",
    }
}
