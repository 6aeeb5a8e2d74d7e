use crate::console::{Console, OutputKind};
use crate::game::GameSession;
use crate::util;
use crate::{App, AppState};
use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

/// Words this close to the loss threshold turn red
const DANGER_ZONE: f64 = 70.0;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Console => render_console(self, area, buf),
            AppState::Playing => render_playing(self, area, buf),
            AppState::GameOver => render_game_over(self, area, buf),
            AppState::Scores => render_scores(self, area, buf),
        }
    }
}

fn output_style(kind: OutputKind) -> Style {
    match kind {
        OutputKind::Text => Style::default(),
        OutputKind::Error => Style::default().fg(Color::Red),
        OutputKind::Success => Style::default().fg(Color::Green),
        OutputKind::System => Style::default().fg(Color::Blue),
    }
}

fn render_console(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(1)])
        .split(area);

    let prompt_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Console::banner()
        .iter()
        .map(|l| Line::from(Span::styled(l.content.clone(), output_style(l.kind))))
        .collect_vec();

    for entry in &app.console.history {
        lines.push(Line::from(vec![
            Span::styled("➜ ", prompt_style),
            Span::raw(entry.command.clone()),
        ]));
        for out in &entry.output {
            for piece in out.content.split('\n') {
                lines.push(Line::from(Span::styled(
                    format!("  {piece}"),
                    output_style(out.kind),
                )));
            }
        }
    }

    lines.push(Line::from(vec![
        Span::styled("➜ ", prompt_style),
        Span::raw(app.console.input.clone()),
        Span::styled("█", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]));

    // Keep the tail that fits, like a scrolled-to-bottom terminal
    let visible_height = chunks[0].height as usize;
    let skip = lines.len().saturating_sub(visible_height);
    let visible = lines.into_iter().skip(skip).collect_vec();

    Paragraph::new(visible).render(chunks[0], buf);
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let field_block = Block::default()
        .borders(Borders::ALL)
        .title(" CREATIVE BLOCK BREAKER ")
        .title_alignment(Alignment::Left);
    let field = field_block.inner(chunks[0]);
    field_block.render(chunks[0], buf);

    render_field(&app.session, field, buf);

    // Score readout in the top right corner of the field
    let score_text = format!(" SCORE: {} ", app.session.score());
    let score_width = score_text.width() as u16;
    if field.width > score_width {
        buf.set_string(
            field.right().saturating_sub(score_width),
            field.y,
            &score_text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    }

    let input_value = if app.session.current_input().is_empty() {
        Span::styled(
            "BREAK THE BLOCK",
            Style::default().add_modifier(Modifier::DIM),
        )
    } else {
        Span::styled(
            app.session.current_input().to_uppercase(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    Paragraph::new(Line::from(input_value))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .render(chunks[1], buf);
}

fn render_field(session: &GameSession, field: Rect, buf: &mut Buffer) {
    if field.width == 0 || field.height == 0 {
        return;
    }

    for word in session.words() {
        let col = field.x + word_column(word.x, &word.text, field.width);
        let row = field.y + util::percent_to_cell(word.y, field.height);
        let style = if word.y >= DANGER_ZONE {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        };
        buf.set_string(col, row, &word.text, style);
    }

    for particle in &session.hit_burst.particles {
        let col = field.x + util::percent_to_cell(particle.x, field.width);
        let row = field.y + util::percent_to_cell(particle.y, field.height);
        buf.set_string(
            col,
            row,
            particle.symbol.to_string(),
            Style::default().fg(Color::Yellow),
        );
    }
}

/// Column for a word so its full width stays inside the field
fn word_column(x_percent: f64, text: &str, field_width: u16) -> u16 {
    let text_width = text.width() as u16;
    let span = field_width.saturating_sub(text_width);
    if span == 0 {
        return 0;
    }
    let clamped = x_percent.clamp(0.0, 100.0);
    ((clamped / 100.0) * span as f64).floor() as u16
}

fn render_game_over(app: &App, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(44, 9, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(popup);
    block.render(popup, buf);

    let best_line = match app.best_score {
        Some(best) if best > app.session.score() => format!("Best: {best}"),
        _ => "New best score!".to_string(),
    };

    let lines = vec![
        Line::from(Span::styled(
            "CREATIVE BLOCK",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(format!("Final Score: {}", app.session.score())),
        Line::from(Span::styled(
            best_line,
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(Span::styled(
            "(r)estart flow · (esc) console",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

fn render_scores(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // summary
            Constraint::Min(1),    // table
            Constraint::Length(1), // hint
        ])
        .split(area);

    let scores = app
        .recent_scores
        .iter()
        .map(|r| r.score as f64)
        .collect_vec();
    let summary = format!(
        "games: {}   best: {}   avg: {:.0}",
        app.recent_scores.len(),
        app.best_score.unwrap_or(0),
        util::mean(&scores).unwrap_or(0.0),
    );
    Paragraph::new(Span::styled(
        summary,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
    .render(chunks[0], buf);

    let rows = app
        .recent_scores
        .iter()
        .skip(app.scores_scroll)
        .map(|r| {
            Row::new(vec![
                r.played_at.format("%Y-%m-%d %H:%M").to_string(),
                r.score.to_string(),
                r.words_cleared.to_string(),
                format!("{:.1}s", r.duration_secs),
                r.vocabulary.clone(),
            ])
        })
        .collect_vec();

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Min(8),
        ],
    )
    .header(
        Row::new(vec!["played", "score", "words", "time", "vocab"])
            .style(Style::default().add_modifier(Modifier::UNDERLINED)),
    )
    .block(Block::default().borders(Borders::ALL).title(" Scores "));
    Widget::render(table, chunks[1], buf);

    Paragraph::new(Span::styled(
        "↑/↓ scroll · (b)ack",
        Style::default().add_modifier(Modifier::DIM),
    ))
    .render(chunks[2], buf);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
