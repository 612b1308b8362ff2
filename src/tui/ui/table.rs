use crate::cards::{Card, CardSuit, Joker};
use crate::game::{HistoryEntry, TimerEvent};
use crate::seat::Seat;
use crate::state::Phase;
use crate::tui::app::{AppState, HUMAN_SEAT};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, columns, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(5), // reserve + standing play
            Constraint::Min(6),    // seats
            Constraint::Length(5), // own hand
            Constraint::Length(4), // status bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_floor(f, app, chunks[1]);

    let seat_cols = columns(chunks[2], Seat::ALL.len());
    for (seat, area) in Seat::ALL.into_iter().zip(seat_cols.iter()) {
        draw_seat(f, app, seat, *area);
    }

    draw_own_hand(f, app, chunks[3]);
    draw_status(f, app, chunks[4]);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    }
}

fn draw_header(f: &mut Frame, app: &AppState, area: Rect) {
    let state = app.game.state();
    let scores = state.scores();
    let countdown = app
        .game
        .countdown()
        .map(|d| format!("{}s", d.as_secs() + u64::from(d.subsec_nanos() > 0)))
        .unwrap_or_else(|| "--".to_string());
    let landlord = state.landlord().map_or_else(|| "--".to_string(), |s| s.to_string());
    let lines = vec![
        Line::from(format!(
            "Hand #{}   Phase: {}   Landlord: {landlord}   Clock: {countdown}",
            state.hand_number(),
            phase_label(state.phase()),
        )),
        Line::from(format!(
            "Scores  P1 {:+}  P2 {:+}  P3 {:+}",
            scores[0], scores[1], scores[2]
        )),
    ];
    let header =
        Paragraph::new(lines).block(Block::default().title("doudizhu-rs").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_floor(f: &mut Frame, app: &AppState, area: Rect) {
    let state = app.game.state();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let reserve_line = match (state.landlord(), state.reserve()) {
        (Some(_), Some(cards)) => cards_line(cards, None, None),
        (None, Some(_)) => Line::from("[??] [??] [??]"),
        _ => Line::from(Span::styled("--", dim())),
    };
    let reserve = Paragraph::new(vec![Line::from(""), reserve_line])
        .alignment(Alignment::Center)
        .block(Block::default().title("Reserve").borders(Borders::ALL));
    f.render_widget(reserve, cols[0]);

    let (title, body) = match state.last_play() {
        Some(lp) => (format!("Floor: {}", lp.by_seat), cards_line(&lp.cards, None, None)),
        None if state.phase() == Phase::Playing => {
            (format!("Floor: open ({} leads)", state.current()), Line::from(""))
        }
        None => ("Floor".to_string(), Line::from("")),
    };
    let floor = Paragraph::new(vec![Line::from(""), body])
        .alignment(Alignment::Center)
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(floor, cols[1]);
}

fn draw_seat(f: &mut Frame, app: &AppState, seat: Seat, area: Rect) {
    let state = app.game.state();
    let mut title = seat.to_string();
    if seat == HUMAN_SEAT {
        title.push_str(" [You]");
    }
    if let Some(label) = app.bot_label(seat) {
        title.push_str(&format!(" [BOT:{label}]"));
    }
    if state.landlord() == Some(seat) {
        title.push_str(" [Landlord]");
    }
    let on_turn =
        matches!(state.phase(), Phase::Bidding | Phase::Playing) && state.current() == seat;
    if on_turn {
        title.push_str(" [Act]");
    }

    let mut block = Block::default().title(title).borders(Borders::ALL);
    if state.winner() == Some(seat) {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if on_turn {
        block = block.border_style(Style::default().fg(Color::Yellow));
    } else if seat == HUMAN_SEAT {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }

    let bid = state
        .bidding()
        .and_then(|b| b.log().iter().find(|r| r.seat == seat))
        .map(|r| format!("{:?}", r.decision));
    let played = state.played(seat);
    let recent: Vec<Card> = played.iter().rev().take(8).rev().copied().collect();
    let mut lines = vec![
        Line::from(format!("Cards: {}", state.hand(seat).len())),
        Line::from(format!("Score: {:+}", state.scores()[seat.index()])),
        match bid {
            Some(b) => Line::from(format!("Bid: {b}")),
            None => Line::from(vec![Span::raw("Bid: "), Span::styled("--", dim())]),
        },
        Line::from(format!("Played ({}):", played.len())),
    ];
    lines.push(cards_line(&recent, None, None));
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_own_hand(f: &mut Frame, app: &AppState, area: Rect) {
    let hand = app.game.state().hand(HUMAN_SEAT);
    let title = format!("Your hand ({}), {} selected", hand.len(), app.selected().len());
    let line = if hand.is_empty() {
        Line::from(Span::styled("no cards", dim()))
    } else {
        cards_line(hand.as_slice(), Some(app.cursor()), Some(app))
    };
    let para = Paragraph::new(vec![Line::from(""), line])
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner(area));

    let state = app.game.state();
    let view = app.game.view_for(HUMAN_SEAT);
    let mut left = if !app.hand_started {
        vec![Line::from("Press Space to deal.")]
    } else {
        match state.phase() {
            Phase::Ended => vec![Line::from(format!(
                "{} emptied their hand: {}. Space for next hand.",
                state.winner().map_or_else(|| "--".to_string(), |s| s.to_string()),
                state.result().map_or("--", |r| r.as_str()),
            ))],
            Phase::Bidding if view.is_my_turn() => {
                vec![action_line(&[("C claim", true), ("D decline", true)])]
            }
            Phase::Playing if view.is_my_turn() => vec![action_line(&[
                ("Enter play", !app.selected().is_empty()),
                ("P pass", view.can_pass),
                ("←/→ move  ↑ select  X clear", true),
            ])],
            _ => vec![Line::from(format!("Waiting on {}", state.current()))],
        }
    };
    if let Some(event) = app.last_timer_event() {
        left.push(Line::from(Span::styled(timer_event_label(event), dim())));
    }
    if let Some(err) = app.action_error() {
        left.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let right = vec![Line::from("? help • H history • M menu")];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries = app.game.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No history yet."));
    } else {
        lines.extend(entries.iter().map(history_line));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Up/Down scroll • Close: H or Esc", dim())));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn history_line(entry: &HistoryEntry) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("{} {}", entry.seat, entry.verb.label()))];
    for card in &entry.cards {
        spans.push(Span::raw(" "));
        spans.push(card_span(*card, Style::default()));
    }
    if entry.timed_out {
        spans.push(Span::styled(" (timeout)", dim()));
    }
    Line::from(spans)
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space: deal / next hand"),
        Line::from("- C / D: claim / decline landlord"),
        Line::from("- Left / Right: move cursor"),
        Line::from("- Up: select card under cursor"),
        Line::from("- X: clear selection"),
        Line::from("- Enter: play selected cards"),
        Line::from("- P: pass"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Rules:", bold)),
        Line::from("- Any non-empty set of your cards may be played"),
        Line::from("- You cannot pass on an open floor or your own play"),
        Line::from("- When the clock runs out you decline or pass"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply"),
        Line::from("- Q: quit (menu)"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn action_line(items: &[(&'static str, bool)]) -> Line<'static> {
    let mut spans = vec![Span::raw("Actions: ")];
    for (i, (label, enabled)) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" • "));
        }
        let style = if *enabled { Style::default().add_modifier(Modifier::BOLD) } else { dim() };
        spans.push(Span::styled(*label, style));
    }
    Line::from(spans)
}

fn timer_event_label(event: TimerEvent) -> String {
    match event {
        TimerEvent::AutoDeclined(seat) => format!("{seat} ran out of time and declined"),
        TimerEvent::AutoPassed(seat) => format!("{seat} ran out of time and passed"),
        TimerEvent::Rearmed(seat) => format!("{seat} ran out of time holding the floor"),
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Dealing => "Dealing",
        Phase::Bidding => "Bidding",
        Phase::Playing => "Playing",
        Phase::Ended => "Ended",
    }
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn suit_glyph_and_style(s: CardSuit) -> (&'static str, Style) {
    match s {
        CardSuit::Hearts => ("♥", Style::default().fg(Color::Red)),
        CardSuit::Diamonds => ("♦", Style::default().fg(Color::Red)),
        CardSuit::Spades => ("♠", Style::default().fg(Color::White)),
        CardSuit::Clubs => ("♣", Style::default().fg(Color::White)),
        CardSuit::Joker => ("", Style::default().fg(Color::Magenta)),
    }
}

fn card_span(card: Card, extra: Style) -> Span<'static> {
    let (glyph, style) = suit_glyph_and_style(card.suit());
    let text = match card {
        Card::Standard { rank, .. } => format!("{}{glyph}", rank.label()),
        Card::Joker(Joker::Small) => "sJ".to_string(),
        Card::Joker(Joker::Big) => "BJ".to_string(),
    };
    Span::styled(text, style.patch(extra))
}

/// Cards in one line. With `app` set, the cursor and selection are highlighted.
fn cards_line(cards: &[Card], cursor: Option<usize>, app: Option<&AppState>) -> Line<'static> {
    let mut spans = Vec::with_capacity(cards.len() * 2);
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let mut extra = Style::default();
        if app.is_some_and(|a| a.selected().contains(&i)) {
            extra = extra.add_modifier(Modifier::REVERSED);
        }
        if cursor == Some(i) {
            extra = extra.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        spans.push(card_span(*card, extra));
    }
    Line::from(spans)
}
