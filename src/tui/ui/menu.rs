use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let area = centered_rect(80, 80, size);
    let block = Block::default().title("doudizhu-rs").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block.clone(), area);
    let inner_all = inner(area);

    let logo = r#"
 ____              ____  _     _
|  _ \  ___  _   _|  _ \(_)___| |__  _   _
| | | |/ _ \| | | | | | | |_  / '_ \| | | |
| |_| | (_) | |_| | |_| | |/ /| | | | |_| |
|____/ \___/ \__,_|____/|_/___|_| |_|\__,_|
"#;

    let logo_lines: Vec<Line> = logo
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Red))))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(logo_lines.len() as u16 + 1), Constraint::Min(3)])
        .split(inner_all);

    let logo_para =
        Paragraph::new(logo_lines).wrap(Wrap { trim: false }).alignment(Alignment::Center);
    f.render_widget(logo_para, rows[0]);

    let config_items = app.menu_items_display();
    let hints = [String::from("[Enter] Sit down  [Q] Quit  [Esc] Back  [↑/↓] Move  [+/-] Adjust")];
    let mut cfg_lines: Vec<Line> = Vec::new();
    cfg_lines.push(Line::from(Span::styled(
        "Table settings:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (i, it) in config_items.iter().enumerate() {
        let style = if i == app.menu_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        cfg_lines.push(Line::from(Span::styled(it.clone(), style)));
    }
    let seed = app.game.config().seed.map_or_else(|| "random".to_string(), |s| s.to_string());
    cfg_lines.push(Line::from(Span::styled(
        format!("Shuffle seed: {seed} (DDZ_SEED)"),
        Style::default().add_modifier(Modifier::DIM),
    )));
    cfg_lines.push(Line::from(""));
    cfg_lines.extend(rules_lines());
    if app.hand_started {
        let scores = app.game.state().scores();
        cfg_lines.push(Line::from(format!(
            "Hand #{}  scores P1 {:+}  P2 {:+}  P3 {:+}",
            app.game.state().hand_number(),
            scores[0],
            scores[1],
            scores[2]
        )));
        cfg_lines.push(Line::from(Span::styled(
            "Enter starts a fresh match and clears the scores; Esc returns to the hand",
            Style::default().fg(Color::Yellow),
        )));
    }
    cfg_lines.push(Line::from(""));
    for hint in hints {
        cfg_lines
            .push(Line::from(Span::styled(hint, Style::default().add_modifier(Modifier::DIM))));
    }
    let cfg_para = Paragraph::new(cfg_lines).wrap(Wrap { trim: true }).alignment(Alignment::Center);
    f.render_widget(cfg_para, rows[1]);
}

fn rules_lines() -> Vec<Line<'static>> {
    let dim = Style::default().add_modifier(Modifier::DIM);
    vec![
        Line::from(Span::styled("You sit at P1 against two bots.", dim)),
        Line::from(Span::styled(
            "54 cards: 17 each, the last 3 go to whoever claims landlord.",
            dim,
        )),
        Line::from(Span::styled(
            "First to empty a hand wins. Landlord +2 / farmers -1, or landlord -2 / farmers +1.",
            dim,
        )),
    ]
}
