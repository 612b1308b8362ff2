use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use doudizhu_rs::config::MatchConfig;
use doudizhu_rs::telemetry;
use doudizhu_rs::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::path::Path;
use std::time::Duration;

const LOG_FILE: &str = "doudizhu-rs.log";

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "doudizhu-rs needs a real terminal (TTY). Try `ddz-sim` for a headless run. Version: {}",
            doudizhu_rs::VERSION
        );
        return Ok(());
    }
    let config = match MatchConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("doudizhu-rs: {err}");
            std::process::exit(2);
        }
    };
    telemetry::init_tracing_to_file(Path::new(LOG_FILE))?;

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(200);
    let mut app = AppState::new(config);

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
