use crate::agents::Difficulty;
use crate::config::MatchConfig;
use crate::game::MatchController;
use std::time::Duration;

use super::{AppState, Scene};

const MAX_BID_TIMEOUT_SECS: u64 = 60;
const MAX_PLAY_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    BidTimeout,
    PlayTimeout,
    BotDifficulty,
    BotDelayMs,
}

const MENU_ITEMS: [MenuItem; 4] =
    [MenuItem::BidTimeout, MenuItem::PlayTimeout, MenuItem::BotDifficulty, MenuItem::BotDelayMs];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::BidTimeout => format!("Bid Timer (s): {}", app.cfg_bid_timeout_secs),
            MenuItem::PlayTimeout => format!("Play Timer (s): {}", app.cfg_play_timeout_secs),
            MenuItem::BotDifficulty => {
                format!("Bot Difficulty: {}", app.cfg_bot_difficulty.label())
            }
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", app.cfg_bot_delay_ms),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::BidTimeout => {
                app.cfg_bid_timeout_secs = (app.cfg_bid_timeout_secs + 1).min(MAX_BID_TIMEOUT_SECS);
            }
            MenuItem::PlayTimeout => {
                app.cfg_play_timeout_secs =
                    (app.cfg_play_timeout_secs + 1).min(MAX_PLAY_TIMEOUT_SECS);
            }
            MenuItem::BotDifficulty => app.cfg_bot_difficulty = app.cfg_bot_difficulty.next(),
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_add(100);
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::BidTimeout => {
                if app.cfg_bid_timeout_secs > 1 {
                    app.cfg_bid_timeout_secs -= 1;
                }
            }
            MenuItem::PlayTimeout => {
                if app.cfg_play_timeout_secs > 1 {
                    app.cfg_play_timeout_secs -= 1;
                }
            }
            MenuItem::BotDifficulty => app.cfg_bot_difficulty = app.cfg_bot_difficulty.prev(),
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(100);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            Scene::Menu => Scene::Table,
            _ => {
                self.open_menu();
                Scene::Menu
            }
        };
    }

    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        self.cfg_bid_timeout_secs = self.game.config().bid_timeout.as_secs();
        self.cfg_play_timeout_secs = self.game.config().play_timeout.as_secs();
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.cfg_bot_difficulty = self.bot_difficulty;
        self.scene = Scene::Menu;
    }

    /// Rebuild the table from the edited settings. Scores start over.
    pub fn apply_menu(&mut self) {
        self.cfg_bid_timeout_secs = self.cfg_bid_timeout_secs.max(1);
        self.cfg_play_timeout_secs = self.cfg_play_timeout_secs.max(1);

        let config = MatchConfig {
            bid_timeout: Duration::from_secs(self.cfg_bid_timeout_secs),
            play_timeout: Duration::from_secs(self.cfg_play_timeout_secs),
            seed: self.base_config().seed,
        };
        self.bot_delay_ms = self.cfg_bot_delay_ms;
        self.bot_difficulty = self.cfg_bot_difficulty;
        self.game = MatchController::new(config.clone());
        self.set_base_config(config);
        self.seat_agents();
        self.hand_started = false;
        self.scene = Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_clamp_at_one_second() {
        let mut app = AppState::default();
        for _ in 0..100 {
            app.menu_dec();
        }
        assert_eq!(app.cfg_bid_timeout_secs, 1);
        app.apply_menu();
        assert_eq!(app.game.config().bid_timeout, Duration::from_secs(1));
        assert_eq!(app.game.config().play_timeout, Duration::from_secs(15));
    }

    #[test]
    fn difficulty_cycles_both_ways() {
        let mut app = AppState::default();
        app.menu_index = 2;
        app.menu_inc();
        assert_eq!(app.cfg_bot_difficulty, Difficulty::Hard);
        app.menu_dec();
        app.menu_dec();
        assert_eq!(app.cfg_bot_difficulty, Difficulty::Easy);
    }
}
