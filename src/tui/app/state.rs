use crate::agents::{AgentKind, AgentTable, BotAgent, BotProfile, Difficulty, HumanAgent};
use crate::bidding::BidDecision;
use crate::config::MatchConfig;
use crate::game::{MatchController, TimerEvent};
use crate::intent::Intent;
use crate::seat::Seat;
use crate::state::Phase;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// The seat driven from the keyboard.
pub const HUMAN_SEAT: Seat = Seat::ALL[0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewHand,
    CursorLeft,
    CursorRight,
    ToggleSelect,
    ClearSelection,
    Claim,
    Decline,
    Play,
    Pass,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub game: MatchController,
    pub agents: AgentTable,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_bid_timeout_secs: u64,
    pub cfg_play_timeout_secs: u64,
    pub cfg_bot_delay_ms: u64,
    pub cfg_bot_difficulty: Difficulty,
    pub bot_delay_ms: u64,
    pub bot_difficulty: Difficulty,
    pub hand_started: bool,
    base_config: MatchConfig,
    cursor: usize,
    selected: BTreeSet<usize>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
    last_timer_event: Option<TimerEvent>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);
    const DEFAULT_BOT_DELAY_MS: u64 = 600;

    pub fn new(config: MatchConfig) -> Self {
        let mut app = Self {
            scene: Scene::Menu,
            game: MatchController::new(config.clone()),
            agents: AgentTable::new(),
            menu_index: 0,
            cfg_bid_timeout_secs: config.bid_timeout.as_secs(),
            cfg_play_timeout_secs: config.play_timeout.as_secs(),
            cfg_bot_delay_ms: Self::DEFAULT_BOT_DELAY_MS,
            cfg_bot_difficulty: Difficulty::Medium,
            bot_delay_ms: Self::DEFAULT_BOT_DELAY_MS,
            bot_difficulty: Difficulty::Medium,
            hand_started: false,
            base_config: config,
            cursor: 0,
            selected: BTreeSet::new(),
            help_open: false,
            history_open: false,
            history_offset: 0,
            action_error: None,
            action_error_at: None,
            last_timer_event: None,
        };
        app.seat_agents();
        app
    }

    pub(crate) fn base_config(&self) -> &MatchConfig {
        &self.base_config
    }

    pub(crate) fn set_base_config(&mut self, config: MatchConfig) {
        self.base_config = config;
    }

    /// Seat 0 is the keyboard; the other two are bots.
    pub(crate) fn seat_agents(&mut self) {
        self.agents = AgentTable::new();
        self.agents.set_min_action_delay_ms(150);
        self.agents.set_agent(HUMAN_SEAT, Some(Box::new(HumanAgent::new())));
        for seat in HUMAN_SEAT.others() {
            let mut profile =
                BotProfile::for_difficulty(self.bot_difficulty).with_delay_ms(self.bot_delay_ms);
            if let Some(seed) = self.base_config.seed {
                profile = profile.with_seed(seed.wrapping_add(seat.index() as u64));
            }
            self.agents.set_agent(seat, Some(Box::new(BotAgent::new(profile))));
        }
    }

    fn human_on_turn(&self) -> bool {
        self.scene == Scene::Table
            && self.hand_started
            && matches!(self.game.phase(), Phase::Bidding | Phase::Playing)
            && self.game.state().current() == HUMAN_SEAT
    }

    fn queue_intent(&mut self, intent: Intent) -> bool {
        if !self.human_on_turn() {
            return false;
        }
        self.clear_action_error();
        self.agents.receive(HUMAN_SEAT, intent)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub fn last_timer_event(&self) -> Option<TimerEvent> {
        self.last_timer_event
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    pub fn bot_label(&self, seat: Seat) -> Option<&'static str> {
        match self.agents.agent_kind(seat) {
            Some(AgentKind::Bot) => Some(self.bot_difficulty.label()),
            _ => None,
        }
    }

    fn human_hand_len(&self) -> usize {
        self.game.state().hand(HUMAN_SEAT).len()
    }

    fn move_cursor(&mut self, forward: bool) {
        let len = self.human_hand_len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = if forward { (self.cursor + 1) % len } else { (self.cursor + len - 1) % len };
    }

    fn toggle_select(&mut self) {
        if self.cursor >= self.human_hand_len() {
            return;
        }
        if !self.selected.remove(&self.cursor) {
            self.selected.insert(self.cursor);
        }
    }

    fn reset_selection(&mut self) {
        self.selected.clear();
        self.cursor = 0;
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.game.history().len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewHand => {
                if self.scene == Scene::Table {
                    self.new_hand();
                }
                false
            }
            InputAction::CursorLeft => {
                self.move_cursor(false);
                false
            }
            InputAction::CursorRight => {
                self.move_cursor(true);
                false
            }
            InputAction::ToggleSelect => {
                self.toggle_select();
                false
            }
            InputAction::ClearSelection => {
                self.selected.clear();
                false
            }
            InputAction::Claim => self.queue_intent(Intent::Bid { decision: BidDecision::Claim }),
            InputAction::Decline => {
                self.queue_intent(Intent::Bid { decision: BidDecision::Decline })
            }
            InputAction::Play => {
                let card_indices: Vec<usize> = self.selected.iter().copied().collect();
                self.queue_intent(Intent::Play { card_indices })
            }
            InputAction::Pass => self.queue_intent(Intent::Pass),
        }
    }

    /// Deal the first hand, or the next one once the current hand is over.
    pub fn new_hand(&mut self) {
        if !self.hand_started {
            self.game.start_hand();
            self.hand_started = true;
        } else if self.game.phase() == Phase::Ended {
            if let Err(err) = self.game.restart() {
                self.action_error = Some(err.to_string());
                self.action_error_at = Some(Instant::now());
                return;
            }
        } else {
            return;
        }
        self.agents.discard_pending(HUMAN_SEAT);
        self.history_offset = 0;
        self.last_timer_event = None;
        self.reset_selection();
        self.clear_action_error();
    }

    /// One controller tick: fire expired timers, then let the seat on turn act.
    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table || !self.hand_started {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        if let Some(event) = self.game.tick() {
            if event.ended_turn() {
                self.agents.discard_pending(event.seat());
            }
            self.last_timer_event = Some(event);
        }
        let hand_number = self.game.state().hand_number();
        let before = self.human_hand_len();
        match self.agents.on_turn(&mut self.game) {
            Ok(true) => self.clear_action_error(),
            Ok(false) => {}
            Err(err) => {
                self.action_error = Some(err.to_string());
                self.action_error_at = Some(Instant::now());
            }
        }
        if self.game.state().hand_number() != hand_number || self.human_hand_len() != before {
            self.reset_selection();
        }
        let len = self.human_hand_len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_ignored_before_turn() {
        let mut app = AppState::new(MatchConfig::default().with_seed(9));
        app.apply_menu();
        assert!(!app.handle_input(InputAction::Claim), "no hand dealt yet");
        app.new_hand();
        assert_eq!(app.game.state().current(), HUMAN_SEAT);
        assert!(app.handle_input(InputAction::Claim));
        app.agents_on_turn();
        assert_eq!(
            app.game.state().bidding().and_then(|b| b.provisional()),
            Some(HUMAN_SEAT)
        );
        assert!(!app.handle_input(InputAction::Decline), "turn has moved on");
    }

    #[test]
    fn intent_queued_as_the_clock_runs_out_is_dropped() {
        use crate::timer::ManualClock;
        use std::sync::Arc;

        let clock = Arc::new(ManualClock::new());
        let config = MatchConfig::default().with_seed(9);
        let mut app = AppState::new(config.clone());
        app.apply_menu();
        app.game = MatchController::with_clock(config, clock.clone());
        app.new_hand();
        assert!(app.handle_input(InputAction::Claim));
        assert!(app.agents.pending(HUMAN_SEAT).is_some());

        clock.advance(Duration::from_secs(8));
        app.agents_on_turn();
        assert_eq!(app.last_timer_event(), Some(TimerEvent::AutoDeclined(HUMAN_SEAT)));
        assert!(app.agents.pending(HUMAN_SEAT).is_none());
        let log = app.game.state().bidding().map(|b| b.log().to_vec()).unwrap_or_default();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].decision, BidDecision::Decline);
    }

    #[test]
    fn cursor_wraps_and_selection_toggles() {
        let mut app = AppState::new(MatchConfig::default().with_seed(9));
        app.apply_menu();
        app.new_hand();
        let _ = app.handle_input(InputAction::CursorLeft);
        assert_eq!(app.cursor(), 16);
        let _ = app.handle_input(InputAction::ToggleSelect);
        let _ = app.handle_input(InputAction::CursorRight);
        let _ = app.handle_input(InputAction::ToggleSelect);
        assert_eq!(app.selected().iter().copied().collect::<Vec<_>>(), vec![0, 16]);
        let _ = app.handle_input(InputAction::ToggleSelect);
        assert_eq!(app.selected().len(), 1);
        let _ = app.handle_input(InputAction::ClearSelection);
        assert!(app.selected().is_empty());
    }
}
