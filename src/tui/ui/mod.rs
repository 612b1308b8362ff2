mod layout;
mod menu;
mod table;

use crate::tui::app::{AppState, Scene};
use ratatui::prelude::Frame;

/// Render one frame. Once a hand is running the menu opens as an overlay on the
/// table, so the hand in progress stays visible behind it.
pub fn draw(f: &mut Frame, app: &AppState) {
    match app.scene {
        Scene::Table => table::draw_table(f, app),
        Scene::Menu if app.hand_started => {
            table::draw_table(f, app);
            menu::draw_menu(f, app);
        }
        Scene::Menu => menu::draw_menu(f, app),
    }
}
