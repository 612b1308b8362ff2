//! Terminal table client: one keyboard seat against two bots.

pub mod app;
pub mod controller;
mod ui;
