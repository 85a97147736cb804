pub mod app;
pub mod catalog;
pub mod detect;
pub mod error;
pub mod player;
pub mod ui;
