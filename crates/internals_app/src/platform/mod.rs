mod app;
mod config;
mod console;
mod document;
mod effects;
mod ui;

pub use app::run_app;
