pub mod app;
pub mod calendar;
pub mod cli;
pub mod components;
pub mod config;
pub mod event;
pub mod logging;
pub mod theme;
pub mod tui;
