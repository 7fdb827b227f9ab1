// Library surface shared by the binary and the headless integration tests.
pub mod app;
pub mod config;
pub mod cue;
pub mod duration;
pub mod logging;
pub mod scheduler;
pub mod session;
pub mod theme;
pub mod ui;
