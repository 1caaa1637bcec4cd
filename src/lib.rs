// Library surface for headless/integration tests and reuse.
// The binary only adds CLI parsing and terminal setup on top.
pub mod app_dirs;
pub mod config;
pub mod engine;
pub mod logging;
pub mod matching;
pub mod runtime;
pub mod sample;
pub mod session;
pub mod shell;
pub mod typing_policy;
pub mod ui;
