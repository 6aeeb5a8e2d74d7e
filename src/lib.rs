// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod console;
pub mod effects;
pub mod game;
pub mod runtime;
pub mod scores;
pub mod util;
pub mod vocab;
