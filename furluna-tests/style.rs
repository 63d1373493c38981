//! Style Enforcement Tests
//!
//! Scans the workspace crates for patterns clippy does not catch on its own.
//!
//! - `dead_code_enforcement` - Prevents #[allow(dead_code)] in production code
//! - `panic_enforcement` - Prevents unwrap()/expect() in production code

#[path = "style/dead_code_enforcement.rs"]
mod dead_code_enforcement;

#[path = "style/panic_enforcement.rs"]
mod panic_enforcement;

#[path = "style/sources.rs"]
mod sources;
