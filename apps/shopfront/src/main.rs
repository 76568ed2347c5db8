//! # Shopfront Entry Point
//!
//! ```text
//!   main ──► shopfront::run()
//!              ├── tracing (stderr)
//!              ├── AppConfig::load
//!              ├── open store (SQLite or memory)
//!              ├── Shell::startup
//!              └── event loop (stdin → commands → screen on stdout)
//! ```
//!
//! Events are handled one at a time on a single-threaded runtime.

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match shopfront::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("shopfront: {}", e);
            ExitCode::FAILURE
        }
    }
}
