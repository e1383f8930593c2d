//! # Epigram CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! loads `.env`, starts the async runtime, invokes `cli::run()` and handles
//! process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/epigram/cli/)                               │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - stdin prompts and confirmations (prompt.rs)              │
//! │  - Template rendering (render.rs, templates/)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic.

mod cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
