//! # CLI Behavior
//!
//! This is **one possible UI client** for epigram, not the application
//! itself. It is the only place that knows about terminal I/O, exit codes and
//! output formatting. For the overall architecture see the library docs.
//!
//! ## Commands
//!
//! - `epigram` with no arguments shows today's epigram.
//! - `epigram search <term...> [--pages N]` runs a search and reveals N pages
//!   of five results. Every search is recorded in the history.
//! - `epigram history` lists recent searches; `history run <n>` repeats one;
//!   `history clear` empties the list after a confirmation (`--yes` skips
//!   it).
//! - `list`, `today` and `show <id>` browse without touching the history.
//! - `signup`, `login` and `write` are forms. Values come from flags; any
//!   field without a flag is prompted for on stdin. `--dry-run` validates
//!   and prints the form without sending anything.
//! - `config [key] [value]` reads or writes `config.json`.
//!
//! ## Environment
//!
//! - `EPIGRAM_HOME`: data directory (defaults to the platform data dir)
//! - `EPIGRAM_API_BASE_URL`: overrides the configured API root
//! - `RUST_LOG`: log filter; `-v` forces debug logging for this crate
//!
//! A `.env` file in the working directory is loaded first.
//!
//! ## Module Structure
//!
//! - `commands`: per-command handlers that call the API and print results
//! - `prompt`: stdin prompts for forms and confirmations
//! - `render`: output formatting through templates
//! - `setup`: argument parsing via clap
//! - `styles`: the named style theme
//! - `templates`: embedded output templates

mod commands;
mod prompt;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
