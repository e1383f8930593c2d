//! # Epigram Architecture
//!
//! Epigram is a **UI-agnostic library** for browsing, searching and writing
//! short quotes against a remote content API. The `epigram` binary is one
//! client of it; nothing below the CLI assumes a terminal.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, renders, sets exit codes      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, owns the live search session                │
//! │  - Returns structured CmdResult values                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Search, history, browsing, auth, config                  │
//! │  - Forms validated through form.rs + validation/            │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Content (client/)           │ │  Storage (store/)          │
//! │  ContentSource trait         │ │  DataStore trait           │
//! │  HttpClient / InMemorySource │ │  FileStore / InMemoryStore │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//!
//! Read paths (search, list, today, show) never fail: fetch errors are logged
//! with `tracing` and degrade to an empty or absent result. Write paths
//! (sign-up, sign-in, posting) return [`error::EpigramError`] because the user
//! has to learn that the action did not happen. Validation problems are not
//! errors at all; they come back as field errors on the result.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: the bulk of the tests, against `InMemorySource` and
//!    `InMemoryStore`.
//! 2. **API**: dispatch and argument normalization only.
//! 3. **CLI**: argument parsing, rendering of canned results, and end-to-end
//!    runs of the binary in `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`client`]: Content API seam and implementations
//! - [`store`]: Key/value storage abstraction and implementations
//! - [`model`]: Wire and display types (`Epigram`, `EpigramCard`, ...)
//! - [`validation`]: Field rules and Korean messages
//! - [`form`]: Headless form state and input views
//! - [`modal`]: Single modal context with keyboard dismissal
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, prompts and templated rendering for the binary (not part of the lib API)

pub mod api;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod modal;
pub mod model;
pub mod store;
pub mod validation;
