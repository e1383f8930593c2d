//! # CLI Templates
//!
//! Output is rendered from minijinja templates kept as standalone files next
//! to this module and embedded with `include_str!`, so layout can be edited
//! and diffed without touching Rust.
//!
//! Conventions:
//!
//! - The environment runs with `trim_blocks` and `lstrip_blocks`, so block
//!   tags sit on their own lines without leaking blank lines.
//! - Templates only pick styles by semantic name (`style("author")`).
//! - Width math and anything Unicode-aware happens in `render.rs`; the
//!   templates receive finished strings. Term highlighting is the one piece
//!   of logic exposed as a filter (`highlight(term)`).

pub const CARDS_TEMPLATE: &str = include_str!("templates/cards.jinja");
pub const EPIGRAM_TEMPLATE: &str = include_str!("templates/epigram.jinja");
pub const HISTORY_TEMPLATE: &str = include_str!("templates/history.jinja");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.jinja");
pub const FORM_TEMPLATE: &str = include_str!("templates/form.jinja");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.jinja");

pub const ALL: &[(&str, &str)] = &[
    ("cards", CARDS_TEMPLATE),
    ("epigram", EPIGRAM_TEMPLATE),
    ("history", HISTORY_TEMPLATE),
    ("messages", MESSAGES_TEMPLATE),
    ("form", FORM_TEMPLATE),
    ("config", CONFIG_TEMPLATE),
];
