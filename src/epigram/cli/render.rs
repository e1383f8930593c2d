//! # Rendering
//!
//! Turns command results into terminal text through the templates in
//! `templates.rs` and the theme in `styles.rs`.
//!
//! Layout calculations (width, truncation, indentation) stay in Rust because
//! they need Unicode-aware processing; Korean text is double width, so byte
//! or char counts would misalign columns. Templates only decide structure and
//! which semantic style applies.

use super::styles::{names, Theme, EPIGRAM_THEME};
use super::templates;
use epigram::commands::{CmdMessage, MessageLevel, PageInfo};
use epigram::config::{EpigramConfig, KEYS};
use epigram::form::InputView;
use epigram::model::{Epigram, EpigramCard};
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const ELLIPSIS: char = '…';

#[derive(Serialize)]
struct CardLine {
    index: String,
    content: String,
    indent: String,
    author: String,
    tags: String,
}

#[derive(Serialize)]
struct CardsData<'a> {
    cards: Vec<CardLine>,
    term: &'a str,
    footer: Option<String>,
    empty_message: &'a str,
}

#[derive(Serialize)]
struct EpigramData {
    index: String,
    indent: String,
    content: String,
    author: String,
    tags: String,
    reference: Option<String>,
}

#[derive(Serialize)]
struct HistoryEntry {
    index: String,
    term: String,
}

#[derive(Serialize)]
struct HistoryData<'a> {
    entries: Vec<HistoryEntry>,
    empty_message: &'a str,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct FormField {
    label: &'static str,
    value: String,
    error: Option<String>,
}

#[derive(Serialize)]
struct FormData {
    fields: Vec<FormField>,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
}

#[derive(Serialize)]
struct ConfigData {
    entries: Vec<ConfigEntry>,
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(use_color: bool) -> Self {
        let theme: &'static Theme = &EPIGRAM_THEME;
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        env.add_filter("style", move |value: Value, name: String| -> String {
            theme.apply(&name, &value.to_string(), use_color)
        });
        env.add_filter("highlight", move |value: Value, term: String| -> String {
            highlight(theme, &value.to_string(), &term, use_color)
        });

        for (name, source) in templates::ALL {
            if let Err(e) = env.add_template(*name, *source) {
                tracing::error!("Invalid template {}: {}", name, e);
            }
        }
        Self { env }
    }

    /// Colors only when stdout supports them.
    pub fn detect() -> Self {
        Self::new(console::Term::stdout().features().colors_supported())
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> String {
        self.env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(data))
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    /// Card list for search and list views. `term` is highlighted in content.
    pub fn cards(
        &self,
        cards: &[EpigramCard],
        term: &str,
        page: Option<&PageInfo>,
        empty_message: &str,
    ) -> String {
        let index_width = cards
            .iter()
            .map(|c| index_label(c.id).width())
            .max()
            .unwrap_or(0);
        let indent = " ".repeat(index_width + 1);
        let content_width = LINE_WIDTH.saturating_sub(indent.len());

        let lines = cards
            .iter()
            .map(|card| CardLine {
                index: format!("{:<width$}", index_label(card.id), width = index_width),
                content: truncate_to_width(&single_line(&card.content), content_width),
                indent: indent.clone(),
                author: format!("- {}", card.author),
                tags: tags_suffix(&card.tags),
            })
            .collect();

        let data = CardsData {
            cards: lines,
            term,
            footer: page.filter(|_| !cards.is_empty()).map(footer),
            empty_message,
        };
        self.render("cards", &data)
    }

    pub fn epigram(&self, epigram: &Epigram) -> String {
        let index = index_label(epigram.id);
        let tags: Vec<String> = epigram.tag_names().map(str::to_string).collect();
        let reference = match (&epigram.reference_title, &epigram.reference_url) {
            (Some(title), Some(url)) => Some(format!("{} ({})", title, url)),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        };
        let data = EpigramData {
            indent: " ".repeat(index.width() + 1),
            index,
            content: epigram.content.clone(),
            author: format!("- {}", epigram.author),
            tags: tags_suffix(&tags).trim_start().to_string(),
            reference,
        };
        self.render("epigram", &data)
    }

    pub fn history(&self, history: &[String]) -> String {
        let width = history.len().to_string().len();
        let entries = history
            .iter()
            .enumerate()
            .map(|(i, term)| HistoryEntry {
                index: format!("{:>width$}.", i + 1, width = width),
                term: term.clone(),
            })
            .collect();
        self.render(
            "history",
            &HistoryData {
                entries,
                empty_message: "No recent searches.",
            },
        )
    }

    pub fn messages(&self, messages: &[CmdMessage]) -> String {
        if messages.is_empty() {
            return String::new();
        }
        let messages = messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect();
        self.render("messages", &MessagesData { messages })
    }

    /// One line per input, with its inline error beneath when present.
    pub fn form(&self, views: &[InputView]) -> String {
        let fields = views
            .iter()
            .map(|view| FormField {
                label: view.label,
                value: single_line(&view.value),
                error: view.error.clone(),
            })
            .collect();
        self.render("form", &FormData { fields })
    }

    pub fn config(&self, config: &EpigramConfig) -> String {
        let entries = KEYS
            .iter()
            .map(|&key| ConfigEntry {
                key,
                value: config.get(key).unwrap_or_default(),
            })
            .collect();
        self.render("config", &ConfigData { entries })
    }
}

fn index_label(id: u64) -> String {
    format!("#{}", id)
}

fn tags_suffix(tags: &[String]) -> String {
    tags.iter().map(|t| format!(" #{}", t)).collect()
}

fn footer(page: &PageInfo) -> String {
    if page.has_more() {
        format!(
            "Showing {} of {}. Use --pages {} to see more.",
            page.shown,
            page.total,
            page.page + 1
        )
    } else if page.total == 1 {
        "1 epigram".to_string()
    } else {
        format!("{} epigrams", page.total)
    }
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Style every occurrence of `term` as a highlight. Exact, case-sensitive,
/// the same rule the search filter uses.
fn highlight(theme: &Theme, text: &str, term: &str, use_color: bool) -> String {
    if term.is_empty() {
        return theme.apply(names::CONTENT, text, use_color);
    }
    let mut out = String::new();
    let mut last = 0;
    for (start, matched) in text.match_indices(term) {
        out.push_str(&theme.apply(names::CONTENT, &text[last..start], use_color));
        out.push_str(&theme.apply(names::HIGHLIGHT, matched, use_color));
        last = start + matched.len();
    }
    out.push_str(&theme.apply(names::CONTENT, &text[last..], use_color));
    out
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push(ELLIPSIS);
    result
}
