//! Styles for the epigram CLI.
//!
//! Templates refer to styles by semantic name (`author`, `tag`, `highlight`)
//! through the `style` filter; this module maps those names to concrete
//! `console::Style` values. Changing how something looks means editing the
//! theme below, never a template.
//!
//! Unknown style names are rendered with a `(!?)` prefix so typos in
//! templates show up in the output instead of silently losing styling.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const HIGHLIGHT: &str = "highlight";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
    pub const TITLE: &str = "title";
    pub const INDEX: &str = "index";
    pub const CONTENT: &str = "content";
    pub const AUTHOR: &str = "author";
    pub const TAG: &str = "tag";
    pub const LABEL: &str = "label";
}

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    /// Apply a named style. `use_color = false` keeps the text plain but
    /// still flags unknown names.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static EPIGRAM_THEME: Lazy<Theme> = Lazy::new(|| {
    let muted = Style::new().color256(245);
    Theme::new()
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, Style::new().color256(240))
        .add(names::HIGHLIGHT, Style::new().black().on_yellow())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted.clone())
        .add(names::TITLE, Style::new().bold())
        .add(names::INDEX, Style::new().yellow())
        .add(names::CONTENT, Style::new())
        .add(names::AUTHOR, muted.italic())
        .add(names::TAG, Style::new().cyan())
        .add(names::LABEL, Style::new().bold())
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_returns_text_unchanged() {
        assert_eq!(EPIGRAM_THEME.apply(names::TAG, "꿈", false), "꿈");
    }

    #[test]
    fn color_mode_adds_ansi() {
        let styled = EPIGRAM_THEME.apply(names::ERROR, "bad", true);
        assert!(styled.contains("\u{1b}["));
        assert!(styled.contains("bad"));
    }

    #[test]
    fn unknown_style_is_flagged() {
        assert_eq!(EPIGRAM_THEME.apply("nope", "x", false), "(!?) x");
    }
}
