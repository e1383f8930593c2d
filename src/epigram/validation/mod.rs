//! # Form Validation Rules
//!
//! Every form field is a variant of the closed [`Field`] enum, and
//! [`Field::rule`] maps it to a declarative [`Rule`] with an exhaustive
//! `match`: adding a field without deciding its rule does not compile.
//!
//! A rule combines up to four checks, evaluated in this order (the first
//! failure wins):
//!
//! 1. **required**: empty input fails with the field's "please enter" message
//! 2. **length bounds**: min / max, counted in characters
//! 3. **pattern**: a regular expression the whole value must match
//! 4. **custom**: a predicate that may read sibling field values
//!
//! Optional fields skip checks 2-4 when empty, so an empty optional URL is
//! valid. Messages are Korean, matching the rest of the product copy.

pub mod josa;
mod rules;

pub use rules::{
    EMAIL_PATTERN, MAX_EPIGRAM_CONTENT_LENGTH, MAX_NICKNAME_LENGTH, MAX_REFERENCE_TITLE_LENGTH,
    MIN_PASSWORD_LENGTH, PASSWORD_PATTERN,
};

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Password,
    PasswordConfirmation,
    Nickname,
    EpigramContent,
    Author,
    ReferenceUrl,
    ReferenceTitle,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Email,
        Field::Password,
        Field::PasswordConfirmation,
        Field::Nickname,
        Field::EpigramContent,
        Field::Author,
        Field::ReferenceUrl,
        Field::ReferenceTitle,
    ];

    /// Wire/form name of the field.
    pub fn key(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::PasswordConfirmation => "passwordConfirmation",
            Field::Nickname => "nickname",
            Field::EpigramContent => "epigramContent",
            Field::Author => "author",
            Field::ReferenceUrl => "referenceUrl",
            Field::ReferenceTitle => "referenceTitle",
        }
    }

    /// Human label used in messages and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Field::Email => "이메일",
            Field::Password => "비밀번호",
            Field::PasswordConfirmation => "비밀번호 확인",
            Field::Nickname => "닉네임",
            Field::EpigramContent => "내용",
            Field::Author => "저자",
            Field::ReferenceUrl => "출처 URL",
            Field::ReferenceTitle => "출처 제목",
        }
    }

    /// Password-like fields render masked.
    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::PasswordConfirmation)
    }

    pub fn rule(self) -> Rule {
        rules::rule_for(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

/// Localized "please enter <field>" message.
pub fn required_message(field: Field) -> String {
    format!("{} 입력해주세요.", josa::with_object_particle(field.label()))
}

/// Current values of a form, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<Field, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing fields read as empty.
    pub fn get(&self, field: Field) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

impl<V: Into<String>> FromIterator<(Field, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (Field, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(f, v)| (f, v.into())).collect())
    }
}

#[derive(Debug, Clone)]
pub struct LengthBound {
    pub value: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct PatternRule {
    pub regex: &'static Regex,
    pub message: &'static str,
}

/// Custom check: `Ok(())` or the error message.
pub type Predicate = fn(value: &str, values: &FormValues) -> Result<(), String>;

/// Declarative validation policy for one field.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    pub required: Option<String>,
    pub min_length: Option<LengthBound>,
    pub max_length: Option<LengthBound>,
    pub pattern: Option<PatternRule>,
    pub custom: Option<Predicate>,
}

impl Rule {
    /// Validate `value`; `values` gives access to sibling fields.
    pub fn check(&self, value: &str, values: &FormValues) -> Result<(), String> {
        if value.is_empty() {
            return match &self.required {
                Some(message) => Err(message.clone()),
                None => Ok(()),
            };
        }

        let length = value.chars().count();
        if let Some(bound) = &self.min_length {
            if length < bound.value {
                return Err(bound.message.clone());
            }
        }
        if let Some(bound) = &self.max_length {
            if length > bound.value {
                return Err(bound.message.clone());
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.regex.is_match(value) {
                return Err(pattern.message.to_string());
            }
        }
        if let Some(predicate) = self.custom {
            predicate(value, values)?;
        }
        Ok(())
    }
}

/// Validate a single field against the current form values.
pub fn validate(field: Field, values: &FormValues) -> Result<(), String> {
    field.rule().check(values.get(field), values)
}
