//! # Form State
//!
//! A headless form: [`FormState`] owns the live value of every registered
//! field, tracks a per-field [`FieldState`], and answers whether submission is
//! currently allowed. Input widgets ([`TextInput`], [`PasswordInput`]) only
//! read from it to produce an [`InputView`]; rendering never writes back.
//!
//! ## Value ownership
//!
//! Forms are uncontrolled. Values enter a form in exactly two ways:
//!
//! - **defaults**, seeded once by [`FormState::with_defaults`]; the field
//!   stays `Untouched`
//! - **explicit injection** through [`FormState::inject`], a deliberate
//!   one-time write that validates like user input
//!
//! Nothing re-applies an outside value on later renders, so user edits are
//! never clobbered.
//!
//! ## Field state machine
//!
//! ```text
//!            input / blur / submit / inject
//! Untouched ───────────────────────────────▶ Valid ◀──▶ Invalid(message)
//! ```
//!
//! Editing `password` re-validates a touched `passwordConfirmation`, since the
//! confirmation rule reads the live password.

use crate::model::{NewEpigramRequest, SignInRequest, SignUpRequest};
use crate::validation::{validate, Field, FormValues};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Untouched,
    Valid,
    Invalid(String),
}

impl FieldState {
    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldState::Invalid(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct FormState {
    fields: Vec<Field>,
    values: FormValues,
    states: BTreeMap<Field, FieldState>,
}

impl FormState {
    pub fn new(fields: &[Field]) -> Self {
        Self::with_defaults(fields, FormValues::new())
    }

    /// Seed initial values. Defaults for unregistered fields are ignored.
    pub fn with_defaults(fields: &[Field], defaults: FormValues) -> Self {
        let mut values = FormValues::new();
        for (field, value) in defaults.iter() {
            if fields.contains(&field) {
                values.set(field, value);
            }
        }
        Self {
            fields: fields.to_vec(),
            values,
            states: fields.iter().map(|f| (*f, FieldState::Untouched)).collect(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn state(&self, field: Field) -> &FieldState {
        static UNTOUCHED: FieldState = FieldState::Untouched;
        self.states.get(&field).unwrap_or(&UNTOUCHED)
    }

    /// Message to show beneath `field`, if it is currently invalid.
    pub fn error(&self, field: Field) -> Option<&str> {
        match self.state(field) {
            FieldState::Invalid(message) => Some(message),
            _ => None,
        }
    }

    /// User edited a field.
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        if !self.is_registered(field) {
            return;
        }
        self.values.set(field, value);
        self.revalidate(field);
        if field == Field::Password && self.is_touched(Field::PasswordConfirmation) {
            self.revalidate(Field::PasswordConfirmation);
        }
    }

    /// Explicit one-time value write from outside the form.
    pub fn inject(&mut self, field: Field, value: impl Into<String>) {
        self.input(field, value);
    }

    /// Field lost focus.
    pub fn blur(&mut self, field: Field) {
        if self.is_registered(field) {
            self.revalidate(field);
        }
    }

    /// True when every registered field passes its rule right now, touched
    /// or not.
    pub fn is_valid(&self) -> bool {
        self.fields
            .iter()
            .all(|field| validate(*field, &self.values).is_ok())
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid()
    }

    /// Validate everything and hand back the values, or every field error in
    /// registration order.
    pub fn submit(&mut self) -> Result<FormValues, Vec<FieldError>> {
        let fields = self.fields.clone();
        for field in &fields {
            self.revalidate(*field);
        }
        let errors: Vec<FieldError> = fields
            .iter()
            .filter_map(|field| {
                self.error(*field).map(|message| FieldError {
                    field: *field,
                    message: message.to_string(),
                })
            })
            .collect();
        if errors.is_empty() {
            Ok(self.values.clone())
        } else {
            Err(errors)
        }
    }

    fn is_registered(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    fn is_touched(&self, field: Field) -> bool {
        !matches!(self.state(field), FieldState::Untouched)
    }

    fn revalidate(&mut self, field: Field) {
        let state = match validate(field, &self.values) {
            Ok(()) => FieldState::Valid,
            Err(message) => FieldState::Invalid(message),
        };
        self.states.insert(field, state);
    }
}

/// What a UI needs to draw one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub field: Field,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
    pub placeholder: String,
    pub error: Option<String>,
}

impl InputView {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct TextInput {
    field: Field,
    placeholder: Option<String>,
    multiline: bool,
}

impl TextInput {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            placeholder: None,
            multiline: false,
        }
    }

    pub fn textarea(field: Field) -> Self {
        Self {
            multiline: true,
            ..Self::new(field)
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn view(&self, form: &FormState) -> InputView {
        InputView {
            field: self.field,
            label: self.field.label(),
            input_type: if self.multiline { "textarea" } else { "text" },
            value: form.value(self.field).to_string(),
            placeholder: placeholder_or_key(&self.placeholder, self.field),
            error: form.error(self.field).map(str::to_string),
        }
    }
}

const MASK: char = '•';

/// Password input with a local show/hide flag.
#[derive(Debug, Clone)]
pub struct PasswordInput {
    field: Field,
    placeholder: Option<String>,
    visible: bool,
}

impl PasswordInput {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            placeholder: None,
            visible: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn input_type(&self) -> &'static str {
        if self.visible {
            "text"
        } else {
            "password"
        }
    }

    pub fn display(&self, value: &str) -> String {
        if self.visible {
            value.to_string()
        } else {
            value.chars().map(|_| MASK).collect()
        }
    }

    pub fn view(&self, form: &FormState) -> InputView {
        InputView {
            field: self.field,
            label: self.field.label(),
            input_type: self.input_type(),
            value: self.display(form.value(self.field)),
            placeholder: placeholder_or_key(&self.placeholder, self.field),
            error: form.error(self.field).map(str::to_string),
        }
    }
}

fn placeholder_or_key(placeholder: &Option<String>, field: Field) -> String {
    placeholder
        .clone()
        .unwrap_or_else(|| field.key().to_string())
}

pub const SIGN_UP_FIELDS: &[Field] = &[
    Field::Email,
    Field::Nickname,
    Field::Password,
    Field::PasswordConfirmation,
];

pub const SIGN_IN_FIELDS: &[Field] = &[Field::Email, Field::Password];

pub const NEW_EPIGRAM_FIELDS: &[Field] = &[
    Field::EpigramContent,
    Field::Author,
    Field::ReferenceTitle,
    Field::ReferenceUrl,
];

impl SignUpRequest {
    pub fn from_values(values: &FormValues) -> Self {
        Self {
            email: values.get(Field::Email).to_string(),
            nickname: values.get(Field::Nickname).to_string(),
            password: values.get(Field::Password).to_string(),
            password_confirmation: values.get(Field::PasswordConfirmation).to_string(),
        }
    }
}

impl SignInRequest {
    pub fn from_values(values: &FormValues) -> Self {
        Self {
            email: values.get(Field::Email).to_string(),
            password: values.get(Field::Password).to_string(),
        }
    }
}

impl NewEpigramRequest {
    pub fn from_values(values: &FormValues, tags: &str) -> Self {
        let optional = |field| {
            let value = values.get(field).trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        Self {
            content: values.get(Field::EpigramContent).to_string(),
            author: values.get(Field::Author).to_string(),
            tags: parse_tags(tags),
            reference_url: optional(Field::ReferenceUrl),
            reference_title: optional(Field::ReferenceTitle),
        }
    }
}

/// Split free-form tag input on commas and whitespace, drop `#` prefixes
/// and duplicates, keep first-seen order.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for part in raw.split(|c: char| c == ',' || c.is_whitespace()) {
        let tag = part.trim_start_matches('#');
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
