//! Terminal input for forms and confirmations.
//!
//! Prompts go to stderr so stdout stays clean for piping. Reading from a
//! closed stdin yields empty answers, which lets scripts and tests pipe values
//! in line by line.

use colored::Colorize;
use epigram::form::{FieldError, FormState, InputView, PasswordInput, TextInput};
use epigram::modal::{ClickTarget, Key, KeyListeners, ModalContext, ModalEvent};
use epigram::validation::Field;
use std::io::{self, BufRead, Write};

/// The view a field is drawn with; secrets are masked.
pub fn view_for(form: &FormState, field: Field) -> InputView {
    if field.is_secret() {
        PasswordInput::new(field).view(form)
    } else if field == Field::EpigramContent {
        TextInput::textarea(field).view(form)
    } else {
        TextInput::new(field).view(form)
    }
}

pub fn views(form: &FormState) -> Vec<InputView> {
    form.fields().iter().map(|f| view_for(form, *f)).collect()
}

/// Views with server-side field errors laid over them.
pub fn views_with_errors(form: &FormState, errors: &[FieldError]) -> Vec<InputView> {
    views(form)
        .into_iter()
        .map(|mut view| {
            view.error = errors
                .iter()
                .find(|e| e.field == view.field)
                .map(|e| e.message.clone());
            view
        })
        .collect()
}

/// Build a form from flag values, prompting on `input` for every field
/// without one.
pub fn fill_form<R: BufRead>(
    fields: &[Field],
    given: Vec<(Field, Option<String>)>,
    input: &mut R,
) -> io::Result<FormState> {
    let mut form = FormState::new(fields);
    for (field, value) in given {
        if let Some(value) = value {
            form.inject(field, value);
        }
    }

    let missing: Vec<Field> = fields
        .iter()
        .copied()
        .filter(|f| form.value(*f).is_empty())
        .collect();
    for field in missing {
        let view = view_for(&form, field);
        eprint!("{} ({}): ", view.label.bold(), view.placeholder.dimmed());
        io::stderr().flush()?;

        let answer = read_answer(input)?;
        form.input(field, answer);
        form.blur(field);
        if let Some(message) = form.error(field) {
            eprintln!("  {}", format!("error: {}", message).red());
        }
    }
    Ok(form)
}

/// Ask a yes/no question inside a modal. `y` confirms; an empty answer
/// presses Escape; anything else counts as a click outside.
pub fn confirm<R: BufRead>(question: &str, input: &mut R) -> io::Result<bool> {
    let mut modal = ModalContext::new(KeyListeners::new());
    modal.open(question.to_string());
    eprint!("{} [y/N] ", question.yellow());
    io::stderr().flush()?;

    let answer = read_answer(input)?;
    let event = match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => ModalEvent::Key(Key::Enter),
        "" => ModalEvent::Key(Key::Escape),
        _ => ModalEvent::Click(ClickTarget::Backdrop),
    };
    if modal.dispatch(event) {
        return Ok(false);
    }
    Ok(modal.close().is_some())
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use epigram::form::SIGN_UP_FIELDS;
    use std::io::Cursor;

    #[test]
    fn flags_are_used_and_missing_fields_read_from_input() {
        let mut input = Cursor::new("에피\nabcd1234\n");
        let form = fill_form(
            SIGN_UP_FIELDS,
            vec![
                (Field::Email, Some("me@example.com".into())),
                (Field::Password, Some("abcd1234".into())),
            ],
            &mut input,
        )
        .unwrap();

        assert_eq!(form.value(Field::Nickname), "에피");
        assert_eq!(form.value(Field::PasswordConfirmation), "abcd1234");
        assert!(form.can_submit());
    }

    #[test]
    fn closed_input_leaves_fields_empty_and_invalid() {
        let mut input = Cursor::new("");
        let form = fill_form(SIGN_UP_FIELDS, Vec::new(), &mut input).unwrap();
        assert_eq!(form.error(Field::Email), Some("이메일을 입력해주세요."));
    }

    #[test]
    fn password_views_are_masked() {
        let mut form = FormState::new(SIGN_UP_FIELDS);
        form.input(Field::Password, "secret12");
        let view = view_for(&form, Field::Password);
        assert_eq!(view.input_type, "password");
        assert!(!view.value.contains("secret"));
    }

    #[test]
    fn server_errors_are_overlaid() {
        let form = FormState::new(SIGN_UP_FIELDS);
        let errors = vec![FieldError {
            field: Field::Nickname,
            message: "닉네임을 입력해주세요.".into(),
        }];
        let views = views_with_errors(&form, &errors);
        let nickname = views.iter().find(|v| v.field == Field::Nickname).unwrap();
        assert_eq!(nickname.error.as_deref(), Some("닉네임을 입력해주세요."));
    }

    #[test]
    fn confirm_maps_answers() {
        assert!(confirm("Clear?", &mut Cursor::new("y\n")).unwrap());
        assert!(confirm("Clear?", &mut Cursor::new("YES\n")).unwrap());
        assert!(!confirm("Clear?", &mut Cursor::new("\n")).unwrap());
        assert!(!confirm("Clear?", &mut Cursor::new("")).unwrap());
        assert!(!confirm("Clear?", &mut Cursor::new("maybe\n")).unwrap());
    }
}
