use super::{required_message, Field, FormValues, LengthBound, PatternRule, Rule};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_NICKNAME_LENGTH: usize = 20;
pub const MAX_EPIGRAM_CONTENT_LENGTH: usize = 500;
pub const MAX_REFERENCE_TITLE_LENGTH: usize = 100;

pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
pub const PASSWORD_PATTERN: &str = r"^[A-Za-z0-9!@#$%^&*]+$";
const URL_PATTERN: &str =
    r"^https?://(localhost|[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)+)(:[0-9]{1,5})?([/?#]\S*)?$";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"));
static PASSWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PASSWORD_PATTERN).expect("valid password regex"));
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(URL_PATTERN).expect("valid url regex"));

pub(super) fn rule_for(field: Field) -> Rule {
    match field {
        Field::Email => Rule {
            required: Some(required_message(field)),
            pattern: Some(PatternRule {
                regex: &EMAIL_RE,
                message: "이메일 형식으로 작성해 주세요.",
            }),
            ..Rule::default()
        },
        Field::Password => Rule {
            required: Some(required_message(field)),
            min_length: Some(LengthBound {
                value: MIN_PASSWORD_LENGTH,
                message: format!("비밀번호는 최소 {}자 이상입니다.", MIN_PASSWORD_LENGTH),
            }),
            pattern: Some(PatternRule {
                regex: &PASSWORD_RE,
                message: "비밀번호는 숫자, 영문, 특수문자(!@#$%^&*)로만 가능합니다.",
            }),
            ..Rule::default()
        },
        Field::PasswordConfirmation => Rule {
            required: Some(required_message(field)),
            custom: Some(matches_password),
            ..Rule::default()
        },
        Field::Nickname => Rule {
            required: Some(required_message(field)),
            max_length: Some(LengthBound {
                value: MAX_NICKNAME_LENGTH,
                message: format!("닉네임은 최대 {}자까지 가능합니다.", MAX_NICKNAME_LENGTH),
            }),
            ..Rule::default()
        },
        Field::EpigramContent => Rule {
            required: Some(required_message(field)),
            max_length: Some(LengthBound {
                value: MAX_EPIGRAM_CONTENT_LENGTH,
                message: format!("{}자 이내로 입력해주세요", MAX_EPIGRAM_CONTENT_LENGTH),
            }),
            ..Rule::default()
        },
        Field::Author => Rule {
            required: Some(required_message(field)),
            ..Rule::default()
        },
        Field::ReferenceUrl => Rule {
            custom: Some(is_url),
            ..Rule::default()
        },
        Field::ReferenceTitle => Rule {
            max_length: Some(LengthBound {
                value: MAX_REFERENCE_TITLE_LENGTH,
                message: format!("{}자 이내로 입력해주세요", MAX_REFERENCE_TITLE_LENGTH),
            }),
            ..Rule::default()
        },
    }
}

/// Reads the live password, so the result changes as the password is edited.
fn matches_password(value: &str, values: &FormValues) -> Result<(), String> {
    if value == values.get(Field::Password) {
        Ok(())
    } else {
        Err("비밀번호가 일치하지 않습니다.".to_string())
    }
}

fn is_url(value: &str, _values: &FormValues) -> Result<(), String> {
    if URL_RE.is_match(value) {
        Ok(())
    } else {
        Err("올바른 URL 양식이 아닙니다.".to_string())
    }
}
