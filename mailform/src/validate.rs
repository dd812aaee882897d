//! Field-level validation of a [`FormState`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::FormState;

// Local part of ASCII word characters, dots and hyphens; gmail.com only.
static GMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@gmail\.com$").expect("GMAIL_REGEX: invalid regex pattern")
});

pub const INVALID_GMAIL: &str = "Please use a valid Gmail address";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    From,
    To,
    Subject,
    Text,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::From, Field::To, Field::Subject, Field::Text];

    /// Name of the field, as used for the multipart part.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::From => "from",
            Field::To => "to",
            Field::Subject => "subject",
            Field::Text => "text",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable messages keyed by field. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(BTreeMap<Field, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

pub fn is_valid_gmail(address: &str) -> bool {
    GMAIL_REGEX.is_match(address)
}

fn check_address(errors: &mut ErrorMap, field: Field, value: &str, required: &str) {
    if value.is_empty() {
        errors.insert(field, required);
    } else if !is_valid_gmail(value) {
        errors.insert(field, INVALID_GMAIL);
    }
}

fn check_required(errors: &mut ErrorMap, field: Field, value: &str, required: &str) {
    if value.trim().is_empty() {
        errors.insert(field, required);
    }
}

/// Checks every field independently and collects all errors.
pub fn validate(state: &FormState) -> ErrorMap {
    let mut errors = ErrorMap::new();

    check_address(&mut errors, Field::From, &state.from, "From email is required");
    check_address(&mut errors, Field::To, &state.to, "To email is required");
    check_required(&mut errors, Field::Subject, &state.subject, "Subject is required");
    check_required(&mut errors, Field::Text, &state.text, "Message is required");

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_state() -> FormState {
        FormState {
            from: "alice@gmail.com".into(),
            to: "bob.smith-jr@gmail.com".into(),
            subject: "Hi".into(),
            text: "Hello there".into(),
        }
    }

    #[test]
    fn valid_state_has_no_errors() {
        assert!(validate(&valid_state()).is_empty());
    }

    #[test]
    fn empty_state_flags_every_field() {
        let errors = validate(&FormState::default());
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(Field::From), Some("From email is required"));
        assert_eq!(errors.get(Field::To), Some("To email is required"));
        assert_eq!(errors.get(Field::Subject), Some("Subject is required"));
        assert_eq!(errors.get(Field::Text), Some("Message is required"));
    }

    #[rstest]
    #[case("alice@gmail.com")]
    #[case("a.b-c_d@gmail.com")]
    #[case("123@gmail.com")]
    fn accepts_gmail_addresses(#[case] address: &str) {
        let state = FormState {
            from: address.into(),
            to: address.into(),
            ..valid_state()
        };
        let errors = validate(&state);
        assert_eq!(errors.get(Field::From), None);
        assert_eq!(errors.get(Field::To), None);
    }

    #[rstest]
    #[case("alice@yahoo.com")]
    #[case("alice@gmail.co")]
    #[case("alice@gmailxcom")]
    #[case("@gmail.com")]
    #[case("alice+tag@gmail.com")]
    #[case(" alice@gmail.com")]
    #[case("alice@gmail.com\n")]
    #[case("ålice@gmail.com")]
    #[case("   ")]
    fn rejects_other_addresses(#[case] address: &str) {
        let state = FormState {
            from: address.into(),
            to: address.into(),
            ..valid_state()
        };
        let errors = validate(&state);
        assert_eq!(errors.get(Field::From), Some(INVALID_GMAIL));
        assert_eq!(errors.get(Field::To), Some(INVALID_GMAIL));
        assert_eq!(errors.get(Field::Subject), None);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_subject_and_text_are_required(#[case] blank: &str) {
        let state = FormState {
            subject: blank.into(),
            text: blank.into(),
            ..valid_state()
        };
        let errors = validate(&state);
        assert_eq!(errors.len(), 2);
        assert!(errors.get(Field::Subject).is_some());
        assert!(errors.get(Field::Text).is_some());
    }

    #[test]
    fn same_sender_and_recipient_is_allowed() {
        let state = FormState {
            to: "alice@gmail.com".into(),
            ..valid_state()
        };
        assert!(validate(&state).is_empty());
    }
}
