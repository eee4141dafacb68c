use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;

/// Field-level validation failures, keyed by request field name.
///
/// Serializes as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Validate a field that must be present and non-blank.
    ///
    /// Records an error and returns `None` when the value is missing or
    /// rejected by `parse`.
    pub fn required<T, E, F>(&mut self, field: &str, value: Option<String>, parse: F) -> Option<T>
    where
        E: Display,
        F: FnOnce(String) -> Result<T, E>,
    {
        match present(value) {
            Some(value) => self.parse(field, value, parse),
            None => {
                self.add(field, format!("The {} field is required.", label(field)));
                None
            }
        }
    }

    /// Validate a field that may be absent; blank counts as absent.
    ///
    /// Returns `None` both when the value is absent and when it is invalid;
    /// callers must check `is_empty` before using the result.
    pub fn optional<T, E, F>(&mut self, field: &str, value: Option<String>, parse: F) -> Option<T>
    where
        E: Display,
        F: FnOnce(String) -> Result<T, E>,
    {
        present(value).and_then(|value| self.parse(field, value, parse))
    }

    fn parse<T, E, F>(&mut self, field: &str, value: String, parse: F) -> Option<T>
    where
        E: Display,
        F: FnOnce(String) -> Result<T, E>,
    {
        match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                self.add(field, format!("The {} field is invalid: {}.", label(field), e));
                None
            }
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn label(field: &str) -> String {
    field.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive(value: String) -> Result<u32, String> {
        value
            .parse::<u32>()
            .map_err(|_| "must be a number".to_string())
    }

    #[test]
    fn test_required_missing_and_blank() {
        let mut errors = ValidationErrors::new();

        assert_eq!(errors.required("first_name", None, positive), None);
        assert_eq!(
            errors.required("age", Some("   ".to_string()), positive),
            None
        );

        assert_eq!(
            errors.messages("first_name"),
            ["The first name field is required."]
        );
        assert!(errors.contains("age"));
    }

    #[test]
    fn test_required_invalid_value() {
        let mut errors = ValidationErrors::new();

        assert_eq!(errors.required("age", Some("x".to_string()), positive), None);
        assert_eq!(
            errors.messages("age"),
            ["The age field is invalid: must be a number."]
        );
    }

    #[test]
    fn test_optional_absent_is_not_an_error() {
        let mut errors = ValidationErrors::new();

        assert_eq!(errors.optional("age", None, positive), None);
        assert_eq!(errors.optional("age", Some(String::new()), positive), None);
        assert_eq!(errors.optional("age", Some("4".to_string()), positive), Some(4));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "first");
        errors.add("email", "second");

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({"email": ["first", "second"]})
        );
    }
}
