//! Field checks shared by the request DTOs.
//!
//! Fields arrive as raw JSON values so a wrongly typed one is reported next to
//! every other failure instead of aborting deserialization. Messages follow the
//! `"field" ...` wording clients already parse.

use std::borrow::Cow;

use serde_json::{Map, Value};
use validator::{ValidateEmail, ValidationError, ValidationErrors};

fn add(errors: &mut ValidationErrors, field: &'static str, code: &'static str, message: String) {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    errors.add(field, error);
}

/// Present, a string, and not `""`. Returns the text when it is a string.
pub fn required_text<'a>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &'a Option<Value>,
) -> Option<&'a str> {
    match value {
        None => {
            add(errors, field, "required", format!("\"{}\" is required", field));
            None
        }
        Some(Value::String(text)) if text.is_empty() => {
            add(
                errors,
                field,
                "empty",
                format!("\"{}\" is not allowed to be empty", field),
            );
            None
        }
        Some(Value::String(text)) => Some(text),
        Some(_) => {
            add(errors, field, "string", format!("\"{}\" must be a string", field));
            None
        }
    }
}

pub fn required_email(errors: &mut ValidationErrors, field: &'static str, value: &Option<Value>) {
    if let Some(email) = required_text(errors, field, value) {
        if !email.validate_email() {
            add(
                errors,
                field,
                "email",
                format!("\"{}\" must be a valid email", field),
            );
        }
    }
}

/// When present, `value` must equal the field named `other`.
pub fn matches_field(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &Option<Value>,
    other: &'static str,
    other_value: &Option<Value>,
) {
    if let Some(given) = value {
        if other_value.as_ref() != Some(given) {
            add(
                errors,
                field,
                "must_match",
                format!("\"{}\" must be [ref:{}]", field, other),
            );
        }
    }
}

/// A JSON number, or a string holding one.
pub fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    amount.is_finite().then_some(amount)
}

pub fn required_amount(errors: &mut ValidationErrors, field: &'static str, value: &Option<Value>) {
    match value {
        None => add(errors, field, "required", format!("\"{}\" is required", field)),
        Some(raw) if parse_amount(raw).is_none() => add(
            errors,
            field,
            "number",
            format!("\"{}\" must be a number", field),
        ),
        Some(_) => {}
    }
}

/// Every key the DTO did not claim is rejected.
pub fn no_unknown_keys(errors: &mut ValidationErrors, unknown: &Map<String, Value>) {
    for key in unknown.keys() {
        add(
            errors,
            "unknown",
            "not_allowed",
            format!("\"{}\" is not allowed", key),
        );
    }
}

/// Text of a field that already passed [`required_text`].
pub fn into_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(text)) => text,
        _ => String::new(),
    }
}

pub fn finish(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
