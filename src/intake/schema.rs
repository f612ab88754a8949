//! Declarative shape rules for submission fields, checked before any
//! deserialization or business logic.

use serde_json::{Map, Value};

use crate::intake::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// One text field of an intake form.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub presence: Presence,
}

impl FieldRule {
    pub const fn required(name: &'static str) -> Self {
        FieldRule { name, presence: Presence::Required }
    }

    pub const fn optional(name: &'static str) -> Self {
        FieldRule { name, presence: Presence::Optional }
    }
}

/// Text fields accepted by both the express and the standard form.
pub const APPLICATION_SCHEMA: &[FieldRule] = &[
    FieldRule::required("firstName"),
    FieldRule::required("lastName"),
    FieldRule::required("email"),
    FieldRule::optional("phone"),
    FieldRule::optional("desiredRole"),
    FieldRule::optional("workSchedule"),
    FieldRule::optional("message"),
];

/// Check presence and type of every rule in `schema`. Unknown keys are ignored.
pub fn check(schema: &[FieldRule], input: &Map<String, Value>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for rule in schema {
        match (input.get(rule.name), rule.presence) {
            (None | Some(Value::Null), Presence::Required) => {
                errors.push(FieldError::new(rule.name, "required", "field is required"));
            }
            (None | Some(Value::Null), Presence::Optional) | (Some(Value::String(_)), _) => {}
            (Some(_), _) => {
                errors.push(FieldError::new(rule.name, "type", "expected a string"));
            }
        }
    }
    errors
}
