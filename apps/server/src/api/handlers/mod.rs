//! Request handlers per resource.

pub mod clinics;
pub mod examinations;
pub mod icd;
pub mod lab_results;
pub mod lab_tests;
pub mod patients;
pub mod queue;
pub mod reports;
pub mod schedules;
pub mod staff;

use crate::{Error, Result};
use validator::Validate;

/// Run derive-based validation, flattening failures into one 400 message.
pub(crate) fn validate(req: &impl Validate) -> Result<()> {
    req.validate()
        .map_err(|errors| Error::Validation(validation_message(&errors)))
}

fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors.iter() {
            match &error.message {
                Some(message) => parts.push(message.to_string()),
                None => parts.push(format!("{field} is invalid")),
            }
        }
    }
    parts.sort();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 5, message = "username must be at least 5 characters"))]
        username: String,
    }

    #[test]
    fn validation_failures_become_400_messages() {
        let err = validate(&Sample {
            username: "ab".into(),
        })
        .unwrap_err();

        match err {
            Error::Validation(message) => {
                assert!(message.contains("at least 5 characters"), "{message}")
            }
            other => panic!("expected validation error, got {other}"),
        }
    }
}
