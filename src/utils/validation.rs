use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::ServiceError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ServiceError> {
    payload
        .validate()
        .map_err(|err| ServiceError::Validation(describe(&err)))
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Flattens field errors into one sentence, preferring the messages set on
/// the validators.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::NewEmployee;

    fn input(name: &str, hire_date: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            role: None,
            department: None,
            unit: None,
            contract_type: None,
            birth_date: None,
            hire_date: hire_date.to_string(),
        }
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Ana").is_ok());
        assert!(not_blank("  ").is_err());
    }

    #[test]
    fn test_missing_required_fields_are_named() {
        let err = validate_payload(&input("", "")).unwrap_err();
        match err {
            ServiceError::Validation(message) => {
                assert_eq!(message, "Data Adm. is required; NOME is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(validate_payload(&input("Ana", "2020-01-15")).is_ok());
    }
}
