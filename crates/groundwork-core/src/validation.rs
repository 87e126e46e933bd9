//! Validation helpers that turn `validator` failures into business errors.
//!
//! DTOs derive [`validator::Validate`] and use the stock `required` rule or
//! the [`email`] function below; handlers call [`validate`] (or use the API
//! crate's `ValidatedJson` extractor) to get an [`AppError`] whose code the
//! status table and localizer understand.

use std::sync::LazyLock;

use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::AppError;
use crate::message::{codes, is_known_code};
use crate::result::AppResult;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\A(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)\n?\z",
    )
    .expect("email pattern is a valid regex")
});

/// Custom `validator` rule for e-mail addresses.
///
/// Only lower-case addresses match. A single trailing newline is tolerated.
///
/// Use as `#[validate(custom(function = "groundwork_core::validation::email"))]`.
/// `Option` fields are only checked when present.
pub fn email(value: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(codes::AUTH_EMAIL_INVALID))
    }
}

/// Return the contained value or a missing-parameter error.
pub fn required<'a, T>(value: &'a Option<T>, name: &str) -> AppResult<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| AppError::required_parameter(format!("'{name}' is required")))
}

/// Run `validator` rules and convert the first failure into an [`AppError`].
pub fn validate<T: Validate>(value: &T) -> AppResult<()> {
    value.validate().map_err(|errors| into_app_error(&errors))
}

/// Convert `validator` errors into a single business error.
///
/// Fields are visited in name order so the reported code is stable.
pub fn into_app_error(errors: &ValidationErrors) -> AppError {
    match first_error(errors, "") {
        Some((path, error)) => {
            let code = code_for(&error.code);
            AppError::new(code, format!("Validation failed on '{path}' ({})", error.code))
        }
        None => AppError::validation("Validation failed"),
    }
}

fn first_error<'a>(
    errors: &'a ValidationErrors,
    prefix: &str,
) -> Option<(String, &'a ValidationError)> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (name, kind) in fields {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };
        let found = match kind {
            ValidationErrorsKind::Field(list) => list.first().map(|e| (path.clone(), e)),
            ValidationErrorsKind::Struct(nested) => first_error(nested, &path),
            ValidationErrorsKind::List(items) => items
                .iter()
                .find_map(|(index, nested)| first_error(nested, &format!("{path}[{index}]"))),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

fn code_for(validator_code: &str) -> &str {
    match validator_code {
        code if is_known_code(code) => code,
        "required" => codes::REQUIRED_PARAMETER,
        "email" => codes::AUTH_EMAIL_INVALID,
        _ => codes::INVALID_PARAMETER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Validate)]
    struct SignUp {
        #[validate(required)]
        name: Option<String>,
        #[validate(custom(function = "email"))]
        contact: Option<String>,
        #[validate(length(min = 3))]
        handle: String,
    }

    fn valid() -> SignUp {
        SignUp {
            name: Some("Ada".to_string()),
            contact: Some("ada@example.com".to_string()),
            handle: "ada".to_string(),
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(email("user.name+tag@sub.example.org").is_ok());
        assert!(email("User@Example.COM").is_err());
        assert!(email("no-at-sign").is_err());
        assert!(email("trailing@dot.").is_err());
        assert!(email("a@b").is_err());
        assert!(email("a@example.com\n").is_ok());
        assert!(email("a@example.com\n\n").is_err());
    }

    #[test]
    fn test_valid_dto_passes() {
        assert!(validate(&valid()).is_ok());
    }

    #[test]
    fn test_missing_required_maps_to_required_parameter() {
        let dto = SignUp {
            name: None,
            ..valid()
        };
        let err = validate(&dto).unwrap_err();
        assert_eq!(err.code, codes::REQUIRED_PARAMETER);
        assert!(err.message.contains("name"));
    }

    #[test]
    fn test_absent_email_passes_and_bad_email_fails() {
        let absent = SignUp {
            contact: None,
            ..valid()
        };
        assert!(validate(&absent).is_ok());

        let bad = SignUp {
            contact: Some("nope".to_string()),
            ..valid()
        };
        assert_eq!(validate(&bad).unwrap_err().code, codes::AUTH_EMAIL_INVALID);
    }

    #[test]
    fn test_other_rules_map_to_invalid_parameter() {
        let dto = SignUp {
            handle: "x".to_string(),
            ..valid()
        };
        assert_eq!(validate(&dto).unwrap_err().code, codes::INVALID_PARAMETER);
    }

    #[test]
    fn test_required_helper() {
        let present = Some(3);
        assert_eq!(*required(&present, "count").unwrap(), 3);

        let missing: Option<u8> = None;
        assert_eq!(
            required(&missing, "count").unwrap_err().code,
            codes::REQUIRED_PARAMETER
        );
    }
}
