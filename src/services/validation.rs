//! Validation layer
//!
//! Options declare their constraints with `validator` attributes. This module
//! runs them and maps the first violation to a [`ValidationError`].

use crate::utils::error::{Constraint, ValidationError};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Error code for required-field violations
pub const CODE_REQUIRED: &str = "required";

/// Error code for enumeration violations; carries an `allowed` parameter
pub const CODE_ENUMERATION: &str = "enumeration";

/// Check an options value before any request is built
pub fn validate<T: Validate>(options: &T) -> Result<(), ValidationError> {
    options.validate().map_err(|errors| {
        first_violation(&errors, "").unwrap_or_else(|| {
            ValidationError::new("<options>", Constraint::Invalid("unknown".to_string()))
        })
    })
}

/// Build a violation for a custom enumeration check
pub fn enumeration_violation(allowed: &[&str]) -> validator::ValidationError {
    let mut error = validator::ValidationError::new(CODE_ENUMERATION);
    error.add_param("allowed".into(), &allowed);
    error
}

/// First violation in field-name order, nested fields as `outer.inner`
fn first_violation(errors: &ValidationErrors, prefix: &str) -> Option<ValidationError> {
    let mut fields: Vec<(String, &ValidationErrorsKind)> = errors
        .errors()
        .iter()
        .map(|(name, kind)| (name.to_string(), kind))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, kind) in fields {
        let path = if prefix.is_empty() { name } else { format!("{}.{}", prefix, name) };
        let found = match kind {
            ValidationErrorsKind::Field(violations) => violations
                .first()
                .map(|violation| ValidationError::new(path.clone(), constraint_of(violation))),
            ValidationErrorsKind::Struct(nested) => first_violation(nested, &path),
            ValidationErrorsKind::List(items) => items
                .iter()
                .find_map(|(index, nested)| first_violation(nested, &format!("{}[{}]", path, index))),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

fn constraint_of(violation: &validator::ValidationError) -> Constraint {
    let number = |name: &str| violation.params.get(name).and_then(|v| v.as_f64());
    let count = |name: &str| violation.params.get(name).and_then(|v| v.as_u64());

    match violation.code.as_ref() {
        CODE_REQUIRED => Constraint::Required,
        "range" => Constraint::Range { min: number("min"), max: number("max") },
        "length" => Constraint::Length { min: count("min"), max: count("max") },
        CODE_ENUMERATION => Constraint::Enumeration {
            allowed: violation
                .params
                .get("allowed")
                .and_then(|v| v.as_array())
                .map(|values| {
                    values
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
        },
        other => Constraint::Invalid(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate_color(color: &str) -> Result<(), validator::ValidationError> {
        if ["red", "blue"].contains(&color) {
            Ok(())
        } else {
            Err(enumeration_violation(&["red", "blue"]))
        }
    }

    #[derive(Validate)]
    struct Inner {
        #[validate(length(min = 1, code = "required"))]
        name: String,
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(range(min = 1, max = 10))]
        n: Option<u32>,
        #[validate(custom(function = "validate_color"))]
        color: String,
        #[validate(length(max = 3))]
        tags: Vec<String>,
        #[validate(nested)]
        inner: Inner,
    }

    fn valid() -> Sample {
        Sample {
            n: Some(2),
            color: "red".to_string(),
            tags: vec![],
            inner: Inner { name: "x".to_string() },
        }
    }

    #[test]
    fn test_valid_options_pass() {
        assert!(validate(&valid()).is_ok());
    }

    #[test]
    fn test_range_violation() {
        let sample = Sample { n: Some(11), ..valid() };
        let error = validate(&sample).unwrap_err();
        assert_eq!(error.field, "n");
        assert_eq!(error.constraint, Constraint::Range { min: Some(1.0), max: Some(10.0) });
    }

    #[test]
    fn test_enumeration_violation() {
        let sample = Sample { color: "green".to_string(), ..valid() };
        let error = validate(&sample).unwrap_err();
        assert_eq!(error.field, "color");
        assert_eq!(
            error.constraint,
            Constraint::Enumeration { allowed: vec!["red".to_string(), "blue".to_string()] }
        );
    }

    #[test]
    fn test_length_violation() {
        let sample = Sample { tags: vec!["a".into(), "b".into(), "c".into(), "d".into()], ..valid() };
        let error = validate(&sample).unwrap_err();
        assert_eq!(error.field, "tags");
        assert_eq!(error.constraint, Constraint::Length { min: None, max: Some(3) });
    }

    #[test]
    fn test_nested_required_violation() {
        let sample = Sample { inner: Inner { name: String::new() }, ..valid() };
        let error = validate(&sample).unwrap_err();
        assert_eq!(error.field, "inner.name");
        assert_eq!(error.constraint, Constraint::Required);
    }

    #[test]
    fn test_first_violation_in_field_order() {
        let sample = Sample { n: Some(0), color: "green".to_string(), ..valid() };
        let error = validate(&sample).unwrap_err();
        assert_eq!(error.field, "color");
    }
}
