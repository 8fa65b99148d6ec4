use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationErrors};

use crate::errors::field_error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Run the derive-based rules of `payload`, returning whatever they reported
/// so callers can keep adding their own field errors.
pub fn collect_errors<T: Validate>(payload: &T) -> ValidationErrors {
    match payload.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    }
}

/// Deserialize a present key as `Some(value)` with surrounding whitespace
/// removed, so an explicit `null` (`Some(None)`) stays distinct from an
/// omitted key (`None`, via `#[serde(default)]`).
pub fn trimmed<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
        .map(|value| Some(value.map(|text| text.trim().to_string())))
}

/// Supplied value, else the current one; records `required` when neither exists.
pub fn required<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    supplied: Option<T>,
    current: Option<T>,
) -> Option<T> {
    let value = supplied.or(current);
    if value.is_none() {
        errors.add(field, field_error("required", "This field is required."));
    }
    value
}

fn reject_null(errors: &mut ValidationErrors, field: &'static str) {
    errors.add(field, field_error("null", "This field may not be null."));
}

/// Like [`required`] for text, trimming the supplied value and rejecting
/// blanks and explicit nulls.
pub fn required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    supplied: Option<Option<String>>,
    current: Option<&String>,
) -> Option<String> {
    match supplied {
        Some(None) => {
            reject_null(errors, field);
            None
        }
        Some(Some(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                errors.add(field, field_error("blank", "This field may not be blank."));
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => required(errors, field, None, current.cloned()),
    }
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Required ISO `YYYY-MM-DD` date, parsed from the supplied text if present.
pub fn required_date(
    errors: &mut ValidationErrors,
    field: &'static str,
    supplied: Option<Option<String>>,
    current: Option<NaiveDate>,
) -> Option<NaiveDate> {
    match supplied {
        Some(None) => {
            reject_null(errors, field);
            None
        }
        Some(Some(raw)) => {
            let parsed = parse_iso_date(&raw);
            if parsed.is_none() {
                errors.add(
                    field,
                    field_error(
                        "invalid_date",
                        "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
                    ),
                );
            }
            parsed
        }
        None => required(errors, field, None, current),
    }
}
