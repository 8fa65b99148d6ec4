use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::review::Review;
use crate::utils::validation::{collect_errors, required_date, required_text, trimmed};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact_number: String,
    pub contact_info: String,
    pub department: String,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Writable employee columns after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact_number: String,
    pub contact_info: String,
    pub department: String,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
}

/// Incoming employee body. Every field is optional at the wire level so
/// that create, full replacement and partial update share one shape; which
/// fields are mandatory is decided by [`EmployeePayload::merge`].
///
/// Values arrive trimmed, so the derive rules see what will be stored. An
/// explicit `null` is `Some(None)` and is rejected by `merge`.
#[derive(Deserialize, Validate, Debug, Default)]
pub struct EmployeePayload {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 100))]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 100))]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(email, length(max = 254))]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 100))]
    pub contact_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 100))]
    pub contact_info: Option<Option<String>>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 100))]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "trimmed")]
    pub birth_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "trimmed")]
    pub hire_date: Option<Option<String>>,
}

impl EmployeePayload {
    /// Combine the payload with `current` (the stored record for a partial
    /// update, `None` for create and full replacement). Omitted fields fall
    /// back to `current`; without it they are reported as required.
    pub fn merge(self, current: Option<&Employee>) -> Result<EmployeeFields, ValidationErrors> {
        let mut errors = collect_errors(&self);

        let first_name = required_text(
            &mut errors,
            "first_name",
            self.first_name,
            current.map(|c| &c.first_name),
        );
        let last_name = required_text(
            &mut errors,
            "last_name",
            self.last_name,
            current.map(|c| &c.last_name),
        );
        let email = required_text(&mut errors, "email", self.email, current.map(|c| &c.email));
        let contact_number = required_text(
            &mut errors,
            "contact_number",
            self.contact_number,
            current.map(|c| &c.contact_number),
        );
        let contact_info = required_text(
            &mut errors,
            "contact_info",
            self.contact_info,
            current.map(|c| &c.contact_info),
        );
        let department = required_text(
            &mut errors,
            "department",
            self.department,
            current.map(|c| &c.department),
        );
        let birth_date = required_date(
            &mut errors,
            "birth_date",
            self.birth_date,
            current.map(|c| c.birth_date),
        );
        let hire_date = required_date(
            &mut errors,
            "hire_date",
            self.hire_date,
            current.map(|c| c.hire_date),
        );

        if !errors.is_empty() {
            return Err(errors);
        }

        match (
            first_name,
            last_name,
            email,
            contact_number,
            contact_info,
            department,
            birth_date,
            hire_date,
        ) {
            (
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(contact_number),
                Some(contact_info),
                Some(department),
                Some(birth_date),
                Some(hire_date),
            ) => Ok(EmployeeFields {
                first_name,
                last_name,
                email,
                contact_number,
                contact_info,
                department,
                birth_date,
                hire_date,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> EmployeePayload {
        EmployeePayload {
            first_name: Some(Some("John".into())),
            last_name: Some(Some("Doe".into())),
            email: Some(Some("john.doe@example.com".into())),
            contact_number: Some(Some("1234567890".into())),
            contact_info: Some(Some("123 Main St".into())),
            department: Some(Some("Engineering".into())),
            birth_date: Some(Some("1990-01-01".into())),
            hire_date: Some(Some("2020-01-01".into())),
        }
    }

    #[test]
    fn full_payload_merges_without_current() {
        let fields = full_payload().merge(None).unwrap();
        assert_eq!(fields.first_name, "John");
        assert_eq!(fields.birth_date, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
    }

    #[test]
    fn missing_fields_are_reported_individually() {
        let payload = EmployeePayload {
            first_name: Some(Some("John".into())),
            ..Default::default()
        };
        let errors = payload.merge(None).unwrap_err();
        let fields = errors.field_errors();
        assert!(!fields.contains_key("first_name"));
        for field in ["last_name", "email", "contact_number", "birth_date", "hire_date"] {
            assert!(fields.contains_key(field), "{field} should be required");
        }
    }

    #[test]
    fn malformed_email_and_date_are_rejected() {
        let payload = EmployeePayload {
            email: Some(Some("not-an-email".into())),
            hire_date: Some(Some("2020-13-01".into())),
            ..full_payload()
        };
        let errors = payload.merge(None).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("hire_date"));
    }

    fn stored_employee() -> Employee {
        let now = Utc::now();
        Employee {
            id: 1,
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john.doe@example.com".into(),
            contact_number: "1234567890".into(),
            contact_info: "123 Main St".into(),
            department: "Engineering".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            created_at: now,
            updated_at: now,
            reviews: Vec::new(),
        }
    }

    #[test]
    fn partial_payload_keeps_current_values() {
        let current = stored_employee();
        let payload = EmployeePayload {
            department: Some(Some("Sales".into())),
            ..Default::default()
        };

        let fields = payload.merge(Some(&current)).unwrap();
        assert_eq!(fields.department, "Sales");
        assert_eq!(fields.email, current.email);
        assert_eq!(fields.hire_date, current.hire_date);
    }

    #[test]
    fn padded_email_is_trimmed_before_validation() {
        let payload: EmployeePayload =
            serde_json::from_str(r#"{"email": "  john@example.com "}"#).unwrap();
        let fields = payload.merge(Some(&stored_employee())).unwrap();
        assert_eq!(fields.email, "john@example.com");
    }

    #[test]
    fn explicit_null_is_not_an_omission() {
        let payload: EmployeePayload =
            serde_json::from_str(r#"{"department": null, "hire_date": null}"#).unwrap();
        let errors = payload.merge(Some(&stored_employee())).unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["department"][0].code, "null");
        assert_eq!(fields["hire_date"][0].code, "null");
        assert!(!fields.contains_key("first_name"));
    }
}
