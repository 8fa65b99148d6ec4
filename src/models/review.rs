use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::ValidationErrors;

use crate::errors::field_error;
use crate::utils::validation::required;

/// Performance rating on the closed 1..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rating {
    VeryPoor = 1,
    Poor = 2,
    Average = 3,
    Good = 4,
    Excellent = 5,
}

impl Rating {
    pub const ALL: [Rating; 5] = [
        Rating::VeryPoor,
        Rating::Poor,
        Rating::Average,
        Rating::Good,
        Rating::Excellent,
    ];

    pub fn value(self) -> i64 {
        self as i64
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::VeryPoor => "Very Poor",
            Rating::Poor => "Poor",
            Rating::Average => "Average",
            Rating::Good => "Good",
            Rating::Excellent => "Excellent",
        }
    }
}

impl TryFrom<i64> for Rating {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::ALL
            .into_iter()
            .find(|rating| rating.value() == value)
            .ok_or(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value(), self.label())
    }
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i64,
    #[serde(rename = "employee")]
    pub employee_id: i64,
    pub rating: i64,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn rating(&self) -> Option<Rating> {
        Rating::try_from(self.rating).ok()
    }
}

/// Writable review columns after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewFields {
    pub employee_id: i64,
    pub rating: Rating,
    pub comments: Option<String>,
}

/// Incoming review body for create, full and partial update.
///
/// `comments` distinguishes an omitted key (`None`) from an explicit `null`
/// (`Some(None)`).
#[derive(Deserialize, Debug, Default)]
pub struct ReviewPayload {
    pub employee: Option<i64>,
    pub rating: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub comments: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ReviewPayload {
    /// Carry the stored comments over when the body leaves the key out.
    /// `comments` is optional, so even a full replacement keeps it.
    pub fn keep_comments(mut self, current: &Review) -> Self {
        if self.comments.is_none() {
            self.comments = Some(current.comments.clone());
        }
        self
    }

    /// Combine the payload with `current` (the stored review for a partial
    /// update, `None` for create and full replacement).
    pub fn merge(self, current: Option<&Review>) -> Result<ReviewFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let employee_id = required(
            &mut errors,
            "employee",
            self.employee,
            current.map(|c| c.employee_id),
        );

        let rating = match self.rating {
            Some(value) => match Rating::try_from(value) {
                Ok(rating) => Some(rating),
                Err(value) => {
                    errors.add(
                        "rating",
                        field_error(
                            "invalid_choice",
                            format!("\"{}\" is not a valid choice.", value),
                        ),
                    );
                    None
                }
            },
            None => required(&mut errors, "rating", None, current.and_then(Review::rating)),
        };

        let comments = match self.comments {
            Some(comments) => comments,
            None => current.and_then(|c| c.comments.clone()),
        };

        match (employee_id, rating) {
            (Some(employee_id), Some(rating)) if errors.is_empty() => Ok(ReviewFields {
                employee_id,
                rating,
                comments,
            }),
            _ => Err(errors),
        }
    }
}
