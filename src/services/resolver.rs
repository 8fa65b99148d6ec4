//! Maps a free-form path token onto exactly one employee.
//!
//! A token made only of ASCII digits is a primary key; anything else is a
//! name, matched case-insensitively against `first_name` and then
//! `last_name`. Several employees sharing the matched name resolve to the
//! lowest id.

use log::warn;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::employee::Employee;
use crate::services::employee::EMPLOYEE_COLUMNS;

/// How an identifier token is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Id(i64),
    Name(&'a str),
}

impl<'a> Lookup<'a> {
    /// Returns `None` for a digit string that cannot be a stored id
    /// (it overflows `i64`), which can never match anything.
    pub fn classify(identifier: &'a str) -> Option<Self> {
        if !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit()) {
            identifier.parse().ok().map(Lookup::Id)
        } else {
            Some(Lookup::Name(identifier))
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum NameColumn {
    First,
    Last,
}

impl NameColumn {
    fn as_str(self) -> &'static str {
        match self {
            NameColumn::First => "first_name",
            NameColumn::Last => "last_name",
        }
    }
}

pub async fn resolve_employee(pool: &SqlitePool, identifier: &str) -> Result<Employee, AppError> {
    let employee = match Lookup::classify(identifier) {
        Some(Lookup::Id(id)) => find_by_id(pool, id).await?,
        Some(Lookup::Name(name)) => match find_by_name(pool, NameColumn::First, name).await? {
            Some(employee) => Some(employee),
            None => find_by_name(pool, NameColumn::Last, name).await?,
        },
        None => None,
    };

    employee.ok_or_else(|| AppError::NotFound(format!("Employee '{}' not found", identifier)))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    let query = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1");
    sqlx::query_as::<_, Employee>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
}

async fn find_by_name(
    pool: &SqlitePool,
    column: NameColumn,
    name: &str,
) -> Result<Option<Employee>, sqlx::Error> {
    let query = format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees
         WHERE {} = $1 COLLATE NOCASE
         ORDER BY id
         LIMIT 2",
        column.as_str()
    );
    let mut matches = sqlx::query_as::<_, Employee>(&query)
        .bind(name)
        .fetch_all(pool)
        .await?;

    if matches.len() > 1 {
        warn!(
            "Identifier '{}' matches several employees by {}; using id {}",
            name,
            column.as_str(),
            matches[0].id
        );
    }

    Ok(if matches.is_empty() {
        None
    } else {
        Some(matches.swap_remove(0))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_strings_are_ids() {
        assert_eq!(Lookup::classify("42"), Some(Lookup::Id(42)));
        assert_eq!(Lookup::classify("007"), Some(Lookup::Id(7)));
    }

    #[test]
    fn everything_else_is_a_name() {
        assert_eq!(Lookup::classify("John"), Some(Lookup::Name("John")));
        assert_eq!(Lookup::classify("12ab"), Some(Lookup::Name("12ab")));
        assert_eq!(Lookup::classify("-3"), Some(Lookup::Name("-3")));
        assert_eq!(Lookup::classify(""), Some(Lookup::Name("")));
    }

    #[test]
    fn non_ascii_digits_are_names() {
        assert_eq!(Lookup::classify("٣"), Some(Lookup::Name("٣")));
    }

    #[test]
    fn overflowing_ids_never_match() {
        assert_eq!(Lookup::classify("99999999999999999999999"), None);
    }
}
