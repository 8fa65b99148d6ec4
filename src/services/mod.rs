pub mod dedup;
pub mod employee;
pub mod resolver;
pub mod review;

pub use dedup::{remove_duplicate_emails, DedupReport};
pub use employee::EmployeeService;
pub use resolver::{resolve_employee, Lookup};
pub use review::ReviewService;

use chrono::{DateTime, Duration, Utc};

/// Full replacement (`PUT`) or partial update (`PATCH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Full,
    Partial,
}

/// Current time, bumped past `previous` so `updated_at` strictly advances
/// even when two writes land on the same clock reading.
pub(crate) fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
