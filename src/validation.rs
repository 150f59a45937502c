use std::fmt::{Display, Formatter};
use chrono::{DateTime, FixedOffset, NaiveDate};
use crate::classes::Class;
use crate::error::ApiError;

pub const NAME_MAX_LEN: usize = 20;

/// Field rule violated by a class or booking draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    NameRequired,
    NameNotAlphanumeric,
    NameTooLong,
    StartDateRequired,
    EndDateRequired,
    CapacityRequired,
    ClassRequired,
    DateRequired,
}
impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Violation::NameRequired => "name is required",
            Violation::NameNotAlphanumeric => "name must be alphanumeric",
            Violation::NameTooLong => "name is too long",
            Violation::StartDateRequired => "start_date is required",
            Violation::EndDateRequired => "end_date is required",
            Violation::CapacityRequired => "capacity must be a positive number",
            Violation::ClassRequired => "class_id is required",
            Violation::DateRequired => "date is required",
        };
        write!(f, "{s}")
    }
}

pub(crate) fn check_name(name: &str, violations: &mut Vec<Violation>) {
    if name.is_empty() {
        violations.push(Violation::NameRequired);
        return;
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        violations.push(Violation::NameNotAlphanumeric);
    }
    if name.chars().count() > NAME_MAX_LEN {
        violations.push(Violation::NameTooLong);
    }
}

/// Instant a client sends for an unset timestamp, `0001-01-01T00:00:00Z`.
fn is_zero_date(date: &DateTime<FixedOffset>) -> bool {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .is_some_and(|zero| date.naive_utc() == zero)
}

/// Missing and zero timestamps both count as not set.
pub(crate) fn require_date(value: Option<DateTime<FixedOffset>>, violation: Violation, violations: &mut Vec<Violation>) -> Option<DateTime<FixedOffset>> {
    let value = value.filter(|date| !is_zero_date(date));
    if value.is_none() {
        violations.push(violation);
    }
    value
}

pub(crate) fn check_date_order(start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> Result<(), ApiError> {
    if start > end {
        return Err(ApiError::ValidationFailed("StartDate must be before EndDate".to_string()));
    }
    Ok(())
}

/// Booking date must fall inside `[class.start_date, class.end_date]`, bounds included.
pub(crate) fn check_class_window(class: &Class, date: &DateTime<FixedOffset>) -> Result<(), ApiError> {
    if date < &class.start_date || date > &class.end_date {
        return Err(ApiError::ValidationFailed("Booking date is not within class date range".to_string()));
    }
    Ok(())
}

pub(crate) fn violations_to_string(violations: &[Violation]) -> String {
    violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod test {
    use super::*;

    fn name_violations(name: &str) -> Vec<Violation> {
        let mut violations = vec![];
        check_name(name, &mut violations);
        violations
    }
    fn dt(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_name_rules() {
        assert!(name_violations("Diego").is_empty());
        assert!(name_violations("Room101").is_empty());
        assert!(name_violations("abcdefghij0123456789").is_empty());
        assert_eq!(name_violations(""), [Violation::NameRequired]);
        assert_eq!(name_violations("Hot Yoga"), [Violation::NameNotAlphanumeric]);
        assert_eq!(name_violations("Zoë"), [Violation::NameNotAlphanumeric]);
        assert_eq!(name_violations("abcdefghij0123456789x"), [Violation::NameTooLong]);
        assert_eq!(name_violations("abcdefghij-0123456789"), [Violation::NameNotAlphanumeric, Violation::NameTooLong]);
    }

    #[test]
    fn test_zero_date_is_missing() {
        let mut violations = vec![];
        assert!(require_date(None, Violation::DateRequired, &mut violations).is_none());
        assert!(require_date(Some(dt("0001-01-01T00:00:00Z")), Violation::StartDateRequired, &mut violations).is_none());
        assert!(require_date(Some(dt("0001-01-01T01:00:00+01:00")), Violation::EndDateRequired, &mut violations).is_none());
        assert_eq!(violations, [Violation::DateRequired, Violation::StartDateRequired, Violation::EndDateRequired]);

        let date = dt("0001-01-01T00:00:01Z");
        assert_eq!(require_date(Some(date), Violation::DateRequired, &mut violations), Some(date));
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_date_order() {
        let a = dt("2023-10-06T16:00:00Z");
        let b = dt("2023-10-16T17:00:00Z");
        assert!(check_date_order(&a, &b).is_ok());
        assert!(check_date_order(&a, &a).is_ok());
        assert_eq!(
            check_date_order(&b, &a),
            Err(ApiError::ValidationFailed("StartDate must be before EndDate".to_string()))
        );
        // same instant written with a different offset
        assert!(check_date_order(&dt("2023-10-06T18:00:00+02:00"), &a).is_ok());
    }

    #[test]
    fn test_class_window_is_inclusive() {
        let class = Class {
            id: 1,
            name: "Yoga".to_string(),
            start_date: dt("2023-10-06T16:00:00Z"),
            end_date: dt("2023-10-16T17:00:00Z"),
            capacity: 10,
        };
        assert!(check_class_window(&class, &dt("2023-10-06T16:00:00Z")).is_ok());
        assert!(check_class_window(&class, &dt("2023-10-16T17:00:00Z")).is_ok());
        assert!(check_class_window(&class, &dt("2023-10-10T08:30:00-03:00")).is_ok());
        assert!(check_class_window(&class, &dt("2023-10-06T15:59:59Z")).is_err());
        assert!(check_class_window(&class, &dt("2023-10-16T17:00:01Z")).is_err());
    }
}
