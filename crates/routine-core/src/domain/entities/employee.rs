//! Employee entity.

use crate::{CompanyId, EmployeeId, Gender};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// An employee belonging to exactly one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Employee number, unique per deployment.
    pub employee_no: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Gender.
    pub gender: Gender,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
}

impl Employee {
    /// Creates a new employee with a fresh ID.
    #[must_use]
    pub fn new(
        company_id: CompanyId,
        employee_no: String,
        first_name: String,
        last_name: String,
        gender: Gender,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            id: EmployeeId::new(),
            company_id,
            employee_no,
            first_name,
            last_name,
            gender,
            date_of_birth,
        }
    }

    /// Returns "first last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole calendar years as of `today`'s year.
    ///
    /// Birthdays later in the year are not taken into account.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        today.year() - self.date_of_birth.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee::new(
            CompanyId::new(),
            "MSFT231".to_string(),
            "Nick".to_string(),
            "Carter".to_string(),
            Gender::Male,
            NaiveDate::from_ymd_opt(1979, 7, 16).unwrap(),
        )
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample().full_name(), "Nick Carter");
    }

    #[test]
    fn test_age_uses_calendar_year_difference() {
        let employee = sample();
        assert_eq!(employee.age_on(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()), 41);
        assert_eq!(employee.age_on(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap()), 41);
    }
}
