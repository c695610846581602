//! Record definitions for empdept
//!
//! The three relations of the schema. Records are flat: relationships are
//! plain key values resolved by joins at query time.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A row of the EMP relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee number (unique)
    pub emp_no: i32,
    /// Employee name
    pub name: String,
    /// Job title
    pub job: String,
    /// Employee number of the manager, if any
    #[serde(default)]
    pub manager: Option<i32>,
    /// Hire date
    pub hire_date: NaiveDate,
    /// Monthly salary
    #[serde(deserialize_with = "decimal_string")]
    pub salary: BigDecimal,
    /// Commission, only set for employees that earn one
    #[serde(default, deserialize_with = "optional_decimal_string")]
    pub commission: Option<BigDecimal>,
    /// Department number (references `Department::dept_no`)
    pub dept_no: i32,
}

impl Employee {
    /// Check whether a manager reference is set.
    ///
    /// This says nothing about whether the reference resolves; only a self
    /// join can answer that.
    pub fn has_manager(&self) -> bool {
        self.manager.is_some()
    }

    /// Check whether a commission is recorded
    pub fn has_commission(&self) -> bool {
        self.commission.is_some()
    }
}

/// A row of the DEPT relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department number (unique)
    pub dept_no: i32,
    /// Department name
    pub name: String,
    /// Department location
    pub location: String,
}

/// A row of the SALGRADE relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryGrade {
    /// Grade number
    pub grade: i32,
    /// Lowest salary of the band (inclusive)
    #[serde(deserialize_with = "decimal_string")]
    pub low: BigDecimal,
    /// Highest salary of the band (inclusive)
    #[serde(deserialize_with = "decimal_string")]
    pub high: BigDecimal,
}

impl SalaryGrade {
    /// Check if `salary` falls inside `[low, high]`
    pub fn contains(&self, salary: &BigDecimal) -> bool {
        &self.low <= salary && salary <= &self.high
    }

    /// Check if two bands share at least one value
    pub fn overlaps(&self, other: &SalaryGrade) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

/// Decode a decimal from its string form only.
///
/// JSON numbers are rejected: serde_json reads them as `f64`, which cannot
/// hold most decimal fractions.
fn decimal_string<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    BigDecimal::from_str(text.trim())
        .map_err(|e| serde::de::Error::custom(format!("invalid decimal '{}': {}", text, e)))
}

fn optional_decimal_string<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) => BigDecimal::from_str(text.trim())
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid decimal '{}': {}", text, e))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn grade(grade: i32, low: &str, high: &str) -> SalaryGrade {
        SalaryGrade {
            grade,
            low: dec(low),
            high: dec(high),
        }
    }

    #[test]
    fn test_grade_contains_is_inclusive() {
        let band = grade(3, "1401", "2000");

        assert!(band.contains(&dec("1401")));
        assert!(band.contains(&dec("2000")));
        assert!(band.contains(&dec("1600.50")));
        assert!(!band.contains(&dec("1400.99")));
        assert!(!band.contains(&dec("2000.01")));
    }

    #[test]
    fn test_grade_overlaps() {
        let a = grade(1, "700", "1200");
        let b = grade(2, "1201", "1400");
        let c = grade(9, "1100", "1300");

        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_employee_deserialize() {
        let json = r#"{
            "emp_no": 7499,
            "name": "ALLEN",
            "job": "SALESMAN",
            "manager": 7839,
            "hire_date": "1981-02-20",
            "salary": "1600",
            "commission": "300",
            "dept_no": 30
        }"#;

        let emp: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(emp.emp_no, 7499);
        assert_eq!(emp.hire_date, NaiveDate::from_ymd_opt(1981, 2, 20).unwrap());
        assert_eq!(emp.commission, Some(dec("300")));
        assert!(emp.has_manager());
        assert!(emp.has_commission());
    }

    #[test]
    fn test_employee_missing_optionals() {
        let json = r#"{
            "emp_no": 7839,
            "name": "KING",
            "job": "PRESIDENT",
            "hire_date": "1981-11-17",
            "salary": "5000",
            "dept_no": 10
        }"#;

        let emp: Employee = serde_json::from_str(json).unwrap();
        assert!(!emp.has_manager());
        assert!(!emp.has_commission());
    }
}
