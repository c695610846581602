//! Catalog for empdept
//!
//! This module owns the three record collections and the data sources that
//! load them. A catalog is immutable once built.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::schema::{Department, Employee, SalaryGrade};
use crate::error::{Error, Result};

/// The built-in dataset, embedded at compile time
const SAMPLE_DATASET: &str = include_str!("../../data/sample.json");

/// Catalog - the fully materialized EMP, DEPT and SALGRADE relations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Employees in insertion order
    employees: Vec<Employee>,
    /// Departments in insertion order
    departments: Vec<Department>,
    /// Salary grade bands in insertion order
    salary_grades: Vec<SalaryGrade>,
}

impl Catalog {
    /// Create a catalog from already materialized relations.
    ///
    /// No integrity checks are run; see [`Catalog::validate`].
    pub fn new(
        employees: Vec<Employee>,
        departments: Vec<Department>,
        salary_grades: Vec<SalaryGrade>,
    ) -> Self {
        Self {
            employees,
            departments,
            salary_grades,
        }
    }

    /// Decode a catalog from a JSON dataset
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the built-in sample catalog
    pub fn sample() -> Result<Self> {
        SampleData.load()
    }

    /// Get all employees
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Get all departments
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Get all salary grade bands
    pub fn salary_grades(&self) -> &[SalaryGrade] {
        &self.salary_grades
    }

    /// Check referential integrity of the relations.
    ///
    /// Unresolved manager references are allowed: they only make the
    /// employee drop out of a manager self join.
    pub fn validate(&self) -> Result<()> {
        let mut emp_nos = HashSet::new();
        for emp in &self.employees {
            if !emp_nos.insert(emp.emp_no) {
                return Err(Error::PrimaryKeyViolation(format!(
                    "duplicate employee number {}",
                    emp.emp_no
                )));
            }
        }

        let mut dept_nos = HashSet::new();
        for dept in &self.departments {
            if !dept_nos.insert(dept.dept_no) {
                return Err(Error::PrimaryKeyViolation(format!(
                    "duplicate department number {}",
                    dept.dept_no
                )));
            }
        }

        for emp in &self.employees {
            if !dept_nos.contains(&emp.dept_no) {
                return Err(Error::ForeignKeyViolation(format!(
                    "employee {} references department {}",
                    emp.emp_no, emp.dept_no
                )));
            }
        }

        for (i, band) in self.salary_grades.iter().enumerate() {
            if band.low > band.high {
                return Err(Error::ConstraintViolation(format!(
                    "grade {} has low bound {} above high bound {}",
                    band.grade, band.low, band.high
                )));
            }
            if let Some(other) = self.salary_grades[i + 1..]
                .iter()
                .find(|other| band.overlaps(other))
            {
                return Err(Error::ConstraintViolation(format!(
                    "grades {} and {} overlap",
                    band.grade, other.grade
                )));
            }
        }

        Ok(())
    }
}

/// A collaborator that supplies the relations to the query layer.
///
/// Implementations must return the same fully populated records on every
/// call.
pub trait DataSource {
    /// Load the catalog
    fn load(&self) -> Result<Catalog>;
}

/// The fixed sample dataset (5 employees, 4 departments, 5 grades)
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleData;

impl DataSource for SampleData {
    fn load(&self) -> Result<Catalog> {
        let catalog = Catalog::from_json(SAMPLE_DATASET)?;
        catalog.validate()?;

        info!(
            employees = catalog.employees.len(),
            departments = catalog.departments.len(),
            salary_grades = catalog.salary_grades.len(),
            "loaded sample catalog"
        );
        Ok(catalog)
    }
}

/// A dataset stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Create a source reading the dataset at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for JsonFile {
    fn load(&self) -> Result<Catalog> {
        let json = fs::read_to_string(&self.path)?;
        let catalog = Catalog::from_json(&json)?;
        catalog.validate()?;

        info!(
            path = %self.path.display(),
            employees = catalog.employees.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    fn employee(emp_no: i32, dept_no: i32) -> Employee {
        Employee {
            emp_no,
            name: format!("E{}", emp_no),
            job: "CLERK".to_string(),
            manager: None,
            hire_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            salary: BigDecimal::from(1000),
            commission: None,
            dept_no,
        }
    }

    fn department(dept_no: i32) -> Department {
        Department {
            dept_no,
            name: format!("D{}", dept_no),
            location: "NOWHERE".to_string(),
        }
    }

    fn grade(grade: i32, low: i32, high: i32) -> SalaryGrade {
        SalaryGrade {
            grade,
            low: BigDecimal::from(low),
            high: BigDecimal::from(high),
        }
    }

    #[test]
    fn test_sample_catalog() {
        let catalog = Catalog::sample().unwrap();

        assert_eq!(catalog.employees().len(), 5);
        assert_eq!(catalog.departments().len(), 4);
        assert_eq!(catalog.salary_grades().len(), 5);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_sample_is_deterministic() {
        let first = SampleData.load().unwrap();
        let second = SampleData.load().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_duplicate_employee() {
        let catalog = Catalog::new(
            vec![employee(1, 10), employee(1, 10)],
            vec![department(10)],
            vec![],
        );
        assert!(matches!(
            catalog.validate(),
            Err(Error::PrimaryKeyViolation(_))
        ));
    }

    #[test]
    fn test_validate_dangling_department() {
        let catalog = Catalog::new(vec![employee(1, 99)], vec![department(10)], vec![]);
        assert!(matches!(
            catalog.validate(),
            Err(Error::ForeignKeyViolation(_))
        ));
    }

    #[test]
    fn test_validate_dangling_manager_is_allowed() {
        let mut emp = employee(1, 10);
        emp.manager = Some(4242);
        let catalog = Catalog::new(vec![emp], vec![department(10)], vec![]);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_validate_grade_bands() {
        let inverted = Catalog::new(vec![], vec![], vec![grade(1, 500, 100)]);
        assert!(matches!(
            inverted.validate(),
            Err(Error::ConstraintViolation(_))
        ));

        let overlapping = Catalog::new(vec![], vec![], vec![grade(1, 0, 100), grade(2, 100, 200)]);
        let err = overlapping.validate().unwrap_err();
        assert!(err.to_string().contains("grades 1 and 2 overlap"));
    }

    #[test]
    fn test_json_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        std::fs::write(&path, SAMPLE_DATASET).unwrap();

        let catalog = JsonFile::new(&path).load().unwrap();
        assert_eq!(catalog, Catalog::sample().unwrap());

        let missing = JsonFile::new(dir.path().join("missing.json")).load();
        assert!(matches!(missing, Err(Error::Io(_))));
    }

    fn dataset(salary: &str, commission: &str, low: &str) -> String {
        format!(
            r#"{{
                "employees": [{{
                    "emp_no": 1, "name": "A", "job": "CLERK", "manager": null,
                    "hire_date": "1990-01-01", "salary": {}, "commission": {},
                    "dept_no": 10
                }}],
                "departments": [{{ "dept_no": 10, "name": "D10", "location": "X" }}],
                "salary_grades": [{{ "grade": 1, "low": {}, "high": "9999" }}]
            }}"#,
            salary, commission, low
        )
    }

    #[test]
    fn test_from_json_decimals_are_exact() {
        let catalog = Catalog::from_json(&dataset(r#""0.1""#, r#""0.2""#, r#""0""#)).unwrap();

        let emp = &catalog.employees()[0];
        assert_eq!(emp.salary.to_string(), "0.1");
        let totals = crate::report::total_income(&catalog).into_vec();
        assert_eq!(totals[0].total, "0.3".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn test_from_json_rejects_numeric_decimals() {
        let numeric_salary = Catalog::from_json(&dataset("0.1", "null", r#""0""#));
        assert!(matches!(numeric_salary, Err(Error::Json(_))));

        let numeric_commission = Catalog::from_json(&dataset(r#""0.1""#, "0.2", r#""0""#));
        assert!(matches!(numeric_commission, Err(Error::Json(_))));

        let numeric_band = Catalog::from_json(&dataset(r#""0.1""#, "null", "0"));
        assert!(matches!(numeric_band, Err(Error::Json(_))));

        let garbage = Catalog::from_json(&dataset(r#""ten""#, "null", r#""0""#));
        assert!(matches!(garbage, Err(Error::Json(_))));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let result = Catalog::from_json(r#"{ "employees": [] }"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
