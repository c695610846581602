//! Canned reports
//!
//! This module contains the named queries over the catalog, their result
//! shapes, and a registry used by the report binary.

pub mod queries;
pub mod render;
pub mod rows;

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde_json::Value;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Error, Result};

pub use queries::*;
pub use rows::*;

/// Every report the binary can run, with the parameters of the classic
/// exercise baked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Salesmen,
    SalesBySalary,
    ChicagoEmployees,
    NamesAndSalaries,
    EmployeeDepartments,
    Headcount,
    Commissioned,
    SalaryGrades,
    AverageSalary,
    AboveAverage,
    MaxSalary,
    MinSalesSalary,
    FirstHired,
    DistinctJobs,
    WithManager,
    AllEarnOver500,
    AnyCommissionOver400,
    ManagerPairs,
    TotalIncome,
    EmployeeDepartmentGrade,
}

impl ReportKind {
    /// All reports in presentation order
    pub const ALL: [ReportKind; 20] = [
        ReportKind::Salesmen,
        ReportKind::SalesBySalary,
        ReportKind::ChicagoEmployees,
        ReportKind::NamesAndSalaries,
        ReportKind::EmployeeDepartments,
        ReportKind::Headcount,
        ReportKind::Commissioned,
        ReportKind::SalaryGrades,
        ReportKind::AverageSalary,
        ReportKind::AboveAverage,
        ReportKind::MaxSalary,
        ReportKind::MinSalesSalary,
        ReportKind::FirstHired,
        ReportKind::DistinctJobs,
        ReportKind::WithManager,
        ReportKind::AllEarnOver500,
        ReportKind::AnyCommissionOver400,
        ReportKind::ManagerPairs,
        ReportKind::TotalIncome,
        ReportKind::EmployeeDepartmentGrade,
    ];

    /// Stable name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Salesmen => "salesmen",
            ReportKind::SalesBySalary => "sales-by-salary",
            ReportKind::ChicagoEmployees => "chicago-employees",
            ReportKind::NamesAndSalaries => "names-and-salaries",
            ReportKind::EmployeeDepartments => "employee-departments",
            ReportKind::Headcount => "headcount",
            ReportKind::Commissioned => "commissioned",
            ReportKind::SalaryGrades => "salary-grades",
            ReportKind::AverageSalary => "average-salary",
            ReportKind::AboveAverage => "above-average",
            ReportKind::MaxSalary => "max-salary",
            ReportKind::MinSalesSalary => "min-sales-salary",
            ReportKind::FirstHired => "first-hired",
            ReportKind::DistinctJobs => "distinct-jobs",
            ReportKind::WithManager => "with-manager",
            ReportKind::AllEarnOver500 => "all-earn-over-500",
            ReportKind::AnyCommissionOver400 => "any-commission-over-400",
            ReportKind::ManagerPairs => "manager-pairs",
            ReportKind::TotalIncome => "total-income",
            ReportKind::EmployeeDepartmentGrade => "employee-department-grade",
        }
    }

    /// The SQL statement the report answers
    pub fn sql(&self) -> &'static str {
        match self {
            ReportKind::Salesmen => "SELECT * FROM emp WHERE job = 'SALESMAN'",
            ReportKind::SalesBySalary => "SELECT * FROM emp WHERE deptno = 30 ORDER BY sal DESC",
            ReportKind::ChicagoEmployees => {
                "SELECT * FROM emp WHERE deptno IN (SELECT deptno FROM dept WHERE loc = 'CHICAGO')"
            }
            ReportKind::NamesAndSalaries => "SELECT ename, sal FROM emp",
            ReportKind::EmployeeDepartments => {
                "SELECT e.ename, d.dname FROM emp e JOIN dept d ON e.deptno = d.deptno"
            }
            ReportKind::Headcount => "SELECT deptno, COUNT(*) FROM emp GROUP BY deptno",
            ReportKind::Commissioned => "SELECT ename, comm FROM emp WHERE comm IS NOT NULL",
            ReportKind::SalaryGrades => {
                "SELECT e.ename, s.grade FROM emp e JOIN salgrade s ON e.sal BETWEEN s.losal AND s.hisal"
            }
            ReportKind::AverageSalary => "SELECT deptno, AVG(sal) FROM emp GROUP BY deptno",
            ReportKind::AboveAverage => {
                "SELECT e.ename FROM emp e WHERE e.sal > (SELECT AVG(sal) FROM emp WHERE deptno = e.deptno)"
            }
            ReportKind::MaxSalary => "SELECT MAX(sal) FROM emp",
            ReportKind::MinSalesSalary => "SELECT MIN(sal) FROM emp WHERE deptno = 30",
            ReportKind::FirstHired => "SELECT * FROM emp ORDER BY hiredate FETCH FIRST 2 ROWS ONLY",
            ReportKind::DistinctJobs => "SELECT DISTINCT job FROM emp",
            ReportKind::WithManager => "SELECT * FROM emp WHERE mgr IS NOT NULL",
            ReportKind::AllEarnOver500 => "SELECT every(sal > 500) FROM emp",
            ReportKind::AnyCommissionOver400 => "SELECT bool_or(comm > 400) FROM emp",
            ReportKind::ManagerPairs => {
                "SELECT e1.ename, e2.ename AS manager FROM emp e1 JOIN emp e2 ON e1.mgr = e2.empno"
            }
            ReportKind::TotalIncome => "SELECT ename, sal + COALESCE(comm, 0) FROM emp",
            ReportKind::EmployeeDepartmentGrade => {
                "SELECT e.ename, d.dname, s.grade FROM emp e JOIN dept d ON e.deptno = d.deptno \
                 JOIN salgrade s ON e.sal BETWEEN s.losal AND s.hisal"
            }
        }
    }

    /// Run the report and serialize its result
    pub fn run(&self, catalog: &Catalog) -> Result<Value> {
        debug!(report = self.name(), "running report");

        let value = match self {
            ReportKind::Salesmen => serde_json::to_value(salesmen(catalog))?,
            ReportKind::SalesBySalary => {
                serde_json::to_value(department_by_salary_desc(catalog, 30))?
            }
            ReportKind::ChicagoEmployees => {
                serde_json::to_value(employees_in_location(catalog, "CHICAGO"))?
            }
            ReportKind::NamesAndSalaries => serde_json::to_value(names_and_salaries(catalog))?,
            ReportKind::EmployeeDepartments => {
                serde_json::to_value(employee_departments(catalog))?
            }
            ReportKind::Headcount => serde_json::to_value(headcount_per_department(catalog))?,
            ReportKind::Commissioned => serde_json::to_value(commissioned(catalog))?,
            ReportKind::SalaryGrades => serde_json::to_value(salary_grades(catalog))?,
            ReportKind::AverageSalary => {
                serde_json::to_value(average_salary_per_department(catalog)?)?
            }
            ReportKind::AboveAverage => serde_json::to_value(above_department_average(catalog)?)?,
            ReportKind::MaxSalary => serde_json::to_value(max_salary(catalog)?)?,
            ReportKind::MinSalesSalary => {
                serde_json::to_value(min_salary_in_department(catalog, 30)?)?
            }
            ReportKind::FirstHired => serde_json::to_value(first_hired(catalog, 2))?,
            ReportKind::DistinctJobs => serde_json::to_value(distinct_jobs(catalog))?,
            ReportKind::WithManager => serde_json::to_value(with_manager(catalog))?,
            ReportKind::AllEarnOver500 => {
                Value::Bool(all_earn_more_than(catalog, &BigDecimal::from(500)))
            }
            ReportKind::AnyCommissionOver400 => {
                Value::Bool(any_commission_over(catalog, &BigDecimal::from(400)))
            }
            ReportKind::ManagerPairs => serde_json::to_value(manager_pairs(catalog))?,
            ReportKind::TotalIncome => serde_json::to_value(total_income(catalog))?,
            ReportKind::EmployeeDepartmentGrade => {
                serde_json::to_value(employee_department_grade(catalog))?
            }
        };
        Ok(value)
    }
}

impl FromStr for ReportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ReportKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownReport(s.to_string()))
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
