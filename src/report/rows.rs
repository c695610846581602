//! Result shapes of the canned reports

use bigdecimal::BigDecimal;
use serde::Serialize;

/// `SELECT ename, sal`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameSalary {
    pub name: String,
    pub salary: BigDecimal,
}

/// `SELECT ename, comm`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCommission {
    pub name: String,
    pub commission: BigDecimal,
}

/// `SELECT e.ename, d.dname`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeDepartment {
    pub employee: String,
    pub department: String,
}

/// `SELECT e.ename, s.grade`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeGrade {
    pub employee: String,
    pub grade: i32,
}

/// `SELECT e1.ename, e2.ename AS manager`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeManager {
    pub employee: String,
    pub manager: String,
}

/// `SELECT ename, sal + COALESCE(comm, 0)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalIncome {
    pub name: String,
    pub total: BigDecimal,
}

/// `SELECT e.ename, d.dname, s.grade`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeDepartmentGrade {
    pub employee: String,
    pub department: String,
    pub grade: i32,
}
