//! The canned queries
//!
//! Each function answers one question about the catalog and mirrors one SQL
//! statement, quoted above it.

use bigdecimal::{BigDecimal, Zero};

use super::rows::*;
use crate::catalog::{Catalog, Employee};
use crate::error::Result;
use crate::query::{GroupMap, Query, SortOrder};

fn employees(catalog: &Catalog) -> Query<&Employee> {
    Query::from_slice(catalog.employees())
}

/// `SELECT * FROM emp WHERE job = 'SALESMAN'`
pub fn salesmen(catalog: &Catalog) -> Query<&Employee> {
    employees(catalog).filter(|e| e.job == "SALESMAN")
}

/// `SELECT * FROM emp WHERE deptno = :dept_no ORDER BY sal DESC`
pub fn department_by_salary_desc(catalog: &Catalog, dept_no: i32) -> Query<&Employee> {
    employees(catalog)
        .filter(|e| e.dept_no == dept_no)
        .sort_by_key(|e| e.salary.clone(), SortOrder::Descending)
}

/// `SELECT * FROM emp WHERE deptno IN (SELECT deptno FROM dept WHERE loc = :location)`
///
/// Several departments may share a location; an employee is still listed
/// once.
pub fn employees_in_location<'c>(catalog: &'c Catalog, location: &str) -> Query<&'c Employee> {
    let departments =
        Query::from_slice(catalog.departments()).filter(|d| d.location == location);

    employees(catalog).semi_join(departments.as_slice(), |e| e.dept_no, |d| d.dept_no)
}

/// `SELECT ename, sal FROM emp`
pub fn names_and_salaries(catalog: &Catalog) -> Query<NameSalary> {
    employees(catalog).project(|e| NameSalary {
        name: e.name.clone(),
        salary: e.salary.clone(),
    })
}

/// `SELECT e.ename, d.dname FROM emp e JOIN dept d ON e.deptno = d.deptno`
pub fn employee_departments(catalog: &Catalog) -> Query<EmployeeDepartment> {
    employees(catalog).inner_join(
        catalog.departments(),
        |e| e.dept_no,
        |d| d.dept_no,
        |e, d| EmployeeDepartment {
            employee: e.name.clone(),
            department: d.name.clone(),
        },
    )
}

/// `SELECT deptno, COUNT(*) FROM emp GROUP BY deptno`
pub fn headcount_per_department(catalog: &Catalog) -> GroupMap<i32, usize> {
    employees(catalog).group_by(|e| e.dept_no).count()
}

/// `SELECT ename, comm FROM emp WHERE comm IS NOT NULL`
pub fn commissioned(catalog: &Catalog) -> Query<NameCommission> {
    employees(catalog).filter_map(|e| {
        e.commission.as_ref().map(|commission| NameCommission {
            name: e.name.clone(),
            commission: commission.clone(),
        })
    })
}

/// `SELECT e.ename, s.grade FROM emp e JOIN salgrade s ON e.sal BETWEEN s.losal AND s.hisal`
pub fn salary_grades(catalog: &Catalog) -> Query<EmployeeGrade> {
    employees(catalog).range_join(
        catalog.salary_grades(),
        |e, g| g.contains(&e.salary),
        |e, g| EmployeeGrade {
            employee: e.name.clone(),
            grade: g.grade,
        },
    )
}

/// `SELECT deptno, AVG(sal) FROM emp GROUP BY deptno`
pub fn average_salary_per_department(catalog: &Catalog) -> Result<GroupMap<i32, BigDecimal>> {
    employees(catalog)
        .group_by(|e| e.dept_no)
        .average_by(|e| e.salary.clone())
}

/// `SELECT e.ename FROM emp e WHERE e.sal > (SELECT AVG(sal) FROM emp WHERE deptno = e.deptno)`
pub fn above_department_average(catalog: &Catalog) -> Result<Query<String>> {
    let averages = average_salary_per_department(catalog)?;

    let mut names = Vec::new();
    for emp in catalog.employees() {
        if &emp.salary > averages.get(&emp.dept_no)? {
            names.push(emp.name.clone());
        }
    }
    Ok(Query::new(names))
}

/// `SELECT MAX(sal) FROM emp`
pub fn max_salary(catalog: &Catalog) -> Result<BigDecimal> {
    employees(catalog).max_by(|e| e.salary.clone())
}

/// `SELECT MIN(sal) FROM emp WHERE deptno = :dept_no`
pub fn min_salary_in_department(catalog: &Catalog, dept_no: i32) -> Result<BigDecimal> {
    employees(catalog)
        .filter(|e| e.dept_no == dept_no)
        .min_by(|e| e.salary.clone())
}

/// `SELECT * FROM emp ORDER BY hiredate FETCH FIRST :n ROWS ONLY`
pub fn first_hired(catalog: &Catalog, n: usize) -> Query<&Employee> {
    employees(catalog)
        .sort_by_key(|e| e.hire_date, SortOrder::Ascending)
        .limit(n)
}

/// `SELECT DISTINCT job FROM emp`
pub fn distinct_jobs(catalog: &Catalog) -> Query<&str> {
    employees(catalog)
        .project(|e| e.job.as_str())
        .distinct_by(|job| *job)
}

/// `SELECT * FROM emp WHERE mgr IS NOT NULL`
pub fn with_manager(catalog: &Catalog) -> Query<&Employee> {
    employees(catalog).filter(|e| e.has_manager())
}

/// Whether every employee earns strictly more than `amount`
pub fn all_earn_more_than(catalog: &Catalog, amount: &BigDecimal) -> bool {
    employees(catalog).all_match(|e| &e.salary > amount)
}

/// Whether some employee has a commission strictly above `amount`
pub fn any_commission_over(catalog: &Catalog, amount: &BigDecimal) -> bool {
    employees(catalog).any_match(|e| e.commission.as_ref().is_some_and(|c| c > amount))
}

/// `SELECT e1.ename, e2.ename FROM emp e1 JOIN emp e2 ON e1.mgr = e2.empno`
pub fn manager_pairs(catalog: &Catalog) -> Query<EmployeeManager> {
    employees(catalog).self_join(
        |e| e.manager,
        |m| m.emp_no,
        |e, m| EmployeeManager {
            employee: e.name.clone(),
            manager: m.name.clone(),
        },
    )
}

/// `SELECT ename, sal + COALESCE(comm, 0) FROM emp`
pub fn total_income(catalog: &Catalog) -> Query<TotalIncome> {
    employees(catalog).project(|e| {
        let commission = e.commission.clone().unwrap_or_else(BigDecimal::zero);
        TotalIncome {
            name: e.name.clone(),
            total: &e.salary + commission,
        }
    })
}

/// `SELECT e.ename, d.dname, s.grade FROM emp e
///  JOIN dept d ON e.deptno = d.deptno
///  JOIN salgrade s ON e.sal BETWEEN s.losal AND s.hisal`
pub fn employee_department_grade(catalog: &Catalog) -> Query<EmployeeDepartmentGrade> {
    employees(catalog)
        .inner_join(
            catalog.departments(),
            |e| e.dept_no,
            |d| d.dept_no,
            |e, d| (*e, d),
        )
        .range_join(
            catalog.salary_grades(),
            |(e, _), g| g.contains(&e.salary),
            |(e, d), g| EmployeeDepartmentGrade {
                employee: e.name.clone(),
                department: d.name.clone(),
                grade: g.grade,
            },
        )
}
