// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::types::{Employee, EmployeeId};
use crate::validation::validate_employee_name;

/// The employee list backing the grid rows.
///
/// Ids are assigned as highest-existing-plus-one and never reused.
/// Employees are edited in place and never hard-deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            employees: Vec::new(),
        }
    }

    /// Creates the roster seeded when a backing store holds no employees yet.
    #[must_use]
    pub fn with_defaults() -> Self {
        let seed: [(&str, Option<&str>); 8] = [
            ("橋本", None),
            ("棟方", None),
            ("薄田", None),
            ("小林", Some("広睴")),
            ("梶", None),
            ("寺田", None),
            ("山崎", None),
            ("小林", Some("利治")),
        ];
        let employees: Vec<Employee> = seed
            .iter()
            .zip(1_i64..)
            .map(|((family, given), id)| {
                Employee::new(
                    EmployeeId::new(id),
                    (*family).to_string(),
                    given.map(ToString::to_string),
                )
            })
            .collect();
        Self { employees }
    }

    /// Builds a roster from already-validated employees, e.g. loaded from a
    /// backing store.
    #[must_use]
    pub fn from_employees(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    /// Returns the employees in display order.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns the number of employees.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true when the roster has no employees.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Returns true when an employee with this id exists.
    #[must_use]
    pub fn contains(&self, id: EmployeeId) -> bool {
        self.find(id).is_some()
    }

    /// Looks up an employee by id.
    #[must_use]
    pub fn find(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Adds an employee, assigning the next id.
    ///
    /// # Errors
    ///
    /// Returns an error if the name fails validation.
    pub fn add(
        &mut self,
        family_name: String,
        given_name: Option<String>,
    ) -> Result<EmployeeId, DomainError> {
        validate_employee_name(&family_name, given_name.as_deref())?;

        let id: EmployeeId = self.next_id();
        self.employees
            .push(Employee::new(id, family_name, given_name));
        Ok(id)
    }

    /// Replaces an employee's names in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is unknown or the name fails validation.
    pub fn update(
        &mut self,
        id: EmployeeId,
        family_name: String,
        given_name: Option<String>,
    ) -> Result<(), DomainError> {
        validate_employee_name(&family_name, given_name.as_deref())?;

        let employee: &mut Employee = self
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(DomainError::EmployeeNotFound(id.value()))?;
        employee.family_name = family_name;
        employee.given_name = given_name;
        Ok(())
    }

    fn next_id(&self) -> EmployeeId {
        let highest: i64 = self
            .employees
            .iter()
            .map(|e| e.id.value())
            .max()
            .unwrap_or(0);
        EmployeeId::new(highest + 1)
    }
}
