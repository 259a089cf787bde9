use std::sync::Arc;

use crate::{employee::Employee, errors::BarError};

/// Empleados del bar, en el orden en que fueron contratados.
/// No se lleva registro de quien esta ocupado: un mismo empleado puede atender varios pedidos a la vez.
#[derive(Default)]
pub struct Roster {
    employees: Vec<Arc<Employee>>,
}

impl Roster {
    pub fn new() -> Roster {
        Roster::default()
    }

    pub fn add_employee(&mut self, employee: Employee) -> Result<(), BarError> {
        if employee.speed == 0 {
            return Err(BarError::InvalidEmployeeSpeed(employee.id));
        }
        if self.employees.iter().any(|hired| hired.id == employee.id) {
            return Err(BarError::DuplicateEmployee(employee.id));
        }
        self.employees.push(Arc::new(employee));
        Ok(())
    }

    /// El mas rapido; ante un empate, el primero que se agrego
    pub fn fastest_available(&self) -> Option<Arc<Employee>> {
        let mut fastest: Option<&Arc<Employee>> = None;
        for employee in &self.employees {
            match fastest {
                Some(current) if current.speed >= employee.speed => {}
                _ => fastest = Some(employee),
            }
        }
        fastest.cloned()
    }

    pub fn employees(&self) -> Vec<Arc<Employee>> {
        self.employees.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
