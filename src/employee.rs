use std::fmt;

use serde::Deserialize;

/// Puesto del empleado. Hoy ambos preparan igual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Bartender,
    Waiter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Unidades de preparacion por unidad de tiempo
    pub speed: u64,
    pub role: Role,
}

impl Employee {
    pub fn new(id: &str, name: &str, speed: u64, role: Role) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            speed,
            role,
        }
    }

    pub fn bartender(id: &str, name: &str, speed: u64) -> Employee {
        Employee::new(id, name, speed, Role::Bartender)
    }

    pub fn waiter(id: &str, name: &str, speed: u64) -> Employee {
        Employee::new(id, name, speed, Role::Waiter)
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (speed={})", self.name, self.speed)
    }
}
