use std::fmt;

use serde::Deserialize;

/// Ingrediente del bar. Cuando se obtiene desde el stock, `stock_units` es la
/// cantidad disponible en ese momento.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub volume_per_unit: f64,
    pub alcoholic: bool,
    pub stock_units: u64,
}

impl Ingredient {
    pub fn new(name: &str, volume_per_unit: f64, alcoholic: bool, stock_units: u64) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            volume_per_unit,
            alcoholic,
            stock_units,
        }
    }

    /// Clave por la que se busca el ingrediente, sin distinguir mayusculas
    pub fn key(&self) -> String {
        name_key(&self.name)
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (stock={})", self.name, self.stock_units)
    }
}

pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
