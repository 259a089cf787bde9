use std::fmt;

use crate::{errors::BarError, ingredient::name_key, ledger::IngredientLedger};

/// Cocktail del menu. La receta no se modifica una vez creado.
#[derive(Debug, Clone, PartialEq)]
pub struct Cocktail {
    name: String,
    recipe: Vec<(String, u64)>,
    base_price: f64,
}

impl Cocktail {
    pub fn new(name: &str, recipe: Vec<(String, u64)>, base_price: f64) -> Cocktail {
        Cocktail {
            name: name.to_string(),
            recipe,
            base_price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn recipe(&self) -> &[(String, u64)] {
        &self.recipe
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn key(&self) -> String {
        name_key(&self.name)
    }

    /// Unidades de preparacion: la suma de las cantidades de la receta
    pub fn preparation_units(&self) -> u64 {
        self.recipe.iter().map(|(_, quantity)| quantity).sum()
    }

    /// Un ingrediente que no esta en el stock hace que el cocktail no se pueda preparar
    pub fn is_preparable(&self, ledger: &IngredientLedger) -> bool {
        self.recipe.iter().all(|(name, quantity)| {
            ledger
                .lookup(name)
                .map_or(false, |ingredient| ingredient.stock_units >= *quantity)
        })
    }

    /// Consume toda la receta o nada: si falta alguna linea el stock queda como estaba.
    pub fn consume_ingredients(&self, ledger: &IngredientLedger) -> Result<(), BarError> {
        let reservation = ledger.reserve(&self.recipe)?;
        ledger.commit(reservation)
    }
}

impl fmt::Display for Cocktail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ${:.2}", self.name, self.base_price)
    }
}
