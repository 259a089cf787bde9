//! Menu del bar.
use std::{collections::HashMap, sync::Arc};

use crate::{cocktail::Cocktail, errors::BarError, ingredient::name_key, ledger::IngredientLedger};

#[derive(Default)]
pub struct Catalog {
    cocktails: Vec<Arc<Cocktail>>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Catalog {
        Catalog::default()
    }

    pub fn add_cocktail(&mut self, cocktail: Cocktail) -> Result<(), BarError> {
        let key = cocktail.key();
        if self.index.contains_key(&key) {
            return Err(BarError::DuplicateCocktail(cocktail.name().to_string()));
        }
        self.index.insert(key, self.cocktails.len());
        self.cocktails.push(Arc::new(cocktail));
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<Arc<Cocktail>> {
        self.index
            .get(&name_key(name))
            .map(|position| self.cocktails[*position].clone())
    }

    pub fn cocktails(&self) -> Vec<Arc<Cocktail>> {
        self.cocktails.clone()
    }

    pub fn is_preparable(&self, cocktail: &Cocktail, ledger: &IngredientLedger) -> bool {
        cocktail.is_preparable(ledger)
    }

    pub fn consume_for(&self, cocktail: &Cocktail, ledger: &IngredientLedger) -> Result<(), BarError> {
        cocktail.consume_ingredients(ledger)
    }

    /// Cocktails del menu que se pueden preparar con el stock actual
    pub fn preparable(&self, ledger: &IngredientLedger) -> Vec<Arc<Cocktail>> {
        self.cocktails
            .iter()
            .filter(|cocktail| cocktail.is_preparable(ledger))
            .cloned()
            .collect()
    }

    /// Nombres de los cocktails de la seleccion que hoy no se podrian preparar
    pub fn unavailable_in(&self, selection: &[Arc<Cocktail>], ledger: &IngredientLedger) -> Vec<String> {
        selection
            .iter()
            .filter(|cocktail| !cocktail.is_preparable(ledger))
            .map(|cocktail| cocktail.name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cocktails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cocktails.is_empty()
    }
}
