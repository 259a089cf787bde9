//! Stock de ingredientes del bar.
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Mutex, MutexGuard},
};

use log::{debug, warn};

use crate::{
    container::Container,
    errors::BarError,
    ingredient::{name_key, Ingredient},
};

struct StockEntry {
    name: String,
    volume_per_unit: f64,
    alcoholic: bool,
    container: Mutex<Container>,
}

/// Unidades apartadas para un pedido. Se confirman con `IngredientLedger::commit`
/// una vez preparado o se devuelven con `IngredientLedger::release`.
#[derive(Debug)]
#[must_use]
pub struct Reservation {
    lines: Vec<(usize, u64)>,
}

/// Representa el stock del bar. Cada ingrediente tiene su propio lock,
/// por lo que solo se comparte el ledger entre hilos (no hace falta un lock global).
#[derive(Default)]
pub struct IngredientLedger {
    entries: Vec<StockEntry>,
    index: HashMap<String, usize>,
}

impl IngredientLedger {
    pub fn new() -> IngredientLedger {
        IngredientLedger::default()
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) -> Result<(), BarError> {
        let key = ingredient.key();
        if self.index.contains_key(&key) {
            return Err(BarError::DuplicateIngredient(ingredient.name));
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(StockEntry {
            name: ingredient.name,
            volume_per_unit: ingredient.volume_per_unit,
            alcoholic: ingredient.alcoholic,
            container: Mutex::new(Container::new(ingredient.stock_units)),
        });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Ingredient> {
        let entry = self.entry(name).ok()?;
        self.snapshot_of(entry).ok()
    }

    /// Descuenta `quantity` unidades del ingrediente. No deja el stock por debajo de cero.
    pub fn consume(&self, name: &str, quantity: u64) -> Result<(), BarError> {
        let entry = self.entry(name)?;
        let mut container = entry.container.lock()?;
        if !container.has(quantity) {
            return Err(BarError::InsufficientStock {
                ingredient: entry.name.clone(),
                required: quantity,
                available: container.remaining,
            });
        }
        container.remaining -= quantity;
        container.consumed += quantity;
        debug!(
            "[LEDGER] Used {} of {}, remains {}",
            quantity, entry.name, container.remaining
        );
        Ok(())
    }

    pub fn restock(&self, name: &str, quantity: u64) -> Result<(), BarError> {
        let entry = self.entry(name)?;
        let mut container = entry.container.lock()?;
        container.remaining += quantity;
        debug!(
            "[LEDGER] Restocked {} with {}, now {}",
            entry.name, quantity, container.remaining
        );
        Ok(())
    }

    /// Verifica y aparta en un solo paso todas las unidades pedidas.
    /// Los locks se toman siempre en el mismo orden (por clave) para no generar deadlocks
    /// entre pedidos que comparten ingredientes.
    pub fn reserve(&self, requirements: &[(String, u64)]) -> Result<Reservation, BarError> {
        let mut required: BTreeMap<String, (&str, u64)> = BTreeMap::new();
        for (name, quantity) in requirements {
            required.entry(name_key(name)).or_insert((name.as_str(), 0)).1 += quantity;
        }

        let mut locked: Vec<(usize, u64, MutexGuard<Container>)> = Vec::with_capacity(required.len());
        for (key, (name, quantity)) in required {
            let position = *self
                .index
                .get(&key)
                .ok_or_else(|| BarError::IngredientNotFound(name.to_string()))?;
            let container = self.entries[position].container.lock()?;
            if !container.has(quantity) {
                return Err(BarError::InsufficientStock {
                    ingredient: self.entries[position].name.clone(),
                    required: quantity,
                    available: container.remaining,
                });
            }
            locked.push((position, quantity, container));
        }

        let mut lines = Vec::with_capacity(locked.len());
        for (position, quantity, mut container) in locked {
            container.remaining -= quantity;
            container.reserved += quantity;
            lines.push((position, quantity));
        }
        Ok(Reservation { lines })
    }

    /// Pasa las unidades reservadas a consumidas
    pub fn commit(&self, reservation: Reservation) -> Result<(), BarError> {
        for (position, quantity) in reservation.lines {
            let entry = &self.entries[position];
            let mut container = entry.container.lock()?;
            container.reserved -= quantity;
            container.consumed += quantity;
            debug!(
                "[LEDGER] Used {} of {}, remains {}",
                quantity, entry.name, container.remaining
            );
        }
        Ok(())
    }

    /// Devuelve al stock las unidades reservadas
    pub fn release(&self, reservation: Reservation) -> Result<(), BarError> {
        for (position, quantity) in reservation.lines {
            let entry = &self.entries[position];
            let mut container = entry.container.lock()?;
            container.reserved -= quantity;
            container.remaining += quantity;
            warn!("[LEDGER] Returned {} of {} to the stock", quantity, entry.name);
        }
        Ok(())
    }

    /// Ingredientes en el orden en que fueron agregados, con su stock actual
    pub fn snapshot(&self) -> Result<Vec<Ingredient>, BarError> {
        self.entries
            .iter()
            .map(|entry| self.snapshot_of(entry))
            .collect()
    }

    pub fn consumed(&self, name: &str) -> Result<u64, BarError> {
        let container = self.entry(name)?.container.lock()?;
        Ok(container.consumed)
    }

    pub fn low_stock(&self, threshold: u64) -> Result<Vec<Ingredient>, BarError> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|ingredient| ingredient.stock_units <= threshold)
            .collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, name: &str) -> Result<&StockEntry, BarError> {
        self.index
            .get(&name_key(name))
            .map(|position| &self.entries[*position])
            .ok_or_else(|| BarError::IngredientNotFound(name.to_string()))
    }

    fn snapshot_of(&self, entry: &StockEntry) -> Result<Ingredient, BarError> {
        let container = entry.container.lock()?;
        Ok(Ingredient {
            name: entry.name.clone(),
            volume_per_unit: entry.volume_per_unit,
            alcoholic: entry.alcoholic,
            stock_units: container.remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    fn ledger_with_rum_and_lime(rum: u64, lime: u64) -> IngredientLedger {
        let mut ledger = IngredientLedger::new();
        ledger.add_ingredient(Ingredient::new("Rum", 50.0, true, rum)).unwrap();
        ledger.add_ingredient(Ingredient::new("Lime", 30.0, false, lime)).unwrap();
        ledger
    }

    fn stock_of(ledger: &IngredientLedger, name: &str) -> u64 {
        ledger.lookup(name).unwrap().stock_units
    }

    #[test]
    fn should_find_an_ingredient_ignoring_case() {
        let ledger = ledger_with_rum_and_lime(2, 1);
        let rum = ledger.lookup("rUM").unwrap();
        assert_eq!("Rum", rum.name);
        assert_eq!(2, rum.stock_units);
        assert_eq!(true, rum.alcoholic);
        assert_eq!(true, ledger.lookup("Vodka").is_none());
    }

    #[test]
    fn should_not_add_the_same_ingredient_twice() {
        let mut ledger = ledger_with_rum_and_lime(2, 1);
        let result = ledger.add_ingredient(Ingredient::new("RUM", 50.0, true, 4));
        assert_eq!(Err(BarError::DuplicateIngredient("RUM".to_string())), result);
        assert_eq!(2, ledger.len());
    }

    #[test]
    fn should_consume_and_restock() {
        let ledger = ledger_with_rum_and_lime(2, 1);
        ledger.consume("Rum", 2).unwrap();
        assert_eq!(0, stock_of(&ledger, "Rum"));
        assert_eq!(2, ledger.consumed("Rum").unwrap());

        ledger.restock("rum", 10).unwrap();
        assert_eq!(10, stock_of(&ledger, "Rum"));
    }

    #[test]
    fn should_not_consume_below_zero() {
        let ledger = ledger_with_rum_and_lime(1, 1);
        let result = ledger.consume("Rum", 2);
        assert_eq!(
            Err(BarError::InsufficientStock {
                ingredient: "Rum".to_string(),
                required: 2,
                available: 1
            }),
            result
        );
        assert_eq!(1, stock_of(&ledger, "Rum"));
    }

    #[test]
    fn should_fail_to_restock_an_unknown_ingredient() {
        let ledger = ledger_with_rum_and_lime(1, 1);
        assert_eq!(
            Err(BarError::IngredientNotFound("Gin".to_string())),
            ledger.restock("Gin", 3)
        );
    }

    #[test]
    fn should_reserve_and_commit() {
        let ledger = ledger_with_rum_and_lime(2, 1);
        let reservation = ledger
            .reserve(&[("Rum".to_string(), 2), ("Lime".to_string(), 1)])
            .unwrap();
        assert_eq!(0, stock_of(&ledger, "Rum"));
        assert_eq!(0, ledger.consumed("Rum").unwrap());

        ledger.commit(reservation).unwrap();
        assert_eq!(0, stock_of(&ledger, "Rum"));
        assert_eq!(2, ledger.consumed("Rum").unwrap());
        assert_eq!(1, ledger.consumed("Lime").unwrap());
    }

    #[test]
    fn should_give_back_a_released_reservation() {
        let ledger = ledger_with_rum_and_lime(2, 1);
        let reservation = ledger.reserve(&[("Rum".to_string(), 1)]).unwrap();
        ledger.release(reservation).unwrap();
        assert_eq!(2, stock_of(&ledger, "Rum"));
        assert_eq!(0, ledger.consumed("Rum").unwrap());
    }

    #[test]
    fn should_add_up_repeated_lines_when_reserving() {
        let ledger = ledger_with_rum_and_lime(3, 1);
        let result = ledger.reserve(&[("Rum".to_string(), 2), ("rum".to_string(), 2)]);
        assert_eq!(true, result.is_err());
        assert_eq!(3, stock_of(&ledger, "Rum"));
    }

    #[test]
    fn should_reserve_nothing_if_one_ingredient_is_missing() {
        let ledger = ledger_with_rum_and_lime(2, 0);
        let result = ledger.reserve(&[("Rum".to_string(), 2), ("Lime".to_string(), 1)]);
        assert_eq!(true, result.is_err());
        assert_eq!(2, stock_of(&ledger, "Rum"));
        assert_eq!(0, stock_of(&ledger, "Lime"));
    }

    #[test]
    fn should_never_reserve_more_than_the_stock_from_many_threads() {
        let ledger = Arc::new(ledger_with_rum_and_lime(10, 10));
        let handles: Vec<_> = (0..20)
            .map(|_| {
                let ledger = ledger.clone();
                thread::spawn(move || {
                    ledger
                        .reserve(&[("Lime".to_string(), 1), ("Rum".to_string(), 1)])
                        .map(|reservation| ledger.commit(reservation))
                        .is_ok()
                })
            })
            .collect();
        let reserved = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(10, reserved);
        assert_eq!(0, stock_of(&ledger, "Rum"));
        assert_eq!(0, stock_of(&ledger, "Lime"));
    }

    #[test]
    fn should_list_ingredients_in_order_and_the_low_ones() {
        let ledger = ledger_with_rum_and_lime(20, 1);
        let names: Vec<String> = ledger.snapshot().unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(vec!["Rum".to_string(), "Lime".to_string()], names);

        let low = ledger.low_stock(3).unwrap();
        assert_eq!(1, low.len());
        assert_eq!("Lime", low[0].name);
    }
}
