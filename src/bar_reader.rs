use log::{debug, info};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use serde::Deserialize;

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use crate::catalog::Catalog;
use crate::cocktail::Cocktail;
use crate::config::SchedulerConfig;
use crate::employee::{Employee, Role};
use crate::errors::BarError;
use crate::ingredient::Ingredient;
use crate::ledger::IngredientLedger;
use crate::roster::Roster;

#[derive(Deserialize, Debug)]
struct JsonCocktail {
    name: String,
    recipe: Vec<(String, u64)>,
    base_price: f64,
}

#[derive(Deserialize, Debug)]
struct JsonEmployee {
    id: String,
    name: String,
    speed: u64,
    #[serde(default)]
    role: Role,
}

/// Pedido tal como viene en el archivo: un cliente y los nombres de los cocktails que eligio
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub client: String,
    pub cocktails: Vec<String>,
}

#[derive(Deserialize)]
struct BarConfiguration {
    #[serde(default)]
    scheduler: SchedulerConfig,
    ingredients: Vec<Ingredient>,
    cocktails: Vec<JsonCocktail>,
    #[serde(default)]
    employees: Vec<JsonEmployee>,
    #[serde(default)]
    orders: Vec<OrderRequest>,
}

/// Todo lo necesario para abrir el bar
pub struct BarSetup {
    pub config: SchedulerConfig,
    pub ledger: IngredientLedger,
    pub catalog: Catalog,
    pub roster: Roster,
    pub orders: Vec<OrderRequest>,
}

pub fn read_bar_from_file<P: AsRef<Path>>(path: P) -> Result<BarSetup, BarError> {
    let file = File::open(path).map_err(|error| BarError::FileReaderError(error.to_string()))?;
    let reader = BufReader::new(file);
    let configuration: BarConfiguration = serde_json::from_reader(reader)
        .map_err(|error| BarError::FileReaderError(error.to_string()))?;
    build_setup(configuration)
}

pub fn read_bar_from_str(json: &str) -> Result<BarSetup, BarError> {
    let configuration: BarConfiguration =
        serde_json::from_str(json).map_err(|error| BarError::FileReaderError(error.to_string()))?;
    build_setup(configuration)
}

fn build_setup(configuration: BarConfiguration) -> Result<BarSetup, BarError> {
    let mut ledger = IngredientLedger::new();
    for ingredient in configuration.ingredients {
        debug!("[READER] Added ingredient {}", ingredient);
        ledger.add_ingredient(ingredient)?;
    }

    let mut catalog = Catalog::new();
    for cocktail in configuration.cocktails {
        check_recipe(&cocktail, &ledger)?;
        debug!("[READER] Added cocktail {}", cocktail.name);
        catalog.add_cocktail(Cocktail::new(&cocktail.name, cocktail.recipe, cocktail.base_price))?;
    }

    let mut roster = Roster::new();
    for employee in configuration.employees {
        roster.add_employee(Employee::new(&employee.id, &employee.name, employee.speed, employee.role))?;
    }

    info!(
        "[READER] Loaded {} ingredients, {} cocktails and {} orders",
        ledger.len(),
        catalog.len(),
        configuration.orders.len()
    );
    Ok(BarSetup {
        config: configuration.scheduler,
        ledger,
        catalog,
        roster,
        orders: configuration.orders,
    })
}

fn check_recipe(cocktail: &JsonCocktail, ledger: &IngredientLedger) -> Result<(), BarError> {
    if cocktail.recipe.is_empty() {
        return Err(BarError::InvalidSetup(format!("{} has an empty recipe", cocktail.name)));
    }
    for (ingredient, quantity) in &cocktail.recipe {
        if ledger.lookup(ingredient).is_none() {
            return Err(BarError::InvalidSetup(format!(
                "{} uses {}, which is not in stock",
                cocktail.name, ingredient
            )));
        }
        if *quantity == 0 {
            return Err(BarError::InvalidSetup(format!(
                "{} uses no {}",
                cocktail.name, ingredient
            )));
        }
    }
    Ok(())
}

/// Genera clientes que eligen al azar entre 1 y `max_cocktails` cocktails del menu
pub fn random_orders(menu: &[Arc<Cocktail>], clients: usize, max_cocktails: usize) -> Vec<OrderRequest> {
    let mut rng = thread_rng();
    if menu.is_empty() {
        return Vec::new();
    }
    (0..clients)
        .map(|client| {
            let count = rng.gen_range(1, max_cocktails.max(1) + 1);
            let cocktails = (0..count)
                .filter_map(|_| menu.choose(&mut rng))
                .map(|cocktail| cocktail.name().to_string())
                .collect();
            OrderRequest {
                client: format!("Client {}", client + 1),
                cocktails,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR_JSON: &str = r#"{
        "scheduler": { "preparation_slots": 2 },
        "ingredients": [
            { "name": "Rum", "volume_per_unit": 50.0, "alcoholic": true, "stock_units": 20 },
            { "name": "Mint", "volume_per_unit": 10.0, "alcoholic": false, "stock_units": 15 }
        ],
        "cocktails": [
            { "name": "Mojito", "recipe": [["Rum", 2], ["Mint", 2]], "base_price": 8.5 }
        ],
        "employees": [
            { "id": "B002", "name": "Marie", "speed": 7 },
            { "id": "W001", "name": "Lucas", "speed": 3, "role": "waiter" }
        ],
        "orders": [ { "client": "John", "cocktails": ["Mojito", "Mojito"] } ]
    }"#;

    #[test]
    fn should_read_a_whole_bar() {
        let setup = read_bar_from_str(BAR_JSON).unwrap();
        assert_eq!(2, setup.config.slots());
        assert_eq!(500, setup.config.base_time_per_unit_ms);
        assert_eq!(2, setup.ledger.len());
        assert_eq!(8.5, setup.catalog.find("mojito").unwrap().base_price());
        let employees = setup.roster.employees();
        assert_eq!(Role::Bartender, employees[0].role);
        assert_eq!(Role::Waiter, employees[1].role);
        assert_eq!(
            vec![OrderRequest {
                client: "John".to_string(),
                cocktails: vec!["Mojito".to_string(), "Mojito".to_string()]
            }],
            setup.orders
        );
    }

    #[test]
    fn should_reject_a_recipe_with_an_unknown_ingredient() {
        let json = r#"{
            "ingredients": [],
            "cocktails": [ { "name": "Mojito", "recipe": [["Rum", 2]], "base_price": 8.5 } ]
        }"#;
        assert_eq!(
            Err(BarError::InvalidSetup("Mojito uses Rum, which is not in stock".to_string())),
            read_bar_from_str(json).map(|_| ())
        );
    }

    #[test]
    fn should_fail_on_a_malformed_file() {
        assert_eq!(true, matches!(read_bar_from_str("{"), Err(BarError::FileReaderError(_))));
        assert_eq!(
            true,
            matches!(read_bar_from_file("missing-bar.json"), Err(BarError::FileReaderError(_)))
        );
    }

    #[test]
    fn should_generate_random_orders_from_the_menu() {
        let setup = read_bar_from_str(BAR_JSON).unwrap();
        let orders = random_orders(&setup.catalog.cocktails(), 5, 3);
        assert_eq!(5, orders.len());
        for order in orders {
            assert_eq!(true, (1..=3).contains(&order.cocktails.len()));
            assert_eq!(true, order.cocktails.iter().all(|name| name == "Mojito"));
        }
    }
}
