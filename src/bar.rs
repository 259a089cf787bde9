//! Bar: junta el stock, el menu, los empleados y el planificador de pedidos.
use std::{
    sync::{mpsc::Receiver, Arc},
    time::Duration,
};

use log::info;

use crate::{
    catalog::Catalog,
    client::Client,
    cocktail::Cocktail,
    config::SchedulerConfig,
    constants::DEFAULT_RESTOCK_UNITS,
    employee::Employee,
    errors::BarError,
    events::{EventBus, OrderEvent},
    ingredient::Ingredient,
    ledger::IngredientLedger,
    order::Order,
    roster::Roster,
    scheduler::PreparationScheduler,
};

/// Cantidad de pedidos en cada etapa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarStats {
    pub in_progress: usize,
    pub waiting: usize,
    pub completed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CocktailDetails {
    pub name: String,
    pub base_price: f64,
    pub recipe: Vec<(String, u64)>,
    pub available: bool,
}

pub struct Bar {
    ledger: Arc<IngredientLedger>,
    catalog: Arc<Catalog>,
    roster: Arc<Roster>,
    events: Arc<EventBus>,
    scheduler: PreparationScheduler,
}

impl Bar {
    pub fn new(ledger: IngredientLedger, catalog: Catalog, roster: Roster, config: SchedulerConfig) -> Bar {
        let ledger = Arc::new(ledger);
        let catalog = Arc::new(catalog);
        let roster = Arc::new(roster);
        let events = Arc::new(EventBus::new());
        let scheduler = PreparationScheduler::new(config, ledger.clone(), roster.clone(), events.clone());
        Bar {
            ledger,
            catalog,
            roster,
            events,
            scheduler,
        }
    }

    /// Arma el pedido con los cocktails del menu. Si alguno no existe no se crea el pedido.
    pub fn place_order<S: AsRef<str>>(&self, client_name: &str, cocktail_names: &[S]) -> Result<Arc<Order>, BarError> {
        if client_name.trim().is_empty() {
            return Err(BarError::EmptyClientName);
        }
        self.place_order_for(Client::new(client_name), cocktail_names)
    }

    pub fn place_order_for<S: AsRef<str>>(&self, client: Client, cocktail_names: &[S]) -> Result<Arc<Order>, BarError> {
        if cocktail_names.is_empty() {
            return Err(BarError::EmptySelection);
        }
        let selected = cocktail_names
            .iter()
            .map(|name| {
                self.catalog
                    .find(name.as_ref())
                    .ok_or_else(|| BarError::CocktailNotFound(name.as_ref().to_string()))
            })
            .collect::<Result<Vec<Arc<Cocktail>>, BarError>>()?;
        let order = Arc::new(Order::new(client, selected));
        info!("[BAR] Placed {}", order);
        Ok(order)
    }

    /// Devuelve la posicion que tomo el pedido en la cola de espera
    pub fn submit_order_for_preparation(&self, order: &Arc<Order>) -> Result<usize, BarError> {
        self.scheduler.submit(order.clone())
    }

    /// Se cobra el pedido completo, se haya podido preparar o no
    pub fn bill_order(&self, order: &Order) -> f64 {
        order.total()
    }

    pub fn restock(&self, ingredient_name: &str, units: u64) -> Result<(), BarError> {
        self.ledger.restock(ingredient_name, units)?;
        info!("[BAR] Restocked {} (+{} units)", ingredient_name, units);
        Ok(())
    }

    pub fn restock_default(&self, ingredient_name: &str) -> Result<(), BarError> {
        self.restock(ingredient_name, DEFAULT_RESTOCK_UNITS)
    }

    pub fn menu(&self) -> Vec<Arc<Cocktail>> {
        self.catalog.cocktails()
    }

    pub fn preparable_cocktails(&self) -> Vec<Arc<Cocktail>> {
        self.catalog.preparable(&self.ledger)
    }

    /// Cocktails del pedido que no alcanzan con el stock actual
    pub fn unavailable_cocktails(&self, order: &Order) -> Vec<String> {
        self.catalog.unavailable_in(order.cocktails(), &self.ledger)
    }

    pub fn cocktail_details(&self, name: &str) -> Result<CocktailDetails, BarError> {
        let cocktail = self
            .catalog
            .find(name)
            .ok_or_else(|| BarError::CocktailNotFound(name.to_string()))?;
        Ok(CocktailDetails {
            name: cocktail.name().to_string(),
            base_price: cocktail.base_price(),
            recipe: cocktail.recipe().to_vec(),
            available: self.catalog.is_preparable(&cocktail, &self.ledger),
        })
    }

    pub fn ingredients(&self) -> Result<Vec<Ingredient>, BarError> {
        self.ledger.snapshot()
    }

    pub fn low_stock(&self, threshold: u64) -> Result<Vec<Ingredient>, BarError> {
        self.ledger.low_stock(threshold)
    }

    pub fn employees(&self) -> Vec<Arc<Employee>> {
        self.roster.employees()
    }

    pub fn waiting_orders(&self) -> Result<Vec<Arc<Order>>, BarError> {
        self.scheduler.waiting_orders()
    }

    pub fn in_progress_orders(&self) -> Result<Vec<Arc<Order>>, BarError> {
        self.scheduler.in_progress_orders()
    }

    pub fn completed_orders(&self) -> Result<Vec<Arc<Order>>, BarError> {
        self.scheduler.completed_orders()
    }

    pub fn failed_orders(&self) -> Result<Vec<Arc<Order>>, BarError> {
        self.scheduler.failed_orders()
    }

    pub fn stats(&self) -> Result<BarStats, BarError> {
        Ok(BarStats {
            in_progress: self.scheduler.in_progress_orders()?.len(),
            waiting: self.scheduler.waiting_orders()?.len(),
            completed: self.scheduler.completed_orders()?.len(),
            failed: self.scheduler.failed_orders()?.len(),
        })
    }

    pub fn subscribe(&self) -> Receiver<OrderEvent> {
        self.events.subscribe()
    }

    pub fn wait_until_idle(&self, timeout: Duration) -> Result<bool, BarError> {
        self.scheduler.wait_until_idle(timeout)
    }

    pub fn shutdown(&self) -> Result<(), BarError> {
        info!("[BAR] Closing the bar");
        self.scheduler.shutdown()
    }
}
