//! Pedido de un cliente y su estado de preparacion.
use std::{fmt, sync::{Arc, Mutex}};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{client::Client, cocktail::Cocktail, employee::Employee, errors::BarError};

/// Mientras no termine, el progreso no pasa de este valor
pub const MAX_PROGRESS_IN_PREPARATION: u8 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
}

impl OrderStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Queued => "Queued",
            OrderStatus::InProgress => "In progress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Failed)
    }
}

/// Foto del estado de un pedido en un momento dado
#[derive(Debug, Clone)]
pub struct OrderState {
    pub status: OrderStatus,
    pub progress: u8,
    pub assigned_employee: Option<Arc<Employee>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub failure_reason: Option<String>,
    submitted: bool,
}

impl OrderState {
    fn new() -> OrderState {
        OrderState {
            status: OrderStatus::Queued,
            progress: 0,
            assigned_employee: None,
            started_at: None,
            completed_at: None,
            failure_reason: None,
            submitted: false,
        }
    }
}

/// Pedido de un cliente. Los cocktails elegidos no cambian; el estado
/// se protege con un lock porque lo modifica el hilo que lo prepara y lo leen los demas.
#[derive(Debug)]
pub struct Order {
    id: Uuid,
    client: Client,
    cocktails: Vec<Arc<Cocktail>>,
    state: Mutex<OrderState>,
}

impl Order {
    pub fn new(client: Client, cocktails: Vec<Arc<Cocktail>>) -> Order {
        Order {
            id: Uuid::new_v4(),
            client,
            cocktails,
            state: Mutex::new(OrderState::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn cocktails(&self) -> &[Arc<Cocktail>] {
        &self.cocktails
    }

    /// Suma de los precios base, sin importar si el pedido se pudo preparar
    pub fn total(&self) -> f64 {
        self.cocktails.iter().map(|cocktail| cocktail.base_price()).sum()
    }

    pub fn preparation_units(&self) -> u64 {
        self.cocktails.iter().map(|cocktail| cocktail.preparation_units()).sum()
    }

    /// Todas las lineas de receta del pedido, repetidas si se repite el cocktail
    pub fn requirements(&self) -> Vec<(String, u64)> {
        self.cocktails
            .iter()
            .flat_map(|cocktail| cocktail.recipe().iter().cloned())
            .collect()
    }

    pub fn state(&self) -> Result<OrderState, BarError> {
        Ok(self.state.lock()?.clone())
    }

    pub fn status(&self) -> Result<OrderStatus, BarError> {
        Ok(self.state.lock()?.status)
    }

    pub fn progress(&self) -> Result<u8, BarError> {
        Ok(self.state.lock()?.progress)
    }

    /// Marca el pedido como encolado. Un pedido se encola una sola vez.
    pub(crate) fn mark_queued(&self) -> Result<(), BarError> {
        let mut state = self.state.lock()?;
        if state.submitted || state.status != OrderStatus::Queued {
            return Err(BarError::InvalidTransition {
                from: state.status,
                to: OrderStatus::Queued,
            });
        }
        state.submitted = true;
        Ok(())
    }

    pub(crate) fn start(&self, employee: Arc<Employee>) -> Result<(), BarError> {
        let mut state = self.state.lock()?;
        Self::check_transition(&state, OrderStatus::InProgress)?;
        state.status = OrderStatus::InProgress;
        state.progress = 0;
        state.started_at = Some(Utc::now());
        state.assigned_employee = Some(employee);
        Ok(())
    }

    /// Avanza el progreso. Nunca retrocede ni pasa de `MAX_PROGRESS_IN_PREPARATION`.
    /// Devuelve el nuevo valor si cambio.
    pub(crate) fn advance(&self, progress: u8) -> Result<Option<u8>, BarError> {
        let mut state = self.state.lock()?;
        if state.status != OrderStatus::InProgress {
            return Ok(None);
        }
        let progress = progress.min(MAX_PROGRESS_IN_PREPARATION);
        if progress <= state.progress {
            return Ok(None);
        }
        state.progress = progress;
        Ok(Some(progress))
    }

    pub(crate) fn complete(&self) -> Result<(), BarError> {
        let mut state = self.state.lock()?;
        Self::check_transition(&state, OrderStatus::Completed)?;
        state.status = OrderStatus::Completed;
        state.progress = 100;
        state.completed_at = Some(Utc::now());
        Ok(())
    }

    pub(crate) fn fail(&self, reason: &str) -> Result<(), BarError> {
        let mut state = self.state.lock()?;
        Self::check_transition(&state, OrderStatus::Failed)?;
        state.status = OrderStatus::Failed;
        state.failure_reason = Some(reason.to_string());
        Ok(())
    }

    fn check_transition(state: &OrderState, to: OrderStatus) -> Result<(), BarError> {
        let allowed = match (state.status, to) {
            (OrderStatus::Queued, OrderStatus::InProgress) => true,
            (OrderStatus::Queued, OrderStatus::Failed) => true,
            (OrderStatus::InProgress, OrderStatus::Completed) => true,
            (OrderStatus::InProgress, OrderStatus::Failed) => true,
            _ => false,
        };
        if !allowed {
            return Err(BarError::InvalidTransition {
                from: state.status,
                to,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.cocktails.iter().map(|cocktail| cocktail.name()).collect();
        write!(f, "Order for {}: [{}]", self.client.name, names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        let mojito = Arc::new(Cocktail::new(
            "Mojito",
            vec![("Rum".to_string(), 2), ("Mint".to_string(), 2), ("Soda".to_string(), 1)],
            8.5,
        ));
        let vodka_orange = Arc::new(Cocktail::new(
            "Vodka Orange",
            vec![("Vodka".to_string(), 2), ("Orange".to_string(), 2)],
            6.5,
        ));
        Order::new(Client::new("John Doe"), vec![mojito.clone(), vodka_orange, mojito])
    }

    fn employee() -> Arc<Employee> {
        Arc::new(Employee::bartender("B002", "Marie", 7))
    }

    #[test]
    fn should_start_queued_without_progress() {
        let order = order();
        let state = order.state().unwrap();
        assert_eq!(OrderStatus::Queued, state.status);
        assert_eq!(0, state.progress);
        assert_eq!(true, state.assigned_employee.is_none());
    }

    #[test]
    fn should_sum_prices_and_units_of_repeated_cocktails() {
        let order = order();
        assert_eq!(23.5, order.total());
        assert_eq!(14, order.preparation_units());
        assert_eq!(8, order.requirements().len());
    }

    #[test]
    fn should_be_queued_only_once() {
        let order = order();
        order.mark_queued().unwrap();
        assert_eq!(
            Err(BarError::InvalidTransition {
                from: OrderStatus::Queued,
                to: OrderStatus::Queued
            }),
            order.mark_queued()
        );
    }

    #[test]
    fn should_go_forward_until_completed() {
        let order = order();
        order.start(employee()).unwrap();
        assert_eq!(Some(40), order.advance(40).unwrap());
        order.complete().unwrap();

        let state = order.state().unwrap();
        assert_eq!(OrderStatus::Completed, state.status);
        assert_eq!(100, state.progress);
        assert_eq!(true, state.started_at.is_some());
        assert_eq!(true, state.completed_at.is_some());
        assert_eq!("B002", state.assigned_employee.unwrap().id);
    }

    #[test]
    fn should_not_go_back_from_a_terminal_status() {
        let order = order();
        order.start(employee()).unwrap();
        order.fail("out of rum").unwrap();
        assert_eq!(true, order.start(employee()).is_err());
        assert_eq!(true, order.complete().is_err());
        assert_eq!(OrderStatus::Failed, order.status().unwrap());
        assert_eq!(Some("out of rum".to_string()), order.state().unwrap().failure_reason);
    }

    #[test]
    fn should_fail_before_starting() {
        let order = order();
        order.fail("nobody to prepare it").unwrap();
        assert_eq!(OrderStatus::Failed, order.status().unwrap());
    }

    #[test]
    fn should_never_lower_the_progress_nor_reach_one_hundred() {
        let order = order();
        order.start(employee()).unwrap();
        assert_eq!(Some(60), order.advance(60).unwrap());
        assert_eq!(None, order.advance(30).unwrap());
        assert_eq!(Some(99), order.advance(100).unwrap());
        assert_eq!(99, order.progress().unwrap());
    }

    #[test]
    fn should_freeze_the_progress_once_failed() {
        let order = order();
        order.start(employee()).unwrap();
        order.advance(20).unwrap();
        order.fail("cut off").unwrap();
        assert_eq!(None, order.advance(50).unwrap());
        assert_eq!(20, order.progress().unwrap());
    }

    #[test]
    fn should_show_client_and_cocktails() {
        assert_eq!(
            "Order for John Doe: [Mojito, Vodka Orange, Mojito]",
            order().to_string()
        );
    }
}
