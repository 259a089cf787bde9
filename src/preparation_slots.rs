//! Lugares de preparacion del bar y admision de pedidos desde la cola de espera.
use std::{collections::VecDeque, sync::Arc};

use log::debug;

use crate::{
    events::{EventBus, OrderEvent},
    order::{Order, OrderStatus},
    orders_queue::OrdersQueue,
};

/// Estado compartido del planificador. Siempre se accede con el lock tomado:
/// encolar y admitir nunca ocurren a la vez.
pub struct PreparationSlots {
    capacity: usize,
    waiting: OrdersQueue,
    in_flight: Vec<Arc<Order>>,
    /// Admitidos que todavia no tomo ningun preparador
    admitted: VecDeque<Arc<Order>>,
    completed: Vec<Arc<Order>>,
    failed: Vec<Arc<Order>>,
}

impl PreparationSlots {
    pub fn new(capacity: usize) -> PreparationSlots {
        PreparationSlots {
            capacity: capacity.max(1),
            waiting: OrdersQueue::new(),
            in_flight: Vec::with_capacity(capacity),
            admitted: VecDeque::new(),
            completed: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Agrega el pedido al final de la cola y devuelve su posicion (empezando en 1)
    pub fn enqueue(&mut self, order: Arc<Order>, events: &EventBus) -> usize {
        let order_id = order.id();
        self.waiting.push(order);
        let position = self.waiting.len();
        events.publish(OrderEvent::Queued { order_id, position });
        position
    }

    /// Mientras haya lugar y pedidos esperando, admite el primero de la cola.
    /// Devuelve cuantos pedidos se admitieron.
    pub fn admit_waiting(&mut self, events: &EventBus) -> usize {
        let mut admitted = 0;
        while !self.waiting.finished && self.in_flight.len() < self.capacity {
            let order = match self.waiting.pop() {
                Some(order) => order,
                None => break,
            };
            debug!("[SCHEDULER] Admitted order {}", order.id());
            events.publish(OrderEvent::Admitted { order_id: order.id() });
            self.in_flight.push(order.clone());
            self.admitted.push_back(order);
            admitted += 1;
        }
        admitted
    }

    pub fn take_admitted(&mut self) -> Option<Arc<Order>> {
        self.admitted.pop_front()
    }

    pub fn has_admitted(&self) -> bool {
        !self.admitted.is_empty()
    }

    /// Libera el lugar del pedido y lo archiva segun como termino
    pub fn release(&mut self, order: &Arc<Order>, status: OrderStatus, events: &EventBus) {
        let before = self.in_flight.len();
        self.in_flight.retain(|in_flight| in_flight.id() != order.id());
        if before == self.in_flight.len() {
            return;
        }
        match status {
            OrderStatus::Completed => self.completed.push(order.clone()),
            _ => self.failed.push(order.clone()),
        }
        events.publish(OrderEvent::Removed { order_id: order.id() });
    }

    /// No se admiten mas pedidos de la cola
    pub fn close(&mut self) {
        self.waiting.finished = true;
    }

    pub fn is_closed(&self) -> bool {
        self.waiting.finished
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty() && (self.waiting.is_empty() || self.waiting.finished)
    }

    pub fn waiting(&self) -> Vec<Arc<Order>> {
        self.waiting.orders()
    }

    pub fn in_flight(&self) -> Vec<Arc<Order>> {
        self.in_flight.clone()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn completed(&self) -> Vec<Arc<Order>> {
        self.completed.clone()
    }

    pub fn failed(&self) -> Vec<Arc<Order>> {
        self.failed.clone()
    }
}
