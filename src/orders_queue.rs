//! Representacion de la cola de pedidos
use std::{collections::VecDeque, sync::Arc};

use crate::order::Order;

/// Cola de pedidos en espera. Se le agrega el campo `finished` para indicar que no se van a admitir más pedidos de la cola.
pub struct OrdersQueue {
    orders: VecDeque<Arc<Order>>,
    pub finished: bool,
}

impl OrdersQueue {
    pub fn new() -> OrdersQueue {
        OrdersQueue {
            orders: VecDeque::new(),
            finished: false,
        }
    }

    pub fn push(&mut self, order: Arc<Order>) {
        self.orders.push_back(order);
    }

    pub fn pop(&mut self) -> Option<Arc<Order>> {
        self.orders.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn orders(&self) -> Vec<Arc<Order>> {
        self.orders.iter().cloned().collect()
    }
}

impl Default for OrdersQueue {
    fn default() -> Self {
        OrdersQueue::new()
    }
}
