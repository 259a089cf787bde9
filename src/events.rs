//! Avisos de cambios en los pedidos para quien quiera mostrarlos.
use std::sync::{mpsc, Mutex};

use log::error;
use uuid::Uuid;

use crate::order::OrderStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum OrderEvent {
    /// El pedido entro a la cola de espera
    Queued { order_id: Uuid, position: usize },
    /// El pedido tomo un lugar de preparacion
    Admitted { order_id: Uuid },
    StatusChanged { order_id: Uuid, status: OrderStatus },
    ProgressChanged { order_id: Uuid, progress: u8 },
    Completed { order_id: Uuid },
    Failed { order_id: Uuid, reason: String },
    /// El pedido libero su lugar de preparacion
    Removed { order_id: Uuid },
}

/// Reparte cada evento a todos los suscriptores. Los que dejaron de escuchar se descartan al publicar.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<mpsc::Sender<OrderEvent>>>,
}

impl EventBus {
    pub fn new() -> EventBus {
        EventBus::default()
    }

    pub fn publish(&self, event: OrderEvent) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|sender| sender.send(event.clone()).is_ok());
            return;
        }
        error!("[EVENTS] Error while taking the subscribers lock");
    }

    pub fn subscribe(&self) -> mpsc::Receiver<OrderEvent> {
        let (sender, receiver) = mpsc::channel();
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(sender),
            Err(_) => error!("[EVENTS] Error while taking the subscribers lock"),
        }
        receiver
    }

    pub fn subscribers(&self) -> usize {
        self.subscribers.lock().map(|subscribers| subscribers.len()).unwrap_or(0)
    }
}
