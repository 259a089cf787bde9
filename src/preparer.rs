//! Preparador del bar. Toma los pedidos admitidos y los prepara.
use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Condvar, Mutex,
    },
    thread,
    time::{Duration, Instant},
};

use log::{debug, error, info, warn};

use crate::{
    config::SchedulerConfig,
    employee::Employee,
    errors::BarError,
    events::{EventBus, OrderEvent},
    ledger::IngredientLedger,
    order::{Order, OrderStatus, MAX_PROGRESS_IN_PREPARATION},
    preparation_slots::PreparationSlots,
    roster::Roster,
};

/// Representa uno de los lugares de preparacion del bar.
/// Tiene referencias a los lugares compartidos (junto con su variable condicional),
/// al stock, a los empleados y al bus de eventos.
pub struct Preparer {
    id: usize,
    slots: Arc<Mutex<PreparationSlots>>,
    slots_cond: Arc<Condvar>,
    ledger: Arc<IngredientLedger>,
    roster: Arc<Roster>,
    events: Arc<EventBus>,
    cut_off: Arc<AtomicBool>,
    config: SchedulerConfig,
}

impl Preparer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: usize,
        slots: Arc<Mutex<PreparationSlots>>,
        slots_cond: Arc<Condvar>,
        ledger: Arc<IngredientLedger>,
        roster: Arc<Roster>,
        events: Arc<EventBus>,
        cut_off: Arc<AtomicBool>,
        config: SchedulerConfig,
    ) -> Preparer {
        Preparer {
            id,
            slots,
            slots_cond,
            ledger,
            roster,
            events,
            cut_off,
            config,
        }
    }

    pub fn handle_orders(&self) -> Result<(), BarError> {
        loop {
            let order = {
                let mut slots = self
                    .slots_cond
                    .wait_while(self.slots.lock()?, |slots| {
                        !slots.has_admitted() && !slots.is_closed()
                    })?;

                if !slots.has_admitted() && slots.is_closed() {
                    debug!("[PREPARER {}] No more orders to prepare", self.id);
                    return Ok(());
                }

                slots
                    .take_admitted()
                    .ok_or(BarError::EmptyQueueWhenNotExpected)?
            };

            debug!("[PREPARER {}] Takes order {}", self.id, order.id());
            let status = self.process_order(&order);
            self.release_slot(&order, status)?;
        }
    }

    /// Prepara el pedido. Cualquier error o panico termina en `Failed`, nunca mata al preparador.
    fn process_order(&self, order: &Arc<Order>) -> OrderStatus {
        match run_guarded(|| self.prepare(order)) {
            Ok(()) => OrderStatus::Completed,
            Err(error) => {
                self.fail(order, &error);
                OrderStatus::Failed
            }
        }
    }

    fn prepare(&self, order: &Order) -> Result<(), BarError> {
        let employee = self
            .roster
            .fastest_available()
            .ok_or(BarError::NoAvailableEmployee)?;

        let reservation = self.ledger.reserve(&order.requirements())?;

        match run_guarded(|| self.simulate_preparation(order, employee)) {
            Ok(()) => {
                self.ledger.commit(reservation)?;
                self.complete(order)
            }
            Err(error) => {
                self.ledger.release(reservation)?;
                Err(error)
            }
        }
    }

    fn simulate_preparation(&self, order: &Order, employee: Arc<Employee>) -> Result<(), BarError> {
        let speed = employee.speed;
        let employee_name = employee.name.clone();
        order.start(employee)?;
        self.events.publish(OrderEvent::StatusChanged {
            order_id: order.id(),
            status: OrderStatus::InProgress,
        });

        let estimated = estimated_duration(
            order.preparation_units(),
            speed,
            self.config.base_time_per_unit(),
        );
        info!(
            "[PREPARER {}] {} prepares order {} in {:?}",
            self.id,
            employee_name,
            order.id(),
            estimated
        );

        let started = Instant::now();
        loop {
            if self.cut_off.load(Ordering::SeqCst) {
                return Err(BarError::PreparationCutOff);
            }
            let elapsed = started.elapsed();
            if elapsed >= estimated {
                return Ok(());
            }
            if let Some(progress) = order.advance(progress_for(elapsed, estimated))? {
                self.events.publish(OrderEvent::ProgressChanged {
                    order_id: order.id(),
                    progress,
                });
            }
            thread::sleep(self.config.progress_poll_interval().min(estimated - elapsed));
        }
    }

    fn complete(&self, order: &Order) -> Result<(), BarError> {
        order.complete()?;
        let order_id = order.id();
        self.events.publish(OrderEvent::ProgressChanged { order_id, progress: 100 });
        self.events.publish(OrderEvent::StatusChanged {
            order_id,
            status: OrderStatus::Completed,
        });
        self.events.publish(OrderEvent::Completed { order_id });
        info!("[PREPARER {}] Completed order {}", self.id, order_id);
        Ok(())
    }

    fn fail(&self, order: &Order, error: &BarError) {
        let reason = error.to_string();
        if let Err(transition_error) = order.fail(&reason) {
            error!(
                "[PREPARER {}] Could not mark order {} as failed: {}",
                self.id,
                order.id(),
                transition_error
            );
            return;
        }
        warn!("[PREPARER {}] Failed order {}: {}", self.id, order.id(), reason);
        self.events.publish(OrderEvent::StatusChanged {
            order_id: order.id(),
            status: OrderStatus::Failed,
        });
        self.events.publish(OrderEvent::Failed {
            order_id: order.id(),
            reason,
        });
    }

    fn release_slot(&self, order: &Arc<Order>, status: OrderStatus) -> Result<(), BarError> {
        let mut slots = self.slots.lock()?;
        slots.release(order, status, &self.events);
        let admitted = slots.admit_waiting(&self.events);
        if admitted > 0 {
            debug!("[PREPARER {}] Released a slot, admitted {}", self.id, admitted);
        }
        self.slots_cond.notify_all();
        Ok(())
    }
}

/// Ejecuta `work` convirtiendo un panico en `PreparationPanicked`
fn run_guarded<F>(work: F) -> Result<(), BarError>
where
    F: FnOnce() -> Result<(), BarError>,
{
    panic::catch_unwind(AssertUnwindSafe(work)).unwrap_or(Err(BarError::PreparationPanicked))
}

/// Duracion estimada: unidades * tiempo base / velocidad, redondeada al milisegundo
pub fn estimated_duration(units: u64, speed: u64, base_time_per_unit: Duration) -> Duration {
    let speed = speed.max(1) as u128;
    let total = units as u128 * base_time_per_unit.as_millis();
    let millis = (total + speed / 2) / speed;
    Duration::from_millis(millis as u64)
}

/// Porcentaje del tiempo estimado que ya paso, sin llegar a 100
pub fn progress_for(elapsed: Duration, estimated: Duration) -> u8 {
    let estimated = estimated.as_millis();
    if estimated == 0 {
        return MAX_PROGRESS_IN_PREPARATION;
    }
    let percentage = elapsed.as_millis() * 100 / estimated;
    percentage.min(MAX_PROGRESS_IN_PREPARATION as u128) as u8
}
