//! Planificador de pedidos: cola de espera, lugares de preparacion acotados y los preparadores.
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Condvar, Mutex,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, error, info, warn};

use crate::{
    config::SchedulerConfig,
    errors::BarError,
    events::EventBus,
    ledger::IngredientLedger,
    order::Order,
    preparation_slots::PreparationSlots,
    preparer::Preparer,
    roster::Roster,
};

pub struct PreparationScheduler {
    slots: Arc<Mutex<PreparationSlots>>,
    slots_cond: Arc<Condvar>,
    cut_off: Arc<AtomicBool>,
    accepting: AtomicBool,
    events: Arc<EventBus>,
    config: SchedulerConfig,
    preparers: Mutex<Vec<JoinHandle<()>>>,
}

impl PreparationScheduler {
    /// Crea el planificador y lanza un preparador por cada lugar de preparacion
    pub fn new(
        config: SchedulerConfig,
        ledger: Arc<IngredientLedger>,
        roster: Arc<Roster>,
        events: Arc<EventBus>,
    ) -> PreparationScheduler {
        let slots = Arc::new(Mutex::new(PreparationSlots::new(config.slots())));
        let slots_cond = Arc::new(Condvar::new());
        let cut_off = Arc::new(AtomicBool::new(false));

        let preparers: Vec<JoinHandle<()>> = (0..config.slots())
            .map(|id| {
                let preparer = Preparer::new(
                    id,
                    slots.clone(),
                    slots_cond.clone(),
                    ledger.clone(),
                    roster.clone(),
                    events.clone(),
                    cut_off.clone(),
                    config.clone(),
                );
                thread::spawn(move || {
                    if let Err(error) = preparer.handle_orders() {
                        error!("[PREPARER {}] Stopped: {}", id, error);
                    }
                })
            })
            .collect();
        info!("[SCHEDULER] Started {} preparation slots", preparers.len());

        PreparationScheduler {
            slots,
            slots_cond,
            cut_off,
            accepting: AtomicBool::new(true),
            events,
            config,
            preparers: Mutex::new(preparers),
        }
    }

    /// Encola el pedido y trata de admitirlo. Devuelve la posicion que tuvo en la cola.
    pub fn submit(&self, order: Arc<Order>) -> Result<usize, BarError> {
        if !self.accepting.load(Ordering::SeqCst) {
            return Err(BarError::SchedulerShutDown);
        }
        let mut slots = self.slots.lock()?;
        if slots.is_closed() {
            return Err(BarError::SchedulerShutDown);
        }
        order.mark_queued()?;
        let position = slots.enqueue(order.clone(), &self.events);
        debug!("[SCHEDULER] Queued order {} at position {}", order.id(), position);
        if slots.admit_waiting(&self.events) > 0 {
            self.slots_cond.notify_all();
        }
        Ok(position)
    }

    pub fn waiting_orders(&self) -> Result<Vec<Arc<Order>>, BarError> {
        Ok(self.slots.lock()?.waiting())
    }

    pub fn in_progress_orders(&self) -> Result<Vec<Arc<Order>>, BarError> {
        Ok(self.slots.lock()?.in_flight())
    }

    pub fn completed_orders(&self) -> Result<Vec<Arc<Order>>, BarError> {
        Ok(self.slots.lock()?.completed())
    }

    pub fn failed_orders(&self) -> Result<Vec<Arc<Order>>, BarError> {
        Ok(self.slots.lock()?.failed())
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting.load(Ordering::SeqCst)
    }

    /// Espera a que no queden pedidos en preparacion ni esperando.
    /// Devuelve `false` si se cumplio el tiempo antes.
    pub fn wait_until_idle(&self, timeout: Duration) -> Result<bool, BarError> {
        let (_slots, result) = self
            .slots_cond
            .wait_timeout_while(self.slots.lock()?, timeout, |slots| !slots.is_idle())?;
        Ok(!result.timed_out())
    }

    /// Deja de tomar pedidos, espera a los que estan en preparacion el tiempo de gracia
    /// y corta los que no hayan terminado. Los pedidos en espera quedan sin preparar.
    pub fn shutdown(&self) -> Result<(), BarError> {
        self.accepting.store(false, Ordering::SeqCst);
        let grace_period = self.config.shutdown_grace_period();

        let still_in_flight = {
            let mut slots = self.slots.lock()?;
            slots.close();
            let left_waiting = slots.waiting().len();
            if left_waiting > 0 {
                warn!("[SCHEDULER] {} orders left waiting, they will not be prepared", left_waiting);
            }
            self.slots_cond.notify_all();

            let (slots, result) = self
                .slots_cond
                .wait_timeout_while(slots, grace_period, |slots| slots.in_flight_count() > 0)?;
            if result.timed_out() {
                slots.in_flight_count()
            } else {
                0
            }
        };

        if still_in_flight > 0 {
            error!(
                "[SCHEDULER] {} orders still in preparation after {:?}, cutting them off",
                still_in_flight, grace_period
            );
            self.cut_off.store(true, Ordering::SeqCst);
        }

        self.join_preparers()?;
        info!("[SCHEDULER] All preparers finished");

        if still_in_flight > 0 {
            return Err(BarError::ShutdownTimeout(still_in_flight));
        }
        Ok(())
    }

    fn join_preparers(&self) -> Result<(), BarError> {
        let preparers: Vec<JoinHandle<()>> = self.preparers.lock()?.drain(..).collect();
        for preparer in preparers {
            if preparer.join().is_err() {
                error!("[SCHEDULER] A preparer panicked");
            }
        }
        Ok(())
    }
}

impl Drop for PreparationScheduler {
    fn drop(&mut self) {
        if !self.is_accepting() {
            return;
        }
        if let Err(error) = self.shutdown() {
            error!("[SCHEDULER] Error while shutting down: {}", error);
        }
    }
}
