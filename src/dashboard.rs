use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use log::{error, info, warn};

use crate::{
    bar::Bar,
    constants::{DASHBOARD_RECENT_COMPLETED, DASHBOARD_WAIT_IN_MS, LOW_STOCK_THRESHOLD},
    errors::BarError,
};

/// Imprime periodicamente el estado de los pedidos y del stock del bar
pub struct Dashboard {
    bar: Arc<Bar>,
    finish: Arc<Mutex<bool>>,
}

impl Dashboard {
    pub fn new(bar: Arc<Bar>) -> Dashboard {
        Dashboard {
            bar,
            finish: Arc::new(Mutex::new(false)),
        }
    }

    pub fn finish(&self) {
        if let Ok(mut finish) = self.finish.lock() {
            *finish = true;
            return;
        }
        error!("Error setting dashboard thread to finish");
    }

    pub fn process_dashboard(&self) -> Result<(), BarError> {
        loop {
            if *self.finish.lock()? {
                self.print_dashboard()?;
                return Ok(());
            }

            self.print_dashboard()?;

            thread::sleep(Duration::from_millis(DASHBOARD_WAIT_IN_MS));
        }
    }

    fn print_dashboard(&self) -> Result<(), BarError> {
        info!("{}", self.orders_line()?);
        info!("{}", self.stock_line()?);
        for ingredient in self.bar.low_stock(LOW_STOCK_THRESHOLD)? {
            warn!("[DASHBOARD] Running out of {}", ingredient);
        }
        Ok(())
    }

    pub fn orders_line(&self) -> Result<String, BarError> {
        let stats = self.bar.stats()?;
        let mut line = format!(
            "[DASHBOARD] In progress={} | Waiting={} | Completed={} | Failed={} |",
            stats.in_progress, stats.waiting, stats.completed, stats.failed
        );
        for order in self.bar.in_progress_orders()? {
            line.push_str(&format!(" {}={}% ", order.client().name, order.progress()?));
        }
        let completed = self.bar.completed_orders()?;
        let recent = completed
            .iter()
            .skip(completed.len().saturating_sub(DASHBOARD_RECENT_COMPLETED));
        for order in recent {
            line.push_str(&format!(" done:{} ", order.client().name));
        }
        Ok(line)
    }

    pub fn stock_line(&self) -> Result<String, BarError> {
        let mut line = String::from("[DASHBOARD] Ingredient=remaining |");
        for ingredient in self.bar.ingredients()? {
            line.push_str(&format!(" {}={} ", ingredient.name, ingredient.stock_units));
        }
        Ok(line)
    }
}
