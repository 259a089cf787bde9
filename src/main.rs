use std::{env, process, sync::Arc, thread, time::Duration};

use bar_cocktail::{
    bar::Bar,
    bar_reader::{random_orders, read_bar_from_file},
    constants::{MAX_COCKTAILS_PER_RANDOM_CLIENT, RANDOM_CLIENTS},
    dashboard::Dashboard,
};
use log::{error, info, warn, LevelFilter};
use simple_logger::SimpleLogger;

const DEFAULT_BAR_FILE: &str = "bar.json";
const IDLE_TIMEOUT: Duration = Duration::from_secs(120);

fn main() {
    if let Err(error) = SimpleLogger::new().with_level(LevelFilter::Info).env().init() {
        eprintln!("Could not start the logger: {}", error);
    }

    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_BAR_FILE.to_string());
    let setup = match read_bar_from_file(&path) {
        Ok(setup) => setup,
        Err(error) => {
            error!("[MAIN] Could not open the bar from {}: {}", path, error);
            process::exit(1);
        }
    };

    let mut requests = setup.orders;
    let bar = Arc::new(Bar::new(setup.ledger, setup.catalog, setup.roster, setup.config));
    if requests.is_empty() {
        requests = random_orders(&bar.menu(), RANDOM_CLIENTS, MAX_COCKTAILS_PER_RANDOM_CLIENT);
    }

    let dashboard = Arc::new(Dashboard::new(bar.clone()));
    let dashboard_clone = dashboard.clone();
    let dashboard_thread = thread::spawn(move || {
        if let Err(error) = dashboard_clone.process_dashboard() {
            error!("[DASHBOARD] Stopped: {}", error);
        }
    });

    for request in requests {
        let order = match bar.place_order(&request.client, &request.cocktails) {
            Ok(order) => order,
            Err(error) => {
                warn!("[MAIN] Order of {} rejected: {}", request.client, error);
                continue;
            }
        };
        let unavailable = bar.unavailable_cocktails(&order);
        if !unavailable.is_empty() {
            warn!("[MAIN] Not enough stock right now for {:?}", unavailable);
        }
        match bar.submit_order_for_preparation(&order) {
            Ok(position) => info!(
                "[MAIN] {} pays ${:.2}, position {} in the queue",
                order.client().name,
                bar.bill_order(&order),
                position
            ),
            Err(error) => warn!("[MAIN] Could not submit order {}: {}", order.id(), error),
        }
    }

    match bar.wait_until_idle(IDLE_TIMEOUT) {
        Ok(true) => info!("[MAIN] Every order was handled"),
        Ok(false) => warn!("[MAIN] Orders still pending after {:?}", IDLE_TIMEOUT),
        Err(error) => error!("[MAIN] Error while waiting for the orders: {}", error),
    }
    if let Err(error) = bar.shutdown() {
        error!("[MAIN] {}", error);
    }

    dashboard.finish();
    if dashboard_thread.join().is_err() {
        error!("[MAIN] Error en join del dashboard");
    }
}
