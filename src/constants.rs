//! Parametros de configuracion del bar

/// Cantidad de pedidos que se pueden preparar en simultaneo
pub const N_PREPARATION_SLOTS: usize = 3;

/// Tiempo base (en ms) que lleva preparar una unidad de receta con un empleado de velocidad 1
pub const BASE_TIME_PER_UNIT_MS: u64 = 500;

/// Cada cuanto (en ms) se actualiza el progreso de un pedido en preparacion
pub const PROGRESS_POLL_INTERVAL_MS: u64 = 200;

/// Tiempo maximo (en ms) que se espera a los pedidos en curso al cerrar el bar
pub const SHUTDOWN_GRACE_PERIOD_MS: u64 = 5000;

/// Unidades que se agregan al reponer un ingrediente sin indicar cantidad
pub const DEFAULT_RESTOCK_UNITS: u64 = 10;

/// Indica cuanto tiempo se debe de esperar (por lo menos) para imprimir por pantalla el tablero del bar
pub const DASHBOARD_WAIT_IN_MS: u64 = 1000;

/// Cantidad de pedidos terminados que muestra el tablero
pub const DASHBOARD_RECENT_COMPLETED: usize = 5;

/// Cantidad de unidades a partir de la cual se alerta que se acaba un ingrediente
pub const LOW_STOCK_THRESHOLD: u64 = 3;

/// Cantidad de clientes aleatorios que se generan si el archivo del bar no trae pedidos
pub const RANDOM_CLIENTS: usize = 8;

/// Cantidad maxima de cocktails que pide un cliente aleatorio
pub const MAX_COCKTAILS_PER_RANDOM_CLIENT: usize = 3;
