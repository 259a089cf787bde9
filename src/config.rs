use std::time::Duration;

use serde::Deserialize;

use crate::constants::{
    BASE_TIME_PER_UNIT_MS, N_PREPARATION_SLOTS, PROGRESS_POLL_INTERVAL_MS,
    SHUTDOWN_GRACE_PERIOD_MS,
};

/// Parametros del planificador de pedidos. Los que no se indiquen toman el valor de `constants`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub preparation_slots: usize,
    pub base_time_per_unit_ms: u64,
    pub progress_poll_interval_ms: u64,
    pub shutdown_grace_period_ms: u64,
}

impl SchedulerConfig {
    pub fn base_time_per_unit(&self) -> Duration {
        Duration::from_millis(self.base_time_per_unit_ms)
    }

    pub fn progress_poll_interval(&self) -> Duration {
        Duration::from_millis(self.progress_poll_interval_ms.max(1))
    }

    pub fn shutdown_grace_period(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_period_ms)
    }

    /// Siempre hay al menos un lugar de preparacion
    pub fn slots(&self) -> usize {
        self.preparation_slots.max(1)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            preparation_slots: N_PREPARATION_SLOTS,
            base_time_per_unit_ms: BASE_TIME_PER_UNIT_MS,
            progress_poll_interval_ms: PROGRESS_POLL_INTERVAL_MS,
            shutdown_grace_period_ms: SHUTDOWN_GRACE_PERIOD_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_the_constants_by_default() {
        let config = SchedulerConfig::default();
        assert_eq!(3, config.slots());
        assert_eq!(Duration::from_millis(500), config.base_time_per_unit());
        assert_eq!(Duration::from_millis(200), config.progress_poll_interval());
    }

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let config: SchedulerConfig = serde_json::from_str(r#"{ "preparation_slots": 5 }"#).unwrap();
        assert_eq!(5, config.slots());
        assert_eq!(BASE_TIME_PER_UNIT_MS, config.base_time_per_unit_ms);
        assert_eq!(SHUTDOWN_GRACE_PERIOD_MS, config.shutdown_grace_period_ms);
    }

    #[test]
    fn should_keep_at_least_one_slot() {
        let config = SchedulerConfig {
            preparation_slots: 0,
            ..SchedulerConfig::default()
        };
        assert_eq!(1, config.slots());
    }
}
