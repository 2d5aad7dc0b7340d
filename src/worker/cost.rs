//! Simulated computation cost.
//!
//! Workers sleep before computing each task to model operations of uneven
//! expense. The delay comes from a [`CostModel`] so tests can run with
//! [`ZeroCost`] while the binary uses the configured [`SimulatedCost`].

use std::time::Duration;

use rand::Rng;

use crate::config::CalcConfig;
use crate::dispatch::Operation;

pub trait CostModel: Send + Sync + 'static {
    /// How long a worker should spend on `operation` before reporting.
    fn delay(&self, operation: &Operation) -> Duration;
}

/// Per-operation base delay plus uniform random jitter in `[0, jitter)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedCost {
    pub addition: Duration,
    pub subtraction: Duration,
    pub multiplication: Duration,
    pub division: Duration,
    pub jitter: Duration,
}

impl SimulatedCost {
    pub fn from_config(config: &CalcConfig) -> Self {
        Self {
            addition: Duration::from_millis(config.time_addition_ms),
            subtraction: Duration::from_millis(config.time_subtraction_ms),
            multiplication: Duration::from_millis(config.time_multiplications_ms),
            division: Duration::from_millis(config.time_divisions_ms),
            jitter: Duration::from_millis(config.jitter_ms),
        }
    }

    /// Delay before jitter. Unknown operations cost nothing.
    pub fn base_delay(&self, operation: &Operation) -> Duration {
        match operation {
            Operation::Add => self.addition,
            Operation::Subtract => self.subtraction,
            Operation::Multiply => self.multiplication,
            Operation::Divide => self.division,
            Operation::Other(_) => Duration::ZERO,
        }
    }
}

impl Default for SimulatedCost {
    fn default() -> Self {
        Self::from_config(&CalcConfig::default())
    }
}

impl CostModel for SimulatedCost {
    fn delay(&self, operation: &Operation) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::rng().random_range(0..jitter_ms))
        };
        self.base_delay(operation) + jitter
    }
}

/// No simulated cost at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroCost;

impl CostModel for ZeroCost {
    fn delay(&self, _operation: &Operation) -> Duration {
        Duration::ZERO
    }
}
