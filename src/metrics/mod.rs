pub mod logger;
pub mod analyzer;

use crate::simulation::Census;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusSnapshot {
    pub tick: u64,
    pub susceptible: usize,
    pub infected: usize,
    pub immune: usize,
}

impl CensusSnapshot {
    pub fn new(tick: u64, census: Census) -> Self {
        Self {
            tick,
            susceptible: census.susceptible,
            infected: census.infected,
            immune: census.immune,
        }
    }

    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.immune
    }
}

/// Per-tick history of a single run.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    snapshots: Vec<CensusSnapshot>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: u64, census: Census) {
        self.snapshots.push(CensusSnapshot::new(tick, census));
    }

    pub fn latest(&self) -> Option<&CensusSnapshot> {
        self.snapshots.last()
    }

    pub fn get_snapshots(&self) -> &[CensusSnapshot] {
        &self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn census(susceptible: usize, infected: usize, immune: usize) -> Census {
        Census {
            susceptible,
            infected,
            immune,
        }
    }

    #[test]
    fn records_in_order() {
        let mut metrics = MetricsCollector::new();
        metrics.record(0, census(9, 1, 0));
        metrics.record(1, census(7, 3, 0));

        assert_eq!(metrics.get_snapshots().len(), 2);
        assert_eq!(metrics.latest().unwrap().tick, 1);
        assert_eq!(metrics.latest().unwrap().total(), 10);
    }
}
