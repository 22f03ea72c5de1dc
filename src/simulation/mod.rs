pub mod config;
pub mod population;

pub use config::{Arena, SimConfig, WorldConfig};
pub use population::{Census, CellView, Population};

use crate::error::Result;
use crate::metrics::analyzer::{self, AnalysisReport};
use crate::metrics::logger::MetricsLogger;
use crate::metrics::MetricsCollector;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Drives one population from its initial state until the outbreak burns out
/// or `max_ticks` is reached, keeping a census of every tick.
pub struct Simulation {
    config: SimConfig,
    population: Population,
    pub metrics: MetricsCollector,
    show_progress: bool,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let population = Population::initialize(
            config.world,
            config.cell_count,
            config.speed,
            config.infected_count,
            config.immune_count,
            &mut rng,
        )?;

        let mut metrics = MetricsCollector::new();
        metrics.record(population.time(), population.census());

        Ok(Self {
            config,
            population,
            metrics,
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn is_complete(&self) -> bool {
        self.population.is_complete()
    }

    /// Advances one tick and records it.
    pub fn step(&mut self) {
        self.population.advance();
        let census = self.population.census();
        debug!(
            "tick {}: S={} I={} R={}",
            self.population.time(),
            census.susceptible,
            census.infected,
            census.immune
        );
        self.metrics.record(self.population.time(), census);
    }

    pub fn run(&mut self) -> AnalysisReport {
        info!("Starting simulation: {}", self.config.name);
        info!(
            "Cells: {}, Infected: {}, Immune: {}, Speed: {}",
            self.config.cell_count, self.config.infected_count, self.config.immune_count, self.config.speed
        );
        info!(
            "Contact radius: {}, Recovery period: {} ticks",
            self.config.world.contact_radius, self.config.world.recovery_period
        );

        let pb = if self.show_progress {
            ProgressBar::new(self.config.max_ticks)
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.red/green} {pos}/{len} ticks {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style.progress_chars("█▓░"));

        while !self.population.is_complete() && self.population.time() < self.config.max_ticks {
            self.step();
            pb.inc(1);

            if let Some(latest) = self.metrics.latest() {
                pb.set_message(format!("Infected: {} | Immune: {}", latest.infected, latest.immune));
            }
        }

        if self.population.is_complete() {
            pb.finish_with_message("Outbreak over");
            info!("No infected cells left after {} ticks", self.population.time());
        } else {
            pb.abandon_with_message("Tick limit reached");
            warn!(
                "Stopped at the tick limit ({}) with {} cells still infected",
                self.config.max_ticks,
                self.population.census().infected
            );
        }

        self.report()
    }

    pub fn report(&self) -> AnalysisReport {
        analyzer::analyze(
            self.metrics.get_snapshots(),
            &self.config.name,
            self.config.immune_count,
        )
    }

    /// Writes the per-tick census as CSV and the summary as JSON into `dir`.
    /// Returns the two paths written.
    pub fn save_results(&self, dir: impl AsRef<Path>) -> Result<(PathBuf, PathBuf)> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");

        let csv_path = dir.join(format!("{}_{}.csv", self.config.name, timestamp));
        let mut logger = MetricsLogger::new(&csv_path)?;
        logger.log_batch(self.metrics.get_snapshots())?;
        info!("Results saved to: {}", csv_path.display());

        let report = self.report();
        let json_path = dir.join(format!("{}_{}_analysis.json", self.config.name, timestamp));
        std::fs::write(&json_path, serde_json::to_string_pretty(&report)?)?;
        info!("Analysis saved to: {}", json_path.display());

        Ok((csv_path, json_path))
    }
}
