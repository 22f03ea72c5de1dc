use crate::agent::Agent;
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Axis-aligned walls of the arena. Cells bounce off them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Arena {
    /// Arena of the given size with the origin at its centre.
    pub fn centered(width: f64, height: f64) -> Self {
        Self {
            min_x: -width / 2.0,
            max_x: width / 2.0,
            min_y: -height / 2.0,
            max_y: height / 2.0,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Clamps each axis independently and flips the heading on that axis.
    pub fn enforce_bounds(&self, agent: &mut Agent) {
        if agent.position.x > self.max_x {
            agent.position.x = self.max_x;
            agent.velocity.x = -agent.velocity.x;
        }
        if agent.position.y > self.max_y {
            agent.position.y = self.max_y;
            agent.velocity.y = -agent.velocity.y;
        }
        if agent.position.x < self.min_x {
            agent.position.x = self.min_x;
            agent.velocity.x = -agent.velocity.x;
        }
        if agent.position.y < self.min_y {
            agent.position.y = self.min_y;
            agent.velocity.y = -agent.velocity.y;
        }
    }

    fn validate(&self) -> Result<()> {
        let finite = [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(SimError::invalid("arena bounds must be finite"));
        }
        if self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(SimError::invalid(format!(
                "arena bounds are empty: x {}..{}, y {}..{}",
                self.min_x, self.max_x, self.min_y, self.max_y
            )));
        }
        Ok(())
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::centered(400.0, 400.0)
    }
}

/// Fixed physical and disease parameters shared by every cell of one population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub arena: Arena,
    pub contact_radius: f64,
    pub recovery_period: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            contact_radius: 15.0,
            recovery_period: 90,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        self.arena.validate()?;
        if !(self.contact_radius.is_finite() && self.contact_radius > 0.0) {
            return Err(SimError::invalid(format!(
                "contact radius must be positive, got {}",
                self.contact_radius
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub name: String,
    pub cell_count: usize,
    pub speed: f64,
    pub infected_count: usize,
    pub immune_count: usize,
    pub world: WorldConfig,
    pub max_ticks: u64,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            name: "default_sim".to_string(),
            cell_count: 20,
            speed: 5.0,
            infected_count: 1,
            immune_count: 0,
            world: WorldConfig::default(),
            max_ticks: 10_000,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SimConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_cells(mut self, cell_count: usize, infected_count: usize, immune_count: usize) -> Self {
        self.cell_count = cell_count;
        self.infected_count = infected_count;
        self.immune_count = immune_count;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_contact_radius(mut self, radius: f64) -> Self {
        self.world.contact_radius = radius;
        self
    }

    pub fn with_recovery_period(mut self, ticks: u32) -> Self {
        self.world.recovery_period = ticks;
        self
    }

    pub fn with_arena(mut self, arena: Arena) -> Self {
        self.world.arena = arena;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_counts(self.cell_count, self.infected_count, self.immune_count)?;
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(SimError::invalid(format!(
                "speed must be finite and non-negative, got {}",
                self.speed
            )));
        }
        self.world.validate()
    }
}

/// Some cells must start infected and some must not, otherwise there is no outbreak to watch.
pub(crate) fn validate_counts(size: usize, infected: usize, immune: usize) -> Result<()> {
    if infected == 0 || infected >= size {
        return Err(SimError::invalid(format!(
            "infected count must be in 1..{}, got {}",
            size, infected
        )));
    }
    if immune >= size {
        return Err(SimError::invalid(format!(
            "immune count must be below the cell count {}, got {}",
            size, immune
        )));
    }
    if infected + immune > size {
        return Err(SimError::invalid(format!(
            "{} infected and {} immune cells do not fit in a population of {}",
            infected, immune, size
        )));
    }
    Ok(())
}
