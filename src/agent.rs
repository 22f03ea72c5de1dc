use crate::geometry::Vector2;
use serde::{Deserialize, Serialize};

/// Disease state of a single cell. Only moves forward: Susceptible -> Infected -> Immune.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Health {
    #[default]
    Susceptible,
    Infected { since_infected: u32 },
    Immune,
}

/// What a presentation layer needs to know to colour a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayCategory {
    Infected,
    Immune,
    Susceptible,
}

impl DisplayCategory {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Infected => "red",
            Self::Immune => "green",
            Self::Susceptible => "gray",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub position: Vector2,
    pub velocity: Vector2,
    health: Health,
}

impl Agent {
    pub fn new(position: Vector2, velocity: Vector2) -> Self {
        Self {
            position,
            velocity,
            health: Health::default(),
        }
    }

    pub fn health(&self) -> Health {
        self.health
    }

    /// Moves one step along the current heading and ages an ongoing infection.
    /// Recovery happens once the infection has lasted longer than `recovery_period` ticks.
    pub fn advance(&mut self, recovery_period: u32) {
        self.position = self.position.add(self.velocity);

        if let Health::Infected { since_infected } = self.health {
            let since_infected = since_infected.saturating_add(1);
            if since_infected > recovery_period {
                self.immunize();
            } else {
                self.health = Health::Infected { since_infected };
            }
        }
    }

    pub fn display_category(&self) -> DisplayCategory {
        match self.health {
            Health::Infected { .. } => DisplayCategory::Infected,
            Health::Immune => DisplayCategory::Immune,
            Health::Susceptible => DisplayCategory::Susceptible,
        }
    }

    /// Unconditional; callers gate on `is_susceptible`.
    pub fn infect(&mut self) {
        self.health = Health::Infected { since_infected: 0 };
    }

    pub fn immunize(&mut self) {
        self.health = Health::Immune;
    }

    pub fn is_susceptible(&self) -> bool {
        self.health == Health::Susceptible
    }

    pub fn is_infected(&self) -> bool {
        matches!(self.health, Health::Infected { .. })
    }

    pub fn is_immune(&self) -> bool {
        self.health == Health::Immune
    }

    pub fn since_infected(&self) -> Option<u32> {
        match self.health {
            Health::Infected { since_infected } => Some(since_infected),
            _ => None,
        }
    }

    /// Transmits in whichever direction applies. Both checks read the state from
    /// before the call, so an infection made here can't spread back within it.
    /// Returns true if either agent was newly infected.
    pub fn resolve_contact_with(&mut self, other: &mut Agent) -> bool {
        let self_infects_other = self.is_infected() && other.is_susceptible();
        let other_infects_self = self.is_susceptible() && other.is_infected();

        if self_infects_other {
            other.infect();
        }
        if other_infects_self {
            self.infect();
        }

        self_infects_other || other_infects_self
    }
}
