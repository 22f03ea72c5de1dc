use super::config::{validate_counts, WorldConfig};
use crate::agent::{Agent, DisplayCategory};
use crate::error::{Result, SimError};
use crate::geometry::Vector2;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::trace;

/// Read-only view of one cell, all a renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub x: f64,
    pub y: f64,
    pub category: DisplayCategory,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub susceptible: usize,
    pub infected: usize,
    pub immune: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.immune
    }
}

/// The fixed set of cells sharing one arena, and the clock that drives them.
#[derive(Debug, Clone)]
pub struct Population {
    world: WorldConfig,
    agents: Vec<Agent>,
    time: u64,
}

impl Population {
    /// Scatters `size` cells uniformly over the arena, each heading in a uniformly random
    /// direction at `speed`. The first `infected_count` cells start infected and the next
    /// `immune_count` start immune.
    pub fn initialize<R: Rng + ?Sized>(
        world: WorldConfig,
        size: usize,
        speed: f64,
        infected_count: usize,
        immune_count: usize,
        rng: &mut R,
    ) -> Result<Self> {
        validate_counts(size, infected_count, immune_count)?;
        world.validate()?;
        if !(speed.is_finite() && speed >= 0.0) {
            return Err(SimError::invalid(format!(
                "speed must be finite and non-negative, got {}",
                speed
            )));
        }

        let arena = world.arena;
        let xs = Uniform::new_inclusive(arena.min_x, arena.max_x);
        let ys = Uniform::new_inclusive(arena.min_y, arena.max_y);
        let angles = Uniform::new(0.0, TAU);

        let agents = (0..size)
            .map(|i| {
                let position = Vector2::new(xs.sample(rng), ys.sample(rng));
                let velocity = Vector2::from_polar(angles.sample(rng), speed);
                let mut agent = Agent::new(position, velocity);
                if i < infected_count {
                    agent.infect();
                } else if i < infected_count + immune_count {
                    agent.immunize();
                }
                agent
            })
            .collect();

        Ok(Self {
            world,
            agents,
            time: 0,
        })
    }

    /// Wraps hand-placed cells, for scripted scenarios and embedding front-ends.
    /// The world is checked the same way `initialize` checks it.
    pub fn from_agents(world: WorldConfig, agents: Vec<Agent>) -> Result<Self> {
        world.validate()?;
        Ok(Self {
            world,
            agents,
            time: 0,
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    /// One tick: every cell moves and bounces before any contact is checked,
    /// so contacts see this tick's positions.
    pub fn advance(&mut self) {
        self.time += 1;

        let recovery_period = self.world.recovery_period;
        for agent in &mut self.agents {
            agent.advance(recovery_period);
            self.world.arena.enforce_bounds(agent);
        }

        let infections = self.scan_contacts();
        if infections > 0 {
            trace!("tick {}: {} new infections", self.time, infections);
        }
    }

    /// Resolves every unordered pair closer than the contact radius exactly once, in index
    /// order `(0,1), (0,2) .. (1,2) ..`. Pairs resolve one after another, so a cell infected
    /// by an earlier pair can pass it on to a later partner in the same tick; the outcome of
    /// a chain of contacts therefore depends on index order.
    /// Returns how many cells were newly infected.
    pub fn scan_contacts(&mut self) -> usize {
        let radius = self.world.contact_radius;
        let mut infections = 0;

        for i in 0..self.agents.len() {
            let (head, tail) = self.agents.split_at_mut(i + 1);
            let current = &mut head[i];
            for other in tail.iter_mut() {
                if current.position.distance(other.position) < radius
                    && current.resolve_contact_with(other)
                {
                    infections += 1;
                }
            }
        }

        infections
    }

    /// True once nobody is infected. Never mutates.
    pub fn is_complete(&self) -> bool {
        !self.agents.iter().any(Agent::is_infected)
    }

    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.agents.iter().map(|agent| CellView {
            x: agent.position.x,
            y: agent.position.y,
            category: agent.display_category(),
        })
    }

    pub fn census(&self) -> Census {
        self.agents
            .iter()
            .fold(Census::default(), |mut census, agent| {
                match agent.display_category() {
                    DisplayCategory::Susceptible => census.susceptible += 1,
                    DisplayCategory::Infected => census.infected += 1,
                    DisplayCategory::Immune => census.immune += 1,
                }
                census
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::Arena;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn world() -> WorldConfig {
        WorldConfig {
            arena: Arena::centered(100.0, 100.0),
            contact_radius: 5.0,
            recovery_period: 4,
        }
    }

    fn agent_at(x: f64, y: f64) -> Agent {
        Agent::new(Vector2::new(x, y), Vector2::ZERO)
    }

    fn infected_at(x: f64, y: f64) -> Agent {
        let mut agent = agent_at(x, y);
        agent.infect();
        agent
    }

    #[test]
    fn initialize_assigns_exact_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let population = Population::initialize(world(), 50, 2.0, 3, 7, &mut rng).unwrap();

        let census = population.census();
        assert_eq!(population.len(), 50);
        assert_eq!(census.infected, 3);
        assert_eq!(census.immune, 7);
        assert_eq!(census.susceptible, 40);
        assert_eq!(population.time(), 0);
    }

    #[test]
    fn initialize_places_inside_arena_at_speed() {
        let mut rng = StdRng::seed_from_u64(2);
        let population = Population::initialize(world(), 200, 3.5, 1, 0, &mut rng).unwrap();

        for agent in population.agents() {
            assert!(world().arena.contains(agent.position.x, agent.position.y));
            assert!((agent.velocity.magnitude() - 3.5).abs() < 1e-9);
        }
    }

    #[test]
    fn initialize_rejects_invalid_counts() {
        let mut rng = StdRng::seed_from_u64(3);
        let cases = [(10, 0, 0), (10, 10, 0), (10, 11, 0), (10, 1, 10), (10, 1, 12)];
        for (size, infected, immune) in cases {
            let result = Population::initialize(world(), size, 1.0, infected, immune, &mut rng);
            match result {
                Err(SimError::InvalidConfiguration(_)) => {}
                other => panic!("({}, {}, {}) gave {:?}", size, infected, immune, other),
            }
        }
    }

    #[test]
    fn same_seed_same_population() {
        let a = Population::initialize(world(), 30, 1.0, 2, 2, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = Population::initialize(world(), 30, 1.0, 2, 2, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a.agents(), b.agents());
    }

    #[test]
    fn complete_query_before_any_tick() {
        let population = Population::from_agents(world(), vec![agent_at(0.0, 0.0), agent_at(1.0, 1.0)]).unwrap();
        assert!(population.is_complete());

        let population = Population::from_agents(world(), vec![infected_at(0.0, 0.0)]).unwrap();
        assert!(!population.is_complete());
        assert_eq!(population.time(), 0);
    }

    #[test]
    fn from_agents_rejects_broken_world() {
        let inverted = WorldConfig {
            arena: Arena { min_x: 10.0, max_x: -10.0, min_y: -10.0, max_y: 10.0 },
            ..world()
        };
        let result = Population::from_agents(inverted, vec![infected_at(0.0, 0.0), agent_at(0.0, 0.0)]);
        assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));

        let no_radius = WorldConfig { contact_radius: f64::NAN, ..world() };
        let result = Population::from_agents(no_radius, vec![infected_at(0.0, 0.0), agent_at(0.0, 0.0)]);
        assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
    }

    #[test]
    fn chained_contacts_follow_index_order() {
        let world = WorldConfig { contact_radius: 5.0, ..world() };
        let forward = vec![infected_at(0.0, 0.0), agent_at(4.0, 0.0), agent_at(8.0, 0.0)];
        let reversed: Vec<Agent> = forward.iter().rev().cloned().collect();

        let mut population = Population::from_agents(world, forward).unwrap();
        assert_eq!(population.scan_contacts(), 2);
        assert_eq!(population.census(), Census { susceptible: 0, infected: 3, immune: 0 });

        // the far cell's only contact is scanned before its neighbour catches it
        let mut population = Population::from_agents(world, reversed).unwrap();
        assert_eq!(population.scan_contacts(), 1);
        assert_eq!(population.census(), Census { susceptible: 1, infected: 2, immune: 0 });
        assert!(population.agents()[0].is_susceptible());
    }

    #[test]
    fn contact_only_inside_radius() {
        let mut population = Population::from_agents(
            world(),
            vec![infected_at(0.0, 0.0), agent_at(4.9, 0.0), agent_at(-5.0, 0.0)],
        ).unwrap();

        assert_eq!(population.scan_contacts(), 1);
        assert!(population.agents()[1].is_infected());
        // exactly on the radius is not a contact
        assert!(population.agents()[2].is_susceptible());
    }

    #[test]
    fn late_index_can_infect_early_index() {
        let mut population = Population::from_agents(
            world(),
            vec![agent_at(0.0, 0.0), agent_at(40.0, 40.0), infected_at(1.0, 1.0)],
        ).unwrap();

        population.advance();

        assert!(population.agents()[0].is_infected());
        assert!(population.agents()[1].is_susceptible());
    }

    #[test]
    fn contacts_use_post_move_positions() {
        let mut mover = agent_at(-20.0, 0.0);
        mover.velocity = Vector2::new(18.0, 0.0);
        let mut population = Population::from_agents(world(), vec![mover, infected_at(0.0, 0.0)]).unwrap();

        population.advance();

        assert_eq!(population.agents()[0].position, Vector2::new(-2.0, 0.0));
        assert!(population.agents()[0].is_infected());
    }

    #[test]
    fn advance_bounces_at_walls() {
        let mut runner = agent_at(50.0, 0.0);
        runner.velocity = Vector2::new(1.0, 0.0);
        let mut population = Population::from_agents(world(), vec![runner]).unwrap();

        population.advance();

        let agent = &population.agents()[0];
        assert_eq!(agent.position.x, 50.0);
        assert_eq!(agent.velocity.x, -1.0);
        assert_eq!(population.time(), 1);
    }

    #[test]
    fn isolated_infection_runs_its_course() {
        let mut population = Population::from_agents(world(), vec![infected_at(0.0, 0.0), agent_at(30.0, 30.0)]).unwrap();

        for _ in 0..4 {
            population.advance();
            assert!(!population.is_complete());
        }
        population.advance();

        assert!(population.is_complete());
        assert_eq!(
            population.census(),
            Census {
                susceptible: 1,
                infected: 0,
                immune: 1
            }
        );
    }

    #[test]
    fn cells_expose_positions_and_categories() {
        let mut immune = agent_at(3.0, 4.0);
        immune.immunize();
        let population = Population::from_agents(world(), vec![infected_at(1.0, 2.0), immune]).unwrap();

        let cells: Vec<CellView> = population.cells().collect();
        assert_eq!(cells.len(), 2);
        assert_eq!((cells[0].x, cells[0].y, cells[0].category), (1.0, 2.0, DisplayCategory::Infected));
        assert_eq!((cells[1].x, cells[1].y, cells[1].category), (3.0, 4.0, DisplayCategory::Immune));
    }
}
