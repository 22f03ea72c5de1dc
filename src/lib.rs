pub mod agent;
pub mod error;
pub mod geometry;
pub mod metrics;
pub mod simulation;

pub use agent::{Agent, DisplayCategory, Health};
pub use error::SimError;
pub use geometry::Vector2;
pub use simulation::{Population, Simulation, SimConfig};
pub use metrics::MetricsCollector;

pub mod prelude {
    pub use crate::agent::{Agent, DisplayCategory, Health};
    pub use crate::error::SimError;
    pub use crate::geometry::Vector2;
    pub use crate::simulation::{Arena, Census, CellView, Population, Simulation, SimConfig, WorldConfig};
    pub use crate::metrics::CensusSnapshot;
    pub use crate::metrics::analyzer::AnalysisReport;
}
