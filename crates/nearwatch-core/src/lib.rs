//! Nearwatch core
//!
//! Tracks, for each kind of entity, which single entity is closest to a moving
//! observer without scanning the whole population every tick.
//!
//! # How it works
//!
//! - Every entity ranks the other entities of its kind by squared distance
//!   and designates the closest `k` as its near neighbors.
//! - Entities that list someone as near tell it so; the listed entity keeps
//!   those it does not list back as *unseen* neighbors.
//! - Exactly one entity per kind is *active*. Each tick it compares the
//!   observer's distance to itself and to its near and unseen neighbors and,
//!   if a neighbor is strictly closer, queues a hand-off.
//! - The registry drains queued hand-offs at the start of the next tick,
//!   moving the active status and the highlight material.
//!
//! Per-tick work is proportional to `k`, not to the population.
//!
//! # Example
//!
//! ```
//! use nearwatch_core::{Kind, MaterialTable, SimConfig, Simulation, Vec3};
//!
//! let config = SimConfig::default().with_neighbor_count(1);
//! let mut sim = Simulation::new(config, MaterialTable::new()).unwrap();
//!
//! let a = sim.spawn(Kind::Item, Vec3::ZERO);
//! let b = sim.spawn(Kind::Item, Vec3::new(5.0, 0.0, 0.0));
//! assert_eq!(sim.active(Kind::Item), Some(a));
//!
//! let observer = Vec3::new(5.0, 0.0, 0.0);
//! sim.tick(observer); // a notices b is closer and queues a hand-off
//! sim.tick(observer); // the hand-off is applied
//! assert_eq!(sim.active(Kind::Item), Some(b));
//! ```

mod agent;
mod config;
mod error;
mod graph;
mod material;
mod math;
mod message;
mod ranking;
mod record;
mod registry;
mod simulation;
mod spawner;

pub use agent::{Agent, AgentState, AgentTable, Kind};
pub use config::{Bounds, Materials, Palette, SimConfig};
pub use error::{ConfigError, ConfigResult};
pub use graph::NeighborGraph;
pub use material::{MaterialBinding, MaterialHandle, MaterialTable};
pub use math::Vec3;
pub use message::{HighlightEvent, Mailbox, NeighborMessage};
pub use nearwatch_ecs::Entity;
pub use ranking::Ranking;
pub use record::{DistanceRecord, Position};
pub use registry::Registry;
pub use simulation::{Simulation, TickReport};
pub use spawner::Spawner;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Entity, Kind, MaterialBinding, MaterialHandle, MaterialTable, SimConfig, Simulation,
        Spawner, Vec3,
    };
}
