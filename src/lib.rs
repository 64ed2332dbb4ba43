pub mod engine;
pub mod grid;
pub mod population;
pub mod rules;
pub mod world;

pub use engine::{DayReport, Simulation};
pub use population::SeedSpec;
pub use world::World;
