//! Day-cycle engine: three barrier-separated phases per simulated day.
//!
//! Phase order is the contract of this module: health actions for every
//! region, then movement for every region, then a stats snapshot for every
//! region. A phase runs to completion across the whole grid before the next
//! one starts, so health actions and movement decisions both observe the
//! occupancy the day started with, and arrivals only act from the following
//! day onward.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::grid::RegionId;
use crate::population::{self, SeedError, SeedSpec};
use crate::rules::{DefaultRules, Rules};
use crate::world::{HealthState, HealthStats, PersonId, Role, World};

/// Per-day snapshot of the whole grid, one entry per region in
/// construction order.
#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    pub day: u64,
    pub regions: Vec<RegionReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionReport {
    pub region: String,
    #[serde(flatten)]
    pub stats: HealthStats,
}

pub struct Simulation {
    world: World,
    rules: Box<dyn Rules>,
    rng: ChaCha8Rng,
    days_passed: u64,
}

impl Simulation {
    /// A simulation over `world` with the default disease and movement
    /// policies. All randomness, including seeding, flows from `seed`;
    /// two simulations built alike run alike.
    pub fn new(world: World, seed: u64) -> Self {
        Self::with_rules(world, seed, Box::new(DefaultRules::default()))
    }

    pub fn with_rules(world: World, seed: u64, rules: Box<dyn Rules>) -> Self {
        Self {
            world,
            rules,
            rng: ChaCha8Rng::seed_from_u64(seed),
            days_passed: 0,
        }
    }

    /// Seed the population from this simulation's RNG stream and commit the
    /// day-0 stats.
    pub fn seed_population(&mut self, spec: &SeedSpec) -> Result<(), SeedError> {
        population::seed(&mut self.world, spec, &mut self.rng)
    }

    /// Run exactly one day and return its committed snapshot. The day
    /// counter moves by exactly 1, after the snapshot phase finishes.
    pub fn advance_day(&mut self) -> DayReport {
        self.run_health_phase();
        self.run_movement_phase();
        for region in 0..self.world.region_count() {
            self.world.update_health_stats(region);
        }
        self.days_passed += 1;
        self.day_report()
    }

    /// Days completed so far; 0 before the first `advance_day`.
    pub fn days_passed(&self) -> u64 {
        self.days_passed
    }

    /// Latest committed stats per region, construction order. Repeated calls
    /// within the same day return the same sequence.
    pub fn country_stats(&self) -> Vec<HealthStats> {
        self.world.country_stats()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    fn day_report(&self) -> DayReport {
        DayReport {
            day: self.days_passed,
            regions: self
                .world
                .regions()
                .iter()
                .map(|r| RegionReport {
                    region: r.label().to_string(),
                    stats: r.stats(),
                })
                .collect(),
        }
    }

    /// Phase 1: apply the health policy to every occupant of every region.
    /// Each region's census and doctor presence are captured before any of
    /// its occupants transition, so the order of occupants within a region
    /// does not feed back into the same day's decisions.
    fn run_health_phase(&mut self) {
        for region in 0..self.world.region_count() {
            let census = self.world.census(region);
            let occupants: Vec<PersonId> = self.world.region(region).occupants().to_vec();
            let doctor_present = occupants
                .iter()
                .any(|&p| self.world.person(p).role() == Role::Doctor);
            for id in occupants {
                let next =
                    self.rules
                        .health_action(self.world.person(id), &census, doctor_present, &mut self.rng);
                match next {
                    Some(HealthState::Infected) => self.world.person_mut(id).become_infected(),
                    Some(HealthState::Immune) => self.world.person_mut(id).become_super_healthy(),
                    Some(HealthState::Healthy) | None => {}
                }
            }
        }
    }

    /// Phase 2: collect every movement decision against the pre-movement
    /// occupancy, then apply them all. Destinations are constrained to the
    /// four wired neighbor slots of the occupant's current region.
    fn run_movement_phase(&mut self) {
        let mut departures: Vec<(PersonId, RegionId)> = Vec::new();
        for region in 0..self.world.region_count() {
            let neighbors = self.world.region(region).neighbors();
            for &id in self.world.region(region).occupants() {
                if let Some(direction) = self.rules.movement(self.world.person(id), &mut self.rng) {
                    departures.push((id, neighbors.get(direction)));
                }
            }
        }
        for (id, destination) in departures {
            self.world.move_person(id, destination);
        }
    }
}
