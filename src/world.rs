//! World state: people, regions, and per-region health statistics.
//!
//! Regions never hold references to each other or to people; everything is
//! arena-indexed through the `World`, and adjacency lives in each region as
//! plain `RegionId` slots copied from the torus at construction.

use std::fmt;

use serde::Serialize;

use crate::grid::{GridError, Neighbors, RegionId, Torus};

/// Index of a person in the world arena.
pub type PersonId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthState {
    Healthy,
    Infected,
    /// "Super-healthy": immune to infection, whether seeded or recovered.
    Immune,
}

/// Role is orthogonal to health state: a doctor can be infected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Regular,
    Doctor,
}

#[derive(Debug, Clone)]
pub struct Person {
    region: RegionId,
    health: HealthState,
    role: Role,
}

impl Person {
    fn new(region: RegionId, role: Role) -> Self {
        Self {
            region,
            health: HealthState::Healthy,
            role,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.health == HealthState::Healthy
    }

    pub fn become_infected(&mut self) {
        self.health = HealthState::Infected;
    }

    pub fn become_super_healthy(&mut self) {
        self.health = HealthState::Immune;
    }

    pub fn health(&self) -> HealthState {
        self.health
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn region(&self) -> RegionId {
        self.region
    }
}

/// Occupant counts of one region at the moment of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HealthStats {
    pub healthy: usize,
    pub infected: usize,
    pub immune: usize,
    pub total: usize,
}

/// One cell of the grid, holding its occupants and the stats committed by
/// the most recent snapshot phase.
#[derive(Debug, Clone)]
pub struct Region {
    label: String,
    neighbors: Neighbors,
    occupants: Vec<PersonId>,
    stats: HealthStats,
}

impl Region {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn neighbors(&self) -> Neighbors {
        self.neighbors
    }

    pub fn occupants(&self) -> &[PersonId] {
        &self.occupants
    }

    /// The stats committed by the latest snapshot, not a live census.
    pub fn stats(&self) -> HealthStats {
        self.stats
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} healthy, {} infected, {} immune ({} total)",
            self.label, self.stats.healthy, self.stats.infected, self.stats.immune, self.stats.total
        )
    }
}

pub struct World {
    torus: Torus,
    regions: Vec<Region>,
    people: Vec<Person>,
}

impl World {
    /// Build an empty world over a `rows` x `cols` torus, wiring every
    /// region's four neighbor slots up front.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let torus = Torus::new(rows, cols)?;
        let regions = (0..torus.len())
            .map(|id| Region {
                label: torus.label(id),
                neighbors: torus.neighbors(id),
                occupants: Vec::new(),
                stats: HealthStats::default(),
            })
            .collect();
        Ok(Self {
            torus,
            regions,
            people: Vec::new(),
        })
    }

    pub fn torus(&self) -> Torus {
        self.torus
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> &Region {
        &self.regions[id]
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn person(&self, id: PersonId) -> &Person {
        &self.people[id]
    }

    pub fn person_mut(&mut self, id: PersonId) -> &mut Person {
        &mut self.people[id]
    }

    pub fn population(&self) -> usize {
        self.people.len()
    }

    /// Create a healthy person inside `region` and register them as an
    /// occupant. Seeding is the only caller; people are never destroyed.
    pub fn spawn_person(&mut self, region: RegionId, role: Role) -> PersonId {
        let id = self.people.len();
        self.people.push(Person::new(region, role));
        self.regions[region].occupants.push(id);
        id
    }

    /// Relocate `person` from their current region to `to`. Occupancy is
    /// exclusive: the person leaves exactly one region and enters exactly one.
    pub fn move_person(&mut self, person: PersonId, to: RegionId) {
        let from = self.people[person].region;
        if from == to {
            return;
        }
        let occupants = &mut self.regions[from].occupants;
        let slot = occupants
            .iter()
            .position(|&p| p == person)
            .expect("person listed in source region");
        occupants.swap_remove(slot);
        self.regions[to].occupants.push(person);
        self.people[person].region = to;
    }

    /// Live census of a region's occupants, without committing it.
    pub fn census(&self, region: RegionId) -> HealthStats {
        let mut stats = HealthStats::default();
        for &id in &self.regions[region].occupants {
            match self.people[id].health {
                HealthState::Healthy => stats.healthy += 1,
                HealthState::Infected => stats.infected += 1,
                HealthState::Immune => stats.immune += 1,
            }
        }
        stats.total = self.regions[region].occupants.len();
        stats
    }

    /// Recompute and commit a region's stats from its current occupants.
    pub fn update_health_stats(&mut self, region: RegionId) {
        self.regions[region].stats = self.census(region);
    }

    /// Latest committed stats for every region, in construction order.
    pub fn country_stats(&self) -> Vec<HealthStats> {
        self.regions.iter().map(|r| r.stats).collect()
    }
}
