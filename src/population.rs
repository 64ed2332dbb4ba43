//! Population seeding: random placement plus exact category targets.

use rand::Rng;
use thiserror::Error;

use crate::world::{Role, World};

/// Seeding parameters: head count and the three category percentages.
/// Doctor role is an axis of its own and does not compete with the two
/// health-state targets.
#[derive(Debug, Clone, Copy)]
pub struct SeedSpec {
    pub count: usize,
    pub pct_infected: f64,
    pub pct_super: f64,
    pub pct_doctor: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum SeedError {
    #[error("count must be at least 1, got {0}")]
    EmptyPopulation(usize),
    #[error("{param} must be within 0..=100, got {value}")]
    PercentOutOfRange { param: &'static str, value: f64 },
    #[error(
        "infected ({infected}) and super-healthy ({supers}) targets exceed the population of {count}"
    )]
    TargetsExceedPopulation {
        infected: usize,
        supers: usize,
        count: usize,
    },
}

/// Round-half-up share of `count`, matching the original model's
/// `round(pct/100 * count)`.
fn target(pct: f64, count: usize) -> usize {
    (pct / 100.0 * count as f64).round() as usize
}

fn check_percent(param: &'static str, value: f64) -> Result<(), SeedError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(SeedError::PercentOutOfRange { param, value });
    }
    Ok(())
}

/// Place `spec.count` healthy people into uniformly random regions, then
/// drive exactly the target numbers of them to Infected and Immune.
///
/// All validation happens before any mutation; a seeding error leaves the
/// world untouched. The two category loops are rejection sampling over the
/// whole population: draws landing on a non-healthy person are discarded and
/// redrawn, so the infected and immune sets are disjoint by construction and
/// each loop stops at its exact target. Termination is guaranteed by the
/// `infected + supers <= count` bound checked up front.
///
/// Every region's stats are committed afterwards, so the world carries a
/// valid day-0 snapshot before the first tick.
pub fn seed(world: &mut World, spec: &SeedSpec, rng: &mut impl Rng) -> Result<(), SeedError> {
    if spec.count < 1 {
        return Err(SeedError::EmptyPopulation(spec.count));
    }
    check_percent("pct_infected", spec.pct_infected)?;
    check_percent("pct_super", spec.pct_super)?;
    check_percent("pct_doctor", spec.pct_doctor)?;

    let infected = target(spec.pct_infected, spec.count);
    let supers = target(spec.pct_super, spec.count);
    let doctors = target(spec.pct_doctor, spec.count);
    if infected + supers > spec.count {
        return Err(SeedError::TargetsExceedPopulation {
            infected,
            supers,
            count: spec.count,
        });
    }

    let regions = world.region_count();
    for _ in 0..doctors {
        world.spawn_person(rng.gen_range(0..regions), Role::Doctor);
    }
    for _ in 0..spec.count - doctors {
        world.spawn_person(rng.gen_range(0..regions), Role::Regular);
    }

    let pool = world.population();
    let mut seeded = 0;
    while seeded < infected {
        let pick = rng.gen_range(0..pool);
        if world.person(pick).is_healthy() {
            world.person_mut(pick).become_infected();
            seeded += 1;
        }
    }

    let mut seeded = 0;
    while seeded < supers {
        let pick = rng.gen_range(0..pool);
        if world.person(pick).is_healthy() {
            world.person_mut(pick).become_super_healthy();
            seeded += 1;
        }
    }

    for region in 0..regions {
        world.update_health_stats(region);
    }
    Ok(())
}
