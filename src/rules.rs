//! Per-occupant disease and movement policies.
//!
//! The engine only commits to the phase schedule; what actually happens to an
//! occupant during the health phase, and whether they travel during the
//! movement phase, is policy behind this trait. The default policy is a small
//! contact model; tests pin its probabilities to 0 or 1 to make the engine's
//! scheduling observable.

use rand::{Rng, RngCore};

use crate::grid::Direction;
use crate::world::{HealthState, HealthStats, Person, Role};

pub trait Rules {
    /// Health transition for one occupant, or `None` to stay as-is.
    /// `census` is the region's occupant breakdown at the start of the
    /// phase, before any transition of the day has been applied.
    fn health_action(
        &self,
        person: &Person,
        census: &HealthStats,
        doctor_present: bool,
        rng: &mut dyn RngCore,
    ) -> Option<HealthState>;

    /// Movement decision for one occupant: a directional neighbor slot to
    /// travel to, or `None` to stay home.
    fn movement(&self, person: &Person, rng: &mut dyn RngCore) -> Option<Direction>;
}

/// Contact-proportional infection, chance recovery into immunity, and
/// undirected wandering.
#[derive(Debug, Clone, Copy)]
pub struct DefaultRules {
    /// Scales the infected share of a region into an infection probability.
    pub transmission_rate: f64,
    /// Daily probability that an infected occupant recovers immune.
    pub recovery_rate: f64,
    /// Multiplier on `recovery_rate` when a doctor shares the region.
    pub doctor_boost: f64,
    /// Daily probability that an occupant moves to a random neighbor.
    pub move_probability: f64,
}

impl Default for DefaultRules {
    fn default() -> Self {
        Self {
            transmission_rate: 0.8,
            recovery_rate: 0.05,
            doctor_boost: 3.0,
            move_probability: 0.1,
        }
    }
}

impl Rules for DefaultRules {
    fn health_action(
        &self,
        person: &Person,
        census: &HealthStats,
        doctor_present: bool,
        rng: &mut dyn RngCore,
    ) -> Option<HealthState> {
        match person.health() {
            HealthState::Healthy => {
                if census.infected == 0 || census.total == 0 {
                    return None;
                }
                let exposure = census.infected as f64 / census.total as f64;
                let p = (self.transmission_rate * exposure).clamp(0.0, 1.0);
                rng.gen_bool(p).then_some(HealthState::Infected)
            }
            HealthState::Infected => {
                let boost = if doctor_present { self.doctor_boost } else { 1.0 };
                let p = (self.recovery_rate * boost).clamp(0.0, 1.0);
                rng.gen_bool(p).then_some(HealthState::Immune)
            }
            HealthState::Immune => None,
        }
    }

    fn movement(&self, _person: &Person, rng: &mut dyn RngCore) -> Option<Direction> {
        if !rng.gen_bool(self.move_probability.clamp(0.0, 1.0)) {
            return None;
        }
        Some(Direction::ALL[rng.gen_range(0..Direction::ALL.len())])
    }
}

/// Doctors never wander in this variant; everyone else follows the default
/// policy. Exists mostly to exercise role-dependent behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct StationaryDoctors(pub DefaultRules);

impl Rules for StationaryDoctors {
    fn health_action(
        &self,
        person: &Person,
        census: &HealthStats,
        doctor_present: bool,
        rng: &mut dyn RngCore,
    ) -> Option<HealthState> {
        self.0.health_action(person, census, doctor_present, rng)
    }

    fn movement(&self, person: &Person, rng: &mut dyn RngCore) -> Option<Direction> {
        if person.role() == Role::Doctor {
            return None;
        }
        self.0.movement(person, rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::world::{HealthStats, World};

    fn person(world: &mut World, role: Role) -> usize {
        world.spawn_person(0, role)
    }

    #[test]
    fn healthy_stay_healthy_without_infected_contacts() {
        let mut world = World::new(1, 1).unwrap();
        let id = person(&mut world, Role::Regular);
        let rules = DefaultRules {
            transmission_rate: 1.0,
            ..DefaultRules::default()
        };
        let census = HealthStats {
            healthy: 3,
            total: 3,
            ..HealthStats::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            rules.health_action(world.person(id), &census, false, &mut rng),
            None
        );
    }

    #[test]
    fn certain_transmission_infects_on_contact() {
        let mut world = World::new(1, 1).unwrap();
        let id = person(&mut world, Role::Regular);
        let rules = DefaultRules {
            transmission_rate: 1.0,
            ..DefaultRules::default()
        };
        let census = HealthStats {
            healthy: 1,
            infected: 2,
            immune: 0,
            total: 3,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // p = 1.0 * 2/3 is not certain; force certainty with a full ward.
        let full = HealthStats {
            infected: 3,
            total: 3,
            ..HealthStats::default()
        };
        assert_eq!(
            rules.health_action(world.person(id), &full, false, &mut rng),
            Some(HealthState::Infected)
        );
        // And a zero rate never infects regardless of exposure.
        let never = DefaultRules {
            transmission_rate: 0.0,
            ..DefaultRules::default()
        };
        assert_eq!(
            never.health_action(world.person(id), &census, false, &mut rng),
            None
        );
    }

    #[test]
    fn doctor_boost_saturates_recovery() {
        let mut world = World::new(1, 1).unwrap();
        let id = person(&mut world, Role::Regular);
        world.person_mut(id).become_infected();
        let rules = DefaultRules {
            recovery_rate: 0.4,
            doctor_boost: 10.0,
            ..DefaultRules::default()
        };
        let census = HealthStats {
            infected: 1,
            total: 1,
            ..HealthStats::default()
        };
        // 0.4 * 10 clamps to certainty.
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert_eq!(
            rules.health_action(world.person(id), &census, true, &mut rng),
            Some(HealthState::Immune)
        );
    }

    #[test]
    fn immune_never_transition() {
        let mut world = World::new(1, 1).unwrap();
        let id = person(&mut world, Role::Regular);
        world.person_mut(id).become_super_healthy();
        let rules = DefaultRules {
            transmission_rate: 1.0,
            recovery_rate: 1.0,
            ..DefaultRules::default()
        };
        let census = HealthStats {
            infected: 5,
            total: 5,
            ..HealthStats::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(
                rules.health_action(world.person(id), &census, true, &mut rng),
                None
            );
        }
    }

    #[test]
    fn stationary_doctors_do_not_wander() {
        let mut world = World::new(1, 1).unwrap();
        let doc = person(&mut world, Role::Doctor);
        let reg = person(&mut world, Role::Regular);
        let rules = StationaryDoctors(DefaultRules {
            move_probability: 1.0,
            ..DefaultRules::default()
        });
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(rules.movement(world.person(doc), &mut rng), None);
        assert!(rules.movement(world.person(reg), &mut rng).is_some());
    }
}
