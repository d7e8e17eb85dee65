//! Event generation collaborators.

use crate::config::{ConfigError, EventConfig};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use society_core::{Event, EventEffect, EventType, Sector, WorldState};
use std::collections::BTreeMap;

/// Produces the events of `world.day()`.
///
/// Implementations must be pure in `world` and their own configuration so a
/// day can be replayed from a snapshot.
pub trait EventGenerator: Send + Sync {
    fn generate(&self, world: &WorldState) -> Vec<Event>;
}

/// Quiet world.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvents;

impl EventGenerator for NoEvents {
    fn generate(&self, _world: &WorldState) -> Vec<Event> {
        Vec::new()
    }
}

/// Fixed events keyed by day, for scenarios and tests.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEvents {
    by_day: BTreeMap<u32, Vec<Event>>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` for `day`.
    pub fn on_day(mut self, day: u32, event: Event) -> Self {
        self.by_day.entry(day).or_default().push(event);
        self
    }

    /// Schedule every event on its own `day` field.
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        events
            .into_iter()
            .fold(Self::new(), |script, event| script.on_day(event.day, event))
    }
}

impl EventGenerator for ScriptedEvents {
    fn generate(&self, world: &WorldState) -> Vec<Event> {
        let day = world.day();
        self.by_day
            .get(&day)
            .map(|events| events.iter().map(|e| e.on_day(day)).collect())
            .unwrap_or_default()
    }
}

/// Seeded random events. The RNG is derived from `(seed, day)` on each call,
/// so the events of a day never depend on earlier calls.
#[derive(Clone, Debug)]
pub struct RandomEventGenerator {
    seed: u64,
    config: EventConfig,
}

impl RandomEventGenerator {
    pub fn new(seed: u64, config: EventConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { seed, config })
    }

    fn rng_for_day(&self, day: u32) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed ^ u64::from(day).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

impl EventGenerator for RandomEventGenerator {
    fn generate(&self, world: &WorldState) -> Vec<Event> {
        let day = world.day();
        let mut rng = self.rng_for_day(day);
        let mut events = Vec::new();
        for slot in 0..self.config.max_per_day {
            if !rng.gen_bool(self.config.probability) {
                continue;
            }
            let Some(&kind) = EventType::ALL.choose(&mut rng) else {
                continue;
            };
            let id = format!("evt-{day}-{slot}");
            if let Some(event) = draw(&mut rng, world, kind, id) {
                events.push(event);
            }
        }
        events
    }
}

// Magnitude ranges per event type. Scandals and crises are signed negative.
fn draw(rng: &mut ChaCha8Rng, world: &WorldState, kind: EventType, id: String) -> Option<Event> {
    let day = world.day();
    let event = match kind {
        EventType::CompanyScandal | EventType::CompanySuccess => {
            let company = world.companies().choose(rng)?;
            let sign: f64 = if kind == EventType::CompanyScandal { -1.0 } else { 1.0 };
            let effect = EventEffect {
                reputation_delta: sign * rng.gen_range(3.0..=12.0),
                stock_price_delta_percent: sign * rng.gen_range(2.0..=10.0),
                ..EventEffect::default()
            };
            let narrative = if sign < 0.0 {
                format!("{} is caught in a scandal", company.name())
            } else {
                format!("{} reports a strong quarter", company.name())
            };
            Event::new(id, day, kind, narrative, effect).targeting_companies([company.id()])
        }
        EventType::SectorCrisis | EventType::SectorBoom => {
            let sector: Sector = *Sector::ALL.choose(rng)?;
            let sign: f64 = if kind == EventType::SectorCrisis { -1.0 } else { 1.0 };
            let effect = EventEffect {
                reputation_delta: sign * rng.gen_range(1.0..=4.0),
                stock_price_delta_percent: sign * rng.gen_range(4.0..=15.0),
                satisfaction_delta: sign * rng.gen_range(1.0..=5.0),
                ..EventEffect::default()
            };
            let narrative = if sign < 0.0 {
                format!("Crisis hits the {sector} sector")
            } else {
                format!("The {sector} sector is booming")
            };
            Event::new(id, day, kind, narrative, effect).targeting_sectors([sector])
        }
        EventType::PartyScandal | EventType::PartySuccess => {
            let party = world.parties().choose(rng)?;
            let sign: f64 = if kind == EventType::PartyScandal { -1.0 } else { 1.0 };
            let effect = EventEffect {
                reputation_delta: sign * rng.gen_range(3.0..=10.0),
                popularity_delta: sign * rng.gen_range(1.0..=5.0),
                satisfaction_delta: sign * rng.gen_range(0.5..=3.0),
                ..EventEffect::default()
            };
            let narrative = if sign < 0.0 {
                format!("{} is shaken by a scandal", party.name())
            } else {
                format!("{} wins a public debate", party.name())
            };
            Event::new(id, day, kind, narrative, effect).targeting_parties([party.id()])
        }
        EventType::PolicyProposal => {
            let party = match world.governing_party() {
                Some(p) => p,
                None => world.parties().choose(rng)?,
            };
            let effect = EventEffect {
                popularity_delta: rng.gen_range(-2.0..=2.0),
                satisfaction_delta: rng.gen_range(-1.5..=1.5),
                ..EventEffect::default()
            };
            let narrative = format!("{} proposes a new policy", party.name());
            Event::new(id, day, kind, narrative, effect).targeting_parties([party.id()])
        }
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use society_core::create_initial_world;

    fn busy() -> EventConfig {
        EventConfig {
            probability: 1.0,
            max_per_day: 3,
        }
    }

    #[test]
    fn no_events_is_empty() {
        assert!(NoEvents.generate(&create_initial_world()).is_empty());
    }

    #[test]
    fn scripted_events_fire_on_their_day_restamped() {
        let event = Event::new("e", 99, EventType::SectorBoom, "boom", EventEffect::default());
        let script = ScriptedEvents::new().on_day(1, event);
        let world = create_initial_world();
        assert!(script.generate(&world).is_empty());
        let fired = script.generate(&world.advance_day());
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].day, 1);
        assert_eq!(fired[0].id, "e");
    }

    #[test]
    fn from_events_keys_by_event_day() {
        let a = Event::new("a", 0, EventType::SectorBoom, "", EventEffect::default());
        let b = Event::new("b", 0, EventType::SectorCrisis, "", EventEffect::default());
        let script = ScriptedEvents::from_events([a, b]);
        let ids: Vec<String> = script
            .generate(&create_initial_world())
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn random_events_are_reproducible_per_day() {
        let generator = RandomEventGenerator::new(7, busy()).unwrap();
        let world = create_initial_world().advance_day().advance_day();
        assert_eq!(generator.generate(&world), generator.generate(&world));
        let again = RandomEventGenerator::new(7, busy()).unwrap();
        assert_eq!(generator.generate(&world), again.generate(&world));
    }

    #[test]
    fn random_events_target_existing_entities() {
        let generator = RandomEventGenerator::new(11, busy()).unwrap();
        let mut world = create_initial_world();
        for _ in 0..30 {
            let events = generator.generate(&world);
            assert_eq!(events.len(), 3);
            for e in &events {
                assert_eq!(e.day, world.day());
                assert!(e.target_company_ids.iter().all(|id| world.company(id).is_some()));
                assert!(e.target_party_ids.iter().all(|id| world.party(id).is_some()));
            }
            world = world.advance_day();
        }
    }

    #[test]
    fn scandals_are_negative() {
        let generator = RandomEventGenerator::new(3, busy()).unwrap();
        let mut world = create_initial_world();
        for _ in 0..50 {
            for e in generator.generate(&world) {
                if e.event_type == EventType::CompanyScandal {
                    assert!(e.effect.reputation_delta < 0.0);
                    assert!(e.effect.stock_price_delta_percent < 0.0);
                }
            }
            world = world.advance_day();
        }
    }

    #[test]
    fn zero_probability_never_fires() {
        let cfg = EventConfig {
            probability: 0.0,
            max_per_day: 5,
        };
        let generator = RandomEventGenerator::new(1, cfg).unwrap();
        assert!(generator.generate(&create_initial_world()).is_empty());
    }

    #[test]
    fn invalid_probability_is_rejected() {
        let cfg = EventConfig {
            probability: -0.1,
            max_per_day: 1,
        };
        assert!(RandomEventGenerator::new(1, cfg).is_err());
    }
}
