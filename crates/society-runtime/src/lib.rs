#![deny(warnings)]

//! Daily simulation pipeline.
//!
//! A day runs six phases in a fixed order:
//! `generate_events → apply_events → apply_policies → simulate_market →
//! update_entities → record_summary`, then the day counter advances. See
//! [`phases`] for the individual steps.

pub mod config;
pub mod events;
pub mod phases;

pub use config::{ConfigError, EventConfig, SimConfig};
pub use events::{EventGenerator, NoEvents, RandomEventGenerator, ScriptedEvents};

use society_core::WorldState;
use society_econ::{
    DynamicsModel, LinearPricing, PricingModel, SectorAffinity, TrendDynamics, WealthAffinity,
};
use tracing::{info, info_span};

/// Models consulted by the pipeline.
pub struct Collaborators {
    pub events: Box<dyn EventGenerator>,
    pub pricing: Box<dyn PricingModel>,
    pub dynamics: Box<dyn DynamicsModel>,
    pub affinity: Box<dyn SectorAffinity>,
}

impl Default for Collaborators {
    /// No events and the default market, dynamics and affinity models.
    fn default() -> Self {
        Self {
            events: Box::new(NoEvents),
            pricing: Box::new(LinearPricing::default()),
            dynamics: Box::new(TrendDynamics::default()),
            affinity: Box::new(WealthAffinity::default()),
        }
    }
}

impl Collaborators {
    /// Seeded random events and the configured models.
    pub fn from_config(cfg: &SimConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            events: Box::new(RandomEventGenerator::new(cfg.rng_seed, cfg.events.clone())?),
            pricing: Box::new(cfg.market.clone()),
            dynamics: Box::new(cfg.dynamics.clone()),
            affinity: Box::new(cfg.affinity()),
        })
    }

    pub fn with_events(self, events: impl EventGenerator + 'static) -> Self {
        Self {
            events: Box::new(events),
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Companies listed in each day summary.
    pub top_companies: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self { top_companies: 5 }
    }
}

/// Advance `world` by one day with the default collaborators.
pub fn run_day(world: WorldState) -> WorldState {
    run_day_with(world, &Collaborators::default(), &PipelineOptions::default())
}

/// Advance `world` by one day.
pub fn run_day_with(
    world: WorldState,
    collaborators: &Collaborators,
    options: &PipelineOptions,
) -> WorldState {
    let span = info_span!("run_day", day = world.day());
    let _guard = span.enter();

    let world = phases::generate_events(world, collaborators.events.as_ref());
    let world = phases::apply_events(world, collaborators.affinity.as_ref());
    let world = phases::apply_policies(world);
    let world = phases::simulate_market(world, collaborators.pricing.as_ref());
    let world = phases::update_entities(
        world,
        collaborators.dynamics.as_ref(),
        collaborators.pricing.as_ref(),
    );
    let world = phases::record_summary(world, options.top_companies);
    world.advance_day()
}

/// A configured simulation: collaborators plus pipeline options.
pub struct Simulation {
    collaborators: Collaborators,
    options: PipelineOptions,
}

impl Simulation {
    pub fn new(collaborators: Collaborators, options: PipelineOptions) -> Self {
        Self {
            collaborators,
            options,
        }
    }

    pub fn from_config(cfg: &SimConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            Collaborators::from_config(cfg)?,
            PipelineOptions {
                top_companies: cfg.top_companies,
            },
        ))
    }

    pub fn step(&self, world: WorldState) -> WorldState {
        run_day_with(world, &self.collaborators, &self.options)
    }

    /// Run `days` consecutive days.
    pub fn run(&self, world: WorldState, days: u32) -> WorldState {
        let start = world.day();
        let world = (0..days).fold(world, |world, _| self.step(world));
        info!(from = start, to = world.day(), "simulation finished");
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use society_core::{
        create_initial_world, Event, EventEffect, EventType, Policy, PolicyEffect,
        PolicyEffectSpec, PolicySpec, Sector, MIN_STOCK_PRICE,
    };

    fn ids<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
        items.collect()
    }

    #[test]
    fn run_day_advances_and_records() {
        let world = create_initial_world();
        let next = run_day(world.clone());
        assert_eq!(next.day(), world.day() + 1);
        assert_eq!(next.history().len(), world.history().len() + 1);
        assert_eq!(next.history()[0].day(), 0);
    }

    #[test]
    fn history_days_are_consecutive() {
        let world = (0..10).fold(create_initial_world(), |w, _| run_day(w));
        assert_eq!(world.day(), 10);
        for (k, summary) in world.history().iter().enumerate() {
            assert_eq!(summary.day() as usize, k);
        }
    }

    #[test]
    fn entity_sets_are_preserved() {
        let world = create_initial_world();
        let after = Simulation::from_config(&SimConfig::default())
            .unwrap()
            .run(world.clone(), 20);
        assert_eq!(
            ids(world.companies().iter().map(|c| c.id())),
            ids(after.companies().iter().map(|c| c.id()))
        );
        assert_eq!(
            ids(world.parties().iter().map(|p| p.id())),
            ids(after.parties().iter().map(|p| p.id()))
        );
        assert_eq!(
            ids(world.citizen_segments().iter().map(|s| s.id())),
            ids(after.citizen_segments().iter().map(|s| s.id()))
        );
    }

    #[test]
    fn default_run_day_clears_stale_events() {
        let stale = Event::new("old", 0, EventType::SectorBoom, "", EventEffect::default());
        let world = create_initial_world().with_events_today(vec![stale]);
        let next = run_day(world);
        assert!(next.events_today().is_empty());
        assert_eq!(next.history()[0].events_count(), 0);
    }

    #[test]
    fn scripted_event_is_counted_and_applied() {
        let effect = EventEffect {
            reputation_delta: -20.0,
            ..EventEffect::default()
        };
        let scandal = Event::new("e", 0, EventType::CompanyScandal, "", effect)
            .targeting_companies(["tech-001"]);
        let collaborators =
            Collaborators::default().with_events(ScriptedEvents::new().on_day(0, scandal));
        let world = create_initial_world();
        let before = world.company("tech-001").unwrap().reputation();
        let next = run_day_with(world, &collaborators, &PipelineOptions::default());
        assert_eq!(next.history()[0].events_count(), 1);
        assert!(next.company("tech-001").unwrap().reputation() < before);
    }

    #[test]
    fn policy_lifecycle_through_pipeline() {
        let effect = PolicyEffect::new(PolicyEffectSpec {
            target_sector: Some(Sector::Food),
            subsidy_amount: 1_000.0,
            ..PolicyEffectSpec::default()
        })
        .unwrap();
        let policy =
            Policy::new(PolicySpec::new("pol", "Food aid", "", "party-left", effect, 2)).unwrap();
        let world = create_initial_world().enact_policy(policy);

        let day1 = run_day(world);
        assert_eq!(day1.active_policies().len(), 1);
        assert_eq!(day1.active_policies()[0].remaining_days(), 1);
        assert_eq!(day1.history()[0].active_policies_count(), 1);

        let day2 = run_day(day1);
        assert!(day2.active_policies().is_empty());
        assert_eq!(day2.history()[1].active_policies_count(), 0);
    }

    #[test]
    fn top_companies_follows_options() {
        let options = PipelineOptions { top_companies: 3 };
        let next = run_day_with(
            create_initial_world(),
            &Collaborators::default(),
            &options,
        );
        let top = next.history()[0].top_companies();
        assert_eq!(top.len(), 3);
        assert!(top.windows(2).all(|w| w[0].revenue >= w[1].revenue));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]
        #[test]
        fn invariants_hold_for_any_seed(seed in any::<u64>(), days in 1u32..15) {
            let cfg = SimConfig {
                rng_seed: seed,
                events: EventConfig {
                    probability: 0.8,
                    max_per_day: 3,
                },
                ..SimConfig::default()
            };
            let world = Simulation::from_config(&cfg).unwrap().run(create_initial_world(), days);
            prop_assert_eq!(world.day(), days);
            prop_assert_eq!(world.history().len(), days as usize);
            for c in world.companies() {
                prop_assert!(c.stock_price() >= MIN_STOCK_PRICE);
                prop_assert!(c.cash() >= 0.0);
                prop_assert!((0.0..=100.0).contains(&c.reputation()));
            }
            for p in world.parties() {
                prop_assert!((0.0..=100.0).contains(&p.popularity()));
                prop_assert!((0.0..=100.0).contains(&p.reputation()));
            }
            for s in world.citizen_segments() {
                prop_assert!((0.0..=100.0).contains(&s.satisfaction()));
            }
        }
    }
}
