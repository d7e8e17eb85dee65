//! The six phases of a simulated day, in pipeline order.
//!
//! Each phase takes the world by value and returns the next one. Phases
//! never fail: out-of-range results are clamped or floored through the
//! entities' builders and unknown ids are ignored.

use crate::events::EventGenerator;
use society_core::{
    Company, CompanySummary, DaySummary, DaySummarySpec, Event, PartySummary, Policy, WorldState,
};
use society_econ::{
    clear_market, effective_price_level, effective_tax_rate, realized_consumption,
    DynamicsModel, Offer, PricingModel, SectorAffinity,
};
use tracing::debug;

/// Replace `events_today` with the generator's events for the current day.
pub fn generate_events(world: WorldState, generator: &dyn EventGenerator) -> WorldState {
    let world = world.with_events_today(Vec::new());
    let events = generator.generate(&world);
    debug!(day = world.day(), count = events.len(), "events generated");
    world.with_events_today(events)
}

/// Apply every event of the day, in order.
pub fn apply_events(world: WorldState, affinity: &dyn SectorAffinity) -> WorldState {
    let events = world.events_today().to_vec();
    events
        .iter()
        .fold(world, |world, event| apply_event(world, event, affinity))
}

fn log_dangling(world: &WorldState, event: &Event) {
    for id in &event.target_company_ids {
        if world.company(id).is_none() {
            debug!(event = %event.id, company = %id, "ignoring unknown company");
        }
    }
    for id in &event.target_party_ids {
        if world.party(id).is_none() {
            debug!(event = %event.id, party = %id, "ignoring unknown party");
        }
    }
}

// Non-finite deltas count as zero.
fn delta(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn apply_event(world: WorldState, event: &Event, affinity: &dyn SectorAffinity) -> WorldState {
    log_dangling(&world, event);
    let effect = event.effect;
    let reputation_delta = delta(effect.reputation_delta);
    let popularity_delta = delta(effect.popularity_delta);
    let stock_factor = 1.0 + delta(effect.stock_price_delta_percent) / 100.0;
    let satisfaction_delta = delta(effect.satisfaction_delta);
    let targets_party = |id: &str| event.target_party_ids.iter().any(|t| t == id);

    let world = world.map_companies(|company| {
        let hit = event.target_company_ids.iter().any(|t| t == company.id())
            || event.target_sectors.contains(&company.sector());
        if !hit {
            return company;
        }
        let reputation = company.reputation() + reputation_delta;
        let stock_price = company.stock_price() * stock_factor;
        company
            .with_reputation(reputation)
            .with_stock_price_floored(stock_price)
    });

    let world = world.map_parties(|party| {
        if !targets_party(party.id()) {
            return party;
        }
        let reputation = party.reputation() + reputation_delta;
        let popularity = party.popularity() + popularity_delta;
        party.with_reputation(reputation).with_popularity(popularity)
    });

    world.map_segments(|segment| {
        let via_party = segment.preferred_party_id().is_some_and(targets_party);
        let via_sector = event
            .target_sectors
            .iter()
            .any(|sector| affinity.is_exposed(&segment, *sector));
        if !(via_party || via_sector) {
            return segment;
        }
        let satisfaction = segment.satisfaction() + satisfaction_delta;
        segment.with_satisfaction(satisfaction)
    })
}

/// Pay subsidies and reputation boosts of policies in force to the companies
/// of their sector. Policies are not ticked here.
pub fn apply_policies(world: WorldState) -> WorldState {
    let effects: Vec<_> = world
        .active_policies()
        .iter()
        .filter(|p| p.is_in_force())
        .map(|p| p.effect().clone())
        .collect();
    if effects.is_empty() {
        return world;
    }
    world.map_companies(|company| {
        let sector = company.sector();
        effects
            .iter()
            .filter(|e| e.applies_to(sector))
            .fold(company, |company, e| {
                let cash = company.cash() + e.subsidy_amount();
                let reputation = company.reputation() + e.reputation_boost();
                company
                    .with_cash_saturating(cash)
                    .with_reputation(reputation)
            })
    })
}

fn offers<'a>(companies: &'a [Company], policies: &[Policy]) -> Vec<Offer<'a>> {
    companies
        .iter()
        .map(|company| Offer {
            company,
            price_level: effective_price_level(company, policies),
        })
        .collect()
}

/// Clear the day's market and book sales and after-tax revenue.
pub fn simulate_market(world: WorldState, pricing: &dyn PricingModel) -> WorldState {
    let outcome = clear_market(
        pricing,
        world.citizen_segments(),
        &offers(world.companies(), world.active_policies()),
    );
    let taxes: Vec<f64> = world
        .companies()
        .iter()
        .map(|c| effective_tax_rate(c, world.active_policies()))
        .collect();
    debug!(
        day = world.day(),
        revenue = outcome.total_revenue(),
        budget = outcome.total_budget(),
        "market cleared"
    );

    let mut booked = outcome.sales.into_iter().zip(taxes);
    world.map_companies(|company| match booked.next() {
        Some((sale, tax)) => {
            let cash = company.cash() + sale.revenue * (1.0 - tax);
            company
                .with_sales(sale.units, sale.revenue)
                .with_cash_saturating(cash)
        }
        None => company,
    })
}

/// Move prices, reputations, satisfaction and popularity, then tick every
/// active policy once and drop the expired ones.
pub fn update_entities(
    world: WorldState,
    dynamics: &dyn DynamicsModel,
    pricing: &dyn PricingModel,
) -> WorldState {
    let companies = world.companies();
    let mean_revenue =
        companies.iter().map(Company::last_day_revenue).sum::<f64>() / companies.len() as f64;

    let consumption = realized_consumption(
        pricing,
        world.citizen_segments(),
        &offers(world.companies(), world.active_policies()),
    );

    let world = world.map_companies(|company| {
        let stock_price = dynamics.stock_price(&company, mean_revenue);
        let reputation = dynamics.company_reputation(&company);
        company
            .with_stock_price_floored(stock_price)
            .with_reputation(reputation)
    });

    let mut bought = consumption.into_iter();
    let world = world.map_segments(|segment| match bought.next() {
        Some(consumption) => {
            let satisfaction = dynamics.satisfaction(&segment, &consumption);
            segment.with_satisfaction(satisfaction)
        }
        None => segment,
    });

    let segments = world.citizen_segments().to_vec();
    let world = world.map_parties(|party| {
        let popularity = dynamics.popularity(&party, &segments);
        let reputation = dynamics.party_reputation(&party);
        party.with_popularity(popularity).with_reputation(reputation)
    });

    advance_policies(world)
}

// Suspended and already expired policies are dropped rather than revived by
// the tick.
fn advance_policies(world: WorldState) -> WorldState {
    let before = world.active_policies().len();
    let remaining: Vec<Policy> = world
        .active_policies()
        .iter()
        .filter(|p| p.is_in_force())
        .map(Policy::tick)
        .filter(Policy::is_active)
        .collect();
    if remaining.len() != before {
        debug!(
            day = world.day(),
            expired = before - remaining.len(),
            "policies expired"
        );
    }
    world.with_active_policies(remaining)
}

/// Aggregate the day into a [`DaySummary`] listing the `top_n` companies by
/// revenue. Ties keep world order.
pub fn summarize(world: &WorldState, top_n: usize) -> DaySummary {
    let companies = world.companies();
    let total_revenue: f64 = companies.iter().map(Company::last_day_revenue).sum();
    let average_stock_price =
        companies.iter().map(Company::stock_price).sum::<f64>() / companies.len() as f64;

    let (weighted, population) = world
        .citizen_segments()
        .iter()
        .fold((0.0, 0.0), |(weighted, population), s| {
            let size = s.size() as f64;
            (weighted + s.satisfaction() * size, population + size)
        });
    let average_satisfaction = if population > 0.0 {
        weighted / population
    } else {
        0.0
    };

    let mut ranked: Vec<&Company> = companies.iter().collect();
    ranked.sort_by(|a, b| b.last_day_revenue().total_cmp(&a.last_day_revenue()));

    DaySummary::from_aggregates(DaySummarySpec {
        day: world.day(),
        total_revenue,
        average_stock_price,
        average_satisfaction,
        parties: world.parties().iter().map(PartySummary::from).collect(),
        top_companies: ranked
            .into_iter()
            .take(top_n)
            .map(CompanySummary::from)
            .collect(),
        events_count: u32::try_from(world.events_today().len()).unwrap_or(u32::MAX),
        active_policies_count: u32::try_from(world.active_policies().len()).unwrap_or(u32::MAX),
    })
}

/// Append the day's summary to the history.
pub fn record_summary(world: WorldState, top_n: usize) -> WorldState {
    let summary = summarize(&world, top_n);
    debug!(
        day = summary.day(),
        revenue = summary.total_revenue(),
        satisfaction = summary.average_satisfaction(),
        "day recorded"
    );
    world.with_summary(summary)
}
