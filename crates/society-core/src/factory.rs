//! Built-in starting world.

use crate::citizen::{CitizenSegment, CitizenSegmentSpec};
use crate::company::{Company, CompanySpec};
use crate::enums::{IdeologicalBias, Sector};
use crate::error::ValidationError;
use crate::party::{Party, PartySpec};
use crate::world::WorldState;

// id, name, sector, base quality, base price level, reputation, stock price, cash
type CompanyRow = (&'static str, &'static str, Sector, f64, f64, f64, f64, f64);

#[rustfmt::skip]
const COMPANIES: [CompanyRow; 8] = {
    use Sector::*;
    [
        ("housing-001", "Hearthstone Homes", Housing, 0.7, 0.6, 55.0, 120.0, 2_000_000.0),
        ("food-001", "Fresh Fields", Food, 0.8, 0.4, 60.0, 80.0, 1_500_000.0),
        ("food-002", "ThriftMart", Food, 0.5, 0.2, 45.0, 50.0, 800_000.0),
        ("tech-001", "Brightwave Labs", Technology, 0.9, 0.8, 70.0, 200.0, 5_000_000.0),
        ("tech-002", "Codeworks", Technology, 0.7, 0.5, 50.0, 90.0, 1_200_000.0),
        ("const-001", "Keystone Builders", Construction, 0.6, 0.5, 48.0, 75.0, 1_800_000.0),
        ("health-001", "Meridian Health", Healthcare, 0.85, 0.7, 65.0, 150.0, 3_000_000.0),
        ("finance-001", "Anchor Bank", Finance, 0.75, 0.6, 55.0, 180.0, 10_000_000.0),
    ]
};

// id, name, ideology, popularity, reputation, in government
type PartyRow = (&'static str, &'static str, IdeologicalBias, f64, f64, bool);

#[rustfmt::skip]
const PARTIES: [PartyRow; 4] = {
    use IdeologicalBias::*;
    [
        ("party-left", "Progressive Party", Left, 22.0, 52.0, false),
        ("party-center-left", "Social Democrats", CenterLeft, 28.0, 55.0, true),
        ("party-center-right", "Liberal Party", CenterRight, 25.0, 50.0, false),
        ("party-right", "Conservative Party", Right, 20.0, 48.0, false),
    ]
};

// id, name, size, wealth per capita, ideology, satisfaction, preferred party,
// consumption rate
type SegmentRow = (&'static str, &'static str, u64, f64, IdeologicalBias, f64, &'static str, f64);

#[rustfmt::skip]
const SEGMENTS: [SegmentRow; 4] = {
    use IdeologicalBias::*;
    [
        ("seg-upper", "Upper Class", 500_000, 200_000.0, CenterRight,
            70.0, "party-center-right", 0.15),
        ("seg-middle", "Middle Class", 3_000_000, 50_000.0, Center,
            55.0, "party-center-left", 0.10),
        ("seg-working", "Working Class", 5_000_000, 20_000.0, CenterLeft,
            45.0, "party-center-left", 0.08),
        ("seg-precarious", "Unemployed and Precarious", 1_500_000, 5_000.0, Left,
            30.0, "party-left", 0.05),
    ]
};

fn initial_companies() -> Result<Vec<Company>, ValidationError> {
    COMPANIES
        .iter()
        .map(|&(id, name, sector, quality, price_level, reputation, stock_price, cash)| {
            Company::new(CompanySpec {
                reputation,
                stock_price,
                cash,
                ..CompanySpec::new(id, name, sector, quality, price_level)
            })
        })
        .collect()
}

fn initial_parties() -> Vec<Party> {
    PARTIES
        .iter()
        .map(|&(id, name, ideology, popularity, reputation, in_government)| {
            Party::new(PartySpec {
                popularity,
                reputation,
                in_government,
                ..PartySpec::new(id, name, ideology)
            })
        })
        .collect()
}

fn initial_segments() -> Result<Vec<CitizenSegment>, ValidationError> {
    SEGMENTS
        .iter()
        .map(|&(id, name, size, wealth, ideology, satisfaction, party, consumption_rate)| {
            CitizenSegment::new(CitizenSegmentSpec {
                satisfaction,
                preferred_party_id: Some(party.to_string()),
                consumption_rate,
                ..CitizenSegmentSpec::new(id, name, size, wealth, ideology)
            })
        })
        .collect()
}

/// Build the starting world, propagating any seed-data validation error.
pub fn try_create_initial_world() -> Result<WorldState, ValidationError> {
    WorldState::new(initial_companies()?, initial_parties(), initial_segments()?)
}

/// Day-zero world: eight companies across all six sectors, four parties with
/// the center-left in government, and four citizen segments.
///
/// Stateless: every call returns a fresh, equal value.
pub fn create_initial_world() -> WorldState {
    try_create_initial_world().expect("built-in seed data satisfies all invariants")
}
