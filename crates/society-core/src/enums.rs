use serde::{Deserialize, Serialize};
use std::fmt;

/// Economic sector a company operates in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    /// Rent and home building for occupants.
    Housing,
    /// Groceries and food retail.
    Food,
    Technology,
    /// Infrastructure and commercial building.
    Construction,
    Healthcare,
    /// Banking and insurance.
    Finance,
}

impl Sector {
    /// Every sector, in declaration order.
    pub const ALL: [Sector; 6] = [
        Sector::Housing,
        Sector::Food,
        Sector::Technology,
        Sector::Construction,
        Sector::Healthcare,
        Sector::Finance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Sector::Housing => "housing",
            Sector::Food => "food",
            Sector::Technology => "technology",
            Sector::Construction => "construction",
            Sector::Healthcare => "healthcare",
            Sector::Finance => "finance",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point on the left-right spectrum, shared by parties and citizen segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeologicalBias {
    /// Position -2.
    Left,
    /// Position -1.
    CenterLeft,
    /// Position 0.
    Center,
    /// Position 1.
    CenterRight,
    /// Position 2.
    Right,
}

impl IdeologicalBias {
    /// Every bias, from left to right.
    pub const ALL: [IdeologicalBias; 5] = [
        IdeologicalBias::Left,
        IdeologicalBias::CenterLeft,
        IdeologicalBias::Center,
        IdeologicalBias::CenterRight,
        IdeologicalBias::Right,
    ];

    /// Position on the spectrum, `-2` (left) through `2` (right).
    pub fn position(self) -> i8 {
        match self {
            IdeologicalBias::Left => -2,
            IdeologicalBias::CenterLeft => -1,
            IdeologicalBias::Center => 0,
            IdeologicalBias::CenterRight => 1,
            IdeologicalBias::Right => 2,
        }
    }

    /// Number of spectrum steps between two positions (0..=4).
    pub fn distance(self, other: IdeologicalBias) -> u8 {
        (self.position() - other.position()).unsigned_abs()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IdeologicalBias::Left => "left",
            IdeologicalBias::CenterLeft => "center_left",
            IdeologicalBias::Center => "center",
            IdeologicalBias::CenterRight => "center_right",
            IdeologicalBias::Right => "right",
        }
    }
}

impl fmt::Display for IdeologicalBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of events that can hit the world on a given day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Bad press for one company: reputation and stock price fall.
    CompanyScandal,
    /// Good results for one company.
    CompanySuccess,
    /// Downturn across a sector, felt by the segments exposed to it.
    SectorCrisis,
    /// Upswing across a sector.
    SectorBoom,
    /// Bad press for one party and its loyal segments.
    PartyScandal,
    PartySuccess,
    /// A party floats a policy; public reaction may go either way.
    PolicyProposal,
}

impl EventType {
    /// Every event type, in declaration order.
    pub const ALL: [EventType; 7] = [
        EventType::CompanyScandal,
        EventType::CompanySuccess,
        EventType::SectorCrisis,
        EventType::SectorBoom,
        EventType::PartyScandal,
        EventType::PartySuccess,
        EventType::PolicyProposal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::CompanyScandal => "company_scandal",
            EventType::CompanySuccess => "company_success",
            EventType::SectorCrisis => "sector_crisis",
            EventType::SectorBoom => "sector_boom",
            EventType::PartyScandal => "party_scandal",
            EventType::PartySuccess => "party_success",
            EventType::PolicyProposal => "policy_proposal",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
