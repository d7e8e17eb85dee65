use crate::enums::{EventType, Sector};
use serde::{Deserialize, Serialize};

/// Signed deltas applied uniformly to every target of an [`Event`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventEffect {
    /// Added to company or party reputation.
    pub reputation_delta: f64,
    /// Added to party popularity.
    pub popularity_delta: f64,
    /// Percentage change of company stock price (`-10.0` = -10%).
    pub stock_price_delta_percent: f64,
    /// Added to citizen segment satisfaction.
    pub satisfaction_delta: f64,
}

impl EventEffect {
    pub fn is_neutral(&self) -> bool {
        *self == EventEffect::default()
    }
}

/// Something that happened on a given day, with the entities it touches.
///
/// Target lists may be empty, may overlap, and may reference ids that do
/// not exist; the pipeline ignores unknown ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub day: u32,
    pub event_type: EventType,
    pub narrative: String,
    #[serde(default)]
    pub target_company_ids: Vec<String>,
    #[serde(default)]
    pub target_party_ids: Vec<String>,
    #[serde(default)]
    pub target_sectors: Vec<Sector>,
    pub effect: EventEffect,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        day: u32,
        event_type: EventType,
        narrative: impl Into<String>,
        effect: EventEffect,
    ) -> Self {
        Self {
            id: id.into(),
            day,
            event_type,
            narrative: narrative.into(),
            target_company_ids: Vec::new(),
            target_party_ids: Vec::new(),
            target_sectors: Vec::new(),
            effect,
        }
    }

    pub fn targeting_companies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_company_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn targeting_parties<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_party_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn targeting_sectors(mut self, sectors: impl IntoIterator<Item = Sector>) -> Self {
        self.target_sectors = sectors.into_iter().collect();
        self
    }

    /// Copy of this event stamped with another day.
    pub fn on_day(&self, day: u32) -> Self {
        Self {
            day,
            ..self.clone()
        }
    }
}
