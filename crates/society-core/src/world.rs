use crate::citizen::CitizenSegment;
use crate::company::Company;
use crate::enums::Sector;
use crate::error::{EntityKind, ValidationError};
use crate::event::Event;
use crate::party::Party;
use crate::policy::Policy;
use crate::summary::DaySummary;
use serde::{Deserialize, Serialize};

/// Construction input for [`WorldState`], also its decoded form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSpec {
    #[serde(default)]
    pub day: u32,
    pub companies: Vec<Company>,
    pub parties: Vec<Party>,
    pub citizen_segments: Vec<CitizenSegment>,
    #[serde(default)]
    pub active_policies: Vec<Policy>,
    #[serde(default)]
    pub events_today: Vec<Event>,
    #[serde(default)]
    pub history: Vec<DaySummary>,
}

/// Every entity of the simulation at one instant.
///
/// There is no in-place mutation API: each change produces a new value.
/// Companies, parties and citizen segments are never empty, and `history`
/// can only grow through [`WorldState::with_summary`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorldSpec")]
pub struct WorldState {
    day: u32,
    companies: Vec<Company>,
    parties: Vec<Party>,
    citizen_segments: Vec<CitizenSegment>,
    active_policies: Vec<Policy>,
    events_today: Vec<Event>,
    history: Vec<DaySummary>,
}

impl TryFrom<WorldSpec> for WorldState {
    type Error = ValidationError;

    fn try_from(spec: WorldSpec) -> Result<Self, Self::Error> {
        WorldState::from_spec(spec)
    }
}

fn non_empty<T>(items: Vec<T>, kind: EntityKind) -> Result<Vec<T>, ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::MissingEntities(kind));
    }
    Ok(items)
}

impl WorldState {
    /// A day-zero world with no policies, events or history.
    pub fn new(
        companies: Vec<Company>,
        parties: Vec<Party>,
        citizen_segments: Vec<CitizenSegment>,
    ) -> Result<Self, ValidationError> {
        Self::from_spec(WorldSpec {
            day: 0,
            companies,
            parties,
            citizen_segments,
            active_policies: Vec::new(),
            events_today: Vec::new(),
            history: Vec::new(),
        })
    }

    pub fn from_spec(spec: WorldSpec) -> Result<Self, ValidationError> {
        Ok(Self {
            day: spec.day,
            companies: non_empty(spec.companies, EntityKind::Company)?,
            parties: non_empty(spec.parties, EntityKind::Party)?,
            citizen_segments: non_empty(spec.citizen_segments, EntityKind::CitizenSegment)?,
            active_policies: spec.active_policies,
            events_today: spec.events_today,
            history: spec.history,
        })
    }

    /// Unwrap into the plain record, for editing and rebuilding through
    /// [`WorldState::from_spec`].
    pub fn into_spec(self) -> WorldSpec {
        WorldSpec {
            day: self.day,
            companies: self.companies,
            parties: self.parties,
            citizen_segments: self.citizen_segments,
            active_policies: self.active_policies,
            events_today: self.events_today,
            history: self.history,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    pub fn citizen_segments(&self) -> &[CitizenSegment] {
        &self.citizen_segments
    }

    pub fn active_policies(&self) -> &[Policy] {
        &self.active_policies
    }

    pub fn events_today(&self) -> &[Event] {
        &self.events_today
    }

    pub fn history(&self) -> &[DaySummary] {
        &self.history
    }

    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id() == id)
    }

    pub fn party(&self, id: &str) -> Option<&Party> {
        self.parties.iter().find(|p| p.id() == id)
    }

    pub fn segment(&self, id: &str) -> Option<&CitizenSegment> {
        self.citizen_segments.iter().find(|s| s.id() == id)
    }

    /// Companies operating in `sector`, in world order.
    pub fn companies_in_sector(&self, sector: Sector) -> Vec<&Company> {
        self.companies.iter().filter(|c| c.sector() == sector).collect()
    }

    /// The party currently in government, if any. The first one wins when
    /// several are flagged.
    pub fn governing_party(&self) -> Option<&Party> {
        self.parties.iter().find(|p| p.in_government())
    }

    pub fn try_with_companies(self, companies: Vec<Company>) -> Result<Self, ValidationError> {
        Ok(Self {
            companies: non_empty(companies, EntityKind::Company)?,
            ..self
        })
    }

    pub fn try_with_parties(self, parties: Vec<Party>) -> Result<Self, ValidationError> {
        Ok(Self {
            parties: non_empty(parties, EntityKind::Party)?,
            ..self
        })
    }

    pub fn try_with_segments(self, segments: Vec<CitizenSegment>) -> Result<Self, ValidationError> {
        Ok(Self {
            citizen_segments: non_empty(segments, EntityKind::CitizenSegment)?,
            ..self
        })
    }

    /// Replace every company with `f(company)`, keeping count and order.
    pub fn map_companies(self, f: impl FnMut(Company) -> Company) -> Self {
        Self {
            companies: self.companies.into_iter().map(f).collect(),
            ..self
        }
    }

    /// Replace every party with `f(party)`, keeping count and order.
    pub fn map_parties(self, f: impl FnMut(Party) -> Party) -> Self {
        Self {
            parties: self.parties.into_iter().map(f).collect(),
            ..self
        }
    }

    /// Replace every citizen segment with `f(segment)`, keeping count and order.
    pub fn map_segments(self, f: impl FnMut(CitizenSegment) -> CitizenSegment) -> Self {
        Self {
            citizen_segments: self.citizen_segments.into_iter().map(f).collect(),
            ..self
        }
    }

    pub fn with_active_policies(self, active_policies: Vec<Policy>) -> Self {
        Self {
            active_policies,
            ..self
        }
    }

    /// Add a policy to the active set.
    pub fn enact_policy(mut self, policy: Policy) -> Self {
        self.active_policies.push(policy);
        self
    }

    pub fn with_events_today(self, events_today: Vec<Event>) -> Self {
        Self {
            events_today,
            ..self
        }
    }

    /// Append a day summary to the history.
    pub fn with_summary(mut self, summary: DaySummary) -> Self {
        self.history.push(summary);
        self
    }

    /// Move the day counter forward by one. The counter stops at `u32::MAX`,
    /// far past any run the pipeline is meant for.
    pub fn advance_day(self) -> Self {
        Self {
            day: self.day.saturating_add(1),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citizen::CitizenSegmentSpec;
    use crate::company::CompanySpec;
    use crate::enums::IdeologicalBias;
    use crate::party::PartySpec;
    use crate::policy::{PolicyEffect, PolicySpec};

    fn company(id: &str, sector: Sector) -> Company {
        Company::new(CompanySpec::new(id, id.to_uppercase(), sector, 0.5, 0.5)).unwrap()
    }

    fn party(id: &str) -> Party {
        Party::new(PartySpec::new(id, id, IdeologicalBias::Center))
    }

    fn segment(id: &str) -> CitizenSegment {
        CitizenSegment::new(CitizenSegmentSpec::new(id, id, 100, 1_000.0, IdeologicalBias::Center))
            .unwrap()
    }

    fn world() -> WorldState {
        WorldState::new(
            vec![
                company("a", Sector::Food),
                company("b", Sector::Housing),
                company("c", Sector::Food),
            ],
            vec![party("p1"), party("p2")],
            vec![segment("s1")],
        )
        .unwrap()
    }

    #[test]
    fn new_world_starts_empty() {
        let w = world();
        assert_eq!(w.day(), 0);
        assert!(w.active_policies().is_empty());
        assert!(w.events_today().is_empty());
        assert!(w.history().is_empty());
    }

    #[test]
    fn lookups_return_none_when_missing() {
        let w = world();
        assert_eq!(w.company("b").map(Company::name), Some("B"));
        assert!(w.company("zzz").is_none());
        assert!(w.party("p2").is_some());
        assert!(w.party("nope").is_none());
        assert!(w.segment("s1").is_some());
        assert!(w.segment("s2").is_none());
        assert!(w.governing_party().is_none());
    }

    #[test]
    fn sector_filter_keeps_order() {
        let w = world();
        let ids: Vec<&str> = w.companies_in_sector(Sector::Food).iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(w.companies_in_sector(Sector::Finance).is_empty());
    }

    #[test]
    fn empty_collections_are_rejected() {
        let err = WorldState::new(vec![], vec![party("p")], vec![segment("s")]).unwrap_err();
        assert_eq!(err, ValidationError::MissingEntities(EntityKind::Company));
        assert!(err.to_string().contains("company"));
        let err = WorldState::new(vec![company("a", Sector::Food)], vec![], vec![segment("s")])
            .unwrap_err();
        assert!(err.to_string().contains("party"));
        let err = WorldState::new(vec![company("a", Sector::Food)], vec![party("p")], vec![])
            .unwrap_err();
        assert!(err.to_string().contains("citizen segment"));
    }

    #[test]
    fn reconstruction_revalidates() {
        let w = world();
        assert!(w.clone().try_with_companies(vec![]).is_err());
        assert!(w.clone().try_with_parties(vec![]).is_err());
        assert!(w.clone().try_with_segments(vec![]).is_err());
        let w = w.try_with_parties(vec![party("solo")]).unwrap();
        assert_eq!(w.parties().len(), 1);
    }

    #[test]
    fn map_preserves_identity() {
        let w = world().map_companies(|c| c.with_reputation(99.0));
        let ids: Vec<&str> = w.companies().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(w.companies().iter().all(|c| c.reputation() == 99.0));
    }

    #[test]
    fn decode_rejects_empty_companies() {
        let w = world();
        let mut value = serde_json::to_value(&w).unwrap();
        value["companies"] = serde_json::json!([]);
        let err = serde_json::from_value::<WorldState>(value).unwrap_err();
        assert!(err.to_string().contains("company"));
    }

    #[test]
    fn advance_day_increments_once() {
        let w = world().advance_day().advance_day();
        assert_eq!(w.day(), 2);
    }

    #[test]
    fn advance_day_stops_at_ceiling() {
        let mut spec = world().into_spec();
        spec.day = u32::MAX;
        let w = WorldState::from_spec(spec).unwrap().advance_day();
        assert_eq!(w.day(), u32::MAX);
    }

    #[test]
    fn spec_round_trip_keeps_state_and_checks_edits() {
        let policy = PolicySpec::new("pol", "Pol", "", "p1", PolicyEffect::default(), 3);
        let w = world()
            .enact_policy(Policy::new(policy).unwrap())
            .advance_day();
        assert_eq!(WorldState::from_spec(w.clone().into_spec()).unwrap(), w);

        let mut spec = w.into_spec();
        spec.citizen_segments.clear();
        assert_eq!(
            WorldState::from_spec(spec).unwrap_err(),
            ValidationError::MissingEntities(EntityKind::CitizenSegment)
        );
    }
}
