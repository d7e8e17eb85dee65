use crate::enums::IdeologicalBias;
use crate::error::ValidationError;
use crate::validate::{clamp_score, non_negative, unit_interval};
use serde::{Deserialize, Serialize};

fn default_satisfaction() -> f64 {
    50.0
}

fn default_consumption_rate() -> f64 {
    0.1
}

/// Construction input for [`CitizenSegment`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CitizenSegmentSpec {
    pub id: String,
    pub name: String,
    /// Number of citizens represented (> 0).
    pub size: u64,
    pub wealth_per_capita: f64,
    #[serde(default = "default_satisfaction")]
    pub satisfaction: f64,
    #[serde(default)]
    pub preferred_party_id: Option<String>,
    pub ideological_bias: IdeologicalBias,
    /// Share of wealth spent per day, in [0,1].
    #[serde(default = "default_consumption_rate")]
    pub consumption_rate: f64,
}

impl CitizenSegmentSpec {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        size: u64,
        wealth_per_capita: f64,
        ideological_bias: IdeologicalBias,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size,
            wealth_per_capita,
            satisfaction: default_satisfaction(),
            preferred_party_id: None,
            ideological_bias,
            consumption_rate: default_consumption_rate(),
        }
    }
}

/// A group of citizens sharing a socioeconomic class.
///
/// Satisfaction is clamped into `[0, 100]`, while an out-of-range
/// consumption rate is rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CitizenSegmentSpec")]
pub struct CitizenSegment {
    id: String,
    name: String,
    size: u64,
    wealth_per_capita: f64,
    satisfaction: f64,
    preferred_party_id: Option<String>,
    ideological_bias: IdeologicalBias,
    consumption_rate: f64,
}

impl TryFrom<CitizenSegmentSpec> for CitizenSegment {
    type Error = ValidationError;

    fn try_from(spec: CitizenSegmentSpec) -> Result<Self, Self::Error> {
        CitizenSegment::new(spec)
    }
}

fn check_size(size: u64) -> Result<u64, ValidationError> {
    if size == 0 {
        return Err(ValidationError::OutOfRange {
            field: "size",
            constraint: "> 0",
            value: 0.0,
        });
    }
    Ok(size)
}

impl CitizenSegment {
    pub fn new(spec: CitizenSegmentSpec) -> Result<Self, ValidationError> {
        Ok(Self {
            size: check_size(spec.size)?,
            wealth_per_capita: non_negative("wealth_per_capita", spec.wealth_per_capita)?,
            satisfaction: clamp_score(spec.satisfaction),
            consumption_rate: unit_interval("consumption_rate", spec.consumption_rate)?,
            id: spec.id,
            name: spec.name,
            preferred_party_id: spec.preferred_party_id,
            ideological_bias: spec.ideological_bias,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of citizens, always > 0.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Wealth per citizen, never negative.
    pub fn wealth_per_capita(&self) -> f64 {
        self.wealth_per_capita
    }

    /// Contentment in [0,100].
    pub fn satisfaction(&self) -> f64 {
        self.satisfaction
    }

    /// Party the segment leans toward, if any. Not checked against the world.
    pub fn preferred_party_id(&self) -> Option<&str> {
        self.preferred_party_id.as_deref()
    }

    pub fn ideological_bias(&self) -> IdeologicalBias {
        self.ideological_bias
    }

    /// Share of total wealth spent per day, in [0,1].
    pub fn consumption_rate(&self) -> f64 {
        self.consumption_rate
    }

    /// Aggregate wealth of the segment; derived, never stored.
    pub fn total_wealth(&self) -> f64 {
        self.size as f64 * self.wealth_per_capita
    }

    /// Currency the segment wants to spend in one day.
    pub fn daily_budget(&self) -> f64 {
        self.total_wealth() * self.consumption_rate
    }

    pub fn with_satisfaction(self, satisfaction: f64) -> Self {
        Self {
            satisfaction: clamp_score(satisfaction),
            ..self
        }
    }

    pub fn with_preferred_party(self, party_id: Option<String>) -> Self {
        Self {
            preferred_party_id: party_id,
            ..self
        }
    }

    pub fn try_with_size(self, size: u64) -> Result<Self, ValidationError> {
        Ok(Self {
            size: check_size(size)?,
            ..self
        })
    }

    pub fn try_with_wealth_per_capita(self, wealth: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            wealth_per_capita: non_negative("wealth_per_capita", wealth)?,
            ..self
        })
    }

    pub fn try_with_consumption_rate(self, rate: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            consumption_rate: unit_interval("consumption_rate", rate)?,
            ..self
        })
    }
}
