use crate::enums::IdeologicalBias;
use crate::validate::clamp_score;
use serde::{Deserialize, Serialize};

fn default_popularity() -> f64 {
    20.0
}

fn default_reputation() -> f64 {
    50.0
}

/// Construction input for [`Party`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartySpec {
    pub id: String,
    pub name: String,
    pub ideology: IdeologicalBias,
    #[serde(default = "default_popularity")]
    pub popularity: f64,
    #[serde(default = "default_reputation")]
    pub reputation: f64,
    #[serde(default)]
    pub in_government: bool,
}

impl PartySpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>, ideology: IdeologicalBias) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ideology,
            popularity: default_popularity(),
            reputation: default_reputation(),
            in_government: false,
        }
    }
}

/// A political party. Popularity and reputation are clamped into `[0, 100]`,
/// so constructing a party never fails.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "PartySpec")]
pub struct Party {
    id: String,
    name: String,
    ideology: IdeologicalBias,
    popularity: f64,
    reputation: f64,
    in_government: bool,
}

impl From<PartySpec> for Party {
    fn from(spec: PartySpec) -> Self {
        Party::new(spec)
    }
}

impl Party {
    pub fn new(spec: PartySpec) -> Self {
        Self {
            id: spec.id,
            name: spec.name,
            ideology: spec.ideology,
            popularity: clamp_score(spec.popularity),
            reputation: clamp_score(spec.reputation),
            in_government: spec.in_government,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ideology(&self) -> IdeologicalBias {
        self.ideology
    }

    /// Share of public support in [0,100].
    pub fn popularity(&self) -> f64 {
        self.popularity
    }

    /// Public standing in [0,100].
    pub fn reputation(&self) -> f64 {
        self.reputation
    }

    /// Whether the party currently governs.
    pub fn in_government(&self) -> bool {
        self.in_government
    }

    pub fn with_popularity(self, popularity: f64) -> Self {
        Self {
            popularity: clamp_score(popularity),
            ..self
        }
    }

    pub fn with_reputation(self, reputation: f64) -> Self {
        Self {
            reputation: clamp_score(reputation),
            ..self
        }
    }

    pub fn with_in_government(self, in_government: bool) -> Self {
        Self {
            in_government,
            ..self
        }
    }
}
