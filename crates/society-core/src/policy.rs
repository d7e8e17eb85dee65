use crate::enums::Sector;
use crate::error::ValidationError;
use crate::validate::{finite, non_negative, positive};
use serde::{Deserialize, Serialize};

fn default_price_modifier() -> f64 {
    1.0
}

fn default_active() -> bool {
    true
}

/// Construction input for [`PolicyEffect`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyEffectSpec {
    /// Sector the policy applies to; `None` applies to every sector.
    #[serde(default)]
    pub target_sector: Option<Sector>,
    /// Multiplier on the price level (> 0, 1.0 = unchanged).
    #[serde(default = "default_price_modifier")]
    pub price_modifier: f64,
    #[serde(default)]
    pub tax_rate_delta: f64,
    /// Daily subsidy paid to each matching company (>= 0).
    #[serde(default)]
    pub subsidy_amount: f64,
    #[serde(default)]
    pub reputation_boost: f64,
}

impl Default for PolicyEffectSpec {
    fn default() -> Self {
        Self {
            target_sector: None,
            price_modifier: default_price_modifier(),
            tax_rate_delta: 0.0,
            subsidy_amount: 0.0,
            reputation_boost: 0.0,
        }
    }
}

/// Numeric effects of a government policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolicyEffectSpec")]
pub struct PolicyEffect {
    target_sector: Option<Sector>,
    price_modifier: f64,
    tax_rate_delta: f64,
    subsidy_amount: f64,
    reputation_boost: f64,
}

impl Default for PolicyEffect {
    fn default() -> Self {
        let spec = PolicyEffectSpec::default();
        Self {
            target_sector: spec.target_sector,
            price_modifier: spec.price_modifier,
            tax_rate_delta: spec.tax_rate_delta,
            subsidy_amount: spec.subsidy_amount,
            reputation_boost: spec.reputation_boost,
        }
    }
}

impl TryFrom<PolicyEffectSpec> for PolicyEffect {
    type Error = ValidationError;

    fn try_from(spec: PolicyEffectSpec) -> Result<Self, Self::Error> {
        PolicyEffect::new(spec)
    }
}

impl PolicyEffect {
    pub fn new(spec: PolicyEffectSpec) -> Result<Self, ValidationError> {
        Ok(Self {
            target_sector: spec.target_sector,
            price_modifier: positive("price_modifier", spec.price_modifier)?,
            tax_rate_delta: finite("tax_rate_delta", spec.tax_rate_delta)?,
            subsidy_amount: non_negative("subsidy_amount", spec.subsidy_amount)?,
            reputation_boost: finite("reputation_boost", spec.reputation_boost)?,
        })
    }

    /// Sector covered, or `None` for every sector.
    pub fn target_sector(&self) -> Option<Sector> {
        self.target_sector
    }

    /// Factor applied to the price level of covered companies.
    pub fn price_modifier(&self) -> f64 {
        self.price_modifier
    }

    /// Share of revenue withheld, summed across policies.
    pub fn tax_rate_delta(&self) -> f64 {
        self.tax_rate_delta
    }

    /// Cash paid to each covered company per day.
    pub fn subsidy_amount(&self) -> f64 {
        self.subsidy_amount
    }

    /// Reputation added to each covered company per day.
    pub fn reputation_boost(&self) -> f64 {
        self.reputation_boost
    }

    /// Whether companies in `sector` fall under this effect.
    pub fn applies_to(&self, sector: Sector) -> bool {
        self.target_sector.map_or(true, |target| target == sector)
    }
}

/// Construction input for [`Policy`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicySpec {
    pub id: String,
    pub name: String,
    pub description: String,
    pub proposed_by_party_id: String,
    pub effect: PolicyEffect,
    pub duration_days: u32,
    pub remaining_days: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl PolicySpec {
    /// A freshly enacted policy with its full duration left.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        proposed_by_party_id: impl Into<String>,
        effect: PolicyEffect,
        duration_days: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            proposed_by_party_id: proposed_by_party_id.into(),
            effect,
            duration_days,
            remaining_days: duration_days,
            is_active: true,
        }
    }
}

/// A government policy in force for a limited number of days.
///
/// Invariant: `0 < duration_days` and `remaining_days <= duration_days`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolicySpec")]
pub struct Policy {
    id: String,
    name: String,
    description: String,
    proposed_by_party_id: String,
    effect: PolicyEffect,
    duration_days: u32,
    remaining_days: u32,
    is_active: bool,
}

impl TryFrom<PolicySpec> for Policy {
    type Error = ValidationError;

    fn try_from(spec: PolicySpec) -> Result<Self, Self::Error> {
        Policy::new(spec)
    }
}

fn check_days(duration: u32, remaining: u32) -> Result<(), ValidationError> {
    if duration == 0 {
        return Err(ValidationError::OutOfRange {
            field: "duration_days",
            constraint: "> 0",
            value: 0.0,
        });
    }
    if remaining > duration {
        return Err(ValidationError::RemainingExceedsDuration {
            remaining,
            duration,
        });
    }
    Ok(())
}

impl Policy {
    pub fn new(spec: PolicySpec) -> Result<Self, ValidationError> {
        check_days(spec.duration_days, spec.remaining_days)?;
        Ok(Self {
            id: spec.id,
            name: spec.name,
            description: spec.description,
            proposed_by_party_id: spec.proposed_by_party_id,
            effect: spec.effect,
            duration_days: spec.duration_days,
            remaining_days: spec.remaining_days,
            is_active: spec.is_active,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Party that proposed the policy.
    pub fn proposed_by_party_id(&self) -> &str {
        &self.proposed_by_party_id
    }

    pub fn effect(&self) -> &PolicyEffect {
        &self.effect
    }

    /// Total lifetime in days, always > 0.
    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    /// Days left, at most [`Policy::duration_days`].
    pub fn remaining_days(&self) -> u32 {
        self.remaining_days
    }

    /// Active flag as stored. See [`Policy::is_in_force`] for whether the
    /// policy acts today.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Active with days left. An expired policy never acts, whatever its
    /// stored flag says.
    pub fn is_in_force(&self) -> bool {
        self.is_active && self.remaining_days > 0
    }

    /// Advance the policy by one day.
    ///
    /// `remaining_days` drops by one, floored at zero, and the policy stays
    /// active only while days remain. Ticking an expired policy is a no-op.
    pub fn tick(&self) -> Policy {
        let remaining_days = self.remaining_days.saturating_sub(1);
        Policy {
            remaining_days,
            is_active: remaining_days > 0,
            ..self.clone()
        }
    }

    pub fn try_with_remaining_days(self, remaining_days: u32) -> Result<Self, ValidationError> {
        check_days(self.duration_days, remaining_days)?;
        Ok(Self {
            remaining_days,
            ..self
        })
    }

    pub fn with_active(self, is_active: bool) -> Self {
        Self { is_active, ..self }
    }
}
