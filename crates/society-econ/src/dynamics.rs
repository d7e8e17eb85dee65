//! End-of-day entity dynamics.
//!
//! Models return raw target values; the pipeline is responsible for
//! settling them into valid ranges through the entities' clamping and
//! saturating builders.

use crate::market::Consumption;
use crate::EconError;
use serde::{Deserialize, Serialize};
use society_core::{CitizenSegment, Company, Party};

/// Entity-update collaborator used after the market has cleared.
pub trait DynamicsModel: Send + Sync {
    /// New stock price given the mean revenue of all companies today.
    fn stock_price(&self, company: &Company, mean_revenue: f64) -> f64;
    fn company_reputation(&self, company: &Company) -> f64;
    fn party_reputation(&self, party: &Party) -> f64;
    /// New satisfaction given what the segment bought today.
    fn satisfaction(&self, segment: &CitizenSegment, consumption: &Consumption) -> f64;
    /// New popularity given the (already updated) citizen segments.
    fn popularity(&self, party: &Party, segments: &[CitizenSegment]) -> f64;
}

/// Trend-following prices, mean-reverting reputations, satisfaction that
/// tracks purchasing value, popularity that tracks aligned satisfaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendDynamics {
    /// Max fractional stock move per day when revenue is far from the mean.
    pub stock_sensitivity: f64,
    /// Reputation level both companies and parties drift toward.
    pub reputation_equilibrium: f64,
    /// Fraction of the gap to equilibrium closed per day.
    pub reputation_reversion: f64,
    /// Fraction of the gap to target satisfaction closed per day.
    pub satisfaction_rate: f64,
    /// Popularity points gained or lost per day at maximal (dis)content.
    pub popularity_sensitivity: f64,
}

impl Default for TrendDynamics {
    fn default() -> Self {
        Self {
            stock_sensitivity: 0.05,
            reputation_equilibrium: 50.0,
            reputation_reversion: 0.02,
            satisfaction_rate: 0.1,
            popularity_sensitivity: 0.5,
        }
    }
}

impl TrendDynamics {
    pub fn validate(&self) -> Result<(), EconError> {
        let unit = [
            ("stock_sensitivity", self.stock_sensitivity),
            ("reputation_reversion", self.reputation_reversion),
            ("satisfaction_rate", self.satisfaction_rate),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(EconError::InvalidParameter { name, value });
            }
        }
        if !(0.0..=100.0).contains(&self.reputation_equilibrium) {
            return Err(EconError::InvalidParameter {
                name: "reputation_equilibrium",
                value: self.reputation_equilibrium,
            });
        }
        if !self.popularity_sensitivity.is_finite() || self.popularity_sensitivity < 0.0 {
            return Err(EconError::InvalidParameter {
                name: "popularity_sensitivity",
                value: self.popularity_sensitivity,
            });
        }
        Ok(())
    }

    fn revert(&self, value: f64) -> f64 {
        value + (self.reputation_equilibrium - value) * self.reputation_reversion
    }
}

/// How strongly a segment's mood reflects on a party, in [0,1].
///
/// Segments that name the party as preferred count fully; otherwise the
/// weight falls linearly with ideological distance.
pub fn alignment(party: &Party, segment: &CitizenSegment) -> f64 {
    if segment.preferred_party_id() == Some(party.id()) {
        return 1.0;
    }
    1.0 - f64::from(party.ideology().distance(segment.ideological_bias())) / 4.0
}

impl DynamicsModel for TrendDynamics {
    fn stock_price(&self, company: &Company, mean_revenue: f64) -> f64 {
        if !(mean_revenue.is_finite() && mean_revenue > 0.0) {
            return company.stock_price();
        }
        let signal = (company.last_day_revenue() / mean_revenue - 1.0).clamp(-1.0, 1.0);
        company.stock_price() * (1.0 + self.stock_sensitivity * signal)
    }

    fn company_reputation(&self, company: &Company) -> f64 {
        self.revert(company.reputation())
    }

    fn party_reputation(&self, party: &Party) -> f64 {
        self.revert(party.reputation())
    }

    fn satisfaction(&self, segment: &CitizenSegment, consumption: &Consumption) -> f64 {
        let current = segment.satisfaction();
        if consumption.budget <= 0.0 || consumption.spent <= 0.0 {
            return current;
        }
        let target = 50.0 * consumption.value_index * (0.5 + consumption.mean_quality);
        let target = target.clamp(0.0, 100.0);
        current + (target - current) * self.satisfaction_rate
    }

    fn popularity(&self, party: &Party, segments: &[CitizenSegment]) -> f64 {
        let mut weight_sum = 0.0;
        let mut weighted = 0.0;
        for segment in segments {
            let w = segment.size() as f64 * alignment(party, segment);
            weight_sum += w;
            weighted += w * segment.satisfaction();
        }
        if weight_sum <= 0.0 {
            return party.popularity();
        }
        let mood = (weighted / weight_sum - 50.0) / 50.0;
        let signed = if party.in_government() { mood } else { -mood };
        party.popularity() + self.popularity_sensitivity * signed
    }
}
