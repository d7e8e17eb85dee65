use crate::company::Company;
use crate::error::ValidationError;
use crate::party::Party;
use crate::validate::{clamp_score, non_negative, score_in_range};
use serde::{Deserialize, Serialize};

/// End-of-day snapshot of one party.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartySummary {
    pub party_id: String,
    pub name: String,
    pub popularity: f64,
    pub reputation: f64,
}

impl From<&Party> for PartySummary {
    fn from(party: &Party) -> Self {
        Self {
            party_id: party.id().to_string(),
            name: party.name().to_string(),
            popularity: party.popularity(),
            reputation: party.reputation(),
        }
    }
}

/// End-of-day snapshot of one company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub company_id: String,
    pub name: String,
    pub stock_price: f64,
    pub reputation: f64,
    pub revenue: f64,
}

impl From<&Company> for CompanySummary {
    fn from(company: &Company) -> Self {
        Self {
            company_id: company.id().to_string(),
            name: company.name().to_string(),
            stock_price: company.stock_price(),
            reputation: company.reputation(),
            revenue: company.last_day_revenue(),
        }
    }
}

/// Construction input for [`DaySummary`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySummarySpec {
    pub day: u32,
    pub total_revenue: f64,
    pub average_stock_price: f64,
    pub average_satisfaction: f64,
    #[serde(default)]
    pub parties: Vec<PartySummary>,
    #[serde(default)]
    pub top_companies: Vec<CompanySummary>,
    #[serde(default)]
    pub events_count: u32,
    #[serde(default)]
    pub active_policies_count: u32,
}

/// Immutable aggregate of one simulated day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DaySummarySpec")]
pub struct DaySummary {
    day: u32,
    total_revenue: f64,
    average_stock_price: f64,
    average_satisfaction: f64,
    parties: Vec<PartySummary>,
    top_companies: Vec<CompanySummary>,
    events_count: u32,
    active_policies_count: u32,
}

impl TryFrom<DaySummarySpec> for DaySummary {
    type Error = ValidationError;

    fn try_from(spec: DaySummarySpec) -> Result<Self, Self::Error> {
        DaySummary::new(spec)
    }
}

fn settle_non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else if value == f64::INFINITY {
        f64::MAX
    } else {
        0.0
    }
}

impl DaySummary {
    pub fn new(spec: DaySummarySpec) -> Result<Self, ValidationError> {
        Ok(Self {
            day: spec.day,
            total_revenue: non_negative("total_revenue", spec.total_revenue)?,
            average_stock_price: non_negative("average_stock_price", spec.average_stock_price)?,
            average_satisfaction: score_in_range(
                "average_satisfaction",
                spec.average_satisfaction,
            )?,
            parties: spec.parties,
            top_companies: spec.top_companies,
            events_count: spec.events_count,
            active_policies_count: spec.active_policies_count,
        })
    }

    /// Build a summary from values computed by the pipeline, settling any
    /// out-of-range aggregate on its nearest valid value instead of failing.
    pub fn from_aggregates(spec: DaySummarySpec) -> Self {
        Self {
            day: spec.day,
            total_revenue: settle_non_negative(spec.total_revenue),
            average_stock_price: settle_non_negative(spec.average_stock_price),
            average_satisfaction: clamp_score(spec.average_satisfaction),
            parties: spec.parties,
            top_companies: spec.top_companies,
            events_count: spec.events_count,
            active_policies_count: spec.active_policies_count,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Sum of every company's revenue for the day.
    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    /// Unweighted mean over all companies.
    pub fn average_stock_price(&self) -> f64 {
        self.average_stock_price
    }

    /// Mean satisfaction weighted by segment size.
    pub fn average_satisfaction(&self) -> f64 {
        self.average_satisfaction
    }

    pub fn parties(&self) -> &[PartySummary] {
        &self.parties
    }

    /// Highest revenue first.
    pub fn top_companies(&self) -> &[CompanySummary] {
        &self.top_companies
    }

    pub fn events_count(&self) -> u32 {
        self.events_count
    }

    /// Policies still running after the day's tick.
    pub fn active_policies_count(&self) -> u32 {
        self.active_policies_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> DaySummarySpec {
        DaySummarySpec {
            day: 4,
            total_revenue: 4500.0,
            average_stock_price: 150.0,
            average_satisfaction: 64.0,
            ..DaySummarySpec::default()
        }
    }

    #[test]
    fn aggregates_are_rejected_not_clamped() {
        let err = DaySummary::new(DaySummarySpec {
            total_revenue: -1.0,
            ..spec()
        })
        .unwrap_err();
        assert_eq!(err.field(), "total_revenue");
        let err = DaySummary::new(DaySummarySpec {
            average_stock_price: -0.1,
            ..spec()
        })
        .unwrap_err();
        assert_eq!(err.field(), "average_stock_price");
        let err = DaySummary::new(DaySummarySpec {
            average_satisfaction: 100.5,
            ..spec()
        })
        .unwrap_err();
        assert_eq!(err.field(), "average_satisfaction");
    }

    #[test]
    fn from_aggregates_settles_out_of_range_values() {
        let s = DaySummary::from_aggregates(DaySummarySpec {
            total_revenue: -3.0,
            average_stock_price: f64::NAN,
            average_satisfaction: 130.0,
            ..spec()
        });
        assert_eq!(s.total_revenue(), 0.0);
        assert_eq!(s.average_stock_price(), 0.0);
        assert_eq!(s.average_satisfaction(), 100.0);
    }

    #[test]
    fn decode_rejects_negative_counts() {
        let json = r#"{
            "day": 0,
            "total_revenue": 0,
            "average_stock_price": 0,
            "average_satisfaction": 0,
            "events_count": -1
        }"#;
        assert!(serde_json::from_str::<DaySummary>(json).is_err());
    }

    #[test]
    fn valid_summary_keeps_values() {
        let s = DaySummary::new(spec()).unwrap();
        assert_eq!(s.day(), 4);
        assert_eq!(s.total_revenue(), 4500.0);
        assert!(s.parties().is_empty());
        assert_eq!(s.events_count(), 0);
    }
}
