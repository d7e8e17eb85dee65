//! Daily market clearing.
//!
//! Every citizen segment spends `total_wealth × consumption_rate` per day.
//! The budget is split across companies proportionally to the pricing
//! model's attractiveness score; the unit price then decides how many units
//! that money buys. No currency is created or lost.

use crate::EconError;
use serde::{Deserialize, Serialize};
use society_core::{CitizenSegment, Company, Policy};
use tracing::trace;

/// Price level at which one unit costs the reference price.
pub const REFERENCE_PRICE_LEVEL: f64 = 0.5;

/// Pricing collaborator consulted by [`clear_market`].
pub trait PricingModel: Send + Sync {
    /// Relative pull of `company` on consumer spending. Must be >= 0;
    /// negative or NaN values are treated as zero.
    fn attractiveness(&self, company: &Company, price_level: f64) -> f64;

    /// Currency needed for one unit at `price_level`. Must be > 0 and
    /// non-decreasing in the price level.
    fn unit_price(&self, price_level: f64) -> f64;
}

/// Linear attractiveness in quality and reputation, linear unit price in the
/// price level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearPricing {
    /// Weight of `base_quality` (in [0,1]).
    pub quality_weight: f64,
    /// Weight of `reputation / 100`.
    pub reputation_weight: f64,
    /// Unit price at price level 0.
    pub min_unit_price: f64,
    /// Unit price at price level 1.
    pub max_unit_price: f64,
}

impl Default for LinearPricing {
    fn default() -> Self {
        Self {
            quality_weight: 0.6,
            reputation_weight: 0.4,
            min_unit_price: 5.0,
            max_unit_price: 50.0,
        }
    }
}

impl LinearPricing {
    pub fn validate(&self) -> Result<(), EconError> {
        let weights = [
            ("quality_weight", self.quality_weight),
            ("reputation_weight", self.reputation_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(EconError::InvalidParameter { name, value });
            }
        }
        if !self.min_unit_price.is_finite() || self.min_unit_price <= 0.0 {
            return Err(EconError::InvalidParameter {
                name: "min_unit_price",
                value: self.min_unit_price,
            });
        }
        if !self.max_unit_price.is_finite() || self.max_unit_price < self.min_unit_price {
            return Err(EconError::InvalidParameter {
                name: "max_unit_price",
                value: self.max_unit_price,
            });
        }
        Ok(())
    }
}

impl PricingModel for LinearPricing {
    fn attractiveness(&self, company: &Company, _price_level: f64) -> f64 {
        self.quality_weight * company.base_quality()
            + self.reputation_weight * company.reputation() / 100.0
    }

    fn unit_price(&self, price_level: f64) -> f64 {
        let level = if price_level.is_finite() { price_level.max(0.0) } else { 1.0 };
        self.min_unit_price + (self.max_unit_price - self.min_unit_price) * level
    }
}

/// A company's market presence for the day.
#[derive(Clone, Copy, Debug)]
pub struct Offer<'a> {
    /// Seller; its quality and reputation feed the pricing model.
    pub company: &'a Company,
    /// Price level after policy modifiers.
    pub price_level: f64,
}

/// What one company sold.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sale {
    /// Currency received from all segments.
    pub revenue: f64,
    /// Whole units delivered at the offer's unit price.
    pub units: u64,
}

/// What one segment bought.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Consumption {
    /// Currency the segment wanted to spend.
    pub budget: f64,
    /// Currency actually spent.
    pub spent: f64,
    /// Units bought (fractional across companies).
    pub units: f64,
    /// Spend-weighted mean `base_quality` of what was bought.
    pub mean_quality: f64,
    /// Units per currency relative to the reference price; 1.0 means the
    /// segment paid the reference price on average. Zero when nothing was
    /// spent.
    pub value_index: f64,
}

/// Result of one clearing round, index-aligned with its inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarketOutcome {
    /// One entry per offer.
    pub sales: Vec<Sale>,
    /// One entry per segment.
    pub consumption: Vec<Consumption>,
}

impl MarketOutcome {
    pub fn total_revenue(&self) -> f64 {
        self.sales.iter().map(|s| s.revenue).sum()
    }

    pub fn total_budget(&self) -> f64 {
        self.consumption.iter().map(|c| c.budget).sum()
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Clear the market for one day.
///
/// Deterministic for a fixed model. Conserves currency: the sum of all
/// revenue equals the sum of all budgets whenever there is at least one
/// offer; with no offers nothing is spent.
pub fn clear_market(
    model: &dyn PricingModel,
    segments: &[CitizenSegment],
    offers: &[Offer<'_>],
) -> MarketOutcome {
    let scores: Vec<f64> = offers
        .iter()
        .map(|o| sanitize(model.attractiveness(o.company, o.price_level)))
        .collect();
    let total_score: f64 = scores.iter().sum();
    let shares: Vec<f64> = if total_score > 0.0 {
        scores.iter().map(|s| s / total_score).collect()
    } else if offers.is_empty() {
        Vec::new()
    } else {
        vec![1.0 / offers.len() as f64; offers.len()]
    };
    let unit_prices: Vec<f64> = offers.iter().map(|o| model.unit_price(o.price_level)).collect();
    let reference_price = model.unit_price(REFERENCE_PRICE_LEVEL);

    let mut revenue = vec![0.0; offers.len()];
    let consumption: Vec<Consumption> = segments
        .iter()
        .map(|segment| {
            let budget = sanitize(segment.daily_budget());
            let mut bought = Consumption {
                budget,
                ..Consumption::default()
            };
            if budget == 0.0 || offers.is_empty() {
                return bought;
            }
            let mut quality_spend = 0.0;
            for (i, offer) in offers.iter().enumerate() {
                let spend = budget * shares[i];
                revenue[i] += spend;
                bought.spent += spend;
                if unit_prices[i] > 0.0 {
                    bought.units += spend / unit_prices[i];
                }
                quality_spend += spend * offer.company.base_quality();
            }
            if bought.spent > 0.0 {
                bought.mean_quality = quality_spend / bought.spent;
                bought.value_index = bought.units * reference_price / bought.spent;
            }
            trace!(segment = segment.id(), budget, units = bought.units, "segment cleared");
            bought
        })
        .collect();

    let sales: Vec<Sale> = revenue
        .into_iter()
        .zip(&unit_prices)
        .map(|(revenue, &price)| {
            let units = if price > 0.0 { (revenue / price).floor() as u64 } else { 0 };
            Sale { revenue, units }
        })
        .collect();

    MarketOutcome { sales, consumption }
}

/// Reconstruct what each segment bought from the sales already recorded on
/// the offered companies (`last_day_revenue`).
///
/// [`clear_market`] gives every segment the same company shares, so a
/// segment's basket is the market-wide basket scaled to its budget.
pub fn realized_consumption(
    model: &dyn PricingModel,
    segments: &[CitizenSegment],
    offers: &[Offer<'_>],
) -> Vec<Consumption> {
    let mut revenue = 0.0;
    let mut units = 0.0;
    let mut quality_spend = 0.0;
    for offer in offers {
        let spent = sanitize(offer.company.last_day_revenue());
        let price = model.unit_price(offer.price_level);
        revenue += spent;
        if price > 0.0 {
            units += spent / price;
        }
        quality_spend += spent * offer.company.base_quality();
    }
    let reference_price = model.unit_price(REFERENCE_PRICE_LEVEL);

    segments
        .iter()
        .map(|segment| {
            let budget = sanitize(segment.daily_budget());
            if revenue <= 0.0 || budget == 0.0 {
                return Consumption {
                    budget,
                    ..Consumption::default()
                };
            }
            let scale = budget / revenue;
            Consumption {
                budget,
                spent: budget,
                units: units * scale,
                mean_quality: quality_spend / revenue,
                value_index: units * reference_price / revenue,
            }
        })
        .collect()
}

/// Price level of `company` after the price modifiers of every policy in
/// force covering its sector.
pub fn effective_price_level(company: &Company, policies: &[Policy]) -> f64 {
    policies
        .iter()
        .filter(|p| p.is_in_force() && p.effect().applies_to(company.sector()))
        .fold(company.base_price_level(), |level, p| level * p.effect().price_modifier())
}

/// Share of revenue withheld from `company` by policies in force, in [0,1].
pub fn effective_tax_rate(company: &Company, policies: &[Policy]) -> f64 {
    let rate: f64 = policies
        .iter()
        .filter(|p| p.is_in_force() && p.effect().applies_to(company.sector()))
        .map(|p| p.effect().tax_rate_delta())
        .sum();
    rate.clamp(0.0, 1.0)
}
