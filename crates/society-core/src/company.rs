use crate::enums::Sector;
use crate::error::ValidationError;
use crate::validate::{clamp_score, non_negative, positive, unit_interval};
use serde::{Deserialize, Serialize};

/// Smallest stock price the simulation will settle on.
pub const MIN_STOCK_PRICE: f64 = 0.01;

fn default_reputation() -> f64 {
    50.0
}

fn default_stock_price() -> f64 {
    100.0
}

fn default_cash() -> f64 {
    1_000_000.0
}

/// Construction input for [`Company`].
///
/// Optional fields fall back to the values a freshly founded company starts
/// with, both when built through [`CompanySpec::new`] and when decoded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanySpec {
    /// Unique key within a world, e.g. `tech-001`.
    pub id: String,
    /// Display name.
    pub name: String,
    pub sector: Sector,
    /// Product quality in [0,1].
    pub base_quality: f64,
    /// Relative price level in [0,1] (0 = cheap, 1 = expensive).
    pub base_price_level: f64,
    #[serde(default = "default_reputation")]
    pub reputation: f64,
    #[serde(default = "default_stock_price")]
    pub stock_price: f64,
    #[serde(default = "default_cash")]
    pub cash: f64,
    #[serde(default)]
    pub last_day_units_sold: u64,
    #[serde(default)]
    pub last_day_revenue: f64,
}

impl CompanySpec {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sector: Sector,
        base_quality: f64,
        base_price_level: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sector,
            base_quality,
            base_price_level,
            reputation: default_reputation(),
            stock_price: default_stock_price(),
            cash: default_cash(),
            last_day_units_sold: 0,
            last_day_revenue: 0.0,
        }
    }
}

/// A company selling to every citizen segment.
///
/// Reputation is clamped into `[0, 100]`; every other numeric field is
/// rejected when out of range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CompanySpec")]
pub struct Company {
    id: String,
    name: String,
    sector: Sector,
    base_quality: f64,
    base_price_level: f64,
    reputation: f64,
    stock_price: f64,
    cash: f64,
    last_day_units_sold: u64,
    last_day_revenue: f64,
}

impl TryFrom<CompanySpec> for Company {
    type Error = ValidationError;

    fn try_from(spec: CompanySpec) -> Result<Self, Self::Error> {
        Company::new(spec)
    }
}

impl Company {
    pub fn new(spec: CompanySpec) -> Result<Self, ValidationError> {
        Ok(Self {
            base_quality: unit_interval("base_quality", spec.base_quality)?,
            base_price_level: unit_interval("base_price_level", spec.base_price_level)?,
            reputation: clamp_score(spec.reputation),
            stock_price: positive("stock_price", spec.stock_price)?,
            cash: non_negative("cash", spec.cash)?,
            last_day_units_sold: spec.last_day_units_sold,
            last_day_revenue: non_negative("last_day_revenue", spec.last_day_revenue)?,
            id: spec.id,
            name: spec.name,
            sector: spec.sector,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    /// Product quality in [0,1].
    pub fn base_quality(&self) -> f64 {
        self.base_quality
    }

    /// Price level before policy modifiers, in [0,1].
    pub fn base_price_level(&self) -> f64 {
        self.base_price_level
    }

    /// Public standing in [0,100].
    pub fn reputation(&self) -> f64 {
        self.reputation
    }

    /// Always at least [`MIN_STOCK_PRICE`] once the simulation has run.
    pub fn stock_price(&self) -> f64 {
        self.stock_price
    }

    /// Cash on hand, never negative.
    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Units sold in the most recent market clearing.
    pub fn last_day_units_sold(&self) -> u64 {
        self.last_day_units_sold
    }

    /// Gross revenue of the most recent market clearing, before taxes.
    pub fn last_day_revenue(&self) -> f64 {
        self.last_day_revenue
    }

    /// Replace reputation, clamped into `[0, 100]`.
    pub fn with_reputation(self, reputation: f64) -> Self {
        Self {
            reputation: clamp_score(reputation),
            ..self
        }
    }

    pub fn try_with_stock_price(self, stock_price: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            stock_price: positive("stock_price", stock_price)?,
            ..self
        })
    }

    pub fn try_with_cash(self, cash: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            cash: non_negative("cash", cash)?,
            ..self
        })
    }

    pub fn try_with_sales(self, units: u64, revenue: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            last_day_units_sold: units,
            last_day_revenue: non_negative("last_day_revenue", revenue)?,
            ..self
        })
    }

    /// Simulation-time stock price update: floors at [`MIN_STOCK_PRICE`].
    /// A non-finite input leaves the price unchanged.
    pub fn with_stock_price_floored(self, stock_price: f64) -> Self {
        if stock_price.is_nan() || stock_price == f64::INFINITY {
            return self;
        }
        Self {
            stock_price: stock_price.max(MIN_STOCK_PRICE),
            ..self
        }
    }

    /// Simulation-time cash update: floors at zero. A non-finite input
    /// leaves cash unchanged.
    pub fn with_cash_saturating(self, cash: f64) -> Self {
        if cash.is_nan() || cash == f64::INFINITY {
            return self;
        }
        Self {
            cash: cash.max(0.0),
            ..self
        }
    }

    /// Simulation-time sales update; negative or NaN revenue settles at zero.
    pub fn with_sales(self, units: u64, revenue: f64) -> Self {
        let revenue = if revenue.is_finite() { revenue.max(0.0) } else { 0.0 };
        Self {
            last_day_units_sold: units,
            last_day_revenue: revenue,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spec() -> CompanySpec {
        CompanySpec::new("tech-001", "Test Corp", Sector::Technology, 0.7, 0.5)
    }

    #[test]
    fn defaults_apply() {
        let c = Company::new(spec()).unwrap();
        assert_eq!(c.reputation(), 50.0);
        assert_eq!(c.stock_price(), 100.0);
        assert_eq!(c.cash(), 1_000_000.0);
        assert_eq!(c.last_day_units_sold(), 0);
        assert_eq!(c.last_day_revenue(), 0.0);
    }

    #[test]
    fn decode_fills_defaults() {
        let json =
            r#"{"id":"x","name":"X","sector":"food","base_quality":0.5,"base_price_level":0.5}"#;
        let c: Company = serde_json::from_str(json).unwrap();
        assert_eq!(c, Company::new(CompanySpec::new("x", "X", Sector::Food, 0.5, 0.5)).unwrap());
    }

    #[test]
    fn reputation_is_clamped_not_rejected() {
        let low = Company::new(CompanySpec {
            reputation: -10.0,
            ..spec()
        })
        .unwrap();
        let high = Company::new(CompanySpec {
            reputation: 150.0,
            ..spec()
        })
        .unwrap();
        assert_eq!(low.reputation(), 0.0);
        assert_eq!(high.reputation(), 100.0);
        assert_eq!(high.with_reputation(-1.0).reputation(), 0.0);
    }

    #[test]
    fn stock_price_must_be_positive() {
        let zero = Company::new(CompanySpec {
            stock_price: 0.0,
            ..spec()
        })
        .unwrap_err();
        assert_eq!(zero.field(), "stock_price");
        let negative = CompanySpec {
            stock_price: -5.0,
            ..spec()
        };
        assert!(Company::new(negative).is_err());
        let c = Company::new(spec()).unwrap();
        assert!(c.try_with_stock_price(0.0).is_err());
    }

    #[test]
    fn quality_and_price_level_are_rejected_out_of_range() {
        let err = Company::new(CompanySpec {
            base_quality: 1.5,
            ..spec()
        })
        .unwrap_err();
        assert_eq!(err.field(), "base_quality");
        let err = Company::new(CompanySpec {
            base_price_level: -0.1,
            ..spec()
        })
        .unwrap_err();
        assert_eq!(err.field(), "base_price_level");
    }

    #[test]
    fn cash_and_revenue_reject_negative() {
        let err = Company::new(CompanySpec {
            cash: -1.0,
            ..spec()
        })
        .unwrap_err();
        assert_eq!(err.field(), "cash");
        let c = Company::new(spec()).unwrap();
        assert!(c.clone().try_with_cash(-0.5).is_err());
        assert!(c.try_with_sales(3, -1.0).is_err());
    }

    #[test]
    fn decode_rejects_invalid_stock_price() {
        let json = r#"{
            "id": "x",
            "name": "X",
            "sector": "food",
            "base_quality": 0.5,
            "base_price_level": 0.5,
            "stock_price": 0.0
        }"#;
        assert!(serde_json::from_str::<Company>(json).is_err());
    }

    #[test]
    fn saturating_updates_stay_valid() {
        let c = Company::new(spec()).unwrap();
        let c = c.with_stock_price_floored(-20.0).with_cash_saturating(-1e9);
        assert_eq!(c.stock_price(), MIN_STOCK_PRICE);
        assert_eq!(c.cash(), 0.0);
        let c = c.with_sales(10, f64::NAN);
        assert_eq!(c.last_day_revenue(), 0.0);
        assert_eq!(c.last_day_units_sold(), 10);
        let c = c.with_stock_price_floored(f64::NAN);
        assert_eq!(c.stock_price(), MIN_STOCK_PRICE);
    }

    proptest! {
        #[test]
        fn reputation_always_within_bounds(r in -1.0e4f64..1.0e4) {
            let c = Company::new(CompanySpec {
                reputation: r,
                ..spec()
            })
            .unwrap();
            prop_assert!((0.0..=100.0).contains(&c.reputation()));
            if r < 0.0 {
                prop_assert_eq!(c.reputation(), 0.0);
            }
            if r > 100.0 {
                prop_assert_eq!(c.reputation(), 100.0);
            }
        }
    }
}
