#![deny(warnings)]

//! Economic and social models for SocietySim.
//!
//! This crate provides the pluggable collaborators of the daily pipeline:
//! - Market clearing with a [`PricingModel`] (default [`LinearPricing`])
//! - End-of-day entity updates with a [`DynamicsModel`] (default [`TrendDynamics`])
//! - Sector exposure of citizen segments with a [`SectorAffinity`] rule
//!   (default [`WealthAffinity`])

use thiserror::Error;

pub mod affinity;
pub mod dynamics;
pub mod market;

pub use affinity::{is_essential, SectorAffinity, WealthAffinity};
pub use dynamics::{alignment, DynamicsModel, TrendDynamics};
pub use market::{
    clear_market, effective_price_level, effective_tax_rate, realized_consumption, Consumption,
    LinearPricing, MarketOutcome, Offer, PricingModel, Sale, REFERENCE_PRICE_LEVEL,
};

/// Errors produced when validating model parameters.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// Parameter outside its accepted range.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
