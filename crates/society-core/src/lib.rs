#![deny(warnings)]

//! Core domain models and invariants for SocietySim.
//!
//! This crate defines the serializable entities of the simulation (companies,
//! parties, citizen segments, events, policies, day summaries) and the
//! [`WorldState`] that holds them for one simulated day. Constructors
//! validate every hard invariant; score fields are clamped instead.

pub mod citizen;
pub mod company;
pub mod enums;
pub mod error;
pub mod event;
pub mod factory;
pub mod party;
pub mod policy;
pub mod summary;
pub mod validate;
pub mod world;

pub use citizen::{CitizenSegment, CitizenSegmentSpec};
pub use company::{Company, CompanySpec, MIN_STOCK_PRICE};
pub use enums::{EventType, IdeologicalBias, Sector};
pub use error::{EntityKind, ValidationError};
pub use event::{Event, EventEffect};
pub use factory::{create_initial_world, try_create_initial_world};
pub use party::{Party, PartySpec};
pub use policy::{Policy, PolicyEffect, PolicyEffectSpec, PolicySpec};
pub use summary::{CompanySummary, DaySummary, DaySummarySpec, PartySummary};
pub use validate::clamp_score;
pub use world::{WorldSpec, WorldState};
