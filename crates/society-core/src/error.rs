use std::fmt;
use thiserror::Error;

/// Entity collections a [`crate::WorldState`] must never be empty of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Stored in `companies`.
    Company,
    /// Stored in `parties`.
    Party,
    /// Stored in `citizen_segments`.
    CitizenSegment,
}

impl EntityKind {
    /// Name of the world field holding this kind of entity.
    pub fn field_name(self) -> &'static str {
        match self {
            EntityKind::Company => "companies",
            EntityKind::Party => "parties",
            EntityKind::CitizenSegment => "citizen_segments",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Company => "company",
            EntityKind::Party => "party",
            EntityKind::CitizenSegment => "citizen segment",
        };
        f.write_str(s)
    }
}

/// Validation errors for hard (reject-class) domain invariants.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Numeric field outside its accepted range.
    #[error("{field} must be {constraint}, got {value}")]
    OutOfRange {
        field: &'static str,
        constraint: &'static str,
        value: f64,
    },
    /// Numeric field is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    /// A policy cannot have more days left than it lasts.
    #[error("remaining_days ({remaining}) cannot exceed duration_days ({duration})")]
    RemainingExceedsDuration { remaining: u32, duration: u32 },
    /// World state constructed without any entity of a required kind.
    #[error("world state requires at least one {0}")]
    MissingEntities(EntityKind),
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. } | ValidationError::NonFinite { field } => {
                *field
            }
            ValidationError::RemainingExceedsDuration { .. } => "remaining_days",
            ValidationError::MissingEntities(kind) => kind.field_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entities_names_the_kind() {
        let err = ValidationError::MissingEntities(EntityKind::CitizenSegment);
        assert_eq!(err.to_string(), "world state requires at least one citizen segment");
        assert_eq!(err.field(), "citizen_segments");
    }

    #[test]
    fn out_of_range_reports_field() {
        let err = ValidationError::OutOfRange {
            field: "stock_price",
            constraint: "> 0",
            value: 0.0,
        };
        assert_eq!(err.field(), "stock_price");
        assert!(err.to_string().starts_with("stock_price must be > 0"));
    }
}
