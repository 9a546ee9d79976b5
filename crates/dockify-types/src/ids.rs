//! Type-safe identifier wrappers around `i64`.
//!
//! Entities (users) and observations are both keyed by `BIGINT` columns in
//! `PostgreSQL`. Wrapping them in distinct newtypes prevents passing an
//! observation id where an entity id is expected.
//!
//! Observation ids are assigned by the store (`BIGSERIAL`) and increase
//! monotonically with insertion order, so they double as a recency key.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around `i64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(#[ts(type = "number")] pub i64);

        impl $name {
            /// Wrap a raw database identifier.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Return the inner `i64` value.
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of the entity (a user) that reports locations.
    EntityId
}

define_id! {
    /// Store-assigned identifier of a single location observation.
    ObservationId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_by_inner_value() {
        assert!(ObservationId::new(1) < ObservationId::new(2));
        assert!(EntityId::new(-3) < EntityId::new(0));
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&EntityId::new(42)).ok();
        assert_eq!(json.as_deref(), Some("42"));

        let parsed: Option<ObservationId> = serde_json::from_str("7").ok();
        assert_eq!(parsed, Some(ObservationId::new(7)));
    }

    #[test]
    fn display_matches_inner_value() {
        assert_eq!(EntityId::new(15).to_string(), "15");
    }
}
