//! Unique identifier types for parking records
//!
//! Every stored entity carries a UUID-backed identifier with a short type
//! prefix in its display and wire form (`FAC_…`, `ACC_…`), so a bare id in a
//! log line or an error message is always attributable to an entity kind.
//! Identifiers order by their underlying UUID, which is what gives listings
//! their deterministic ascending-id order.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0.simple())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                // Accept the prefixed form, falling back to a raw UUID.
                let raw = s.strip_prefix($prefix).unwrap_or(&s);
                let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
                Ok($name(uuid))
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a principal (admin or employee)
    UserId,
    "USR_"
);

entity_id!(
    /// Unique identifier for a parking facility
    FacilityId,
    "FAC_"
);

entity_id!(
    /// Unique identifier for a scheduled flat-rate event
    EventId,
    "EVT_"
);

entity_id!(
    /// Unique identifier for a vehicle's parking session
    AccessId,
    "ACC_"
);

entity_id!(
    /// Unique identifier for a billing ledger entry
    LedgerEntryId,
    "LGR_"
);
