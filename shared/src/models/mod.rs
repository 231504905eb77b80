//! Data models shared between the server and its clients

/// Declare a closed enum that travels on the wire as a fixed label.
///
/// Every variant is paired with exactly one label in `ALL`, and both
/// directions of the mapping are derived from that table. Unknown labels
/// are rejected during deserialization.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Variant ↔ label table
            pub const ALL: &'static [($name, &'static str)] = &[
                $( ($name::$variant, $label) ),+
            ];

            /// Wire label for this variant
            pub fn label(self) -> &'static str {
                Self::ALL
                    .iter()
                    .find(|(variant, _)| *variant == self)
                    .map(|(_, label)| *label)
                    .unwrap_or_default()
            }

            /// Look a variant up by its wire label
            pub fn from_label(label: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .find(|(_, l)| *l == label)
                    .map(|(variant, _)| *variant)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_label(s).ok_or_else(|| $crate::models::UnknownLabel {
                    kind: stringify!($name),
                    value: s.to_string(),
                })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub mod reservation;

pub use reservation::{
    Agency, Channel, InvalidReservation, Reservation, ReservationCreate, ReservationStatus,
    ReservationUpdate,
};

/// A label that does not belong to the enumeration it was parsed as
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}
