//! Declarative helpers for the closed vocabularies and payload unions.

/// Declares a closed string vocabulary.
///
/// Generates the enum plus `ALL`, `as_str`, `Display`, `FromStr` (unknown values
/// become `ContractError::UnknownValue` labelled with `$label`) and a string
/// serde representation.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($label:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every member of the set, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = orchestration_core::ContractError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(orchestration_core::ContractError::unknown_value($label, other)),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Declares a payload union keyed by a name vocabulary.
///
/// Variant identifiers must match the name enum's variants one-to-one; a name
/// without a payload variant fails to compile.
macro_rules! payload_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident keyed by $key:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty),
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize)]
        #[serde(untagged)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        impl $name {
            /// The name this payload travels under.
            pub fn name(&self) -> $key {
                match self {
                    $($name::$variant(_) => $key::$variant,)+
                }
            }

            /// Build the payload registered for `name` from raw JSON.
            pub fn from_parts(
                name: $key,
                payload: serde_json::Value,
            ) -> orchestration_core::ContractResult<Self> {
                match name {
                    $(
                        $key::$variant => serde_json::from_value::<$ty>(payload)
                            .map($name::$variant)
                            .map_err(|e| orchestration_core::ContractError::invalid_payload(name.as_str(), e)),
                    )+
                }
            }

            pub fn to_value(&self) -> orchestration_core::ContractResult<serde_json::Value> {
                let value = match self {
                    $($name::$variant(p) => serde_json::to_value(p),)+
                };
                value.map_err(|e| orchestration_core::ContractError::invalid_payload(self.name().as_str(), e))
            }
        }
    };
}
