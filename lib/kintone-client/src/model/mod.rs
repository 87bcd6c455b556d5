//! Typed representations of remote resources.
//!
//! The wire format transmits numeric identifiers and revisions as JSON
//! strings; the [`stringified`] helpers decode both spellings and always
//! encode back to strings, so the Rust surface stays numeric.

pub mod app;
pub mod field;
pub mod layout;

pub use app::*;
pub use field::*;
pub use layout::*;

/// Serde adapter for numbers that travel as JSON strings.
///
/// Accepts `"42"` or `42` on input and emits `"42"` on output. Apply with
/// `#[serde(with = "crate::model::stringified")]` on `i64` fields, or the
/// [`option`](stringified::option) submodule for `Option<i64>`.
pub(crate) mod stringified {
    use serde::Deserialize;
    use serde::de::{Deserializer, Error};
    use serde::ser::Serializer;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    impl StringOrNumber {
        fn into_i64<E: Error>(self) -> Result<i64, E> {
            match self {
                Self::Number(value) => Ok(value),
                Self::String(text) => text.parse().map_err(|_| {
                    E::invalid_value(serde::de::Unexpected::Str(&text), &"a stringified integer")
                }),
            }
        }
    }

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        StringOrNumber::deserialize(deserializer)?.into_i64()
    }

    pub mod option {
        use serde::de::{Deserialize, Deserializer};
        use serde::ser::Serializer;

        use super::StringOrNumber;

        pub fn serialize<S: Serializer>(
            value: &Option<i64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.collect_str(value),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<i64>, D::Error> {
            Option::<StringOrNumber>::deserialize(deserializer)?
                .map(StringOrNumber::into_i64)
                .transpose()
        }
    }
}
