//! Serde helpers for partial updates.

use serde::{Deserialize, Deserializer};

/// Deserialize a present field as `Some`, so `Option<Option<T>>` can tell
/// an explicit `null` (`Some(None)`) from an absent key (`None`).
///
/// Pair with `#[serde(default)]`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
