/// Deserializes a `null` as the [`Default`] value of the type.
///
/// Use together with `#[serde(default)]` so that both a missing field
/// and an explicit `null` end up as the default.
pub mod null_as_default {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
