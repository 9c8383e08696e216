//! Campos anulables en updates parciales

use serde::{Deserialize, Deserializer};

/// Distingue un campo ausente (`None`) de un `null` explícito (`Some(None)`).
///
/// Se usa junto con `#[serde(default)]` para que la ausencia quede en `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
