use std::num::ParseFloatError;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    #[error("Parsing amount '{text}': {source}")]
    Parse {
        text: String,
        source: ParseFloatError,
    },
    #[error("Amount '{0}' is not a finite number")]
    NotFinite(String),
    #[error("Unsupported JSON value for an amount: {0}")]
    Unsupported(Value),
}

/// A monetary value as sent by the upstream reporting API.
///
/// The API is inconsistent and sends the same field either as a JSON number
/// or as a JSON string holding a number, depending on the record.
/// Anything else (`null`, bools, arrays, objects) ends up in
/// [`Amount::Unsupported`] instead of failing the whole response.
///
/// An absent field is treated as `null`.
///
/// ```
/// use primitives::Amount;
/// use serde_json::json;
///
/// let text: Amount = serde_json::from_value(json!("123.45")).unwrap();
/// let number: Amount = serde_json::from_value(json!(123.45)).unwrap();
///
/// assert_eq!(123.45, text.or_zero());
/// assert_eq!(123.45, number.or_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
    Unsupported(Value),
}

impl Default for Amount {
    fn default() -> Self {
        Self::Unsupported(Value::Null)
    }
}

impl Amount {
    /// Amounts are passed through unscaled, there is no conversion to cents.
    pub fn to_f64(&self) -> Result<f64, AmountError> {
        match self {
            Amount::Number(number) => Ok(*number),
            Amount::Text(text) => {
                let number = text.parse::<f64>().map_err(|source| AmountError::Parse {
                    text: text.clone(),
                    source,
                })?;

                if number.is_finite() {
                    Ok(number)
                } else {
                    Err(AmountError::NotFinite(text.clone()))
                }
            }
            Amount::Unsupported(value) => Err(AmountError::Unsupported(value.clone())),
        }
    }

    pub fn or_zero(&self) -> f64 {
        self.to_f64().unwrap_or(0.0)
    }
}

impl From<f64> for Amount {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for Amount {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}
