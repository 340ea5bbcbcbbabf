use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::errors::CoreError;

/// Decimals used by fund share tokens and WETH-denominated values.
pub const SHARE_DECIMALS: u8 = 18;

/// Display precision used throughout the dashboard.
pub const DEFAULT_DISPLAY_PRECISION: u8 = 6;

/// An unsigned fixed-point on-chain quantity (e.g. wei).
///
/// The subgraph returns these as `BigInt` strings. `raw` holds the integer
/// as stored on chain; the human value is `raw / 10^decimals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenQuantity {
    raw: u128,
    decimals: u8,
}

impl TokenQuantity {
    pub fn new(raw: u128, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Quantity with the 18 decimals of a fund share token.
    pub fn shares(raw: u128) -> Self {
        Self::new(raw, SHARE_DECIMALS)
    }

    /// Parse a raw integer string as returned by the subgraph.
    pub fn parse(raw: &str, decimals: u8) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        let value = trimmed.parse::<u128>().map_err(|e| {
            CoreError::Deserialization(format!("Invalid token quantity '{trimmed}': {e}"))
        })?;
        Ok(Self::new(value, decimals))
    }

    #[must_use]
    pub fn raw(&self) -> u128 {
        self.raw
    }

    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Format with exactly `precision` fractional digits, truncating
    /// (never rounding up) the remainder.
    #[must_use]
    pub fn to_fixed(&self, precision: u8) -> String {
        let digits = self.raw.to_string();
        let decimals = usize::from(self.decimals);

        let (int_part, frac_part) = if digits.len() > decimals {
            let split = digits.len() - decimals;
            (digits[..split].to_string(), digits[split..].to_string())
        } else {
            ("0".to_string(), format!("{digits:0>decimals$}"))
        };

        let precision = usize::from(precision);
        if precision == 0 {
            return int_part;
        }
        let mut frac: String = frac_part.chars().take(precision).collect();
        while frac.len() < precision {
            frac.push('0');
        }
        format!("{int_part}.{frac}")
    }

    /// Lossy conversion for charting.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.raw as f64 / 10f64.powi(i32::from(self.decimals))
    }
}

impl Default for TokenQuantity {
    fn default() -> Self {
        Self::shares(0)
    }
}

impl fmt::Display for TokenQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed(DEFAULT_DISPLAY_PRECISION))
    }
}

impl Serialize for TokenQuantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw.to_string())
    }
}

/// Deserializes as an 18-decimal quantity; fields with other decimals
/// should be rebuilt with [`TokenQuantity::new`].
impl<'de> Deserialize<'de> for TokenQuantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = de::u128_from_string_or_number(deserializer)?;
        Ok(Self::shares(raw))
    }
}

/// Serde helpers for subgraph scalars. `BigInt` and `BigDecimal` arrive as
/// JSON strings; some deployments send plain numbers instead.
pub mod de {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Str(String),
        Int(u64),
        Signed(i64),
        Float(f64),
    }

    pub fn u128_from_string_or_number<'de, D>(deserializer: D) -> Result<u128, D::Error>
    where
        D: Deserializer<'de>,
    {
        match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::Str(s) => s.trim().parse::<u128>().map_err(D::Error::custom),
            StringOrNumber::Int(n) => Ok(u128::from(n)),
            StringOrNumber::Signed(n) => u128::try_from(n).map_err(D::Error::custom),
            StringOrNumber::Float(f) => Err(D::Error::custom(format!(
                "expected an integer quantity, got {f}"
            ))),
        }
    }

    /// Unix timestamp in seconds.
    pub fn timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::Str(s) => s.trim().parse::<i64>().map_err(D::Error::custom),
            StringOrNumber::Int(n) => i64::try_from(n).map_err(D::Error::custom),
            StringOrNumber::Signed(n) => Ok(n),
            StringOrNumber::Float(f) => Err(D::Error::custom(format!(
                "expected an integer timestamp, got {f}"
            ))),
        }
    }

    pub fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::Str(s) => s.trim().parse::<f64>().map_err(D::Error::custom),
            StringOrNumber::Int(n) => Ok(n as f64),
            StringOrNumber::Signed(n) => Ok(n as f64),
            StringOrNumber::Float(f) => Ok(f),
        }
    }
}
