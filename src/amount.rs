use std::fmt;
use std::iter::Sum;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 10_000;
    const BPS_DENOM: i128 = 10_000;

    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    /// Whole currency units, no fractional part.
    pub fn from_units(value: i64) -> Self {
        Amount(value * Self::SCALE)
    }

    /// Percentage of this amount expressed in basis points (1800 = 18%),
    /// rounded half-up at the fixed-point scale.
    pub fn percent_bps(self, bps: i64) -> Self {
        let scaled = self.0 as i128 * bps as i128;
        let half = Self::BPS_DENOM / 2;
        let rounded = if scaled >= 0 {
            (scaled + half) / Self::BPS_DENOM
        } else {
            (scaled - half) / Self::BPS_DENOM
        };
        Amount(rounded as i64)
    }

    /// Round half-up to whole currency units. Display-time rounding only;
    /// intermediate arithmetic stays at full precision.
    pub fn to_units(self) -> i64 {
        let half = Self::SCALE / 2;
        if self.0 >= 0 {
            (self.0 + half) / Self::SCALE
        } else {
            (self.0 - half) / Self::SCALE
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / Self::SCALE;
        let frac = abs % Self::SCALE;
        write!(f, "{sign}{whole}.{frac:04}")
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::Mul<i64> for Amount {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Amount(self.0 * rhs)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::default(), std::ops::Add::add)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / Self::SCALE as f64)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Ok(Amount::from_float(value))
    }
}
