use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative currency amount stored as whole cents.
///
/// Serialized as decimal dollars (`7.99`) so menu and cart files stay
/// readable; parsing rounds to the nearest cent and rejects amounts above
/// `Money::MAX`. Arithmetic saturates at `u64::MAX` cents instead of
/// overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount accepted from a menu or cart file ($10 trillion).
    pub const MAX: Money = Money(1_000_000_000_000_000);

    pub const fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    /// Convert a dollar amount, rounding to the nearest cent. Negative and
    /// NaN inputs clamp to zero; anything above `Money::MAX` clamps to it.
    pub fn from_dollars(dollars: f64) -> Self {
        if dollars.is_nan() || dollars <= 0.0 {
            return Money::ZERO;
        }
        Self::cents_from_dollars(dollars).map_or(Money::MAX, Money)
    }

    /// Whole cents for a non-negative dollar amount, or `None` past `MAX`.
    fn cents_from_dollars(dollars: f64) -> Option<u64> {
        let cents = (dollars * 100.0).round();
        if cents.is_finite() && cents <= Money::MAX.0 as f64 {
            Some(cents as u64)
        } else {
            None
        }
    }

    #[inline]
    pub const fn cents(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Apply a rate in basis points, rounding half-up to the cent.
    ///
    /// 850 bps on $11.99 is 101.915 cents, which rounds to $1.02.
    pub fn apply_rate_bps(self, bps: u32) -> Money {
        let scaled = (u128::from(self.0) * u128::from(bps) + 5_000) / 10_000;
        Money(u64::try_from(scaled).unwrap_or(u64::MAX))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    /// Stops at zero.
    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        if dollars.is_nan() || dollars < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "currency amount must be non-negative, got {dollars}"
            )));
        }
        Money::cents_from_dollars(dollars).map(Money).ok_or_else(|| {
            serde::de::Error::custom(format!("currency amount {dollars} exceeds {}", Money::MAX))
        })
    }
}
