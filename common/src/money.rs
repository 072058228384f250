//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize)
)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    #[cfg_attr(feature = "serde", serde(default))]
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] of the provided `amount` and `currency`.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero [`Money`] amount in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Adds the `other` amount to this one.
    ///
    /// [`None`] is returned if the currencies differ or the sum overflows.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.currency != other.currency {
            return None;
        }
        Some(Self::new(
            self.amount.checked_add(other.amount)?,
            self.currency,
        ))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        match amount.to_i128().filter(|_| amount.is_integer()) {
            Some(int) => write!(f, "{int}{currency}"),
            None => write!(f, "{amount}{currency}"),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    #[case = "SCREAMING_SNAKE_CASE"]
    #[cfg_attr(
        feature = "serde",
        derive(serde::Deserialize, serde::Serialize),
        serde(rename_all = "SCREAMING_SNAKE_CASE")
    )]
    enum Currency {
        #[doc = "Indian Rupee."]
        Inr = 1,

        #[doc = "US Dollar."]
        Usd = 2,

        #[doc = "Euro."]
        Eur = 3,
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::Inr
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn money(amount: &str, currency: Currency) -> Money {
        Money::new(amount.parse::<Decimal>().unwrap(), currency)
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("499.50INR").unwrap(),
            money("499.50", Currency::Inr),
        );
        assert_eq!(
            Money::from_str("12.5usd").unwrap(),
            money("12.5", Currency::Usd),
        );
        assert_eq!(Money::from_str("800EUR").unwrap(), money("800", Currency::Eur));

        assert!(Money::from_str("800").is_err());
        assert!(Money::from_str("800IN").is_err());
        assert!(Money::from_str("800Rupees").is_err());
        assert!(Money::from_str("₹800").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(money("1000.00", Currency::Inr).to_string(), "1000INR");
        assert_eq!(money("99.90", Currency::Usd).to_string(), "99.90USD");
        assert_eq!(money("0", Currency::Eur).to_string(), "0EUR");
    }

    #[test]
    fn adds_same_currency_only() {
        let sum = money("500", Currency::Inr)
            .checked_add(money("250.5", Currency::Inr))
            .unwrap();
        assert_eq!(sum, money("750.5", Currency::Inr));

        assert_eq!(
            money("500", Currency::Inr).checked_add(money("1", Currency::Usd)),
            None,
        );
    }

    #[test]
    fn defaults_to_rupees() {
        assert_eq!(Currency::default(), Currency::Inr);
        assert_eq!(Money::zero(Currency::default()).to_string(), "0INR");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_plain_numbers() {
        let m: Money = serde_json::from_str(r#"{"amount": 1200}"#).unwrap();
        assert_eq!(m, money("1200", Currency::Inr));

        let m: Money =
            serde_json::from_str(r#"{"amount": 9.5, "currency": "USD"}"#)
                .unwrap();
        assert_eq!(m, money("9.5", Currency::Usd));
    }
}
